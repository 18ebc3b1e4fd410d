//! Partitioning of a grid into blocks of fixed size.
//!
//! Blocks are numbered with the block column `i` varying fastest. Every
//! block has the same number of voxels; blocks at the far edge of the grid
//! may extend past it, in which case the voxels outside are left at zero
//! when extracted and ignored when stored back.

use crate::error::{Result, VolumeError};
use crate::object::ReaderOptions;
use crate::sampling::Sampling;
use crate::volume::Volume;
use crate::writer::WriterOptions;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Splits the volumes of a grid into blocks, and puts them back together.
///
/// # Example
///
/// ```
/// use voxkit::{Sampling, Volume, VolumeBlocker};
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [10, 10, 3])?;
/// let volume = Volume::new(sampling.clone(), 1);
/// let blocker = VolumeBlocker::new(sampling, [4, 4, 0]);
/// assert_eq!(blocker.block_counts(), [3, 3, 1]);
///
/// let mut rebuilt = Volume::new(volume.sampling().clone(), 1);
/// for idx in 0..blocker.num_blocks() {
///     let block = blocker.get_block(&volume, idx)?;
///     blocker.set_block(&mut rebuilt, idx, &block)?;
/// }
/// assert_eq!(rebuilt, volume);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBlocker {
    sampling: Sampling,
    sizes: [usize; 3],
    counts: [usize; 3],
}

impl VolumeBlocker {
    /// Partition `sampling` into blocks of `sizes` voxels. A size of zero
    /// covers the whole axis with a single block.
    pub fn new(sampling: Sampling, sizes: [usize; 3]) -> Self {
        let n = sampling.counts();
        let mut block_sizes = sizes;
        let mut counts = [1; 3];
        for a in 0..3 {
            if block_sizes[a] == 0 {
                block_sizes[a] = n[a];
            }
            counts[a] = (n[a] + block_sizes[a] - 1) / block_sizes[a];
        }
        VolumeBlocker {
            sampling,
            sizes: block_sizes,
            counts,
        }
    }

    /// The grid being partitioned.
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// Number of voxels of every block along each axis.
    pub fn block_size(&self) -> [usize; 3] {
        self.sizes
    }

    /// Number of blocks along each axis.
    pub fn block_counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Total number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.counts.iter().product()
    }

    /// The voxel of the full grid where block `idx` starts.
    pub fn block_start(&self, idx: usize) -> Result<[usize; 3]> {
        if idx >= self.num_blocks() {
            return Err(VolumeError::OutOfBounds(idx, self.num_blocks()));
        }
        let [ci, cj, _] = self.counts;
        let (i, j, k) = (idx % ci, (idx / ci) % cj, idx / (ci * cj));
        Ok([i * self.sizes[0], j * self.sizes[1], k * self.sizes[2]])
    }

    /// The grid of block `idx`, sharing spacing and rotation with the full
    /// grid, with its origin at the world position of the first voxel.
    pub fn block_sampling(&self, idx: usize) -> Result<Sampling> {
        let start = self.block_start(idx)?;
        self.sampling.range(start, self.sizes)
    }

    fn check_volume(&self, volume: &Volume) -> Result<()> {
        if volume.sampling().counts() == self.sampling.counts() {
            Ok(())
        } else {
            Err(VolumeError::IncompatibleSampling)
        }
    }

    /// Copy block `idx` out of a volume on the full grid.
    pub fn get_block(&self, volume: &Volume, idx: usize) -> Result<Volume> {
        self.check_volume(volume)?;
        let [si, sj, sk] = self.block_start(idx)?;
        let mut block = Volume::new(self.block_sampling(idx)?, volume.channels())
            .with_value_type(volume.value_type());
        let mut values = vec![0.; volume.channels()];
        for [i, j, k] in block.sampling().clone().indices() {
            let (vi, vj, vk) = (i + si, j + sj, k + sk);
            if self.sampling.contains(vi as isize, vj as isize, vk as isize) {
                volume.voxel_into(vi, vj, vk, &mut values);
                block.set_voxel(i, j, k, &values);
            }
        }
        Ok(block)
    }

    /// Store block `idx` into a volume on the full grid, skipping the
    /// block voxels which fall outside of it.
    pub fn set_block(&self, volume: &mut Volume, idx: usize, block: &Volume) -> Result<()> {
        self.check_volume(volume)?;
        if block.sampling().counts() != self.sizes {
            return Err(VolumeError::IncompatibleSampling);
        }
        if block.channels() != volume.channels() {
            return Err(VolumeError::ChannelMismatch(volume.channels(), block.channels()));
        }
        let [si, sj, sk] = self.block_start(idx)?;
        let mut values = vec![0.; block.channels()];
        for [i, j, k] in block.sampling().indices() {
            let (vi, vj, vk) = (i + si, j + sj, k + sk);
            if self.sampling.contains(vi as isize, vj as isize, vk as isize) {
                block.voxel_into(i, j, k, &mut values);
                volume.set_voxel(vi, vj, vk, &values);
            }
        }
        Ok(())
    }

    /// Write every block of a volume to its own file, named by `path_of`
    /// from the block index. Missing parent directories are created.
    pub fn write_blocks<F>(&self, volume: &Volume, path_of: F) -> Result<()>
    where
        F: Fn(usize) -> PathBuf,
    {
        let blocks = self.num_blocks();
        for idx in 0..blocks {
            let block = self.get_block(volume, idx)?;
            let path = path_of(idx);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            debug!("...writing block ({}/{}) to {}", idx + 1, blocks, path.display());
            WriterOptions::new(&path).write_volume(&block)?;
        }
        Ok(())
    }

    /// Assemble a volume on the full grid from the block files named by
    /// `path_of`. Missing blocks are left at zero when `skip_missing` is
    /// set, and are an error otherwise.
    ///
    /// # Errors
    ///
    /// - `MissingVolumeFile` if a block file does not exist and `skip_missing` is unset.
    /// - `NoVolumeData` if no block file exists at all.
    pub fn read_blocks<F>(&self, path_of: F, skip_missing: bool) -> Result<Volume>
    where
        F: Fn(usize) -> PathBuf,
    {
        let blocks = self.num_blocks();
        let mut volume: Option<Volume> = None;
        for idx in 0..blocks {
            let path = path_of(idx);
            if !path.is_file() {
                if !skip_missing {
                    return Err(VolumeError::MissingVolumeFile(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("block not found: {}", path.display()),
                    )));
                }
                info!("...skipping block ({}/{})", idx + 1, blocks);
                continue;
            }

            debug!("...reading block ({}/{}) from {}", idx + 1, blocks, path.display());
            let block = ReaderOptions::new().read_file(&path)?.into_volume();
            let target = volume.get_or_insert_with(|| {
                Volume::new(self.sampling.clone(), block.channels()).with_value_type(block.value_type())
            });
            self.set_block(target, idx, &block)?;
        }
        volume.ok_or(VolumeError::NoVolumeData)
    }
}
