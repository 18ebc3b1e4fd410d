//! Utility functions to write NIfTI images.
//!
//! Volumes are written in a single `.nii` or `.nii.gz` file. Unless a
//! reference header is given, the header is derived from the grid of the
//! volume and the voxels are written in canonical order.

use crate::affine::quaternion_bcd;
use crate::cache::HeaderCache;
use crate::error::{Result, VolumeError};
use crate::extension::ExtensionSequence;
use crate::header::{NiftiHeader, HEADER_SIZE, MAGIC_CODE_NIP1};
use crate::permutation::VoxelPermutation;
use crate::typedef::{Intent, NiftiType};
use crate::util::{is_gz_file, Endianness};
use crate::volume::{Mask, Volume};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use std::convert::TryFrom;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Options and flags which can be used to configure how a volume is written.
///
/// # Example
///
/// ```no_run
/// use voxkit::{NiftiType, ReaderOptions, WriterOptions};
/// # fn run() -> voxkit::Result<()> {
/// let object = ReaderOptions::new().read_file("input.nii")?;
/// let (header, permutation, volume) = object.into_parts();
/// WriterOptions::new("output.nii.gz")
///     .reference(header, permutation)
///     .datatype(NiftiType::Float32)
///     .write_volume(&volume)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    path: PathBuf,
    datatype: Option<NiftiType>,
    reference: Option<(NiftiHeader, VoxelPermutation)>,
    compression: Compression,
    description: Option<String>,
    mask: bool,
}

impl WriterOptions {
    /// Options for writing to `path`, compressed with gzip when the file name ends in ".gz".
    pub fn new<P: AsRef<Path>>(path: P) -> WriterOptions {
        WriterOptions {
            path: path.as_ref().to_path_buf(),
            datatype: None,
            reference: None,
            compression: Compression::fast(),
            description: None,
            mask: false,
        }
    }

    /// Store the voxels as `datatype` instead of the type derived from the
    /// value type of the volume.
    pub fn datatype(mut self, datatype: NiftiType) -> Self {
        self.datatype = Some(datatype);
        self
    }

    /// Write the volume with the fields and voxel order of a header read
    /// earlier, such as one from a `NiftiObject`.
    pub fn reference(mut self, header: NiftiHeader, permutation: VoxelPermutation) -> Self {
        self.reference = Some((header, permutation));
        self
    }

    /// Gzip compression level, from 0 to 9.
    pub fn compression(mut self, level: u32) -> Self {
        self.compression = Compression::new(level.min(9));
        self
    }

    /// Text stored in the `descrip` field, up to 80 bytes.
    pub fn description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the volume is a mask. This only distinguishes the entries
    /// of a header cache.
    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// Write a volume to the configured path.
    ///
    /// The file is first written next to its destination and only moved
    /// in place once complete.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDataType` if the datatype has no codec.
    /// - `ChannelMismatch` if RGB24 is requested for a volume without 3 channels.
    /// - `IncompatibleSampling` if the reference header describes another grid.
    pub fn write_volume(&self, volume: &Volume) -> Result<()> {
        let (header, permutation) = match &self.reference {
            Some((reference, permutation)) => (self.copy_header(reference, *permutation, volume)?, *permutation),
            None => (self.build_header(volume)?, VoxelPermutation::identity()),
        };
        self.write_file(&header, &permutation, volume)
    }

    /// Write a mask as a single channel volume of 32-bit labels, unless
    /// another datatype was requested.
    pub fn write_mask(&self, mask: &Mask) -> Result<()> {
        let mut options = self.clone().mask(true);
        if options.datatype.is_none() {
            options.datatype = Some(NiftiType::Int32);
        }
        options.write_volume(&mask.to_volume())
    }

    /// Write a volume, reusing the header and voxel order remembered in
    /// `cache` for its grid when no reference was given explicitly.
    pub fn write_volume_cached(&self, volume: &Volume, cache: &mut HeaderCache) -> Result<()> {
        if self.reference.is_some() {
            return self.write_volume(volume);
        }
        match cache.get(volume.sampling(), volume.channels(), self.mask) {
            Some((header, permutation)) => {
                let header = self.copy_header(header, permutation, volume)?;
                self.write_file(&header, &permutation, volume)
            }
            None => self.write_volume(volume),
        }
    }

    fn datatype_for(&self, volume: &Volume) -> Result<NiftiType> {
        let datatype = self
            .datatype
            .unwrap_or_else(|| volume.value_type().to_nifti());
        if !datatype.is_supported() {
            return Err(VolumeError::UnsupportedDataType(datatype));
        }
        if datatype == NiftiType::Rgb24 && volume.channels() != 3 {
            return Err(VolumeError::ChannelMismatch(3, volume.channels()));
        }
        Ok(datatype)
    }

    /// Fields shared by synthesized and copied headers.
    fn finish_header(&self, header: &mut NiftiHeader, volume: &Volume) -> Result<()> {
        let datatype = self.datatype_for(volume)?;
        header.set_data_type(datatype);

        let channels = if datatype == NiftiType::Rgb24 { 1 } else { volume.channels() };
        header.dim[0] = if channels > 1 { 4 } else { 3 };
        for d in &mut header.dim[1..=3] {
            *d = (*d).max(1);
        }
        header.dim[4] = if channels > 1 { dim_value(channels)? } else { 0 };
        for d in &mut header.dim[5..] {
            *d = 1;
        }
        let intent = if channels > 1 { Intent::Vector } else { Intent::None };
        header.intent_code = intent as i16;

        header.scl_slope = 0.;
        header.scl_inter = 0.;
        header.vox_offset = (HEADER_SIZE + 4) as f32;
        header.magic = *MAGIC_CODE_NIP1;

        let description = match &self.description {
            Some(d) => d.clone(),
            None => format!("Created: voxkit {}", env!("CARGO_PKG_VERSION")),
        };
        let mut bytes = description.into_bytes();
        bytes.truncate(80);
        header.set_description(bytes)
    }

    /// Derive a header from the grid of a volume, stored in canonical order.
    fn build_header(&self, volume: &Volume) -> Result<NiftiHeader> {
        let sampling = volume.sampling();
        let [ni, nj, nk] = sampling.counts();
        let origin = sampling.origin();
        let delta = sampling.delta();

        let mut header = NiftiHeader {
            dim: [3, dim_value(ni)?, dim_value(nj)?, dim_value(nk)?, 0, 1, 1, 1],
            qform_code: 1,
            endianness: Endianness::Little,
            ..Default::default()
        };
        header.set_qform(
            quaternion_bcd(sampling.rotation()),
            [origin[0], origin[1], origin[2]],
            [delta[0], delta[1], delta[2]],
        );
        header.update_sform();
        self.finish_header(&mut header, volume)?;
        Ok(header)
    }

    /// Reuse a reference header for a volume on the matching canonical grid.
    fn copy_header(
        &self,
        reference: &NiftiHeader,
        permutation: VoxelPermutation,
        volume: &Volume,
    ) -> Result<NiftiHeader> {
        let counts = reference.grid_counts()?;
        if permutation.permute_counts(counts) != volume.sampling().counts() {
            return Err(VolumeError::IncompatibleSampling);
        }
        let mut header = reference.clone();
        self.finish_header(&mut header, volume)?;
        Ok(header)
    }

    fn write_file(&self, header: &NiftiHeader, permutation: &VoxelPermutation, volume: &Volume) -> Result<()> {
        let path = &self.path;
        debug!("writing NIfTI file {}", path.display());
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let writer = BufWriter::new(tmp.as_file_mut());
            if is_gz_file(path) {
                let mut e = GzEncoder::new(writer, self.compression);
                write_header(&mut e, header)?;
                write_data(&mut e, header, permutation, volume)?;
                let mut writer = e.finish()?;
                writer.flush()?;
            } else {
                let mut writer = writer;
                write_header(&mut writer, header)?;
                write_data(&mut writer, header, permutation, volume)?;
                writer.flush()?;
            }
        }
        let _ = tmp.persist(path).map_err(|e| VolumeError::Io(e.error))?;
        Ok(())
    }
}

/// A grid extent as stored in the `dim` field.
fn dim_value(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| {
        VolumeError::InvalidSampling(format!("extent {} does not fit in a NIfTI-1 header", n))
    })
}

/// Write the header followed by an empty extender.
fn write_header<W: Write>(writer: &mut W, header: &NiftiHeader) -> Result<()> {
    header.to_writer(&mut *writer)?;
    ExtensionSequence::default().to_writer(writer, header.endianness)
}

/// Encode the voxels of a canonical volume in the voxel order of the file,
/// one row at a time.
fn write_data<W: Write>(
    writer: &mut W,
    header: &NiftiHeader,
    permutation: &VoxelPermutation,
    volume: &Volume,
) -> Result<()> {
    let datatype = header.data_type()?;
    let codec = datatype.codec()?;
    let [ni, nj, nk] = header.grid_counts()?;
    let rgb = datatype == NiftiType::Rgb24;
    let passes = if rgb { 1 } else { volume.channels() };

    let mut row = vec![0u8; ni * codec.width];
    let mut voxel = vec![0.; volume.channels()];
    for pass in 0..passes {
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    let [ci, cj, ck] = permutation.apply([i, j, k]);
                    let dst = &mut row[i * codec.width..(i + 1) * codec.width];
                    if rgb {
                        volume.voxel_into(ci, cj, ck, &mut voxel);
                        codec.encode(&voxel, header.endianness, dst)?;
                    } else {
                        let v = volume.get(ci, cj, ck, pass);
                        codec.encode(&[v], header.endianness, dst)?;
                    }
                }
                writer.write_all(&row)?;
            }
        }
    }
    Ok(())
}
