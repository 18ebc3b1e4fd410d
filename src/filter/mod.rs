//! Neighborhood filtering of volumes with a kernel volume.
//!
//! The kernel is a single channel volume with an odd number of voxels
//! along each axis. Its middle voxel is aligned with the voxel being
//! filtered, and kernel voxel `(a, b, c)` weighs the input voxel offset by
//! `(a, b, c)` minus the center.

pub mod kernel;

use crate::error::{Result, VolumeError};
use crate::pool::run_tasks;
use crate::sampling::Sampling;
use crate::volume::mask::is_valid;
use crate::volume::{Mask, Volume};
use log::{debug, info};

/// Weights with a magnitude below this are treated as zero when normalizing.
const WEIGHT_EPSILON: f64 = 1e-12;

/// Correlates a volume with a kernel volume, channel by channel.
///
/// For every valid voxel, the output is the weighted sum of the input
/// voxels under the kernel. Neighbors outside the grid are skipped, and
/// unless `boundary` is set any voxel missing a neighbor becomes zero.
///
/// # Example
///
/// ```
/// use voxkit::{Sampling, Volume, VolumeFilter};
/// use voxkit::filter::kernel;
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [5, 5, 5])?;
/// let mut input = Volume::new(sampling, 1);
/// input.fill(2.);
/// let output = VolumeFilter::new(kernel::boxcar(3, 3, 3)?)?
///     .with_normalize(true)
///     .apply(&input)?;
/// assert!((output.get(2, 2, 2, 0) - 2.).abs() < 1e-12);
/// assert_eq!(output.get(0, 2, 2, 0), 0.);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct VolumeFilter<'a> {
    kernel: Volume,
    mask: Option<&'a Mask>,
    channel: Option<usize>,
    threads: usize,
    pass: bool,
    boundary: bool,
    normalize: bool,
}

impl<'a> VolumeFilter<'a> {
    /// Create a filter out of a kernel volume.
    ///
    /// # Errors
    ///
    /// - `InvalidKernel` if the kernel has more than one channel or an
    /// even number of voxels along some axis.
    pub fn new(kernel: Volume) -> Result<Self> {
        if kernel.channels() != 1 {
            return Err(VolumeError::InvalidKernel(format!(
                "expected a single channel, found {}",
                kernel.channels()
            )));
        }
        if kernel.sampling().counts().iter().any(|&n| n % 2 == 0) {
            return Err(VolumeError::InvalidKernel(format!(
                "kernel counts {:?} are not odd",
                kernel.sampling().counts()
            )));
        }
        Ok(VolumeFilter {
            kernel,
            mask: None,
            channel: None,
            threads: 1,
            pass: false,
            boundary: false,
            normalize: false,
        })
    }

    /// Only filter the foreground of `mask`.
    pub fn with_mask(mut self, mask: &'a Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Only filter channel `channel`, copying the others.
    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Copy the input at voxels outside the mask instead of zeroing them.
    pub fn with_pass(mut self, pass: bool) -> Self {
        self.pass = pass;
        self
    }

    /// Keep the partial sums of voxels whose neighborhood leaves the grid.
    pub fn with_boundary(mut self, boundary: bool) -> Self {
        self.boundary = boundary;
        self
    }

    /// Divide each sum by the total weight of the neighbors used.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// The kernel volume.
    pub fn kernel(&self) -> &Volume {
        &self.kernel
    }

    /// Filter one voxel of one channel.
    fn filter_voxel(&self, input: &Volume, i: usize, j: usize, k: usize, d: usize) -> f64 {
        if !is_valid(self.mask, i, j, k) {
            return if self.pass { input.get(i, j, k, d) } else { 0. };
        }
        if self.channel.map_or(false, |c| c != d) {
            return input.get(i, j, k, d);
        }

        let sampling = input.sampling();
        let fsampling = self.kernel.sampling();
        let [ci, cj, ck] = center(fsampling);

        let mut all = true;
        let mut value = 0.;
        let mut weight = 0.;
        for [fi, fj, fk] in fsampling.indices() {
            let ni = (i + fi) as isize - ci;
            let nj = (j + fj) as isize - cj;
            let nk = (k + fk) as isize - ck;
            if sampling.contains(ni, nj, nk) {
                let f = self.kernel.get(fi, fj, fk, 0);
                value += input.get(ni as usize, nj as usize, nk as usize, d) * f;
                weight += f;
            } else {
                all = false;
            }
        }

        if !all && !self.boundary {
            return 0.;
        }
        if self.normalize && weight.abs() > WEIGHT_EPSILON {
            value /= weight;
        }
        value
    }

    /// Filter a volume.
    ///
    /// Work is split into one task per (channel, k, j) row. Every output
    /// voxel depends on the input alone, so the result does not depend on
    /// the number of threads.
    ///
    /// # Errors
    ///
    /// - `IncompatibleSampling` if the mask does not match the input grid.
    /// - `OutOfBounds` if the selected channel does not exist.
    /// - `ThreadPool` if the worker pool cannot be created.
    pub fn apply(&self, input: &Volume) -> Result<Volume> {
        let sampling = input.sampling();
        if let Some(mask) = self.mask {
            mask.check_counts(sampling)?;
        }
        if let Some(c) = self.channel {
            if c >= input.channels() {
                return Err(VolumeError::OutOfBounds(c, input.channels()));
            }
        }

        let [ni, nj, nk] = sampling.counts();
        let channels = input.channels();
        info!("started filtering volume");
        debug!("kernel counts {:?}, threads {}", self.kernel.sampling().counts(), self.threads);

        let rows = run_tasks(self.threads, channels * nk * nj, |task| {
            let (j, k, d) = (task % nj, (task / nj) % nk, task / (nj * nk));
            (0..ni)
                .map(|i| self.filter_voxel(input, i, j, k, d))
                .collect::<Vec<f64>>()
        })?;

        let mut out = input.proto(channels);
        for (task, row) in rows.iter().enumerate() {
            let (j, k, d) = (task % nj, (task / nj) % nk, task / (nj * nk));
            for (i, &v) in row.iter().enumerate() {
                out.set(i, j, k, d, v);
            }
        }

        info!("finished filtering volume");
        Ok(out)
    }
}

/// Index of the middle voxel of a kernel grid.
fn center(sampling: &Sampling) -> [isize; 3] {
    let [a, b, c] = sampling.counts();
    [((a - 1) / 2) as isize, ((b - 1) / 2) as isize, ((c - 1) / 2) as isize]
}

/// Filters a volume with one one-dimensional kernel per axis, applied in
/// turn along i, j and k.
#[derive(Debug, Clone)]
pub struct SeparableFilter<'a> {
    kernels: [Vec<f64>; 3],
    mask: Option<&'a Mask>,
    threads: usize,
    pass: bool,
    boundary: bool,
    normalize: bool,
}

impl<'a> SeparableFilter<'a> {
    /// Create a filter out of the weights along each axis.
    pub fn new(kernels: [Vec<f64>; 3]) -> Result<Self> {
        for weights in &kernels {
            if weights.is_empty() || weights.len() % 2 == 0 {
                return Err(VolumeError::InvalidKernel(format!(
                    "kernel length {} is not positive and odd",
                    weights.len()
                )));
            }
        }
        Ok(SeparableFilter {
            kernels,
            mask: None,
            threads: 1,
            pass: false,
            boundary: false,
            normalize: false,
        })
    }

    /// A Gaussian filter spanning `support` voxels on either side of the
    /// center, with offsets scaled by the spacing of `reference`.
    pub fn gaussian(reference: &Sampling, sigma: f64, support: usize) -> Result<Self> {
        let size = 2 * support + 1;
        let delta = reference.delta();
        SeparableFilter::new([
            kernel::gaussian_axis(delta[0], size, sigma)?,
            kernel::gaussian_axis(delta[1], size, sigma)?,
            kernel::gaussian_axis(delta[2], size, sigma)?,
        ])
    }

    /// Only filter the foreground of `mask`.
    pub fn with_mask(mut self, mask: &'a Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Copy the input at voxels outside the mask instead of zeroing them.
    pub fn with_pass(mut self, pass: bool) -> Self {
        self.pass = pass;
        self
    }

    /// Keep the partial sums of voxels whose neighborhood leaves the grid.
    pub fn with_boundary(mut self, boundary: bool) -> Self {
        self.boundary = boundary;
        self
    }

    /// Divide each sum by the total weight of the neighbors used.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Filter a volume.
    pub fn apply(&self, input: &Volume) -> Result<Volume> {
        let mut current = input.clone();
        for (axis, weights) in self.kernels.iter().enumerate() {
            // masked out voxels must survive until the last pass
            let pass = axis < 2 || self.pass;
            let mut filter = VolumeFilter::new(kernel::along_axis(weights, axis)?)?
                .with_threads(self.threads)
                .with_pass(pass)
                .with_boundary(self.boundary)
                .with_normalize(self.normalize);
            if let Some(mask) = self.mask {
                filter = filter.with_mask(mask);
            }
            current = filter.apply(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn ramp(channels: usize) -> Volume {
        let s = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [7, 6, 5]).unwrap();
        let mut v = Volume::new(s, channels);
        for [i, j, k] in v.sampling().clone().indices() {
            for d in 0..channels {
                let x = (i * i + 3 * j + k * (d + 1)) as f64;
                v.set(i, j, k, d, x.sin());
            }
        }
        v
    }

    #[test]
    fn constant_volume_is_preserved_away_from_boundary() {
        let mut v = ramp(1);
        v.fill(4.5);
        let mut k = kernel::empty([3, 3, 3]).unwrap();
        k.fill(1.);
        let out = VolumeFilter::new(k).unwrap().with_normalize(true).apply(&v).unwrap();
        for [i, j, k] in v.sampling().indices() {
            let interior = (1..6).contains(&i) && (1..5).contains(&j) && (1..4).contains(&k);
            if interior {
                assert_abs_diff_eq!(out.get(i, j, k, 0), 4.5, epsilon = 1e-12);
            } else {
                assert_eq!(out.get(i, j, k, 0), 0.);
            }
        }
    }

    #[test]
    fn boundary_keeps_partial_sums() {
        let mut v = ramp(1);
        v.fill(1.);
        let out = VolumeFilter::new(kernel::boxcar(3, 1, 1).unwrap())
            .unwrap()
            .with_boundary(true)
            .apply(&v)
            .unwrap();
        assert_abs_diff_eq!(out.get(0, 0, 0, 0), 2. / 3., epsilon = 1e-12);
        assert_abs_diff_eq!(out.get(3, 0, 0, 0), 1., epsilon = 1e-12);
    }

    #[test]
    fn mask_pass_and_channel_selection() {
        let v = ramp(2);
        let mut mask = Mask::new(v.sampling().clone());
        mask.set(3, 3, 2, 1);

        let passed = VolumeFilter::new(kernel::boxcar(3, 3, 3).unwrap())
            .unwrap()
            .with_mask(&mask)
            .with_pass(true)
            .with_channel(1)
            .apply(&v)
            .unwrap();
        assert_eq!(passed.get(0, 0, 0, 1), v.get(0, 0, 0, 1));
        assert_eq!(passed.get(3, 3, 2, 0), v.get(3, 3, 2, 0));
        assert_ne!(passed.get(3, 3, 2, 1), v.get(3, 3, 2, 1));

        let zeroed = VolumeFilter::new(kernel::boxcar(3, 3, 3).unwrap())
            .unwrap()
            .with_mask(&mask)
            .apply(&v)
            .unwrap();
        assert_eq!(zeroed.get(0, 0, 0, 1), 0.);
    }

    #[test]
    fn thread_count_invariance() {
        let v = ramp(2);
        let filter = VolumeFilter::new(kernel::boxcar(3, 3, 1).unwrap())
            .unwrap()
            .with_boundary(true)
            .with_normalize(true);
        let sequential = filter.apply(&v).unwrap();
        let parallel = filter.clone().with_threads(4).apply(&v).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn separable_matches_full_kernel_in_the_interior() {
        let v = ramp(1);
        let separable = SeparableFilter::gaussian(v.sampling(), 1.2, 1)
            .unwrap()
            .apply(&v)
            .unwrap();
        let full = VolumeFilter::new(kernel::gaussian(v.sampling(), 3, 3, 3, 1.2).unwrap())
            .unwrap()
            .apply(&v)
            .unwrap();
        for [i, j, k] in v.sampling().indices() {
            assert_abs_diff_eq!(separable.get(i, j, k, 0), full.get(i, j, k, 0), epsilon = 1e-12);
        }
    }

    #[test]
    fn invalid_kernels_are_rejected() {
        assert!(VolumeFilter::new(ramp(2)).is_err());
        assert!(SeparableFilter::new([vec![1.], vec![1., 1.], vec![1.]]).is_err());
    }
}
