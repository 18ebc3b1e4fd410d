//! Vector-valued functions and their application to every voxel of a volume.

use super::mask::is_valid;
use super::{Mask, Volume};
use crate::error::{Result, VolumeError};
use crate::pool::run_tasks;
use log::{debug, info};
use std::fmt;

/// A function from `dim_in` values to `dim_out` values.
///
/// This is the uniform contract of the interpolators: their input is a
/// world position and their output holds one value per volume channel.
pub trait VectFunction {
    /// Number of input values.
    fn dim_in(&self) -> usize;

    /// Number of output values.
    fn dim_out(&self) -> usize;

    /// Evaluate the function, writing `dim_out` values into `output`.
    fn apply_into(&self, input: &[f64], output: &mut [f64]);

    /// Evaluate the function into a new vector.
    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut output = vec![0.; self.dim_out()];
        self.apply_into(input, &mut output);
        output
    }
}

impl<T: VectFunction + ?Sized> VectFunction for Box<T> {
    fn dim_in(&self) -> usize {
        (**self).dim_in()
    }

    fn dim_out(&self) -> usize {
        (**self).dim_out()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        (**self).apply_into(input, output)
    }
}

/// A `VectFunction` backed by a closure.
pub struct FnFunction<F> {
    dim_in: usize,
    dim_out: usize,
    f: F,
}

impl<F> fmt::Debug for FnFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnFunction")
            .field("dim_in", &self.dim_in)
            .field("dim_out", &self.dim_out)
            .finish()
    }
}

/// Wrap a closure as a `VectFunction`.
pub fn from_fn<F>(dim_in: usize, dim_out: usize, f: F) -> FnFunction<F>
where
    F: Fn(&[f64], &mut [f64]),
{
    FnFunction { dim_in, dim_out, f }
}

impl<F> VectFunction for FnFunction<F>
where
    F: Fn(&[f64], &mut [f64]),
{
    fn dim_in(&self) -> usize {
        self.dim_in
    }

    fn dim_out(&self) -> usize {
        self.dim_out
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        (self.f)(input, output)
    }
}

/// Applies a function to the channel values of every valid voxel.
///
/// Functions may hold per-call scratch state, so a fresh function is
/// obtained from the factory for every parallel task. Work is split by
/// k-slice, or by (k, j) row when slicing is disabled. Voxels outside
/// the mask are left at zero.
///
/// # Example
///
/// ```
/// use voxkit::{Sampling, Volume, VolumeFunction};
/// use voxkit::volume::function::from_fn;
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [2, 2, 2])?;
/// let mut input = Volume::new(sampling, 2);
/// input.fill(3.);
/// let sum = VolumeFunction::new(&input, || from_fn(2, 1, |x, y| y[0] = x[0] + x[1]))
///     .with_threads(2)
///     .run()?;
/// assert_eq!(sum.get(1, 1, 1, 0), 6.);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
pub struct VolumeFunction<'a, G> {
    factory: G,
    input: &'a Volume,
    mask: Option<&'a Mask>,
    threads: usize,
    slice: bool,
}

impl<'a, G> fmt::Debug for VolumeFunction<'a, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VolumeFunction")
            .field("threads", &self.threads)
            .field("slice", &self.slice)
            .field("masked", &self.mask.is_some())
            .finish()
    }
}

impl<'a, G, V> VolumeFunction<'a, G>
where
    G: Fn() -> V + Sync,
    V: VectFunction,
{
    /// Prepare to apply functions made by `factory` to `input`.
    pub fn new(input: &'a Volume, factory: G) -> Self {
        VolumeFunction {
            factory,
            input,
            mask: None,
            threads: 1,
            slice: true,
        }
    }

    /// Restrict processing to the foreground of `mask`.
    pub fn with_mask(mut self, mask: &'a Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Partition parallel work by whole k-slices (the default) or by rows.
    pub fn with_slice(mut self, slice: bool) -> Self {
        self.slice = slice;
        self
    }

    /// Apply the function to every valid voxel.
    ///
    /// # Errors
    ///
    /// - `ChannelMismatch` if the function input size differs from the channel
    ///   count, or if the function has no outputs.
    /// - `IncompatibleSampling` if the mask does not match the input grid.
    /// - `ThreadPool` if the worker pool cannot be created.
    pub fn run(&self) -> Result<Volume> {
        let sampling = self.input.sampling();
        let function = (self.factory)();
        if function.dim_in() != self.input.channels() {
            return Err(VolumeError::ChannelMismatch(function.dim_in(), self.input.channels()));
        }
        if let Some(mask) = self.mask {
            mask.check_counts(sampling)?;
        }
        let dim_out = function.dim_out();
        let mut out = Volume::try_new(sampling.clone(), dim_out)?.with_value_type(self.input.value_type());
        let [ni, nj, nk] = sampling.counts();

        info!("started applying function to volume");
        if self.threads > 1 {
            info!("using threads: {}", self.threads);
        }

        // each task covers a run of consecutive (j, k) rows
        let rows_per_task = if self.slice { nj } else { 1 };
        let tasks = nj * nk / rows_per_task;
        let results = run_tasks(self.threads, tasks, |task| {
            let function = (self.factory)();
            let first_row = task * rows_per_task;
            if self.slice {
                debug!("... processing slice {}/{}", task + 1, nk);
            }
            let mut values = vec![0.; self.input.channels()];
            let mut block = vec![0.; rows_per_task * ni * dim_out];
            for row in 0..rows_per_task {
                let (j, k) = ((first_row + row) % nj, (first_row + row) / nj);
                for i in 0..ni {
                    if is_valid(self.mask, i, j, k) {
                        self.input.voxel_into(i, j, k, &mut values);
                        let offset = (row * ni + i) * dim_out;
                        function.apply_into(&values, &mut block[offset..offset + dim_out]);
                    }
                }
            }
            block
        })?;

        for (task, block) in results.iter().enumerate() {
            for row in 0..rows_per_task {
                let global_row = task * rows_per_task + row;
                let (j, k) = (global_row % nj, global_row / nj);
                for i in 0..ni {
                    let offset = (row * ni + i) * dim_out;
                    out.set_voxel(i, j, k, &block[offset..offset + dim_out]);
                }
            }
        }

        info!("finished applying function to volume");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::Sampling;
    use nalgebra::Vector3;

    fn input() -> Volume {
        let s = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [5, 4, 3]).unwrap();
        let mut v = Volume::new(s, 2);
        for (idx, [i, j, k]) in v.sampling().clone().indices().enumerate() {
            v.set_voxel(i, j, k, &[idx as f64, (idx as f64).sqrt()]);
        }
        v
    }

    fn norm() -> impl VectFunction {
        from_fn(2, 1, |x, y| y[0] = (x[0] * x[0] + x[1] * x[1]).sqrt())
    }

    #[test]
    fn function_without_outputs_is_rejected() {
        let v = input();
        let empty = || from_fn(2, 0, |_, _| {});
        match VolumeFunction::new(&v, empty).run() {
            Err(VolumeError::ChannelMismatch(1, 0)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn applies_to_every_voxel() {
        let v = input();
        let out = VolumeFunction::new(&v, norm).run().unwrap();
        assert_eq!(out.channels(), 1);
        let x = v.voxel(4, 3, 2);
        assert_eq!(out.get(4, 3, 2, 0), (x[0] * x[0] + x[1] * x[1]).sqrt());
    }

    #[test]
    fn masked_voxels_stay_zero() {
        let v = input();
        let mut mask = Mask::new(v.sampling().clone());
        mask.set(1, 1, 1, 1);
        let out = VolumeFunction::new(&v, norm).with_mask(&mask).run().unwrap();
        assert!(out.get(1, 1, 1, 0) > 0.);
        assert_eq!(out.get(2, 1, 1, 0), 0.);
    }

    #[test]
    fn thread_count_invariance() {
        let v = input();
        let reference = VolumeFunction::new(&v, norm).run().unwrap();
        for &slice in &[true, false] {
            let out = VolumeFunction::new(&v, norm)
                .with_threads(4)
                .with_slice(slice)
                .run()
                .unwrap();
            assert_eq!(out, reference);
        }
    }

    #[test]
    fn channel_mismatch_is_an_error() {
        let v = input();
        let f = || from_fn(3, 1, |_, y| y[0] = 0.);
        assert!(VolumeFunction::new(&v, f).run().is_err());
    }
}
