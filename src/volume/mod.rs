//! This module defines the in-memory voxel container, the integer
//! masks which restrict processing to a region of interest, and the
//! generic per-voxel function application.
//!
//! Voxel values are stored as double precision floats in an `ndarray`
//! array of shape `(ni, nj, nk, channels)` in Fortran order, so that `i`
//! varies fastest, as it does in NIfTI files.

pub mod function;
pub mod mask;

pub use self::function::VolumeFunction;
pub use self::mask::Mask;

use crate::error::{Result, VolumeError};
use crate::sampling::Sampling;
use crate::typedef::ValueType;
use ndarray::{s, Array4, ArrayView3, ArrayViewMut3, ShapeBuilder};

/// A dense multi-channel field over a grid.
///
/// # Example
///
/// ```
/// use voxkit::{Sampling, Volume};
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [4, 4, 4])?;
/// let mut volume = Volume::new(sampling, 3);
/// volume.set_voxel(1, 2, 3, &[1., 2., 3.]);
/// assert_eq!(volume.get(1, 2, 3, 2), 3.);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    sampling: Sampling,
    value_type: ValueType,
    data: Array4<f64>,
}

impl Volume {
    /// Create a zero-filled volume with the given number of channels per voxel.
    ///
    /// # Panics
    ///
    /// If `channels` is zero.
    pub fn new(sampling: Sampling, channels: usize) -> Self {
        assert!(channels > 0, "a volume needs at least one channel");
        let [ni, nj, nk] = sampling.counts();
        Volume {
            sampling,
            value_type: ValueType::default(),
            data: Array4::zeros((ni, nj, nk, channels).f()),
        }
    }

    /// Create a zero-filled volume, failing instead of panicking when there
    /// are no channels.
    ///
    /// # Errors
    ///
    /// `ChannelMismatch` if `channels` is zero.
    pub fn try_new(sampling: Sampling, channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(VolumeError::ChannelMismatch(1, 0));
        }
        Ok(Volume::new(sampling, channels))
    }

    /// Create a volume out of existing voxel data of shape `(ni, nj, nk, channels)`.
    ///
    /// # Errors
    ///
    /// `IncompatibleSampling` if the leading dimensions of the array do not
    /// match the grid, or if there are no channels.
    pub fn from_data(sampling: Sampling, data: Array4<f64>) -> Result<Self> {
        let shape = data.shape();
        if shape[..3] != sampling.counts()[..] || shape[3] == 0 {
            return Err(VolumeError::IncompatibleSampling);
        }
        Ok(Volume {
            sampling,
            value_type: ValueType::default(),
            data,
        })
    }

    /// A zero-filled volume over the same grid, with the given number of channels.
    pub fn proto(&self, channels: usize) -> Volume {
        Volume::new(self.sampling.clone(), channels).with_value_type(self.value_type)
    }

    /// Set the precision hint of this volume.
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// The grid this volume is defined over.
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// The in-memory precision hint of this volume.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Change the in-memory precision hint of this volume.
    pub fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }

    /// Number of values per voxel.
    pub fn channels(&self) -> usize {
        self.data.shape()[3]
    }

    /// Fetch one channel of one voxel.
    ///
    /// # Panics
    ///
    /// If the voxel or the channel are out of bounds.
    pub fn get(&self, i: usize, j: usize, k: usize, d: usize) -> f64 {
        self.data[[i, j, k, d]]
    }

    /// Set one channel of one voxel.
    pub fn set(&mut self, i: usize, j: usize, k: usize, d: usize, value: f64) {
        self.data[[i, j, k, d]] = value;
    }

    /// Fetch one channel of a voxel given by signed indices,
    /// yielding zero outside of the grid.
    pub fn get_or_zero(&self, i: isize, j: isize, k: isize, d: usize) -> f64 {
        if self.sampling.contains(i, j, k) {
            self.data[[i as usize, j as usize, k as usize, d]]
        } else {
            0.
        }
    }

    /// Copy all channels of a voxel.
    pub fn voxel(&self, i: usize, j: usize, k: usize) -> Vec<f64> {
        self.data.slice(s![i, j, k, ..]).to_vec()
    }

    /// Copy all channels of a voxel into `out`.
    pub fn voxel_into(&self, i: usize, j: usize, k: usize, out: &mut [f64]) {
        for (o, v) in out.iter_mut().zip(self.data.slice(s![i, j, k, ..])) {
            *o = *v;
        }
    }

    /// Set all channels of a voxel.
    pub fn set_voxel(&mut self, i: usize, j: usize, k: usize, values: &[f64]) {
        for (o, v) in self.data.slice_mut(s![i, j, k, ..]).iter_mut().zip(values) {
            *o = *v;
        }
    }

    /// Set every channel of every voxel to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// A view over one channel.
    pub fn channel(&self, d: usize) -> ArrayView3<f64> {
        self.data.slice(s![.., .., .., d])
    }

    /// A mutable view over one channel.
    pub fn channel_mut(&mut self, d: usize) -> ArrayViewMut3<f64> {
        self.data.slice_mut(s![.., .., .., d])
    }

    /// The voxel data, of shape `(ni, nj, nk, channels)`.
    pub fn data(&self) -> &Array4<f64> {
        &self.data
    }

    /// Mutable access to the voxel data.
    pub fn data_mut(&mut self) -> &mut Array4<f64> {
        &mut self.data
    }

    /// Take the voxel data, discarding the grid.
    pub fn into_data(self) -> Array4<f64> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn grid() -> Sampling {
        Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [3, 4, 5]).unwrap()
    }

    #[test]
    fn checked_constructor_needs_a_channel() {
        assert!(Volume::try_new(grid(), 0).is_err());
        assert_eq!(Volume::try_new(grid(), 3).unwrap().channels(), 3);
    }

    #[test]
    fn voxel_access() {
        let mut v = Volume::new(grid(), 2);
        assert_eq!(v.channels(), 2);
        v.set_voxel(2, 3, 4, &[7., -1.]);
        assert_eq!(v.voxel(2, 3, 4), vec![7., -1.]);
        assert_eq!(v.get_or_zero(2, 3, 4, 1), -1.);
        assert_eq!(v.get_or_zero(3, 3, 4, 1), 0.);
        assert_eq!(v.get_or_zero(-1, 0, 0, 0), 0.);
        assert_eq!(v.channel(0)[[2, 3, 4]], 7.);
    }

    #[test]
    fn first_axis_is_contiguous() {
        let mut v = Volume::new(grid(), 1);
        v.set(1, 0, 0, 0, 5.);
        let flat = v.data().as_slice_memory_order().unwrap();
        assert_eq!(flat[1], 5.);
    }

    #[test]
    fn from_data_checks_shape() {
        assert!(Volume::from_data(grid(), Array4::zeros((3, 4, 5, 1))).is_ok());
        assert!(Volume::from_data(grid(), Array4::zeros((3, 4, 4, 1))).is_err());
        assert!(Volume::from_data(grid(), Array4::zeros((3, 4, 5, 0))).is_err());
    }

    #[test]
    fn proto_keeps_grid() {
        let v = Volume::new(grid(), 1).with_value_type(ValueType::Short);
        let p = v.proto(6);
        assert_eq!(p.sampling(), v.sampling());
        assert_eq!(p.channels(), 6);
        assert_eq!(p.value_type(), ValueType::Short);
    }
}
