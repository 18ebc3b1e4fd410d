//! Integer label masks.

use super::Volume;
use crate::error::{Result, VolumeError};
use crate::sampling::Sampling;
use ndarray::{Array3, ShapeBuilder};

/// An integer label per voxel. Voxels labelled zero are background and
/// are skipped by masked operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    sampling: Sampling,
    labels: Array3<i32>,
}

impl Mask {
    /// Create an all-background mask.
    pub fn new(sampling: Sampling) -> Self {
        let [ni, nj, nk] = sampling.counts();
        Mask {
            sampling,
            labels: Array3::zeros((ni, nj, nk).f()),
        }
    }

    /// Create a mask out of the first channel of a volume, rounding to the nearest label.
    pub fn from_volume(volume: &Volume) -> Self {
        let labels = volume.channel(0).mapv(|v| v.round() as i32);
        Mask {
            sampling: volume.sampling().clone(),
            labels,
        }
    }

    /// Convert this mask into a single channel volume.
    pub fn to_volume(&self) -> Volume {
        let mut out = Volume::new(self.sampling.clone(), 1);
        out.channel_mut(0).zip_mut_with(&self.labels, |o, l| *o = f64::from(*l));
        out
    }

    /// The grid this mask is defined over.
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// The label of a voxel.
    pub fn get(&self, i: usize, j: usize, k: usize) -> i32 {
        self.labels[[i, j, k]]
    }

    /// Set the label of a voxel.
    pub fn set(&mut self, i: usize, j: usize, k: usize, label: i32) {
        self.labels[[i, j, k]] = label;
    }

    /// Whether the voxel belongs to the foreground.
    pub fn foreground(&self, i: usize, j: usize, k: usize) -> bool {
        self.labels[[i, j, k]] != 0
    }

    /// Number of foreground voxels.
    pub fn count(&self) -> usize {
        self.labels.iter().filter(|&&l| l != 0).count()
    }

    /// Ensure the mask covers exactly the given grid's voxels.
    pub(crate) fn check_counts(&self, sampling: &Sampling) -> Result<()> {
        if self.sampling.counts() == sampling.counts() {
            Ok(())
        } else {
            Err(VolumeError::IncompatibleSampling)
        }
    }
}

/// Whether a voxel should be processed under an optional mask.
pub(crate) fn is_valid(mask: Option<&Mask>, i: usize, j: usize, k: usize) -> bool {
    mask.map_or(true, |m| m.foreground(i, j, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn labels_from_volume() {
        let s = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [2, 2, 2]).unwrap();
        let mut v = Volume::new(s, 1);
        v.set(1, 1, 1, 0, 2.7);
        v.set(0, 1, 0, 0, 0.2);
        let mask = Mask::from_volume(&v);
        assert_eq!(mask.get(1, 1, 1), 3);
        assert!(!mask.foreground(0, 1, 0));
        assert_eq!(mask.count(), 1);
        assert!(is_valid(None, 0, 0, 0));
        assert!(!is_valid(Some(&mask), 0, 0, 0));
        assert_eq!(mask.to_volume().get(1, 1, 1, 0), 3.);
    }
}
