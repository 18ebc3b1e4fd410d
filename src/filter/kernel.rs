//! Constructors for common filter kernels.
//!
//! Kernels are single channel volumes on a unit grid with an odd number of
//! voxels along each axis, centered on the middle voxel.

use crate::error::{Result, VolumeError};
use crate::sampling::Sampling;
use crate::volume::Volume;
use nalgebra::Vector3;

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        Err(VolumeError::InvalidKernel(format!(
            "kernel size {} is not positive and odd",
            size
        )))
    } else {
        Ok(())
    }
}

pub(crate) fn check_sigma(sigma: f64) -> Result<()> {
    if sigma > 0. && sigma.is_finite() {
        Ok(())
    } else {
        Err(VolumeError::InvalidKernel(format!("invalid sigma {}", sigma)))
    }
}

/// An empty kernel with the given voxel counts.
pub fn empty(counts: [usize; 3]) -> Result<Volume> {
    for &n in &counts {
        check_size(n)?;
    }
    let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), counts)?;
    Ok(Volume::new(sampling, 1))
}

/// A kernel of constant weights summing to one.
pub fn boxcar(nx: usize, ny: usize, nz: usize) -> Result<Volume> {
    let mut kernel = empty([nx, ny, nz])?;
    kernel.fill(1. / (nx * ny * nz) as f64);
    Ok(kernel)
}

/// An isotropic Gaussian kernel of `n x m x l` voxels, with offsets scaled
/// by the spacing of `reference` and weights summing to one.
pub fn gaussian(reference: &Sampling, n: usize, m: usize, l: usize, sigma: f64) -> Result<Volume> {
    check_sigma(sigma)?;
    let mut kernel = empty([n, m, l])?;
    let delta = reference.delta();
    let center = [(n - 1) / 2, (m - 1) / 2, (l - 1) / 2];
    let s2 = sigma * sigma;

    let mut sum = 0.;
    for [i, j, k] in kernel.sampling().clone().indices() {
        let x = (i as f64 - center[0] as f64) * delta[0];
        let y = (j as f64 - center[1] as f64) * delta[1];
        let z = (k as f64 - center[2] as f64) * delta[2];
        let value = (-(x * x + y * y + z * z) / s2).exp();
        sum += value;
        kernel.set(i, j, k, 0, value);
    }
    kernel.data_mut().mapv_inplace(|v| v / sum);
    Ok(kernel)
}

/// One-dimensional Gaussian weights of `size` taps for voxels `delta` apart,
/// summing to one.
pub fn gaussian_axis(delta: f64, size: usize, sigma: f64) -> Result<Vec<f64>> {
    check_size(size)?;
    check_sigma(sigma)?;
    let center = (size - 1) / 2;
    let mut weights: Vec<f64> = (0..size)
        .map(|t| {
            let x = (t as f64 - center as f64) * delta;
            (-(x * x) / (sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    Ok(weights)
}

/// Central difference kernel estimating the first derivative along `axis`,
/// in world units of `reference`.
pub fn derivative(reference: &Sampling, axis: usize) -> Result<Volume> {
    if axis > 2 {
        return Err(VolumeError::InvalidKernel(format!("invalid axis {}", axis)));
    }
    let mut counts = [1; 3];
    counts[axis] = 3;
    let mut kernel = empty(counts)?;
    let f = 1. / (2. * reference.delta()[axis]);
    let mut at = [0; 3];
    kernel.set(at[0], at[1], at[2], 0, -f);
    at[axis] = 2;
    kernel.set(at[0], at[1], at[2], 0, f);
    Ok(kernel)
}

/// A kernel along a single axis holding the given weights.
pub fn along_axis(weights: &[f64], axis: usize) -> Result<Volume> {
    if axis > 2 {
        return Err(VolumeError::InvalidKernel(format!("invalid axis {}", axis)));
    }
    let mut counts = [1; 3];
    counts[axis] = weights.len();
    let mut kernel = empty(counts)?;
    for (t, &w) in weights.iter().enumerate() {
        let mut at = [0; 3];
        at[axis] = t;
        kernel.set(at[0], at[1], at[2], 0, w);
    }
    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn weights_sum_to_one() {
        let reference = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 2., 0.5), [9, 9, 9]).unwrap();
        let g = gaussian(&reference, 5, 3, 7, 1.5).unwrap();
        assert_abs_diff_eq!(g.data().sum(), 1., epsilon = 1e-12);
        assert_eq!(g.get(2, 1, 3, 0), g.data().fold(0., |a: f64, &b| a.max(b)));

        let b = boxcar(3, 3, 1).unwrap();
        assert_abs_diff_eq!(b.data().sum(), 1., epsilon = 1e-12);

        let a = gaussian_axis(2., 7, 3.).unwrap();
        assert_abs_diff_eq!(a.iter().sum::<f64>(), 1., epsilon = 1e-12);
        assert_eq!(a[1], a[5]);
    }

    #[test]
    fn even_or_empty_sizes_are_rejected() {
        assert!(boxcar(2, 1, 1).is_err());
        assert!(boxcar(0, 1, 1).is_err());
        assert!(gaussian_axis(1., 4, 1.).is_err());
        assert!(gaussian_axis(1., 3, 0.).is_err());
        assert!(along_axis(&[1., 1.], 0).is_err());
    }

    #[test]
    fn derivative_kernel() {
        let reference = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 0.5, 1.), [4, 4, 4]).unwrap();
        let d = derivative(&reference, 1).unwrap();
        assert_eq!(d.sampling().counts(), [1, 3, 1]);
        assert_eq!(d.get(0, 0, 0, 0), -1.);
        assert_eq!(d.get(0, 2, 0, 0), 1.);
    }
}
