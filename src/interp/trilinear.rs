//! Trilinear interpolation.

use super::world_point;
use crate::volume::function::VectFunction;
use crate::volume::Volume;

/// Weighted average of the 8 voxels surrounding the query point, with
/// triangle weights `1 - |offset|` along each axis. Corners outside the
/// grid are left out of both the sum and the total weight.
#[derive(Debug, Clone)]
pub struct TrilinearInterp<'a> {
    volume: &'a Volume,
}

impl<'a> TrilinearInterp<'a> {
    /// Create a trilinear interpolator over `volume`.
    pub fn new(volume: &'a Volume) -> Self {
        TrilinearInterp { volume }
    }
}

impl<'a> VectFunction for TrilinearInterp<'a> {
    fn dim_in(&self) -> usize {
        3
    }

    fn dim_out(&self) -> usize {
        self.volume.channels()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        output.iter_mut().for_each(|o| *o = 0.);

        let sampling = self.volume.sampling();
        let point = world_point(input);
        if !sampling.contains_world(&point) {
            return;
        }

        let voxel = sampling.voxel(&point);
        let base = voxel.map(f64::floor);
        let frac = voxel - base;

        let mut total = 0.;
        for corner in 0..8 {
            let step = [corner & 1, (corner >> 1) & 1, (corner >> 2) & 1];
            let i = base[0] as isize + step[0] as isize;
            let j = base[1] as isize + step[1] as isize;
            let k = base[2] as isize + step[2] as isize;
            if !sampling.contains(i, j, k) {
                continue;
            }

            let mut weight = 1.;
            for axis in 0..3 {
                weight *= if step[axis] == 1 {
                    frac[axis]
                } else {
                    1. - frac[axis]
                };
            }
            total += weight;

            for (d, o) in output.iter_mut().enumerate() {
                *o += weight * self.volume.get(i as usize, j as usize, k as usize, d);
            }
        }

        if total > 0. {
            output.iter_mut().for_each(|o| *o /= total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::Sampling;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn ramp() -> Volume {
        let s = Sampling::axis_aligned(Vector3::new(1., 2., 3.), Vector3::new(0.5, 1., 2.), [4, 4, 4]).unwrap();
        let mut v = Volume::new(s, 2);
        for [i, j, k] in v.sampling().clone().indices() {
            v.set_voxel(i, j, k, &[i as f64 + 2. * j as f64 - k as f64, 1.]);
        }
        v
    }

    #[test]
    fn reproduces_linear_functions() {
        let v = ramp();
        let f = TrilinearInterp::new(&v);
        let voxel = Vector3::new(1.3, 0.25, 2.9);
        let p = v.sampling().world(&voxel);
        let out = f.apply(p.as_slice());
        assert_abs_diff_eq!(out[0], 1.3 + 0.5 - 2.9, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 1., epsilon = 1e-12);
    }

    #[test]
    fn missing_corners_are_renormalized() {
        let v = ramp();
        let f = TrilinearInterp::new(&v);
        // past the last voxel along i, but still nearest to it
        let p = v.sampling().world(&Vector3::new(3.3, 0., 0.));
        let out = f.apply(p.as_slice());
        assert_abs_diff_eq!(out[0], 3., epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 1., epsilon = 1e-12);
    }

    #[test]
    fn outside_is_zero() {
        let v = ramp();
        let f = TrilinearInterp::new(&v);
        let p = v.sampling().world(&Vector3::new(-0.7, 1., 1.));
        assert_eq!(f.apply(p.as_slice()), vec![0., 0.]);
    }
}
