//! Nearest neighbor interpolation.

use super::world_point;
use crate::volume::function::VectFunction;
use crate::volume::Volume;

/// Evaluates to the channels of the voxel nearest to the query point.
#[derive(Debug, Clone)]
pub struct NearestInterp<'a> {
    volume: &'a Volume,
}

impl<'a> NearestInterp<'a> {
    /// Create a nearest neighbor interpolator over `volume`.
    pub fn new(volume: &'a Volume) -> Self {
        NearestInterp { volume }
    }
}

impl<'a> VectFunction for NearestInterp<'a> {
    fn dim_in(&self) -> usize {
        3
    }

    fn dim_out(&self) -> usize {
        self.volume.channels()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        let sampling = self.volume.sampling();
        let [i, j, k] = sampling.nearest(&world_point(input));
        if sampling.contains(i, j, k) {
            self.volume.voxel_into(i as usize, j as usize, k as usize, output);
        } else {
            output.iter_mut().for_each(|o| *o = 0.);
        }
    }
}
