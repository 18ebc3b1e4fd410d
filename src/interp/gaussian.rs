//! Gaussian-weighted interpolation and local regression.
//!
//! Both interpolators visit the voxels within `support` cells of the voxel
//! nearest to the query point. A neighbor at world offset `(dx, dy, dz)`
//! from the query point weighs `exp(-dx²/σ²) · exp(-dy²/σ²) · exp(-dz²/σ²)`,
//! with the offsets measured along the grid axes.

use super::world_point;
use crate::error::Result;
use crate::filter::kernel::check_sigma;
use crate::volume::function::VectFunction;
use crate::volume::Volume;
use nalgebra::{DMatrix, Vector3};

/// Default half-width of the neighborhood, in grid cells.
pub const DEFAULT_SUPPORT: usize = 2;

/// Relative singular value below which a regression system is treated as singular.
const RANK_TOLERANCE: f64 = 1e-10;

/// A neighbor of the query point: grid offset from the query in world
/// units along each axis, Gaussian weight and voxel index.
struct Neighbor {
    offset: Vector3<f64>,
    weight: f64,
    index: [usize; 3],
}

/// Shared neighborhood settings.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Window {
    sigma: f64,
    support: usize,
}

impl Window {
    fn for_volume(volume: &Volume) -> Self {
        Window {
            sigma: volume.sampling().delta_max(),
            support: DEFAULT_SUPPORT,
        }
    }

    /// Collect the in-bounds neighbors of `point`, or `None` when the point
    /// lies outside the grid.
    fn neighbors(&self, volume: &Volume, point: &Vector3<f64>) -> Option<Vec<Neighbor>> {
        let sampling = volume.sampling();
        if !sampling.contains_world(point) {
            return None;
        }

        let voxel = sampling.voxel(point);
        let center = sampling.nearest(point);
        let delta = sampling.delta();
        let s = self.support as isize;
        let s2 = self.sigma * self.sigma;

        let mut out = Vec::with_capacity((2 * self.support + 1).pow(3));
        for dk in -s..=s {
            for dj in -s..=s {
                for di in -s..=s {
                    let (i, j, k) = (center[0] + di, center[1] + dj, center[2] + dk);
                    if !sampling.contains(i, j, k) {
                        continue;
                    }
                    let offset = Vector3::new(
                        (i as f64 - voxel[0]) * delta[0],
                        (j as f64 - voxel[1]) * delta[1],
                        (k as f64 - voxel[2]) * delta[2],
                    );
                    let weight: f64 = offset.iter().map(|d| (-d * d / s2).exp()).product();
                    out.push(Neighbor {
                        offset,
                        weight,
                        index: [i as usize, j as usize, k as usize],
                    });
                }
            }
        }
        Some(out)
    }
}

/// Write the weighted mean of the neighbor values into `output`.
fn weighted_mean(volume: &Volume, neighbors: &[Neighbor], output: &mut [f64]) {
    output.iter_mut().for_each(|o| *o = 0.);
    let mut total = 0.;
    for n in neighbors {
        let [i, j, k] = n.index;
        for (d, o) in output.iter_mut().enumerate() {
            *o += n.weight * volume.get(i, j, k, d);
        }
        total += n.weight;
    }
    if total > 0. {
        output.iter_mut().for_each(|o| *o /= total);
    }
}

/// Gaussian-weighted average of the neighborhood.
#[derive(Debug, Clone)]
pub struct GaussianInterp<'a> {
    volume: &'a Volume,
    window: Window,
}

impl<'a> GaussianInterp<'a> {
    /// Create a Gaussian interpolator over `volume`. Sigma defaults to the
    /// largest voxel spacing and support to `DEFAULT_SUPPORT` cells.
    pub fn new(volume: &'a Volume) -> Self {
        GaussianInterp {
            volume,
            window: Window::for_volume(volume),
        }
    }

    /// Kernel width, in world units.
    ///
    /// # Errors
    ///
    /// - `InvalidKernel` if `sigma` is not a positive finite number.
    pub fn with_sigma(mut self, sigma: f64) -> Result<Self> {
        check_sigma(sigma)?;
        self.window.sigma = sigma;
        Ok(self)
    }

    /// Neighborhood half-width, in grid cells.
    pub fn with_support(mut self, support: usize) -> Self {
        self.window.support = support;
        self
    }

    /// The kernel width.
    pub fn sigma(&self) -> f64 {
        self.window.sigma
    }

    /// The neighborhood half-width.
    pub fn support(&self) -> usize {
        self.window.support
    }
}

impl<'a> VectFunction for GaussianInterp<'a> {
    fn dim_in(&self) -> usize {
        3
    }

    fn dim_out(&self) -> usize {
        self.volume.channels()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        match self.window.neighbors(self.volume, &world_point(input)) {
            Some(neighbors) => weighted_mean(self.volume, &neighbors, output),
            None => output.iter_mut().for_each(|o| *o = 0.),
        }
    }
}

/// Model fitted by [`GaussianLocalInterp`].
///
/// [`GaussianLocalInterp`]: struct.GaussianLocalInterp.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalFit {
    /// `β₀ + β·x`, 4 parameters.
    Linear,
    /// `β₀ + β·x + xᵀ B x`, 10 parameters.
    Quadratic,
}

impl LocalFit {
    fn terms(self) -> usize {
        match self {
            LocalFit::Linear => 4,
            LocalFit::Quadratic => 10,
        }
    }

    fn design_row(self, x: &Vector3<f64>, row: &mut [f64]) {
        row[0] = 1.;
        row[1] = x[0];
        row[2] = x[1];
        row[3] = x[2];
        if let LocalFit::Quadratic = self {
            row[4] = x[0] * x[0];
            row[5] = x[1] * x[1];
            row[6] = x[2] * x[2];
            row[7] = x[0] * x[1];
            row[8] = x[0] * x[2];
            row[9] = x[1] * x[2];
        }
    }
}

/// Gaussian-weighted least squares regression over the neighborhood.
///
/// Positions are taken relative to the query point, so the intercept of the
/// fitted model is the interpolated value. When the normal equations are
/// singular (too few neighbors, or a flat grid axis) the weighted mean is
/// returned instead.
#[derive(Debug, Clone)]
pub struct GaussianLocalInterp<'a> {
    volume: &'a Volume,
    window: Window,
    fit: LocalFit,
}

impl<'a> GaussianLocalInterp<'a> {
    /// Create a local regression interpolator over `volume`.
    pub fn new(volume: &'a Volume, fit: LocalFit) -> Self {
        GaussianLocalInterp {
            volume,
            window: Window::for_volume(volume),
            fit,
        }
    }

    /// Kernel width, in world units.
    ///
    /// # Errors
    ///
    /// - `InvalidKernel` if `sigma` is not a positive finite number.
    pub fn with_sigma(mut self, sigma: f64) -> Result<Self> {
        check_sigma(sigma)?;
        self.window.sigma = sigma;
        Ok(self)
    }

    /// Neighborhood half-width, in grid cells.
    pub fn with_support(mut self, support: usize) -> Self {
        self.window.support = support;
        self
    }

    /// The fitted model.
    pub fn fit(&self) -> LocalFit {
        self.fit
    }

    /// Solve the weighted normal equations for every channel at once.
    /// Returns the intercepts, or `None` for a singular system.
    fn regress(&self, neighbors: &[Neighbor]) -> Option<Vec<f64>> {
        let p = self.fit.terms();
        let channels = self.volume.channels();
        if neighbors.len() < p {
            return None;
        }

        let mut normal = DMatrix::<f64>::zeros(p, p);
        let mut rhs = DMatrix::<f64>::zeros(p, channels);
        let mut row = vec![0.; p];
        for n in neighbors {
            self.fit.design_row(&n.offset, &mut row);
            let [i, j, k] = n.index;
            for a in 0..p {
                let wa = n.weight * row[a];
                for b in 0..p {
                    normal[(a, b)] += wa * row[b];
                }
                for d in 0..channels {
                    rhs[(a, d)] += wa * self.volume.get(i, j, k, d);
                }
            }
        }

        let singular = normal.clone().singular_values();
        let largest = singular.max();
        if !(largest > 0.) || singular.min() <= largest * RANK_TOLERANCE {
            return None;
        }

        let solution = normal.cholesky()?.solve(&rhs);
        Some(solution.row(0).iter().copied().collect())
    }
}

impl<'a> VectFunction for GaussianLocalInterp<'a> {
    fn dim_in(&self) -> usize {
        3
    }

    fn dim_out(&self) -> usize {
        self.volume.channels()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        let neighbors = match self.window.neighbors(self.volume, &world_point(input)) {
            Some(neighbors) => neighbors,
            None => {
                output.iter_mut().for_each(|o| *o = 0.);
                return;
            }
        };

        match self.regress(&neighbors) {
            Some(intercepts) => output.copy_from_slice(&intercepts),
            None => weighted_mean(self.volume, &neighbors, output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::Sampling;
    use approx::assert_abs_diff_eq;

    fn linear(counts: [usize; 3]) -> Volume {
        let s = Sampling::axis_aligned(Vector3::new(0., 0., 0.), Vector3::new(1., 2., 1.), counts).unwrap();
        let mut v = Volume::new(s, 2);
        for [i, j, k] in v.sampling().clone().indices() {
            let p = v.sampling().world_index(i, j, k);
            v.set_voxel(i, j, k, &[1. + p[0] - 0.5 * p[1] + 2. * p[2], 7.]);
        }
        v
    }

    #[test]
    fn gaussian_preserves_constants() {
        let v = linear([6, 6, 6]);
        let f = GaussianInterp::new(&v).with_sigma(1.5).unwrap().with_support(1);
        let out = f.apply(&[2.3, 4.1, 2.7]);
        assert_abs_diff_eq!(out[1], 7., epsilon = 1e-12);
    }

    #[test]
    fn gaussian_is_symmetric_between_voxels() {
        let s = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [4, 4, 4]).unwrap();
        let mut v = Volume::new(s, 1);
        v.set(1, 1, 1, 0, 10.);
        v.set(2, 1, 1, 0, 10.);
        let f = GaussianInterp::new(&v).with_support(1);
        let left = f.apply(&[1.4, 1., 1.])[0];
        let right = f.apply(&[1.6, 1., 1.])[0];
        assert_abs_diff_eq!(left, right, epsilon = 1e-12);
    }

    #[test]
    fn local_linear_reproduces_linear_fields() {
        let v = linear([6, 6, 6]);
        for &fit in &[LocalFit::Linear, LocalFit::Quadratic] {
            let f = GaussianLocalInterp::new(&v, fit);
            let out = f.apply(&[2.3, 4.1, 2.7]);
            assert_abs_diff_eq!(out[0], 1. + 2.3 - 0.5 * 4.1 + 2. * 2.7, epsilon = 1e-8);
            assert_abs_diff_eq!(out[1], 7., epsilon = 1e-8);
        }
    }

    #[test]
    fn flat_grid_falls_back_to_mean() {
        let v = linear([5, 5, 1]);
        let f = GaussianLocalInterp::new(&v, LocalFit::Linear).with_support(1);
        let mean = GaussianInterp::new(&v).with_support(1);
        let p = [2.2, 3.9, 0.];
        assert_eq!(f.apply(&p), mean.apply(&p));
    }

    #[test]
    fn degenerate_sigma_is_rejected() {
        let v = linear([3, 3, 3]);
        for &sigma in &[0., -1., f64::NAN, f64::INFINITY] {
            assert!(GaussianInterp::new(&v).with_sigma(sigma).is_err());
            assert!(GaussianLocalInterp::new(&v, LocalFit::Linear).with_sigma(sigma).is_err());
        }
        let f = GaussianLocalInterp::new(&v, LocalFit::Linear).with_sigma(0.8).unwrap();
        assert!(f.apply(&[1.2, 2.1, 0.9]).iter().all(|x| x.is_finite()));
    }

    #[test]
    fn outside_is_zero() {
        let v = linear([3, 3, 3]);
        let f = GaussianLocalInterp::new(&v, LocalFit::Quadratic);
        assert_eq!(f.apply(&[-5., 0., 0.]), vec![0., 0.]);
        let g = GaussianInterp::new(&v);
        assert_eq!(g.apply(&[0., 0., 9.]), vec![0., 0.]);
    }
}
