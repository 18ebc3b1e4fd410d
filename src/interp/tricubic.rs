//! Tricubic interpolation.
//!
//! Within each grid cell the volume is modelled as a polynomial with 64
//! coefficients, `sum a[i + 4j + 16k] x^i y^j z^k`, fitted to the values
//! and the finite difference derivatives at the eight cell corners.
//! Samples outside the grid read as zero when building the fit.

mod basis;

use self::basis::BASIS;
use super::world_point;
use crate::volume::function::VectFunction;
use crate::volume::Volume;
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;

/// Number of polynomial coefficients per cell.
const TERMS: usize = 64;

/// Cell corners, with `i` varying fastest.
const CORNERS: [[isize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Axes differentiated for each block of eight corner constraints:
/// the value, then d/dx, d/dy, d/dz, d2/dxdy, d2/dxdz, d2/dydz and d3/dxdydz.
const DERIVATIVES: [[bool; 3]; 8] = [
    [false, false, false],
    [true, false, false],
    [false, true, false],
    [false, false, true],
    [true, true, false],
    [true, false, true],
    [false, true, true],
    [true, true, true],
];

/// Memo of cell coefficients keyed by (cell index, channel).
///
/// The cache holds at most `capacity` entries and is emptied entirely when
/// it fills up. It belongs to the caller, which decides its lifetime and
/// can hand it from one interpolator to the next.
#[derive(Debug, Clone)]
pub struct CoefficientCache {
    capacity: usize,
    entries: HashMap<(usize, usize), [f64; TERMS]>,
}

impl CoefficientCache {
    /// Create an empty cache holding up to `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        CoefficientCache {
            capacity,
            entries: HashMap::new(),
        }
    }

    /// Cache sized to hold every cell and channel of `volume`.
    pub fn for_volume(volume: &Volume) -> Self {
        Self::new(volume.sampling().size() * volume.channels())
    }

    /// Number of cached cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached cell.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn get(&self, key: (usize, usize)) -> Option<&[f64; TERMS]> {
        self.entries.get(&key)
    }

    fn insert(&mut self, key: (usize, usize), coefs: [f64; TERMS]) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            trace!("coefficient cache full, clearing {} entries", self.entries.len());
            self.entries.clear();
        }
        self.entries.insert(key, coefs);
    }
}

/// Tricubic interpolator, optionally memoizing cell coefficients.
#[derive(Debug)]
pub struct TricubicInterp<'a> {
    volume: &'a Volume,
    cache: Option<RefCell<CoefficientCache>>,
}

impl<'a> TricubicInterp<'a> {
    /// Create a tricubic interpolator over `volume`, without caching.
    pub fn new(volume: &'a Volume) -> Self {
        TricubicInterp {
            volume,
            cache: None,
        }
    }

    /// Memoize cell coefficients in `cache`.
    pub fn with_cache(mut self, cache: CoefficientCache) -> Self {
        self.cache = Some(RefCell::new(cache));
        self
    }

    /// Take back the cache, leaving the interpolator uncached.
    pub fn take_cache(&mut self) -> Option<CoefficientCache> {
        self.cache.take().map(RefCell::into_inner)
    }

    /// Fit the polynomial of the cell whose lowest corner is `(si, sj, sk)`.
    fn coefficients(&self, si: isize, sj: isize, sk: isize, d: usize) -> [f64; TERMS] {
        let mut constraints = [0.; TERMS];
        let mut n = 0;
        for mask in DERIVATIVES.iter() {
            let axes: Vec<usize> = (0..3).filter(|&a| mask[a]).collect();
            let scale = 0.5f64.powi(axes.len() as i32);
            for corner in CORNERS.iter() {
                let base = [si + corner[0], sj + corner[1], sk + corner[2]];
                // sum over every sign combination of the differentiated axes
                let mut total = 0.;
                for signs in 0..(1usize << axes.len()) {
                    let mut p = base;
                    let mut sign = 1.;
                    for (bit, &axis) in axes.iter().enumerate() {
                        if signs & (1 << bit) == 0 {
                            p[axis] += 1;
                        } else {
                            p[axis] -= 1;
                            sign = -sign;
                        }
                    }
                    total += sign * self.volume.get_or_zero(p[0], p[1], p[2], d);
                }
                constraints[n] = scale * total;
                n += 1;
            }
        }

        let mut coefs = [0.; TERMS];
        for (c, row) in coefs.iter_mut().zip(BASIS.iter()) {
            *c = row
                .iter()
                .zip(constraints.iter())
                .map(|(&b, &x)| f64::from(b) * x)
                .sum();
        }
        coefs
    }

    fn cell_coefficients(&self, si: isize, sj: isize, sk: isize, d: usize) -> [f64; TERMS] {
        let cache = match self.cache {
            Some(ref cache) => cache,
            None => return self.coefficients(si, sj, sk, d),
        };

        let key = (
            self.volume.sampling().index(si as usize, sj as usize, sk as usize),
            d,
        );
        if let Some(coefs) = cache.borrow().get(key) {
            return *coefs;
        }
        let coefs = self.coefficients(si, sj, sk, d);
        cache.borrow_mut().insert(key, coefs);
        coefs
    }
}

/// Evaluate a cell polynomial at the fractional offsets `(x, y, z)`.
fn evaluate(coefs: &[f64; TERMS], x: f64, y: f64, z: f64) -> f64 {
    let mut result = 0.;
    let mut n = 0;
    let mut zpow = 1.;
    for _ in 0..4 {
        let mut ypow = 1.;
        for _ in 0..4 {
            let a = &coefs[n..n + 4];
            result += ypow * zpow * (a[0] + x * (a[1] + x * (a[2] + x * a[3])));
            n += 4;
            ypow *= y;
        }
        zpow *= z;
    }
    result
}

impl<'a> VectFunction for TricubicInterp<'a> {
    fn dim_in(&self) -> usize {
        3
    }

    fn dim_out(&self) -> usize {
        self.volume.channels()
    }

    fn apply_into(&self, input: &[f64], output: &mut [f64]) {
        let sampling = self.volume.sampling();
        let point = world_point(input);
        if !sampling.contains_world(&point) {
            output.iter_mut().for_each(|o| *o = 0.);
            return;
        }

        let voxel = sampling.voxel(&point);
        let counts = sampling.counts();
        let mut start = [0isize; 3];
        let mut frac = [0.; 3];
        for axis in 0..3 {
            let cell = voxel[axis].floor().max(0.).min((counts[axis] - 1) as f64);
            start[axis] = cell as isize;
            frac[axis] = voxel[axis] - cell;
        }

        for (d, o) in output.iter_mut().enumerate() {
            let coefs = self.cell_coefficients(start[0], start[1], start[2], d);
            *o = evaluate(&coefs, frac[0], frac[1], frac[2]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::Sampling;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn quadratic(i: f64, j: f64, k: f64) -> f64 {
        0.3 * i * i - i * j + 0.5 * k + 2. + 0.1 * i * j * k
    }

    fn volume() -> Volume {
        let s = Sampling::axis_aligned(Vector3::new(-2., 0., 4.), Vector3::new(1., 0.5, 2.), [8, 8, 8]).unwrap();
        let mut v = Volume::new(s, 1);
        for [i, j, k] in v.sampling().clone().indices() {
            v.set(i, j, k, 0, quadratic(i as f64, j as f64, k as f64));
        }
        v
    }

    #[test]
    fn exact_at_grid_points() {
        let v = volume();
        let f = TricubicInterp::new(&v);
        for &[i, j, k] in &[[0, 0, 0], [3, 4, 5], [7, 7, 7], [7, 0, 3]] {
            let p = v.sampling().world_index(i, j, k);
            assert_abs_diff_eq!(f.apply(p.as_slice())[0], v.get(i, j, k, 0), epsilon = 1e-9);
        }
    }

    #[test]
    fn reproduces_quadratics_in_the_interior() {
        let v = volume();
        let f = TricubicInterp::new(&v);
        let voxel = Vector3::new(3.3, 3.6, 3.2);
        let p = v.sampling().world(&voxel);
        assert_abs_diff_eq!(f.apply(p.as_slice())[0], quadratic(3.3, 3.6, 3.2), epsilon = 1e-9);
    }

    #[test]
    fn outside_is_zero() {
        let v = volume();
        let f = TricubicInterp::new(&v);
        let p = v.sampling().world(&Vector3::new(3., 9., 3.));
        assert_eq!(f.apply(p.as_slice()), vec![0.]);
    }

    #[test]
    fn cache_does_not_change_results() {
        let v = volume();
        let plain = TricubicInterp::new(&v);
        let mut cached = TricubicInterp::new(&v).with_cache(CoefficientCache::new(2));
        for &voxel in &[[1.2, 2.5, 3.1], [1.7, 2.1, 3.9], [5.5, 0.2, 6.6], [1.2, 2.5, 3.1]] {
            let p = v.sampling().world(&Vector3::from(voxel));
            assert_eq!(cached.apply(p.as_slice()), plain.apply(p.as_slice()));
        }
        let cache = cached.take_cache().unwrap();
        assert!(cache.len() <= 2);
        assert!(!cache.is_empty());
    }
}
