//! The geometry of a rectilinear voxel grid.

use crate::affine::from_affine_and_translation;
use crate::error::{Result, VolumeError};
use nalgebra::{Matrix3, Matrix4, UnitQuaternion, Vector3};

/// Descriptor of a rotated rectilinear 3D grid: the world position of
/// voxel (0, 0, 0), the spacing along each voxel axis, the orientation of
/// those axes in world space, and the number of voxels along each axis.
///
/// The voxel-to-world mapping is
/// `world(v) = origin + rotation · (v .* delta)`.
///
/// # Example
///
/// ```
/// use voxkit::Sampling;
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(
///     Vector3::new(10., 0., 0.),
///     Vector3::new(2., 2., 2.),
///     [4, 4, 4],
/// )?;
/// let p = sampling.world_index(1, 0, 0);
/// assert_eq!(p, Vector3::new(12., 0., 0.));
/// assert!(sampling.contains_world(&p));
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    origin: Vector3<f64>,
    delta: Vector3<f64>,
    rotation: UnitQuaternion<f64>,
    counts: [usize; 3],
}

impl Sampling {
    /// Create a new grid.
    ///
    /// # Errors
    ///
    /// `InvalidSampling` if a spacing is not a positive finite number
    /// or if an axis has no voxels.
    pub fn new(
        origin: Vector3<f64>,
        delta: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        counts: [usize; 3],
    ) -> Result<Self> {
        if delta.iter().any(|d| !(d.is_finite() && *d > 0.)) {
            return Err(VolumeError::InvalidSampling(format!(
                "non-positive spacing ({}, {}, {})",
                delta[0], delta[1], delta[2]
            )));
        }
        if counts.iter().any(|&c| c == 0) {
            return Err(VolumeError::InvalidSampling(format!(
                "empty grid {}x{}x{}",
                counts[0], counts[1], counts[2]
            )));
        }
        Ok(Sampling {
            origin,
            delta,
            rotation,
            counts,
        })
    }

    /// Create a new grid with no rotation.
    pub fn axis_aligned(origin: Vector3<f64>, delta: Vector3<f64>, counts: [usize; 3]) -> Result<Self> {
        Sampling::new(origin, delta, UnitQuaternion::identity(), counts)
    }

    /// World position of voxel (0, 0, 0).
    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    /// Voxel spacing along each axis.
    pub fn delta(&self) -> &Vector3<f64> {
        &self.delta
    }

    /// Rotation from voxel axes to world axes, as a quaternion.
    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    /// Rotation from voxel axes to world axes, as an orthonormal matrix.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        self.rotation.to_rotation_matrix().into_inner()
    }

    /// Number of voxels along each axis.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Number of voxels along the first axis.
    pub fn num_i(&self) -> usize {
        self.counts[0]
    }

    /// Number of voxels along the second axis.
    pub fn num_j(&self) -> usize {
        self.counts[1]
    }

    /// Number of voxels along the third axis.
    pub fn num_k(&self) -> usize {
        self.counts[2]
    }

    /// Total number of voxels.
    pub fn size(&self) -> usize {
        self.counts.iter().product()
    }

    /// The largest of the three spacings.
    pub fn delta_max(&self) -> f64 {
        self.delta.max()
    }

    /// Map continuous voxel coordinates to world space.
    pub fn world(&self, voxel: &Vector3<f64>) -> Vector3<f64> {
        self.origin + self.rotation * voxel.component_mul(&self.delta)
    }

    /// World position of the center of voxel (i, j, k).
    pub fn world_index(&self, i: usize, j: usize, k: usize) -> Vector3<f64> {
        self.world(&Vector3::new(i as f64, j as f64, k as f64))
    }

    /// Map a world position to continuous voxel coordinates.
    pub fn voxel(&self, world: &Vector3<f64>) -> Vector3<f64> {
        self.rotation
            .inverse_transform_vector(&(world - self.origin))
            .component_div(&self.delta)
    }

    /// The voxel whose center is nearest to the given world position.
    /// The result may lie outside the grid.
    pub fn nearest(&self, world: &Vector3<f64>) -> [isize; 3] {
        let v = self.voxel(world);
        [round(v[0]), round(v[1]), round(v[2])]
    }

    /// Whether the given voxel lies in the grid.
    pub fn contains(&self, i: isize, j: isize, k: isize) -> bool {
        let inside = |v: isize, n: usize| v >= 0 && (v as usize) < n;
        inside(i, self.counts[0]) && inside(j, self.counts[1]) && inside(k, self.counts[2])
    }

    /// Whether the voxel nearest to the given world position lies in the grid.
    pub fn contains_world(&self, world: &Vector3<f64>) -> bool {
        let [i, j, k] = self.nearest(world);
        self.contains(i, j, k)
    }

    /// Linear index of voxel (i, j, k), with `i` varying fastest.
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.counts[0] * (j + self.counts[1] * k)
    }

    /// The voxel with the given linear index.
    pub fn sample(&self, index: usize) -> [usize; 3] {
        let [ni, nj, _] = self.counts;
        [index % ni, (index / ni) % nj, index / (ni * nj)]
    }

    /// Iterate over all voxels of the grid, in linear index order.
    pub fn indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.size()).map(move |idx| self.sample(idx))
    }

    /// The 4x4 voxel-to-world affine of this grid.
    pub fn affine(&self) -> Matrix4<f64> {
        let linear = self.rotation_matrix() * Matrix3::from_diagonal(&self.delta);
        from_affine_and_translation(&linear, &self.origin)
    }

    /// A grid with the same spacing and rotation whose voxel (0, 0, 0)
    /// lies at voxel `start` of this grid.
    pub fn range(&self, start: [usize; 3], counts: [usize; 3]) -> Result<Sampling> {
        let origin = self.world_index(start[0], start[1], start[2]);
        Sampling::new(origin, self.delta, self.rotation, counts)
    }
}

/// Round half up, matching the nearest-voxel convention of the grid.
fn round(v: f64) -> isize {
    (v + 0.5).floor() as isize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rotated() -> Sampling {
        Sampling::new(
            Vector3::new(-10., 4., 2.5),
            Vector3::new(1.5, 2., 3.),
            UnitQuaternion::from_euler_angles(0.2, -0.1, 0.7),
            [5, 6, 7],
        )
        .unwrap()
    }

    #[test]
    fn world_voxel_inverse() {
        let s = rotated();
        let v = Vector3::new(1.25, -3.5, 6.);
        assert_abs_diff_eq!(s.voxel(&s.world(&v)), v, epsilon = 1e-12);
        let w = s.world_index(2, 3, 4);
        assert_eq!(s.nearest(&w), [2, 3, 4]);
    }

    #[test]
    fn containment() {
        let s = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [4, 4, 4]).unwrap();
        assert!(s.contains(0, 0, 0));
        assert!(s.contains(3, 3, 3));
        assert!(!s.contains(4, 0, 0));
        assert!(!s.contains(0, -1, 0));
        assert!(s.contains_world(&Vector3::new(-0.4, 3.4, 0.)));
        assert!(!s.contains_world(&Vector3::new(-0.6, 0., 0.)));
        assert!(!s.contains_world(&Vector3::new(0., 3.5, 0.)));
    }

    #[test]
    fn linear_indices() {
        let s = rotated();
        assert_eq!(s.size(), 210);
        assert_eq!(s.index(1, 0, 0), 1);
        assert_eq!(s.index(0, 1, 0), 5);
        assert_eq!(s.index(0, 0, 1), 30);
        for (idx, [i, j, k]) in s.indices().enumerate() {
            assert_eq!(s.index(i, j, k), idx);
        }
    }

    #[test]
    fn invalid_grids() {
        assert!(Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 0., 1.), [2, 2, 2]).is_err());
        assert!(Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [2, 0, 2]).is_err());
    }

    #[test]
    fn sub_range() {
        let s = rotated();
        let r = s.range([1, 2, 3], [2, 2, 2]).unwrap();
        assert_abs_diff_eq!(r.world_index(0, 0, 0), s.world_index(1, 2, 3), epsilon = 1e-12);
        assert_abs_diff_eq!(r.world_index(1, 1, 1), s.world_index(2, 3, 4), epsilon = 1e-12);
    }

    #[test]
    fn affine_matches_world() {
        let s = rotated();
        let a = s.affine();
        let w = a * nalgebra::Vector4::new(1., 2., 3., 1.);
        assert_abs_diff_eq!(Vector3::new(w[0], w[1], w[2]), s.world_index(1, 2, 3), epsilon = 1e-12);
    }
}
