//! Mapping between the voxel order of a file and the canonical in-memory
//! voxel order, along with the derivation of the canonical grid.
//!
//! Files may store their voxels in any of the 48 axis orders and
//! directions. In memory, voxels are always kept in the `"LPI"` order, so
//! that the grid rotation stays close to the identity.

use crate::affine::{affine_to_quaternion, get_affine_and_translation, orthonormalize};
use crate::error::Result;
use crate::header::NiftiHeader;
use crate::orientation::{Direction, Orientation};
use crate::sampling::Sampling;
use log::warn;
use nalgebra::{Matrix4, Vector3};

/// A signed axis permutation with an offset, mapping file voxel indices to
/// canonical voxel indices: `canonical = P · file + offset`.
///
/// Every row and column of `P` holds exactly one nonzero entry, either 1 or -1.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct VoxelPermutation {
    matrix: [[i32; 3]; 3],
    offset: [i32; 3],
}

impl Default for VoxelPermutation {
    fn default() -> Self {
        VoxelPermutation::identity()
    }
}

impl VoxelPermutation {
    /// The permutation which leaves every index untouched.
    pub fn identity() -> Self {
        VoxelPermutation {
            matrix: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
            offset: [0; 3],
        }
    }

    /// The permutation taking voxels stored in `orientation` order, on a grid
    /// with `counts` voxels along the file axes, to the canonical order.
    ///
    /// A file axis running in the canonical direction maps with a 1. A file
    /// axis running the opposite way maps with a -1 and an offset of
    /// `count - 1`, so that indices stay in range.
    pub fn from_orientation(orientation: Orientation, counts: [usize; 3]) -> Self {
        let canonical = Orientation::CANONICAL.directions();
        let mut matrix = [[0; 3]; 3];
        let mut offset = [0; 3];
        for (file_axis, direction) in orientation.directions().iter().enumerate() {
            let target = direction.axis();
            if *direction == canonical[target] {
                matrix[target][file_axis] = 1;
            } else {
                matrix[target][file_axis] = -1;
                offset[target] = counts[file_axis] as i32 - 1;
            }
        }
        VoxelPermutation { matrix, offset }
    }

    /// Map a file voxel to its canonical voxel.
    pub fn apply(&self, voxel: [usize; 3]) -> [usize; 3] {
        let mut out = [0usize; 3];
        for (t, o) in out.iter_mut().enumerate() {
            let mut v = self.offset[t] as isize;
            for (f, &x) in voxel.iter().enumerate() {
                v += self.matrix[t][f] as isize * x as isize;
            }
            *o = v as usize;
        }
        out
    }

    /// The inverse mapping, from canonical voxels to file voxels.
    pub fn inverse(&self) -> Self {
        let mut matrix = [[0; 3]; 3];
        for (r, row) in matrix.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.matrix[c][r];
            }
        }
        let mut offset = [0; 3];
        for (r, o) in offset.iter_mut().enumerate() {
            *o = -(0..3).map(|c| matrix[r][c] * self.offset[c]).sum::<i32>();
        }
        VoxelPermutation { matrix, offset }
    }

    /// The canonical axis each file axis is mapped to.
    pub fn axis_map(&self) -> [usize; 3] {
        let mut out = [0; 3];
        for (f, o) in out.iter_mut().enumerate() {
            *o = (0..3).find(|&t| self.matrix[t][f] != 0).unwrap_or(f);
        }
        out
    }

    /// Reorder per-axis quantities from file axes to canonical axes.
    pub fn permute_axes<T: Copy>(&self, values: [T; 3]) -> [T; 3] {
        let mut out = values;
        for (f, &t) in self.axis_map().iter().enumerate() {
            out[t] = values[f];
        }
        out
    }

    /// Voxel counts of the canonical grid, given the counts of the file grid.
    pub fn permute_counts(&self, counts: [usize; 3]) -> [usize; 3] {
        self.permute_axes(counts)
    }

    /// Whether this is the identity permutation.
    pub fn is_identity(&self) -> bool {
        *self == VoxelPermutation::identity()
    }

    /// The permutation as a homogeneous 4x4 matrix acting on voxel coordinates.
    pub fn as_affine(&self) -> Matrix4<f64> {
        let mut out = Matrix4::identity();
        for r in 0..3 {
            for c in 0..3 {
                out[(r, c)] = f64::from(self.matrix[r][c]);
            }
            out[(r, 3)] = f64::from(self.offset[r]);
        }
        out
    }

    /// The orientation of the file axes this permutation was built from.
    pub fn orientation(&self) -> Orientation {
        let mut directions = [Direction::L; 3];
        for (f, d) in directions.iter_mut().enumerate() {
            let t = self.axis_map()[f];
            let code = (t as i32 + 1) * self.matrix[t][f];
            *d = Direction::from_signed_axis(code).unwrap_or(Direction::L);
        }
        // rows and columns hold a single entry each, so the axes are distinct
        Orientation::new(directions).unwrap_or(Orientation::CANONICAL)
    }
}

/// Derive the canonical grid of a header, along with the permutation from
/// the voxel order of the file to the canonical voxel order.
///
/// The rotation of the grid is the orthonormalized linear part of the
/// header affine composed with the inverse permutation. The spacings are
/// taken from `pixdim`, falling back to the affine column norms when not
/// positive.
///
/// # Errors
///
/// - `InconsistentDim` if a grid axis is empty.
/// - `DegenerateTransform` if the header affine is singular.
pub fn canonical_sampling(header: &NiftiHeader) -> Result<(Sampling, VoxelPermutation)> {
    let counts = header.grid_counts()?;

    if header.qform_code == 0 && header.sform_code > 0 {
        warn!("no qform was found, sform may include affine components that are not used");
    }

    let orientation = header.orientation()?;
    let permutation = VoxelPermutation::from_orientation(orientation, counts);

    let affine = header.affine();
    let canonical_affine = affine * permutation.inverse().as_affine();
    let (linear, origin) = get_affine_and_translation(&canonical_affine);
    let rotation = affine_to_quaternion(&orthonormalize(&linear)?);

    let (file_linear, _) = get_affine_and_translation(&affine);
    let pixdim = header.spacing();
    let mut spacing = [0.; 3];
    for (a, s) in spacing.iter_mut().enumerate() {
        *s = if pixdim[a] > 0. && pixdim[a].is_finite() {
            pixdim[a]
        } else {
            file_linear.column(a).norm()
        };
    }
    let delta = Vector3::from(permutation.permute_axes(spacing));

    let sampling = Sampling::new(origin, delta, rotation, permutation.permute_counts(counts))?;
    Ok((sampling, permutation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::from_affine_and_translation;
    use approx::assert_abs_diff_eq;
    use nalgebra::Matrix3;

    fn all_orientations() -> Vec<Orientation> {
        let letters = ['L', 'R', 'P', 'A', 'I', 'S'];
        let mut out = Vec::new();
        for a in &letters {
            for b in &letters {
                for c in &letters {
                    let code: String = [*a, *b, *c].iter().collect();
                    if let Ok(o) = code.parse() {
                        out.push(o);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn there_are_48_orientations() {
        assert_eq!(all_orientations().len(), 48);
    }

    #[test]
    fn canonical_orientation_is_identity() {
        let p = VoxelPermutation::from_orientation(Orientation::CANONICAL, [3, 4, 5]);
        assert!(p.is_identity());
    }

    #[test]
    fn indices_stay_in_range_and_invert() {
        let counts = [2, 3, 4];
        for o in all_orientations() {
            let p = VoxelPermutation::from_orientation(o, counts);
            let canonical_counts = p.permute_counts(counts);
            let inv = p.inverse();
            assert_eq!(p.orientation(), o);
            for k in 0..counts[2] {
                for j in 0..counts[1] {
                    for i in 0..counts[0] {
                        let c = p.apply([i, j, k]);
                        for a in 0..3 {
                            assert!(c[a] < canonical_counts[a], "{} maps out of range", o);
                        }
                        assert_eq!(inv.apply(c), [i, j, k]);
                    }
                }
            }
        }
    }

    #[test]
    fn canonical_grid_preserves_world_positions() {
        let counts = [3, 4, 5];
        let spacing = Vector3::new(1.5, 2., 2.5);
        for o in all_orientations() {
            // a header whose axes follow the given orientation exactly
            let mut linear = Matrix3::zeros();
            for (f, d) in o.directions().iter().enumerate() {
                let sign = if d.is_positive() { 1. } else { -1. };
                linear[(d.axis(), f)] = sign * spacing[f];
            }
            let mut header = NiftiHeader {
                dim: [3, counts[0] as u16, counts[1] as u16, counts[2] as u16, 1, 1, 1, 1],
                pixdim: [1., spacing[0] as f32, spacing[1] as f32, spacing[2] as f32, 1., 1., 1., 1.],
                sform_code: 1,
                qform_code: 1,
                ..Default::default()
            };
            let affine = from_affine_and_translation(&linear, &Vector3::new(5., -3., 7.));
            for c in 0..4 {
                header.srow_x[c] = affine[(0, c)] as f32;
                header.srow_y[c] = affine[(1, c)] as f32;
                header.srow_z[c] = affine[(2, c)] as f32;
            }

            assert_eq!(header.orientation().unwrap(), o);
            let (sampling, perm) = canonical_sampling(&header).unwrap();
            assert_abs_diff_eq!(sampling.rotation_matrix(), Matrix3::identity(), epsilon = 1e-9);

            for &v in &[[0, 0, 0], [2, 3, 4], [1, 0, 3]] {
                let file_world = (affine * nalgebra::Vector4::new(v[0] as f64, v[1] as f64, v[2] as f64, 1.)).xyz();
                let [i, j, k] = perm.apply(v);
                assert_abs_diff_eq!(sampling.world_index(i, j, k), file_world, epsilon = 1e-9);
            }
        }
    }
}
