//! Anatomical orientation codes and their derivation from a
//! voxel-to-world affine.
//!
//! Each voxel axis is labelled with the anatomical direction it comes
//! *from*: an affine equal to the identity yields `"LPI"`, meaning that
//! the first axis runs left to right, the second posterior to anterior
//! and the third inferior to superior.

use crate::error::{Result, VolumeError};
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::fmt;
use std::str::FromStr;

/// Orthogonality tolerance below which axes are left untouched.
const ORTHO_TOLERANCE: f64 = 1.0e-4;

/// One of the six anatomical directions a voxel axis may follow.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Direction {
    /// Left to right (NIFTI_L2R).
    L,
    /// Right to left (NIFTI_R2L).
    R,
    /// Posterior to anterior (NIFTI_P2A).
    P,
    /// Anterior to posterior (NIFTI_A2P).
    A,
    /// Inferior to superior (NIFTI_I2S).
    I,
    /// Superior to inferior (NIFTI_S2I).
    S,
}

impl Direction {
    /// Decode a signed world axis code: `±1` for x, `±2` for y and `±3` for z.
    pub fn from_signed_axis(code: i32) -> Option<Direction> {
        match code {
            1 => Some(Direction::L),
            -1 => Some(Direction::R),
            2 => Some(Direction::P),
            -2 => Some(Direction::A),
            3 => Some(Direction::I),
            -3 => Some(Direction::S),
            _ => None,
        }
    }

    /// Parse a single orientation letter.
    pub fn from_letter(c: char) -> Option<Direction> {
        match c {
            'L' => Some(Direction::L),
            'R' => Some(Direction::R),
            'P' => Some(Direction::P),
            'A' => Some(Direction::A),
            'I' => Some(Direction::I),
            'S' => Some(Direction::S),
            _ => None,
        }
    }

    /// The orientation letter.
    pub fn letter(self) -> char {
        match self {
            Direction::L => 'L',
            Direction::R => 'R',
            Direction::P => 'P',
            Direction::A => 'A',
            Direction::I => 'I',
            Direction::S => 'S',
        }
    }

    /// The world axis (0 for x, 1 for y, 2 for z) this direction runs along.
    pub fn axis(self) -> usize {
        match self {
            Direction::L | Direction::R => 0,
            Direction::P | Direction::A => 1,
            Direction::I | Direction::S => 2,
        }
    }

    /// Whether this direction increases along its world axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::L | Direction::P | Direction::I)
    }
}

/// A three letter orientation code, one direction per voxel axis.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Orientation([Direction; 3]);

impl Orientation {
    /// The in-memory voxel order: `"LPI"`.
    pub const CANONICAL: Orientation = Orientation([Direction::L, Direction::P, Direction::I]);

    /// Build an orientation out of three directions.
    ///
    /// # Errors
    ///
    /// `InvalidOrientation` if two directions share a world axis.
    pub fn new(directions: [Direction; 3]) -> Result<Self> {
        let [a, b, c] = directions;
        if a.axis() == b.axis() || a.axis() == c.axis() || b.axis() == c.axis() {
            let code: String = directions.iter().map(|d| d.letter()).collect();
            return Err(VolumeError::InvalidOrientation(code));
        }
        Ok(Orientation(directions))
    }

    /// The directions of the three voxel axes.
    pub fn directions(&self) -> [Direction; 3] {
        self.0
    }

    /// Determine the orientation closest to the given voxel-to-world affine.
    ///
    /// The linear part is orthonormalized column by column into a rotation `Q`.
    /// Then every signed permutation matrix `P` with `det(P)` of the same sign as
    /// `det(Q)` is tested, keeping the one for which `P·Q` has the largest trace.
    ///
    /// # Errors
    ///
    /// `DegenerateTransform` if an axis has zero length or the affine is singular.
    pub fn from_affine(affine: &Matrix4<f64>) -> Result<Self> {
        let q = orthonormal_axes(affine)?;
        let det_q = q.determinant();
        if det_q == 0.0 {
            return Err(VolumeError::DegenerateTransform);
        }

        let mut best_value = -666.0;
        let mut best = ([0usize, 1, 2], [1i32, 1, 1]);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                for k in 0..3 {
                    if i == k || j == k {
                        continue;
                    }
                    for &p in &[-1i32, 1] {
                        for &q_sign in &[-1i32, 1] {
                            for &r in &[-1i32, 1] {
                                let mut perm = Matrix3::zeros();
                                perm[(0, i)] = f64::from(p);
                                perm[(1, j)] = f64::from(q_sign);
                                perm[(2, k)] = f64::from(r);
                                if perm.determinant() * det_q <= 0.0 {
                                    continue;
                                }
                                let value = (perm * q).trace();
                                if value > best_value {
                                    best_value = value;
                                    best = ([i, j, k], [p, q_sign, r]);
                                }
                            }
                        }
                    }
                }
            }
        }

        let (columns, signs) = best;
        let mut directions = [Direction::L; 3];
        for (d, (column, sign)) in directions.iter_mut().zip(columns.iter().zip(&signs)) {
            let code = (*column as i32 + 1) * sign;
            *d = Direction::from_signed_axis(code).ok_or(VolumeError::DegenerateTransform)?;
        }
        Orientation::new(directions)
    }
}

/// Gram-Schmidt orthonormalization of the affine's voxel axes.
/// Returns the rotation from the (i, j, k) to the (x, y, z) axes.
fn orthonormal_axes(affine: &Matrix4<f64>) -> Result<Matrix3<f64>> {
    let column = |c: usize| Vector3::new(affine[(0, c)], affine[(1, c)], affine[(2, c)]);
    let normalized = |v: Vector3<f64>| {
        let norm = v.norm();
        if norm == 0.0 {
            Err(VolumeError::DegenerateTransform)
        } else {
            Ok(v / norm)
        }
    };
    // remove the component of `v` along the unit vector `u` when not already orthogonal
    let orthogonalized = |v: Vector3<f64>, u: &Vector3<f64>| {
        let dot = u.dot(&v);
        if dot.abs() > ORTHO_TOLERANCE {
            normalized(v - u * dot)
        } else {
            Ok(v)
        }
    };

    let xi = normalized(column(0))?;
    let xj = orthogonalized(normalized(column(1))?, &xi)?;

    let raw_k = column(2);
    let xk = if raw_k.norm() == 0.0 {
        xi.cross(&xj)
    } else {
        raw_k / raw_k.norm()
    };
    let xk = orthogonalized(xk, &xi)?;
    let xk = orthogonalized(xk, &xj)?;

    Ok(Matrix3::from_columns(&[xi, xj, xk]))
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Orientation {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || VolumeError::InvalidOrientation(s.to_string());
        let mut chars = s.chars();
        let mut directions = [Direction::L; 3];
        for d in directions.iter_mut() {
            *d = chars
                .next()
                .and_then(Direction::from_letter)
                .ok_or_else(invalid)?;
        }
        if chars.next().is_some() {
            return Err(invalid());
        }
        Orientation::new(directions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::from_affine_and_translation;

    fn orientation_of(linear: Matrix3<f64>) -> String {
        let affine = from_affine_and_translation(&linear, &Vector3::zeros());
        Orientation::from_affine(&affine).unwrap().to_string()
    }

    #[test]
    fn identity_is_canonical() {
        assert_eq!(orientation_of(Matrix3::identity()), "LPI");
        assert_eq!(
            Orientation::from_affine(&Matrix4::identity()).unwrap(),
            Orientation::CANONICAL
        );
    }

    #[test]
    fn flipped_and_swapped_axes() {
        assert_eq!(orientation_of(Matrix3::from_diagonal(&Vector3::new(-2., 2., 2.))), "RPI");
        assert_eq!(orientation_of(Matrix3::from_diagonal(&Vector3::new(-1., -1., 1.))), "RAI");
        // i -> y, j -> z, k -> x
        let m = Matrix3::new(0., 0., 1., 1., 0., 0., 0., 1., 0.);
        assert_eq!(orientation_of(m), "PIL");
        // i -> -z, j -> x, k -> -y
        let m = Matrix3::new(0., 1., 0., 0., 0., -1., -1., 0., 0.);
        assert_eq!(orientation_of(m), "SLA");
    }

    #[test]
    fn zero_k_axis_uses_cross_product() {
        let m = Matrix3::new(1., 0., 0., 0., 1., 0., 0., 0., 0.);
        assert_eq!(orientation_of(m), "LPI");
    }

    #[test]
    fn degenerate_transforms_fail() {
        let affine = from_affine_and_translation(&Matrix3::zeros(), &Vector3::zeros());
        assert!(Orientation::from_affine(&affine).is_err());

        // j parallel to i
        let m = Matrix3::new(1., 1., 0., 0., 0., 0., 0., 0., 1.);
        let affine = from_affine_and_translation(&m, &Vector3::zeros());
        assert!(Orientation::from_affine(&affine).is_err());
    }

    #[test]
    fn parse_codes() {
        let o: Orientation = "RAS".parse().unwrap();
        assert_eq!(o.directions(), [Direction::R, Direction::A, Direction::S]);
        assert_eq!(o.to_string(), "RAS");
        assert!("RLS".parse::<Orientation>().is_err());
        assert!("RAX".parse::<Orientation>().is_err());
        assert!("RA".parse::<Orientation>().is_err());
        assert!("RASL".parse::<Orientation>().is_err());
    }
}
