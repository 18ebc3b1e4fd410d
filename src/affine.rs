//! Affine transformation utilities: conversion between quaternions,
//! rotation matrices and the 4x4 voxel-to-world affine.

use crate::error::{Result, VolumeError};
use nalgebra::{Matrix3, Matrix4, Quaternion, SymmetricEigen, UnitQuaternion, Vector3};

/// Separate a 4x4 affine into its 3x3 linear and translation components.
pub fn get_affine_and_translation(affine: &Matrix4<f64>) -> (Matrix3<f64>, Vector3<f64>) {
    let translation = Vector3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)]);
    let linear = affine.fixed_view::<3, 3>(0, 0).into_owned();
    (linear, translation)
}

/// Compose a 4x4 affine from its 3x3 linear and translation components.
pub fn from_affine_and_translation(linear: &Matrix3<f64>, translation: &Vector3<f64>) -> Matrix4<f64> {
    let mut out = Matrix4::identity();
    out.fixed_view_mut::<3, 3>(0, 0).copy_from(linear);
    out.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    out
}

/// Build the voxel-to-world affine encoded by the quaternion fields of a header.
///
/// `(b, c, d)` are the imaginary parts of the rotation quaternion. The real part is
/// recovered as `sqrt(1 - b² - c² - d²)`; when that is vanishingly small the imaginary
/// part is renormalized and the real part taken as zero (a 180 degree rotation).
/// Non-positive spacings are replaced with 1, and a negative `qfac` flips the third axis.
pub fn qform_to_affine(
    quatern: [f64; 3],
    offset: [f64; 3],
    spacing: [f64; 3],
    qfac: f64,
) -> Matrix4<f64> {
    let [mut b, mut c, mut d] = quatern;
    let mut a = 1.0 - (b * b + c * c + d * d);
    if a < 1.0e-7 {
        a = 1.0 / (b * b + c * c + d * d).sqrt();
        b *= a;
        c *= a;
        d *= a;
        a = 0.0;
    } else {
        a = a.sqrt();
    }

    let positive = |v: f64| if v > 0.0 { v } else { 1.0 };
    let xd = positive(spacing[0]);
    let yd = positive(spacing[1]);
    let mut zd = positive(spacing[2]);
    if qfac < 0.0 {
        zd = -zd;
    }

    Matrix4::new(
        (a * a + b * b - c * c - d * d) * xd,
        2.0 * (b * c - a * d) * yd,
        2.0 * (b * d + a * c) * zd,
        offset[0],
        2.0 * (b * c + a * d) * xd,
        (a * a + c * c - b * b - d * d) * yd,
        2.0 * (c * d - a * b) * zd,
        offset[1],
        2.0 * (b * d - a * c) * xd,
        2.0 * (c * d + a * b) * yd,
        (a * a + d * d - c * c - b * b) * zd,
        offset[2],
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Project a 3x3 matrix onto the closest orthonormal matrix (the orthogonal
/// factor of its polar decomposition).
pub fn orthonormalize(m: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    let svd = m.svd(true, true);
    if svd.singular_values.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
        return Err(VolumeError::DegenerateTransform);
    }
    match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => Ok(u * v_t),
        _ => Err(VolumeError::DegenerateTransform),
    }
}

/// Calculate the unit quaternion corresponding to the given rotation matrix.
///
/// Method claimed to be robust to numerical errors in `rotation`. Constructs the
/// quaternion by calculating the maximum eigenvector of a symmetric matrix `k` built
/// from the input. The sign of a quaternion is arbitrary, and we return the one with
/// a non-negative real part.
///
/// Bar-Itzhack, Itzhack Y. "New method for extracting the quaternion from a rotation
/// matrix", AIAA Journal of Guidance, Control and Dynamics 23(6):1085-1087, 2000
pub fn affine_to_quaternion(rotation: &Matrix3<f64>) -> UnitQuaternion<f64> {
    // qyx refers to the contribution of the y input vector component to the x output
    // vector component, that is M[(0, 1)].
    let qxx = rotation[(0, 0)];
    let qyx = rotation[(0, 1)];
    let qzx = rotation[(0, 2)];
    let qxy = rotation[(1, 0)];
    let qyy = rotation[(1, 1)];
    let qzy = rotation[(1, 2)];
    let qxz = rotation[(2, 0)];
    let qyz = rotation[(2, 1)];
    let qzz = rotation[(2, 2)];

    #[rustfmt::skip]
    let k = Matrix4::new(
        qxx - qyy - qzz, qyx + qxy,       qzx + qxz,       qyz - qzy,
        qyx + qxy,       qyy - qxx - qzz, qzy + qyz,       qzx - qxz,
        qzx + qxz,       qzy + qyz,       qzz - qxx - qyy, qxy - qyx,
        qyz - qzy,       qzx - qxz,       qxy - qyx,       qxx + qyy + qzz,
    ) / 3.0;

    let SymmetricEigen {
        eigenvalues,
        eigenvectors,
    } = k.symmetric_eigen();
    let max_idx = eigenvalues.imax();
    let v = eigenvectors.column(max_idx);
    let q = Quaternion::new(v[3], v[0], v[1], v[2]);
    let q = if q.w < 0.0 { -q } else { q };
    UnitQuaternion::from_quaternion(q)
}

/// The imaginary parts `(b, c, d)` of a rotation quaternion, using the
/// sign convention where the real part is non-negative.
pub fn quaternion_bcd(q: &UnitQuaternion<f64>) -> [f64; 3] {
    let q = q.quaternion();
    if q.w < 0.0 {
        [-q.i, -q.j, -q.k]
    } else {
        [q.i, q.j, q.k]
    }
}
