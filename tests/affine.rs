use approx::assert_abs_diff_eq;
use nalgebra::{Matrix3, Matrix4, Vector3};
use voxkit::affine::{affine_to_quaternion, orthonormalize};
use voxkit::{canonical_sampling, NiftiHeader, Orientation};

#[test]
#[rustfmt::skip]
fn sform() {
    let header = NiftiHeader {
        sform_code: 1,
        qform_code: 0,
        srow_x: [2.4, -0.0008, -0.0411765, -114.766396],
        srow_y: [0.1, 2.4995277, 0.0485984, -97.420204],
        srow_z: [0.4, -0.0485, 2.4991884, -89.12282],
        ..Default::default()
    };

    let real_affine = Matrix4::new(
        2.4, -0.0008,    -0.0411765, -114.766396,
        0.1,  2.4995277,  0.0485984,  -97.420204,
        0.4, -0.0485,     2.4991884,  -89.12282,
        0.0,  0.0,        0.0,          1.0
    );
    assert_abs_diff_eq!(header.affine(), real_affine, epsilon = 1e-5);
}

#[test]
#[rustfmt::skip]
fn qform() {
    let header = NiftiHeader {
        sform_code: 0,
        qform_code: 1,
        pixdim: [-1.0, 0.9375, 0.9375, 3.0, 0.0, 0.0, 0.0, 0.0],
        quatern_b: 0.0,
        quatern_c: 1.0,
        quatern_d: 0.0,
        quatern_x: 59.557503,
        quatern_y: 73.172,
        quatern_z: 43.4291,
        ..Default::default()
    };

    let real_affine = Matrix4::new(
        -0.9375, 0.0,    0.0, 59.557503,
        0.0,     0.9375, 0.0, 73.172,
        0.0,     0.0,    3.0, 43.4291,
        0.0,     0.0,    0.0, 1.0
    );
    assert_abs_diff_eq!(header.affine(), real_affine, epsilon = 1e-5);
}

#[test]
#[rustfmt::skip]
fn sform_takes_priority() {
    let header = NiftiHeader {
        sform_code: 1,
        srow_x: [2.4, 0.0, 0.0, -114.766396],
        srow_y: [0.1, 2.4, 0.0, -97.420204],
        srow_z: [0.4, 0.4, 2.4, -89.12282],
        qform_code: 1,
        pixdim: [-1.0, 0.9375, 0.9375, 3.0, 0.0, 0.0, 0.0, 0.0],
        quatern_c: 1.0,
        quatern_x: 59.0,
        quatern_y: 73.0,
        quatern_z: 43.0,
        ..Default::default()
    };

    let real_affine = Matrix4::new(
        2.4, 0.0, 0.0, -114.766396,
        0.1, 2.4, 0.0, -97.420204,
        0.4, 0.4, 2.4, -89.12282,
        0.0, 0.0, 0.0, 1.0
    );
    assert_abs_diff_eq!(header.affine(), real_affine, epsilon = 1e-5);
}

#[test]
fn none_valid() {
    let header = NiftiHeader {
        dim: [3, 100, 100, 100, 0, 0, 0, 0],
        pixdim: [-1.0, 0.9, 0.9, 3.0, 0.0, 0.0, 0.0, 0.0],
        srow_x: [1.0, 0.0, 0.0, 1.0],
        quatern_c: 1.0,
        quatern_x: 59.0,
        ..Default::default()
    };
    let expected = Matrix4::from_diagonal(&nalgebra::Vector4::new(0.9, 0.9, 3.0, 1.0));
    assert_abs_diff_eq!(header.affine(), expected, epsilon = 1e-6);
    assert_eq!(header.orientation().unwrap(), Orientation::CANONICAL);
}

#[test]
fn qform_flip_is_undone_in_canonical_grid() {
    let header = NiftiHeader {
        dim: [3, 10, 10, 4, 0, 0, 0, 0],
        qform_code: 1,
        pixdim: [-1.0, 0.9375, 0.9375, 3.0, 0.0, 0.0, 0.0, 0.0],
        quatern_c: 1.0,
        quatern_x: 59.5,
        quatern_y: 73.0,
        quatern_z: 43.0,
        ..Default::default()
    };
    assert_eq!(header.orientation().unwrap(), "RPI".parse::<Orientation>().unwrap());

    let (sampling, permutation) = canonical_sampling(&header).unwrap();
    assert_abs_diff_eq!(sampling.rotation_matrix(), Matrix3::identity(), epsilon = 1e-6);
    assert_abs_diff_eq!(*sampling.delta(), Vector3::new(0.9375, 0.9375, 3.0), epsilon = 1e-6);
    // file voxel (9, 0, 0) is the leftmost one
    assert_eq!(permutation.apply([9, 0, 0]), [0, 0, 0]);
    assert_abs_diff_eq!(
        *sampling.origin(),
        Vector3::new(59.5 - 9. * 0.9375, 73.0, 43.0),
        epsilon = 1e-4
    );
}

#[test]
fn orthonormalize_recovers_rotation() {
    let rotation = nalgebra::Rotation3::from_euler_angles(0.3, -0.2, 0.9).into_inner();
    let scaled = rotation * Matrix3::from_diagonal(&Vector3::new(2.0, 0.5, 3.0));
    let q = orthonormalize(&scaled).unwrap();
    assert_abs_diff_eq!(q, rotation, epsilon = 1e-9);
    let quaternion = affine_to_quaternion(&q);
    assert_abs_diff_eq!(quaternion.to_rotation_matrix().into_inner(), rotation, epsilon = 1e-9);
}
