use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use pretty_assertions::assert_eq;
use voxkit::filter::kernel;
use voxkit::volume::function::from_fn;
use voxkit::{
    interp, InterpolationType, Mask, ReaderOptions, Sampling, VectFunction, Volume, VolumeBlocker, VolumeFilter,
    VolumeFunction, WriterOptions,
};

mod util;

use util::{indexed_volume, oblique_sampling, temporary_dir, temporary_path};

fn impulse() -> Volume {
    let sampling = Sampling::axis_aligned(Vector3::new(2., -1., 0.5), Vector3::new(1., 1., 1.), [4, 4, 4]).unwrap();
    let mut volume = Volume::new(sampling, 1);
    volume.set(1, 1, 1, 0, 10.);
    volume
}

fn at(volume: &Volume, i: f64, j: f64, k: f64) -> [f64; 3] {
    let w = volume.sampling().world(&Vector3::new(i, j, k));
    [w[0], w[1], w[2]]
}

#[test]
fn trilinear_impulse() {
    let volume = impulse();
    let f = interp(InterpolationType::Trilinear, &volume);
    assert_eq!(f.dim_in(), 3);
    assert_eq!(f.dim_out(), 1);
    assert_eq!(f.apply(&at(&volume, 1., 1., 1.)), vec![10.]);
    assert_abs_diff_eq!(f.apply(&at(&volume, 1.5, 1., 1.))[0], 5., epsilon = 1e-12);
}

#[test]
fn exact_at_grid_points() {
    let volume = indexed_volume(oblique_sampling([5, 4, 4]), 2);
    for &kind in &[InterpolationType::Nearest, InterpolationType::Trilinear, InterpolationType::Tricubic] {
        let f = interp(kind, &volume);
        for [i, j, k] in volume.sampling().indices() {
            let world = volume.sampling().world_index(i, j, k);
            let value = f.apply(&[world[0], world[1], world[2]]);
            for d in 0..2 {
                assert_abs_diff_eq!(value[d], volume.get(i, j, k, d), epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn outside_is_zero_for_every_kernel() {
    let mut volume = impulse();
    volume.fill(3.);
    for &kind in InterpolationType::ALL.iter() {
        let f = interp(kind, &volume);
        assert_eq!(f.apply(&at(&volume, -5., 1., 1.)), vec![0.], "{}", kind);
        assert_eq!(f.apply(&at(&volume, 1., 1., 9.)), vec![0.], "{}", kind);
    }
}

#[test]
fn resample_read_volume_with_function() {
    let dir = temporary_dir();
    let path = temporary_path(&dir, "source.nii.gz");
    let volume = indexed_volume(oblique_sampling([6, 5, 4]), 1);
    WriterOptions::new(&path).write_volume(&volume).unwrap();
    let source = ReaderOptions::new().read_file(&path).unwrap().into_volume();

    // sample the source at the positions of a coarse grid
    let coarse = source.sampling().clone();
    let positions = {
        let mut p = Volume::new(coarse.clone(), 3);
        for [i, j, k] in coarse.indices() {
            let w = coarse.world_index(i, j, k);
            p.set_voxel(i, j, k, &[w[0], w[1], w[2]]);
        }
        p
    };
    let sampled = VolumeFunction::new(&positions, || interp(InterpolationType::Trilinear, &source))
        .with_threads(3)
        .run()
        .unwrap();
    for [i, j, k] in coarse.indices() {
        assert_abs_diff_eq!(sampled.get(i, j, k, 0), source.get(i, j, k, 0), epsilon = 1e-6);
    }
}

#[test]
fn filter_thread_invariance_with_mask() {
    let volume = indexed_volume(oblique_sampling([6, 5, 4]), 2);
    let mut mask = Mask::new(volume.sampling().clone());
    for [i, j, k] in volume.sampling().indices() {
        mask.set(i, j, k, ((i + j + k) % 3 != 0) as i32);
    }
    let filter = |threads| {
        VolumeFilter::new(kernel::gaussian(volume.sampling(), 3, 3, 3, 1.).unwrap())
            .unwrap()
            .with_mask(&mask)
            .with_pass(true)
            .with_boundary(true)
            .with_normalize(true)
            .with_threads(threads)
            .apply(&volume)
            .unwrap()
    };
    assert_eq!(filter(1), filter(4));
}

#[test]
fn block_files_round_trip() {
    let dir = temporary_dir();
    let volume = indexed_volume(oblique_sampling([7, 5, 3]), 2);
    let blocker = VolumeBlocker::new(volume.sampling().clone(), [3, 0, 2]);
    assert_eq!(blocker.num_blocks(), 6);

    let pattern = |idx: usize| dir.path().join("blocks").join(format!("block{}.nii.gz", idx));
    blocker.write_blocks(&volume, pattern).unwrap();
    assert!(pattern(5).is_file());

    let rebuilt = blocker.read_blocks(pattern, false).unwrap();
    assert_eq!(rebuilt.data(), volume.data());

    std::fs::remove_file(pattern(2)).unwrap();
    assert!(blocker.read_blocks(pattern, false).is_err());
    let partial = blocker.read_blocks(pattern, true).unwrap();
    let [si, sj, sk] = blocker.block_start(2).unwrap();
    assert_eq!(partial.get(si, sj, sk, 0), 0.);
    assert_eq!(partial.get(0, 0, 0, 1), volume.get(0, 0, 0, 1));
}

#[test]
fn function_applies_per_voxel() {
    let volume = indexed_volume(oblique_sampling([3, 3, 3]), 2);
    let out = VolumeFunction::new(&volume, || from_fn(2, 2, |x, y| {
        y[0] = x[1] - x[0];
        y[1] = x[0] * 2.;
    }))
    .run()
    .unwrap();
    assert_eq!(out.voxel(2, 1, 0), vec![100., 10.]);
}
