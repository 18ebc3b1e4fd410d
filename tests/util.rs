#![allow(dead_code)]

use byteordered::ByteOrdered;
use flate2::write::GzEncoder;
use flate2::Compression;
use nalgebra::{UnitQuaternion, Vector3};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use voxkit::{Endianness, NiftiHeader, NiftiType, Sampling, Volume};

/// A fresh temporary directory, removed when dropped.
pub fn temporary_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// A path named `name` inside `dir`.
pub fn temporary_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// A header for a small 16-bit volume stored in big endian order.
pub fn minimal_header() -> NiftiHeader {
    let mut header = NiftiHeader {
        dim: [3, 4, 3, 2, 0, 0, 0, 0],
        pixdim: [0., 3., 3., 3., 0., 0., 0., 0.],
        endianness: Endianness::Big,
        ..Default::default()
    };
    header.set_data_type(NiftiType::Int16);
    header
}

/// Voxel values of the minimal volume, in file order.
pub fn minimal_values() -> Vec<i16> {
    (0..24).map(|v| v * 3 - 20).collect()
}

/// Encode big endian 16-bit values.
pub fn encode_i16_be(values: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut w = ByteOrdered::be(&mut bytes);
        for &v in values {
            w.write_i16(v).unwrap();
        }
    }
    bytes
}

/// Write `contents` to `path`, gzip-compressed when the name ends in ".gz".
pub fn write_bytes(path: &Path, contents: &[u8]) {
    let file = File::create(path).unwrap();
    if path.to_string_lossy().ends_with(".gz") {
        let mut e = GzEncoder::new(file, Compression::fast());
        e.write_all(contents).unwrap();
        let _ = e.finish().unwrap();
    } else {
        let mut file = file;
        file.write_all(contents).unwrap();
    }
}

/// The bytes of a single-file NIfTI image: header, extender, then data.
pub fn nii_bytes(header: &NiftiHeader, data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    header.to_writer(&mut bytes).unwrap();
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(data);
    bytes
}

/// A rotated grid with anisotropic spacing.
pub fn oblique_sampling(counts: [usize; 3]) -> Sampling {
    let rotation = UnitQuaternion::from_euler_angles(0.15, -0.1, 0.25);
    Sampling::new(Vector3::new(-12.5, 30., 4.), Vector3::new(0.8, 1.2, 2.5), rotation, counts).unwrap()
}

/// A volume whose values encode their voxel and channel.
pub fn indexed_volume(sampling: Sampling, channels: usize) -> Volume {
    let mut volume = Volume::new(sampling, channels);
    for (n, [i, j, k]) in volume.sampling().clone().indices().enumerate() {
        for d in 0..channels {
            volume.set(i, j, k, d, (n + 100 * d) as f64);
        }
    }
    volume
}
