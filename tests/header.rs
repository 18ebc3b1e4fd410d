use pretty_assertions::assert_eq;
use voxkit::{Endianness, NiftiHeader, NiftiType, Orientation, VolumeError};

mod util;

use util::{minimal_header, temporary_dir, temporary_path, write_bytes};

#[test]
fn minimal_hdr() {
    let dir = temporary_dir();
    let path = temporary_path(&dir, "minimal.hdr");
    let mut bytes = Vec::new();
    minimal_header().to_writer(&mut bytes).unwrap();
    write_bytes(&path, &bytes);

    let h = NiftiHeader::from_file(&path).unwrap();
    assert_eq!(h, minimal_header());
    assert_eq!(h.endianness, Endianness::Big);
    assert_eq!(h.data_type().unwrap(), NiftiType::Int16);
}

#[test]
fn minimal_hdr_gz() {
    let dir = temporary_dir();
    let path = temporary_path(&dir, "minimal.hdr.gz");
    let mut bytes = Vec::new();
    minimal_header().to_writer(&mut bytes).unwrap();
    write_bytes(&path, &bytes);

    let h = NiftiHeader::from_file(&path).unwrap();
    assert_eq!(h, minimal_header());
}

#[test]
fn mni_like_header() {
    let mut header = NiftiHeader {
        regular: b'r',
        dim: [3, 91, 109, 91, 1, 1, 1, 1],
        pixdim: [0., 2., 2., 2., 1., 1., 1., 1.],
        xyzt_units: 10,
        cal_max: 255.,
        sform_code: 4,
        srow_x: [-2., 0., 0., 90.],
        srow_y: [0., 2., 0., -126.],
        srow_z: [0., 0., 2., -72.],
        endianness: Endianness::Little,
        ..Default::default()
    };
    header.set_data_type(NiftiType::Uint8);
    header.set_description_str("FSL3.2beta").unwrap();

    let mut bytes = Vec::new();
    header.to_writer(&mut bytes).unwrap();
    let back = NiftiHeader::from_reader(&bytes[..]).unwrap();
    assert_eq!(back, header);
    assert_eq!(back.description(), "FSL3.2beta");
    assert_eq!(back.grid_counts().unwrap(), [91, 109, 91]);
    assert_eq!(back.channels(), 1);
    // x runs from right to left, y from posterior to anterior
    assert_eq!(back.orientation().unwrap(), "RPI".parse::<Orientation>().unwrap());
}

#[test]
fn truncated_header_fails() {
    let mut bytes = Vec::new();
    minimal_header().to_writer(&mut bytes).unwrap();
    match NiftiHeader::from_reader(&bytes[..300]) {
        Err(VolumeError::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn wrong_size_fails() {
    let header = NiftiHeader {
        sizeof_hdr: 540,
        ..Default::default()
    };
    let mut bytes = Vec::new();
    header.to_writer(&mut bytes).unwrap();
    match NiftiHeader::from_reader(&bytes[..]) {
        Err(VolumeError::InvalidFormat) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}
