#![no_main]
use libfuzzer_sys::fuzz_target;
use voxkit::{canonical_sampling, NiftiHeader};

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = NiftiHeader::from_reader(data) {
        let _ = header.grid_counts();
        let _ = header.channels();
        let _ = header.data_type();
        let _ = header.qform();
        let _ = header.sform();
        let _ = header.intent();
        let _ = header.slice_order();
        let _ = header.xyzt_units();
        let _ = header.orientation();
        let _ = canonical_sampling(&header);
        let _ = header.clone().validate_description();
    }
});
