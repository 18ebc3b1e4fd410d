#![no_main]
use libfuzzer_sys::fuzz_target;
use voxkit::ReaderOptions;

fuzz_target!(|data: &[u8]| {
    let _ = ReaderOptions::new().read_reader(data);
});
