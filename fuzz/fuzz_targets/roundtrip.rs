#![no_main]
use hufzip::{compress_with, decompress, Config, TrailerMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let packed = compress_with(data, &Config::new().with_trailer(TrailerMode::Explicit)).unwrap();
    let out = decompress(&packed).unwrap();
    assert_eq!(data, out.as_slice());

    let legacy = compress_with(data, &Config::new().with_trailer(TrailerMode::Legacy)).unwrap();
    let legacy_out = decompress(&legacy).unwrap();
    assert!(data.starts_with(&legacy_out));
    if legacy == packed {
        // Only the final-byte count can differ between the two modes.
        assert_eq!(legacy_out, data);
    }
});
