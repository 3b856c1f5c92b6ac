#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input either decodes or fails with an error; it must never panic.
    let _ = hufzip::decompress(data);
});
