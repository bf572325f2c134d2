#![no_main]

use brainrelay::fuzz_api::decode_push_body;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_push_body(data);
});
