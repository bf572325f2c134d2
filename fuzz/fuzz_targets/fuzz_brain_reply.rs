#![no_main]

use brainrelay::fuzz_api::decode_brain_reply;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_brain_reply(data);
});
