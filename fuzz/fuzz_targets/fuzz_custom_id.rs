#![no_main]

use arbitrary::Arbitrary;
use brainrelay::fuzz_api::parse_custom_id;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    raw: String,
    action: String,
    fight_id: u64,
}

fuzz_target!(|input: Input| {
    let _ = parse_custom_id(&input.raw);
    let _ = parse_custom_id(&format!("{}_{}", input.action, input.fight_id));
});
