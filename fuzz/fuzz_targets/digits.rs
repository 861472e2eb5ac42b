#![no_main]

use libfuzzer_sys::fuzz_target;
use mpint::{BigIntValue, MAX_BASE, MIN_BASE};

fuzz_target!(|data: &[u8]| {
    // Long digit strings only slow the radix conversion down.
    if data.len() < 2 || data.len() > 2 * 1024 {
        return;
    }
    let base = MIN_BASE + u32::from(data[0]) % (MAX_BASE - MIN_BASE + 1);
    let text = String::from_utf8_lossy(&data[1..]);
    let Ok(value) = BigIntValue::parse(&text, base) else {
        return;
    };

    let printed = value.to_string_radix(base).expect("base already validated");
    let reparsed = BigIntValue::parse(&printed, base).expect("printed digits must parse");
    assert_eq!(value, reparsed);
    assert_eq!(printed, reparsed.to_string_radix(base).expect("base already validated"));
});
