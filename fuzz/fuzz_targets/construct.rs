#![no_main]

use std::sync::Once;

use libfuzzer_sys::fuzz_target;
use mpint_host::{construct, install_default_conditioner, Value};

static INSTALL: Once = Once::new();

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 {
        return;
    }
    INSTALL.call_once(install_default_conditioner);

    // Every input either builds a value or is rejected with an error; no panics.
    let text = String::from_utf8_lossy(data).into_owned();
    if let Ok(value) = construct(vec![Value::Text(text)]) {
        let _ = value.to_string_radix(36);
    }
});
