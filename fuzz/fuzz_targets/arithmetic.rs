#![no_main]

use libfuzzer_sys::fuzz_target;
use mpint::BigIntValue;

fn split(data: &[u8]) -> (BigIntValue, BigIntValue) {
    let mid = data.len() / 2;
    let read = |bytes: &[u8]| {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        let value = BigIntValue::parse(&hex, 16).unwrap_or_default();
        if bytes.first().is_some_and(|byte| byte & 0x80 != 0) {
            value.neg()
        } else {
            value
        }
    };
    (read(&data[..mid]), read(&data[mid..]))
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 512 {
        return;
    }
    let (a, b) = split(data);

    assert_eq!(a.add(&b).sub(&b), a);
    assert_eq!(a.mul(&b), b.mul(&a));

    if let (Ok(q), Ok(r)) = (a.div(&b), a.modulo(&b)) {
        assert_eq!(q.mul(&b).add(&r), a);
        assert!(r.is_zero() || r.signum() == b.signum());
    }

    let g = a.gcd(&b);
    assert!(!g.is_negative());
    if !g.is_zero() {
        assert!(a.modulo(&g).expect("non-zero gcd").is_zero());
    }

    let shift = u64::from(data.first().copied().unwrap_or(0) % 64);
    let shifted = a.abs().mul_2exp(shift).expect("small shift");
    assert_eq!(shifted.div_2exp(shift), a.abs());
});
