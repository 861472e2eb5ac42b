use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::{BigInt, RandBigInt};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::BigIntError;
use crate::value::BigIntValue;

static PROCESS_STATE: Mutex<Option<RandomState>> = Mutex::new(None);
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A pseudo-random source for uniformly distributed big integers.
///
/// The weak-entropy seed mixes wall-clock time with a tick counter and is
/// predictable; do not use it for key material.
pub struct RandomState {
    rng: StdRng,
}

impl RandomState {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_weak_entropy() -> Self {
        Self::with_seed(weak_seed())
    }

    /// A value uniformly distributed in `[0, bound)`.
    pub fn below(&mut self, bound: &BigIntValue) -> Result<BigIntValue, BigIntError> {
        if bound.signum() <= 0 {
            return Err(BigIntError::InvalidDomain {
                op: "rand0",
                reason: "upper bound must be positive",
            });
        }
        let drawn = self.rng.gen_biguint_below(bound.as_bigint().magnitude());
        Ok(BigInt::from(drawn).into())
    }
}

pub(crate) fn with_process_state<T>(f: impl FnOnce(&mut RandomState) -> T) -> T {
    let mut guard = PROCESS_STATE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let state = guard.get_or_insert_with(|| {
        log::debug!("initializing process random state");
        RandomState::from_weak_entropy()
    });
    f(state)
}

fn weak_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    now.as_secs()
        .wrapping_mul(1000)
        .wrapping_add(u64::from(now.subsec_nanos()))
        .wrapping_add(u64::from(std::process::id()) << 32)
        .wrapping_add(counter)
        ^ 0x9E37_79B9_7F4A_7C15
}
