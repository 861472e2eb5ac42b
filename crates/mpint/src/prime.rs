use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Outcome of a primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primality {
    Composite,
    ProbablyPrime,
    /// Decided exactly rather than probabilistically.
    Prime,
}

impl Primality {
    /// 0, 1 or 2, matching the usual big-integer engine convention.
    pub fn as_i32(self) -> i32 {
        match self {
            Primality::Composite => 0,
            Primality::ProbablyPrime => 1,
            Primality::Prime => 2,
        }
    }

    pub fn is_probably_prime(self) -> bool {
        !matches!(self, Primality::Composite)
    }
}

const SMALL_PRIMES: [u32; 46] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199,
];

// Miller-Rabin with the first thirteen primes as bases has no false positives
// below this bound.
const DETERMINISTIC_BASES: usize = 13;
const DETERMINISTIC_LIMIT: u128 = 3_317_044_064_679_887_385_961_981;

const NEXT_PRIME_REPETITIONS: u32 = 25;
const WITNESS_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub(crate) fn probable_prime(n: &BigUint, repetitions: u32) -> Primality {
    trial_division(n).unwrap_or_else(|| miller_rabin(n, repetitions))
}

pub(crate) fn next_prime(n: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    if *n < two {
        return two;
    }
    let mut candidate = n + 1u32;
    if candidate.is_even() && candidate != two {
        candidate += 1u32;
    }
    while !probable_prime(&candidate, NEXT_PRIME_REPETITIONS).is_probably_prime() {
        candidate += 2u32;
    }
    candidate
}

fn trial_division(n: &BigUint) -> Option<Primality> {
    if let Some(small) = n.to_u32() {
        if small < 2 {
            return Some(Primality::Composite);
        }
        if SMALL_PRIMES.contains(&small) {
            return Some(Primality::Prime);
        }
    }
    for p in SMALL_PRIMES {
        if (n % BigUint::from(p)).is_zero() {
            return Some(Primality::Composite);
        }
    }
    // No factor up to the largest small prime, so anything below its square
    // is prime.
    let largest = u64::from(SMALL_PRIMES[SMALL_PRIMES.len() - 1]);
    if *n < BigUint::from(largest * largest) {
        return Some(Primality::Prime);
    }
    None
}

fn miller_rabin(n: &BigUint, repetitions: u32) -> Primality {
    let n_minus_one = n - 1u32;
    let shift = n_minus_one.trailing_zeros().unwrap_or(0);
    let odd_part = &n_minus_one >> shift;
    let witness = Witness {
        n,
        n_minus_one: &n_minus_one,
        odd_part: &odd_part,
        shift,
    };

    if *n < BigUint::from(DETERMINISTIC_LIMIT) {
        let all_pass = SMALL_PRIMES[..DETERMINISTIC_BASES]
            .iter()
            .all(|base| witness.passes(&BigUint::from(*base)));
        return if all_pass {
            Primality::Prime
        } else {
            Primality::Composite
        };
    }

    if !witness.passes(&BigUint::from(2u32)) {
        return Primality::Composite;
    }
    // Bases are drawn from a fixed seed so the answer for a given input is
    // reproducible.
    let mut rng = StdRng::seed_from_u64(WITNESS_SEED ^ n.bits());
    let low = BigUint::from(3u32);
    for _ in 0..repetitions.max(1) {
        let base = rng.gen_biguint_range(&low, &n_minus_one);
        if !witness.passes(&base) {
            return Primality::Composite;
        }
    }
    Primality::ProbablyPrime
}

struct Witness<'a> {
    n: &'a BigUint,
    n_minus_one: &'a BigUint,
    odd_part: &'a BigUint,
    shift: u64,
}

impl Witness<'_> {
    fn passes(&self, base: &BigUint) -> bool {
        let mut x = base.modpow(self.odd_part, self.n);
        if x.is_one() || x == *self.n_minus_one {
            return true;
        }
        for _ in 1..self.shift {
            x = &x * &x % self.n;
            if x == *self.n_minus_one {
                return true;
            }
            if x.is_one() {
                return false;
            }
        }
        false
    }
}
