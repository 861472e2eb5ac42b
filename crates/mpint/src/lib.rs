mod error;
mod prime;
mod radix;
mod random;
mod value;


pub use error::BigIntError;
pub use prime::Primality;
pub use radix::{MAX_BASE, MIN_BASE};
pub use random::RandomState;
pub use value::{pow_pair, BigIntValue, MAX_RESULT_BITS};

pub type Result<T, E = BigIntError> = std::result::Result<T, E>;
