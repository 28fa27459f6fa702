//! Cryptographic Utilities

use rand::{Rng, RngCore, rngs::OsRng};

/// Number of digits in a one-time numeric code
pub const OTP_DIGITS: usize = 6;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a uniformly distributed six-digit numeric code
///
/// The code is drawn from `100000..=999999` so it always renders as
/// exactly six digits with no leading zero ambiguity.
pub fn random_numeric_code() -> String {
    let n: u32 = OsRng.gen_range(100_000..=999_999);
    n.to_string()
}
