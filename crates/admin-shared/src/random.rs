use rand::distributions::{Alphanumeric, DistString as _};

/// Number of characters in a generated session token
pub const TOKEN_LEN: usize = 32;

/// Alphanumeric string of `len` characters from the thread local generator
pub fn random_alphanumeric(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), len)
}
