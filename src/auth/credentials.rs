//! Constant-time credential verification.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// The configured username/password pair.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true only when both values match exactly.
    ///
    /// Both sides are hashed first so the comparison runs over fixed-size
    /// digests; neither the input length nor the mismatch position changes
    /// the running time.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = digest_eq(username, &self.username);
        let password_ok = digest_eq(password, self.password.expose_secret());
        username_ok & password_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn digest_eq(supplied: &str, expected: &str) -> bool {
    let supplied = Sha256::digest(supplied.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    constant_time_eq(&supplied, &expected)
}

/// Compare two byte slices without short-circuiting on the first difference.
#[inline]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
