//! Argon2 password hashing for member accounts and the admin login.
//!
//! Every failed check costs one full argon2 verification, whether or not an
//! account was found, so response time does not reveal which emails exist.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Stand-in hash verified when there is no real one to check against.
    static ref DECOY_HASH: String = Argon2::default()
        .hash_password(
            b"fitzone-decoy-password",
            &SaltString::from_b64("Zml0em9uZWRlY295c2FsdA").unwrap(),
        )
        .unwrap()
        .to_string();
}

#[cfg(test)]
thread_local! {
    static ARGON2_CHECKS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of argon2 verifications run on the current thread.
#[cfg(test)]
pub fn argon2_checks() -> usize {
    ARGON2_CHECKS.with(|c| c.get())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("argon2 hashing failed: {e}"))
}

/// Checks `plain` against a stored PHC string. A stored value that is not a
/// valid hash is logged and treated as a mismatch.
pub fn password_matches(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => run_argon2(plain, &parsed),
        Err(e) => {
            error!(error = %e, "stored password hash is unreadable");
            reject_without_account(plain)
        }
    }
}

/// Failed check for a login with no matching account. Runs the same
/// argon2 work as a real check and always returns `false`.
pub fn reject_without_account(plain: &str) -> bool {
    if let Ok(decoy) = PasswordHash::new(DECOY_HASH.as_str()) {
        let _ = run_argon2(plain, &decoy);
    }
    false
}

fn run_argon2(plain: &str, hash: &PasswordHash<'_>) -> bool {
    #[cfg(test)]
    ARGON2_CHECKS.with(|c| c.set(c.get() + 1));
    Argon2::default()
        .verify_password(plain.as_bytes(), hash)
        .is_ok()
}
