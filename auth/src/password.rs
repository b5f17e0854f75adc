use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::Error;

/// Shortest password accepted at registration.
pub const MIN_LENGTH: usize = 8;

/// Checked against when the account doesn't exist, so an unknown username costs as much
/// as a wrong password.
const PLACEHOLDER_HASH: &str =
    "$argon2id$v=19$m=4096,t=3,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn new_hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHasherError(e.to_string()))
}

pub fn verify_password(password: &str, stored: &str) -> Result<(), Error> {
    let hash = PasswordHash::new(stored).map_err(|e| Error::PasswordHasherError(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .map_err(|_| Error::InvalidPassword)
}

/// Check a login attempt against the account's stored hash, if there is an account.
/// A missing account fails with the same error as a wrong password.
pub fn check_login(password: &str, stored: Option<&str>) -> Result<(), Error> {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            verify_password(password, PLACEHOLDER_HASH).ok();
            Err(Error::InvalidPassword)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unknown_account_rejected() {
        assert_matches!(
            check_login("whatever-it-is", None),
            Err(Error::InvalidPassword)
        );
    }

    #[test]
    fn placeholder_hash_parses() {
        PasswordHash::new(PLACEHOLDER_HASH).expect("placeholder should be a valid hash string");
    }
}
