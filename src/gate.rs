//! Password gate checked before the diary is opened.
//!
//! The gate is enabled by configuring an Argon2 PHC hash; the plaintext
//! password is never stored. On mismatch the caller terminates the process.

use crate::constants::ENV_VAR_TEST_PASSWORD;
use crate::errors::{AppResult, AuthError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Startup password check.
///
/// # Example
///
/// ```
/// use daybook::gate::{hash_password, PasswordGate};
///
/// let hash = hash_password("correct horse")?;
/// let gate = PasswordGate::new(Some(hash));
///
/// assert!(gate.verify("correct horse").is_ok());
/// assert!(gate.verify("battery staple").is_err());
/// # Ok::<(), daybook::AppError>(())
/// ```
pub struct PasswordGate {
    hash: Option<String>,
}

impl PasswordGate {
    /// Creates a gate; `None` means no password is required.
    pub fn new(hash: Option<String>) -> Self {
        Self { hash }
    }

    /// Whether a password will be asked for.
    pub fn is_enabled(&self) -> bool {
        self.hash.is_some()
    }

    /// Obtains the password (test variable or terminal prompt) and verifies it.
    ///
    /// A disabled gate always passes without prompting.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPassword` on mismatch, or a prompt error if
    /// the terminal cannot be read.
    pub fn unlock(&self) -> AppResult<()> {
        if !self.is_enabled() {
            debug!("Password gate disabled");
            return Ok(());
        }

        let password = match std::env::var(ENV_VAR_TEST_PASSWORD) {
            Ok(test_password) => {
                debug!("Using {} for non-interactive unlock", ENV_VAR_TEST_PASSWORD);
                Zeroizing::new(test_password)
            }
            Err(_) => prompt("Password: ")?,
        };

        self.verify(&password)
    }

    /// Checks `password` against the configured hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPassword` on mismatch and
    /// `AuthError::InvalidHash` when the configured hash cannot be parsed.
    pub fn verify(&self, password: &str) -> AppResult<()> {
        let Some(hash) = self.hash.as_deref() else {
            return Ok(());
        };

        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::InvalidHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => {
                info!("Password accepted");
                Ok(())
            }
            Err(password_hash::Error::Password) => {
                warn!("Password rejected");
                Err(AuthError::InvalidPassword.into())
            }
            Err(e) => Err(AuthError::InvalidHash(e.to_string()).into()),
        }
    }
}

/// Hashes `password` into an Argon2id PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::EmptyPassword` for an empty password, or
/// `AuthError::InvalidHash` if hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword.into());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::InvalidHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Prompts twice for a new password and requires both to match.
///
/// `DAYBOOK_TEST_PASSWORD`, when set, is used instead of prompting.
///
/// # Errors
///
/// Returns `AuthError::Mismatch` if the entries differ, or
/// `AuthError::EmptyPassword` for an empty password.
pub fn prompt_new_password() -> AppResult<Zeroizing<String>> {
    if let Ok(test_password) = std::env::var(ENV_VAR_TEST_PASSWORD) {
        if test_password.is_empty() {
            return Err(AuthError::EmptyPassword.into());
        }
        return Ok(Zeroizing::new(test_password));
    }

    let password = prompt("New password: ")?;
    let confirmation = prompt("Confirm password: ")?;

    if *password != *confirmation {
        return Err(AuthError::Mismatch.into());
    }
    if password.is_empty() {
        return Err(AuthError::EmptyPassword.into());
    }

    Ok(password)
}

fn prompt(label: &str) -> AppResult<Zeroizing<String>> {
    let password =
        rpassword::prompt_password(label).map_err(|e| AuthError::Prompt(e.to_string()))?;
    Ok(Zeroizing::new(password))
}
