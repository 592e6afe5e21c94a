//! Secure credential handling using the secrecy crate
//!
//! The warehouse access token is held in a `Secret` so it is zeroized on
//! drop and redacted from Debug output. Call `expose_secret()` only at the
//! point the token is placed on a request.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the traits `Secret` requires
#[derive(Clone, Debug, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A string credential that is zeroized on drop and redacted in Debug output
pub type SecretString = Secret<SecretValue>;

/// Build a `SecretString` from a plain string
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}
