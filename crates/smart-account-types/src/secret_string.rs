//! Secure string type for private key material.
//!
//! The wrapped value is zeroed on drop and never printed by `Debug`/`Display`.

use std::fmt;
use zeroize::Zeroizing;

/// String holding sensitive data such as a private key.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Runs `f` with access to the secret value.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(self.0.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(Zeroizing::new(value.to_string()))
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self(Zeroizing::new(value))
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}
