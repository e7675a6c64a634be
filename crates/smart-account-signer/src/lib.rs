//! Signer management for smart-account transactions.
//!
//! A smart account holds no private key. Its transactions are authorized by a
//! separate signer (the owner key or a scoped session key) that signs the
//! transaction's typed data. This crate defines the signer capability and the
//! implementations that can be selected from configuration.

use async_trait::async_trait;
use smart_account_types::{
	Address, ConfigSchema, ImplementationRegistry, Signature, TypedTransaction,
};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during signer operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when interacting with the signer implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for signer implementations.
///
/// Implementations hold (or reach) the private key material of the authorized
/// signer and produce 65-byte `r || s || v` signatures. Calls may be slow or
/// remote; callers do not retry them.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountInterface: Send + Sync {
	/// Returns the configuration schema for this signer implementation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Retrieves the signer's own address.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs EIP-712 typed data (domain plus message).
	async fn sign_typed_data(&self, typed: &TypedTransaction) -> Result<Signature, AccountError>;
}

/// Factory function type for signer implementations.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Registry trait for signer implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered signer implementations.
///
/// Returns a vector of (name, factory) tuples for all available implementations.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Builds the signer implementation named `name` from its configuration table.
pub fn create_from_config(
	name: &str,
	config: &toml::Value,
) -> Result<Box<dyn AccountInterface>, AccountError> {
	let (_, factory) = get_all_implementations()
		.into_iter()
		.find(|(registered, _)| *registered == name)
		.ok_or_else(|| {
			AccountError::Implementation(format!("Unknown signer implementation '{}'", name))
		})?;

	tracing::debug!(implementation = name, "Creating signer");
	factory(config)
}
