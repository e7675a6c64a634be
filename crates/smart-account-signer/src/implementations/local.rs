//! Local private-key signer.
//!
//! Holds the key in memory and signs typed data with Alloy's local signer.
//! Suitable for session keys handed to a service and for development.

use crate::{AccountError, AccountInterface};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use smart_account_types::{
	Address, ConfigSchema, Field, FieldType, Schema, SecretString, Signature, TypedTransaction,
	ValidationError,
};

/// Local wallet implementation using Alloy's signer.
#[derive(Debug)]
pub struct LocalWallet {
	/// The underlying Alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	///
	/// The private key may be provided with or without 0x prefix.
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	/// Creates a LocalWallet from a key held in a [`SecretString`].
	pub fn from_secret(private_key: &SecretString) -> Result<Self, AccountError> {
		private_key.with_exposed(Self::new)
	}
}

/// Configuration schema for LocalWallet.
pub struct LocalWalletSchema;

impl LocalWalletSchema {
	/// Static validation method for use before instance creation
	pub fn validate_config(config: &toml::Value) -> Result<(), ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for LocalWalletSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![
				Field::new("private_key", FieldType::String).with_validator(|value| {
					let key = value.as_str().unwrap_or_default();
					let key_without_prefix = key.strip_prefix("0x").unwrap_or(key);

					if key_without_prefix.len() != 64 {
						return Err("Private key must be 64 hex characters (32 bytes)".to_string());
					}

					if hex::decode(key_without_prefix).is_err() {
						return Err("Private key must be valid hexadecimal".to_string());
					}

					Ok(())
				}),
			],
			// Optional fields
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl AccountInterface for LocalWallet {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalWalletSchema)
	}

	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address().into())
	}

	async fn sign_typed_data(&self, typed: &TypedTransaction) -> Result<Signature, AccountError> {
		let hash = typed.signing_hash();
		let signature = self.signer.sign_hash(&hash).await.map_err(|e| {
			AccountError::SigningFailed(format!("Failed to sign typed data: {}", e))
		})?;

		Ok(signature.into())
	}
}

/// Factory function to create a local signer from configuration.
///
/// # Errors
///
/// Returns an error if `private_key` is missing or malformed.
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	LocalWalletSchema::validate_config(config)
		.map_err(|e| AccountError::InvalidKey(format!("Invalid configuration: {}", e)))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.map(SecretString::from)
		.ok_or_else(|| AccountError::InvalidKey("private_key is required".to_string()))?;

	Ok(Box::new(LocalWallet::from_secret(&private_key)?))
}

/// Registry for the local signer implementation.
pub struct Registry;

impl smart_account_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}
