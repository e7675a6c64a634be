//! Builds a signing pipeline from configuration.

use crate::paymaster::StaticPaymaster;
use crate::pipeline::SmartAccountSigner;
use smart_account_chain::implementations::evm::alloy::create_zksync_binding;
use smart_account_chain::ChainError;
use smart_account_config::{Config, ConfigError};
use smart_account_signer::{create_from_config, AccountError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while assembling a pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error("Signer error: {0}")]
	Account(#[from] AccountError),
	#[error("Chain error: {0}")]
	Chain(#[from] ChainError),
}

/// Builds a pipeline for `network_id` connected over the network's RPC endpoint.
///
/// The network must be one of the configured supported chains.
pub fn build_from_config(
	config: &Config,
	network_id: u64,
) -> Result<SmartAccountSigner, BuildError> {
	let supported_chains = config.supported_chains();
	if !supported_chains.is_supported(network_id) {
		return Err(ConfigError::Validation(format!(
			"Network {} is not a supported chain (supported: {:?})",
			network_id,
			supported_chains.chain_ids()
		))
		.into());
	}

	let signer = create_from_config(&config.account.implementation, &config.account.config)?;
	let (binding, account_contract) = create_zksync_binding(network_id, &config.networks)?;

	let mut builder = SmartAccountSigner::builder(binding, Arc::from(signer))
		.supported_chains(supported_chains)
		.account_contract(account_contract)
		.default_validator(config.signer.validator_address.clone());

	if let Some(account) = &config.signer.account {
		let account = account
			.to_alloy()
			.map_err(|e| ConfigError::Validation(format!("Invalid account address: {}", e)))?;
		builder = builder.account(account);
	}

	if let Some(params) = config.paymaster_params()? {
		builder = builder.paymaster(Arc::new(StaticPaymaster::new(params)));
	}

	tracing::info!(
		network_id,
		implementation = %config.account.implementation,
		"Built smart-account signer"
	);
	Ok(builder.build())
}

#[cfg(test)]
mod tests {
	use super::*;
	use smart_account_config::ConfigBuilder;
	use smart_account_types::Address;

	fn local_key() -> toml::Value {
		let mut table = toml::map::Map::new();
		table.insert(
			"private_key".to_string(),
			toml::Value::String(
				"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
			),
		);
		toml::Value::Table(table)
	}

	#[tokio::test]
	async fn test_build_from_config() {
		let config = ConfigBuilder::new()
			.account(Address(vec![0xaa; 20]))
			.account_implementation("local", local_key())
			.build();

		let signer = build_from_config(&config, 2741).unwrap();
		assert_eq!(signer.chain_binding().chain_id(), Some(2741));
		assert!(signer.supported_chains().is_supported(11124));
		assert!(signer.delegated_mode(Default::default()).is_some());
	}

	#[tokio::test]
	async fn test_build_from_config_restricted() {
		let config = ConfigBuilder::new()
			.restrict_to(11124)
			.account_implementation("local", local_key())
			.build();

		let signer = build_from_config(&config, 11124).unwrap();
		assert_eq!(signer.supported_chains().chain_ids(), vec![11124]);

		let err = build_from_config(&config, 2741).err().unwrap();
		assert!(matches!(err, BuildError::Config(_)));
	}

	#[tokio::test]
	async fn test_build_from_config_bad_key() {
		let config = ConfigBuilder::new()
			.account_implementation("local", toml::Value::Table(Default::default()))
			.build();
		let err = build_from_config(&config, 2741).err().unwrap();
		assert!(matches!(err, BuildError::Account(_)));
	}
}
