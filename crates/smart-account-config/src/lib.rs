//! Configuration module for the smart-account signer.
//!
//! Configuration is read from TOML. `${VAR}` and `${VAR:-default}`
//! placeholders are substituted from the environment before parsing so that
//! key material never has to be written into the file itself.
//!
//! ```toml
//! [signer]
//! validator_address = "0x..."
//! supported_chains = [2741, 11124]
//!
//! [networks.2741]
//! rpc_urls = [{ http = "https://api.mainnet.abs.xyz" }]
//!
//! [account]
//! implementation = "local"
//! [account.config]
//! private_key = "${SESSION_PRIVATE_KEY}"
//! ```

use alloy_primitives::Bytes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smart_account_types::{
	deserialize_networks, without_0x_prefix, Address, ChainInfo, NetworksConfig, PaymasterParams,
	SupportedChains,
};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

mod builders;

pub use builders::config::ConfigBuilder;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	/// Signing pipeline settings.
	pub signer: SignerConfig,
	/// Per-network RPC settings keyed by chain id.
	#[serde(deserialize_with = "deserialize_networks")]
	pub networks: NetworksConfig,
	/// Signer implementation holding the authorized key.
	pub account: AccountConfig,
}

/// Signing pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
	/// Validator module that interprets delegated signatures.
	pub validator_address: Address,
	/// Smart account signed for when a request names none.
	#[serde(default)]
	pub account: Option<Address>,
	/// Chain ids the signer may sign for.
	pub supported_chains: Vec<u64>,
	/// Narrows signing to a single supported chain.
	#[serde(default)]
	pub restrict_to: Option<u64>,
	/// Paymaster applied to requests that carry none.
	#[serde(default)]
	pub paymaster: Option<PaymasterConfig>,
}

/// Default paymaster sponsoring transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymasterConfig {
	pub address: Address,
	/// Hex-encoded paymaster input.
	#[serde(default)]
	pub input: Option<String>,
}

/// Signer implementation selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
	/// Registered implementation name, e.g. `local`.
	pub implementation: String,
	/// Implementation-specific table, validated by the implementation's schema.
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

fn empty_table() -> toml::Value {
	toml::Value::Table(toml::map::Map::new())
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable VAR_NAME.
/// Supports default values with `${VAR_NAME:-default_value}`.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match (std::env::var(var_name.as_str()), default_value) {
			(Ok(v), _) => v,
			(Err(_), Some(default)) => default.to_string(),
			(Err(_), None) => {
				return Err(ConfigError::Validation(format!(
					"Environment variable '{}' not found",
					var_name.as_str()
				)));
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let contents = tokio::fs::read_to_string(path).await?;
		let config: Config = contents.parse()?;
		tracing::info!(
			path = %path.display(),
			chains = ?config.signer.supported_chains,
			"Loaded configuration"
		);
		Ok(config)
	}

	/// Validates cross-field constraints serde cannot express.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.signer.supported_chains.is_empty() {
			return Err(ConfigError::Validation(
				"supported_chains cannot be empty".into(),
			));
		}

		for chain_id in &self.signer.supported_chains {
			if !self.networks.contains_key(chain_id) {
				return Err(ConfigError::Validation(format!(
					"Unknown chain {chain_id}: no [networks.{chain_id}] section"
				)));
			}
		}

		if let Some(restrict_to) = self.signer.restrict_to {
			if !self.signer.supported_chains.contains(&restrict_to) {
				return Err(ConfigError::Validation(format!(
					"restrict_to chain {restrict_to} is not in supported_chains"
				)));
			}
		}

		for (chain_id, network) in &self.networks {
			if network.rpc_urls.is_empty() {
				return Err(ConfigError::Validation(format!(
					"Network {chain_id} must have at least one RPC URL"
				)));
			}
		}

		if self.account.implementation.is_empty() {
			return Err(ConfigError::Validation(
				"Account implementation cannot be empty".into(),
			));
		}

		// Surfaces malformed paymaster input at load time
		self.paymaster_params()?;

		Ok(())
	}

	/// Builds the supported-chain registry, applying `restrict_to`.
	///
	/// Names come from the network section when present, else the well-known
	/// name of the chain, else a generic label.
	pub fn supported_chains(&self) -> SupportedChains {
		let known = SupportedChains::abstract_networks();
		let chains = SupportedChains::new(self.signer.supported_chains.iter().map(|chain_id| {
			let name = self
				.networks
				.get(chain_id)
				.and_then(|network| network.name.clone())
				.or_else(|| known.get(*chain_id).map(|chain| chain.name.clone()))
				.unwrap_or_else(|| format!("Chain {chain_id}"));
			ChainInfo {
				chain_id: *chain_id,
				name,
			}
		}));

		match self.signer.restrict_to {
			Some(chain_id) => chains.restricted_to(chain_id),
			None => chains,
		}
	}

	/// Default paymaster parameters, if configured.
	pub fn paymaster_params(&self) -> Result<Option<PaymasterParams>, ConfigError> {
		let Some(paymaster) = &self.signer.paymaster else {
			return Ok(None);
		};

		let paymaster_address = paymaster
			.address
			.to_alloy()
			.map_err(|e| ConfigError::Validation(format!("Invalid paymaster address: {e}")))?;
		let input = match &paymaster.input {
			Some(input) => hex::decode(without_0x_prefix(input))
				.map_err(|e| ConfigError::Validation(format!("Invalid paymaster input: {e}")))?,
			None => Vec::new(),
		};

		Ok(Some(PaymasterParams {
			paymaster: paymaster_address,
			input: Bytes::from(input),
		}))
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const VALID_CONFIG: &str = r#"
[signer]
validator_address = "0x000000000000000000000000000000000000abcd"
supported_chains = [2741, 11124]

[networks.2741]
rpc_urls = [{ http = "https://api.mainnet.abs.xyz" }]

[networks.11124]
name = "Abstract Sepolia"
rpc_urls = [{ http = "https://api.testnet.abs.xyz" }]

[account]
implementation = "local"
[account.config]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
"#;

	#[test]
	fn test_parse_valid_config() {
		let config: Config = VALID_CONFIG.parse().unwrap();
		assert_eq!(config.signer.supported_chains, vec![2741, 11124]);
		assert_eq!(config.signer.validator_address.0.len(), 20);
		assert!(config.signer.account.is_none());
		assert_eq!(config.account.implementation, "local");
		assert!(config.account.config.get("private_key").is_some());
		assert!(config.paymaster_params().unwrap().is_none());
	}

	#[test]
	fn test_supported_chain_names() {
		let config: Config = VALID_CONFIG.parse().unwrap();
		let chains = config.supported_chains();
		assert_eq!(chains.chain_ids(), vec![2741, 11124]);
		assert_eq!(chains.get(2741).unwrap().name, "Abstract");
		assert_eq!(chains.get(11124).unwrap().name, "Abstract Sepolia");
	}

	#[test]
	fn test_restrict_to_single_chain() {
		let input = VALID_CONFIG.replace(
			"supported_chains = [2741, 11124]",
			"supported_chains = [2741, 11124]\nrestrict_to = 11124",
		);
		let config: Config = input.parse().unwrap();
		assert_eq!(config.supported_chains().chain_ids(), vec![11124]);
	}

	#[test]
	fn test_restrict_to_must_be_supported() {
		let input = VALID_CONFIG.replace(
			"supported_chains = [2741, 11124]",
			"supported_chains = [2741]\nrestrict_to = 11124",
		);
		let err = input.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("restrict_to"));
	}

	#[test]
	fn test_empty_supported_chains_rejected() {
		let input = VALID_CONFIG.replace("[2741, 11124]", "[]");
		let err = input.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("cannot be empty")));
	}

	#[test]
	fn test_unknown_chain_rejected() {
		let input = VALID_CONFIG.replace("[2741, 11124]", "[2741, 1]");
		let err = input.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("Unknown chain 1")));
	}

	#[test]
	fn test_malformed_validator_address_rejected() {
		let input = VALID_CONFIG.replace("0x000000000000000000000000000000000000abcd", "0xabcd");
		let err = input.parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_paymaster_config() {
		let input = VALID_CONFIG.replace(
			"[networks.2741]",
			"[signer.paymaster]\naddress = \"0x0000000000000000000000000000000000003333\"\ninput = \"0xcafe\"\n\n[networks.2741]",
		);
		let config: Config = input.parse().unwrap();
		let params = config.paymaster_params().unwrap().unwrap();
		assert_eq!(params.paymaster.as_slice()[18..], [0x33, 0x33]);
		assert_eq!(params.input.as_ref(), &[0xca, 0xfe]);

		let bad = input.replace("0xcafe", "0xzz");
		assert!(bad.parse::<Config>().is_err());
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("SMART_ACCOUNT_TEST_HOST", "localhost");

		let input = "url = \"http://${SMART_ACCOUNT_TEST_HOST}:${SMART_ACCOUNT_TEST_PORT:-8545}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "url = \"http://localhost:8545\"");

		std::env::remove_var("SMART_ACCOUNT_TEST_HOST");
	}

	#[test]
	fn test_env_var_missing() {
		let err = resolve_env_vars("key = \"${SMART_ACCOUNT_TEST_UNSET_VAR}\"").unwrap_err();
		assert!(err.to_string().contains("SMART_ACCOUNT_TEST_UNSET_VAR"));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(VALID_CONFIG.as_bytes()).unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.signer.supported_chains, vec![2741, 11124]);
	}

	#[tokio::test]
	async fn test_from_file_missing() {
		let result = Config::from_file("/nonexistent/smart-account.toml").await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
