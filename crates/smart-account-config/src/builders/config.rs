//! Configuration builder for creating test and development configurations.

use crate::{AccountConfig, Config, PaymasterConfig, SignerConfig};
use smart_account_types::{
	Address, NetworkConfig, NetworksConfig, RpcEndpoint, ABSTRACT_MAINNET_CHAIN_ID,
	ABSTRACT_TESTNET_CHAIN_ID,
};

/// Builder for creating `Config` instances with a fluent API.
///
/// Defaults to both Abstract networks, a local signer implementation with an
/// empty table and no paymaster.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	validator_address: Address,
	account: Option<Address>,
	supported_chains: Vec<u64>,
	restrict_to: Option<u64>,
	paymaster: Option<PaymasterConfig>,
	networks: NetworksConfig,
	account_implementation: String,
	account_config: toml::Value,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` with default values suitable for testing.
	pub fn new() -> Self {
		let networks = [
			(ABSTRACT_MAINNET_CHAIN_ID, "https://api.mainnet.abs.xyz"),
			(ABSTRACT_TESTNET_CHAIN_ID, "https://api.testnet.abs.xyz"),
		]
		.into_iter()
		.map(|(chain_id, url)| {
			(
				chain_id,
				NetworkConfig {
					name: None,
					rpc_urls: vec![RpcEndpoint::http_only(url.to_string())],
				},
			)
		})
		.collect();

		Self {
			validator_address: Address(vec![0xab; 20]),
			account: None,
			supported_chains: vec![ABSTRACT_MAINNET_CHAIN_ID, ABSTRACT_TESTNET_CHAIN_ID],
			restrict_to: None,
			paymaster: None,
			networks,
			account_implementation: "local".to_string(),
			account_config: toml::Value::Table(toml::map::Map::new()),
		}
	}

	pub fn validator_address(mut self, address: Address) -> Self {
		self.validator_address = address;
		self
	}

	/// Sets the default smart account.
	pub fn account(mut self, account: Address) -> Self {
		self.account = Some(account);
		self
	}

	pub fn supported_chains(mut self, chains: Vec<u64>) -> Self {
		self.supported_chains = chains;
		self
	}

	pub fn restrict_to(mut self, chain_id: u64) -> Self {
		self.restrict_to = Some(chain_id);
		self
	}

	/// Sets the default paymaster with hex-encoded input.
	pub fn paymaster(mut self, address: Address, input: Option<String>) -> Self {
		self.paymaster = Some(PaymasterConfig { address, input });
		self
	}

	/// Adds or replaces a network with a single HTTP endpoint.
	pub fn network(mut self, chain_id: u64, http_url: &str) -> Self {
		self.networks.insert(
			chain_id,
			NetworkConfig {
				name: None,
				rpc_urls: vec![RpcEndpoint::http_only(http_url.to_string())],
			},
		);
		self
	}

	/// Sets the signer implementation and its configuration table.
	pub fn account_implementation(mut self, name: &str, config: toml::Value) -> Self {
		self.account_implementation = name.to_string();
		self.account_config = config;
		self
	}

	/// Builds the configuration without running load-time validation.
	pub fn build(self) -> Config {
		Config {
			signer: SignerConfig {
				validator_address: self.validator_address,
				account: self.account,
				supported_chains: self.supported_chains,
				restrict_to: self.restrict_to,
				paymaster: self.paymaster,
			},
			networks: self.networks,
			account: AccountConfig {
				implementation: self.account_implementation,
				config: self.account_config,
			},
		}
	}
}
