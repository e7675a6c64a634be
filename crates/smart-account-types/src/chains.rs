//! Supported chains and per-network configuration.
//!
//! The set of chains a signer may produce signatures for is explicit
//! configuration injected into the pipeline. Deployments that target a single
//! test network use a one-entry registry rather than a separate code path.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Abstract mainnet.
pub const ABSTRACT_MAINNET_CHAIN_ID: u64 = 2741;
/// Abstract testnet.
pub const ABSTRACT_TESTNET_CHAIN_ID: u64 = 11124;

/// Descriptive information about a supported chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
	pub chain_id: u64,
	pub name: String,
}

/// Allow-list of chains a signer is permitted to sign for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedChains {
	chains: BTreeMap<u64, ChainInfo>,
}

impl SupportedChains {
	/// Creates a registry from explicit chain entries.
	pub fn new(chains: impl IntoIterator<Item = ChainInfo>) -> Self {
		Self {
			chains: chains
				.into_iter()
				.map(|chain| (chain.chain_id, chain))
				.collect(),
		}
	}

	/// Abstract mainnet and testnet.
	pub fn abstract_networks() -> Self {
		Self::new([
			ChainInfo {
				chain_id: ABSTRACT_MAINNET_CHAIN_ID,
				name: "Abstract".to_string(),
			},
			ChainInfo {
				chain_id: ABSTRACT_TESTNET_CHAIN_ID,
				name: "Abstract Testnet".to_string(),
			},
		])
	}

	/// Abstract testnet only.
	pub fn testnet_only() -> Self {
		Self::abstract_networks().restricted_to(ABSTRACT_TESTNET_CHAIN_ID)
	}

	/// Narrows the registry to a single chain. The result is empty when the
	/// chain is not part of this registry.
	pub fn restricted_to(&self, chain_id: u64) -> Self {
		Self {
			chains: self
				.chains
				.get(&chain_id)
				.map(|chain| (chain_id, chain.clone()))
				.into_iter()
				.collect(),
		}
	}

	pub fn is_supported(&self, chain_id: u64) -> bool {
		self.chains.contains_key(&chain_id)
	}

	pub fn get(&self, chain_id: u64) -> Option<&ChainInfo> {
		self.chains.get(&chain_id)
	}

	/// Supported chain ids in ascending order.
	pub fn chain_ids(&self) -> Vec<u64> {
		self.chains.keys().copied().collect()
	}

	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}
}

/// RPC endpoint of a network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RpcEndpoint {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub http: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ws: Option<String>,
}

impl RpcEndpoint {
	pub fn http_only(url: String) -> Self {
		Self {
			http: Some(url),
			ws: None,
		}
	}
}

/// Configuration for a single network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// Human-readable network name.
	#[serde(default)]
	pub name: Option<String>,
	/// RPC endpoints, tried in order.
	pub rpc_urls: Vec<RpcEndpoint>,
}

impl NetworkConfig {
	/// Get the first available HTTP URL from the RPC endpoints.
	pub fn get_http_url(&self) -> Option<&str> {
		self.rpc_urls
			.iter()
			.find_map(|endpoint| endpoint.http.as_deref())
	}
}

/// Networks configuration mapping chain IDs to their configurations.
pub type NetworksConfig = HashMap<u64, NetworkConfig>;

/// Deserializes networks keyed by chain id strings (TOML has no numeric keys).
pub fn deserialize_networks<'de, D>(deserializer: D) -> Result<NetworksConfig, D::Error>
where
	D: Deserializer<'de>,
{
	let string_map: HashMap<String, NetworkConfig> = HashMap::deserialize(deserializer)?;

	string_map
		.into_iter()
		.map(|(key, value)| {
			key.parse::<u64>()
				.map(|chain_id| (chain_id, value))
				.map_err(|e| {
					serde::de::Error::custom(format!("Invalid chain_id '{}': {}", key, e))
				})
		})
		.collect()
}
