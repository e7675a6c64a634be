//! JSON-RPC chain reader built on Alloy.
//!
//! Answers the two read-only queries a signing call makes: `eth_chainId` and
//! the account's `listHooks`. The provider carries no retry layer; each query
//! is issued once and a failure is reported to the caller.

use crate::{AccountContract, ChainBinding, ChainError, ChainIdSource};
use alloy_primitives::{Address, Bytes, TxKind};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use smart_account_types::NetworksConfig;
use std::sync::Arc;

sol! {
	/// Hook registry exposed by the smart account.
	interface IAccountHooks {
		function listHooks(bool isValidation) external view returns (address[] memory hookList);
	}
}

/// Chain reader for a single network.
pub struct AlloyChainReader {
	/// Chain the reader was configured for.
	network_id: u64,
	provider: DynProvider,
}

impl AlloyChainReader {
	/// Connects to the first HTTP endpoint configured for `network_id`.
	pub fn new(network_id: u64, networks: &NetworksConfig) -> Result<Self, ChainError> {
		let network = networks.get(&network_id).ok_or_else(|| {
			ChainError::Configuration(format!(
				"Network {} not found in configuration",
				network_id
			))
		})?;

		let http_url = network.get_http_url().ok_or_else(|| {
			ChainError::Configuration(format!(
				"No HTTP RPC URL configured for network {}",
				network_id
			))
		})?;

		let url = http_url.parse().map_err(|e| {
			ChainError::Configuration(format!("Invalid RPC URL for network {}: {}", network_id, e))
		})?;

		let client = RpcClient::builder().http(url);
		let provider = ProviderBuilder::new().connect_client(client).erased();

		Ok(Self {
			network_id,
			provider,
		})
	}
}

#[async_trait]
impl ChainIdSource for AlloyChainReader {
	async fn fetch_live_chain_id(&self) -> Result<u64, ChainError> {
		self.provider.get_chain_id().await.map_err(|e| {
			ChainError::Network(format!(
				"Failed to fetch chain id for network {}: {}",
				self.network_id, e
			))
		})
	}
}

#[async_trait]
impl AccountContract for AlloyChainReader {
	async fn list_enabled_hooks(
		&self,
		account: Address,
		validation: bool,
	) -> Result<Vec<Address>, ChainError> {
		let call = IAccountHooks::listHooksCall {
			isValidation: validation,
		};
		let request = TransactionRequest {
			to: Some(TxKind::Call(account)),
			input: TransactionInput::new(Bytes::from(call.abi_encode())),
			..Default::default()
		};

		let result = self.provider.call(request).await.map_err(|e| {
			ChainError::Network(format!("Failed to call listHooks on {}: {}", account, e))
		})?;

		let hooks = IAccountHooks::listHooksCall::abi_decode_returns_validate(&result)
			.map_err(|e| ChainError::Decode(format!("Failed to decode listHooks: {}", e)))?;

		tracing::debug!(
			account = %account,
			hooks = hooks.len(),
			"Read account hooks"
		);
		Ok(hooks)
	}
}

/// Builds a zkSync binding and hook reader for `network_id` from the networks
/// configuration. Both share one RPC connection.
pub fn create_zksync_binding(
	network_id: u64,
	networks: &NetworksConfig,
) -> Result<(ChainBinding, Arc<dyn AccountContract>), ChainError> {
	let reader = Arc::new(AlloyChainReader::new(network_id, networks)?);
	let binding = ChainBinding::zksync(reader.clone()).with_chain_id(network_id);

	tracing::info!(network_id, "Connected chain reader");
	Ok((binding, reader))
}
