//! Chain capabilities consumed by the signing pipeline.
//!
//! A signing call needs four things from the network it targets: the chain id
//! the node reports right now, a way to turn a transaction into typed data, a
//! serializer that embeds a custom signature into the broadcastable encoding,
//! and read access to the smart account's hook registry. Each is a trait so
//! the pipeline can run against an RPC node, an in-process chain or mocks.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use smart_account_types::{TypedTransaction, ZkTransaction};
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
	pub mod zksync;
}

pub use implementations::zksync::ZkSyncEip712;

/// Errors that can occur when talking to a chain or encoding for it.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a node returns data that cannot be decoded.
	#[error("Decode error: {0}")]
	Decode(String),
	/// Error that occurs when a transaction cannot be encoded.
	#[error("Encoding error: {0}")]
	Encoding(String),
	/// Error that occurs when a network is missing or misconfigured.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Source of the chain id reported by the connected network.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait ChainIdSource: Send + Sync {
	/// Reads the chain id from the network. Never served from a cache.
	async fn fetch_live_chain_id(&self) -> Result<u64, ChainError>;
}

/// Derives the typed data a signer signs for a transaction.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait DomainDeriver: Send + Sync {
	/// Builds the domain and message for `tx`. The domain is bound to `tx.chain_id`.
	fn derive_domain(&self, tx: &ZkTransaction) -> Result<TypedTransaction, ChainError>;
}

/// Serializes a transaction together with its custom signature.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait TransactionSerializer: Send + Sync {
	/// Returns the broadcastable bytes of `tx` authorized by `custom_signature`.
	fn serialize_transaction(
		&self,
		tx: &ZkTransaction,
		custom_signature: &Bytes,
	) -> Result<Bytes, ChainError>;
}

/// Read-only view of a smart account's hook registry.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountContract: Send + Sync {
	/// Lists the hooks of `account` in the order the account runs them.
	///
	/// `validation` selects validation hooks (true) or execution hooks (false).
	async fn list_enabled_hooks(
		&self,
		account: Address,
		validation: bool,
	) -> Result<Vec<Address>, ChainError>;
}

/// Capabilities of the network a signer is bound to.
///
/// Domain derivation and serialization are optional: a binding lacking them is
/// representable so that the pipeline can reject it with a precise error.
#[derive(Clone)]
pub struct ChainBinding {
	chain_id_source: Arc<dyn ChainIdSource>,
	domain_deriver: Option<Arc<dyn DomainDeriver>>,
	serializer: Option<Arc<dyn TransactionSerializer>>,
	chain_id: Option<u64>,
}

impl ChainBinding {
	/// Creates a binding that can only read the live chain id.
	pub fn new(chain_id_source: Arc<dyn ChainIdSource>) -> Self {
		Self {
			chain_id_source,
			domain_deriver: None,
			serializer: None,
			chain_id: None,
		}
	}

	/// Creates a binding for a zkSync-based chain using the EIP-712 (type 0x71)
	/// domain and serializer.
	pub fn zksync(chain_id_source: Arc<dyn ChainIdSource>) -> Self {
		let zksync = Arc::new(ZkSyncEip712);
		Self::new(chain_id_source)
			.with_domain_deriver(zksync.clone())
			.with_serializer(zksync)
	}

	pub fn with_domain_deriver(mut self, deriver: Arc<dyn DomainDeriver>) -> Self {
		self.domain_deriver = Some(deriver);
		self
	}

	pub fn with_serializer(mut self, serializer: Arc<dyn TransactionSerializer>) -> Self {
		self.serializer = Some(serializer);
		self
	}

	/// Declares the chain this binding is meant for.
	pub fn with_chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = Some(chain_id);
		self
	}

	pub fn chain_id_source(&self) -> &Arc<dyn ChainIdSource> {
		&self.chain_id_source
	}

	pub fn domain_deriver(&self) -> Option<&Arc<dyn DomainDeriver>> {
		self.domain_deriver.as_ref()
	}

	pub fn serializer(&self) -> Option<&Arc<dyn TransactionSerializer>> {
		self.serializer.as_ref()
	}

	/// The declared chain id, if any.
	pub fn chain_id(&self) -> Option<u64> {
		self.chain_id
	}
}

impl std::fmt::Debug for ChainBinding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChainBinding")
			.field("chain_id", &self.chain_id)
			.field("domain_deriver", &self.domain_deriver.is_some())
			.field("serializer", &self.serializer.is_some())
			.finish()
	}
}
