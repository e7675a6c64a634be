//! Request and chain-binding validation.
//!
//! Both checks run before anything is signed. Request validation never touches
//! the network; chain validation issues exactly one live chain-id read.

use crate::SigningError;
use smart_account_chain::ChainBinding;
use smart_account_types::{SupportedChains, TransactionRequest};

/// Rejects requests no later step could recover from.
pub fn validate_request(request: &TransactionRequest) -> Result<(), SigningError> {
	request.validate().map_err(SigningError::InvalidTransaction)
}

/// Confirms the declared chain is supported and is the chain the binding is
/// actually connected to.
#[derive(Debug, Clone)]
pub struct ChainBindingValidator {
	supported_chains: SupportedChains,
}

impl ChainBindingValidator {
	pub fn new(supported_chains: SupportedChains) -> Self {
		Self { supported_chains }
	}

	pub fn supported_chains(&self) -> &SupportedChains {
		&self.supported_chains
	}

	/// Returns the live chain id when it equals the declared, supported chain.
	pub async fn validate(
		&self,
		declared: Option<u64>,
		binding: &ChainBinding,
	) -> Result<u64, SigningError> {
		let declared = declared
			.ok_or_else(|| SigningError::InvalidChain("No chain declared".to_string()))?;

		if !self.supported_chains.is_supported(declared) {
			return Err(SigningError::InvalidChain(format!(
				"Chain {} is not supported (supported: {:?})",
				declared,
				self.supported_chains.chain_ids()
			)));
		}

		let live = binding
			.chain_id_source()
			.fetch_live_chain_id()
			.await
			.map_err(|e| SigningError::ChainQuery(e.to_string()))?;

		if live != declared {
			return Err(SigningError::ChainMismatch { declared, live });
		}

		tracing::debug!(chain_id = live, "Chain binding validated");
		Ok(live)
	}
}
