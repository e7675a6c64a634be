//! Paymaster resolution.
//!
//! A handler is consulted once per call, after validation, for requests that
//! carry no paymaster of their own. Whatever it returns is written into the
//! request so that the signed typed data and the serialized transaction agree.

use async_trait::async_trait;
use smart_account_types::{PaymasterParams, TransactionRequest};
use thiserror::Error;

/// Errors that can occur while resolving a paymaster.
#[derive(Debug, Error)]
pub enum PaymasterError {
	/// The paymaster service could not be reached.
	#[error("Paymaster unavailable: {0}")]
	Unavailable(String),
	/// The paymaster declined to sponsor the transaction.
	#[error("Sponsorship rejected: {0}")]
	Rejected(String),
}

/// Supplies paymaster parameters for unsponsored requests.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PaymasterHandler: Send + Sync {
	/// Returns the paymaster for `request` on `chain_id`, or `None` to leave
	/// the transaction unsponsored.
	async fn paymaster_params(
		&self,
		request: &TransactionRequest,
		chain_id: u64,
	) -> Result<Option<PaymasterParams>, PaymasterError>;
}

/// Handler that always returns the same paymaster.
#[derive(Debug, Clone)]
pub struct StaticPaymaster {
	params: PaymasterParams,
}

impl StaticPaymaster {
	pub fn new(params: PaymasterParams) -> Self {
		Self { params }
	}
}

#[async_trait]
impl PaymasterHandler for StaticPaymaster {
	async fn paymaster_params(
		&self,
		_request: &TransactionRequest,
		_chain_id: u64,
	) -> Result<Option<PaymasterParams>, PaymasterError> {
		Ok(Some(self.params.clone()))
	}
}
