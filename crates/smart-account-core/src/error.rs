//! Errors of the signing pipeline.
//!
//! Every variant is produced by exactly one step and aborts the call; nothing
//! is retried and no partial output is returned.

use thiserror::Error;

/// Failure of a signing call.
#[derive(Debug, Error)]
pub enum SigningError {
	/// Neither the request nor the pipeline names a smart account.
	#[error("Missing account: {0}")]
	MissingAccount(String),
	/// The request is malformed.
	#[error("Invalid transaction: {0}")]
	InvalidTransaction(String),
	/// No chain was declared, or the declared chain is not supported.
	#[error("Invalid chain: {0}")]
	InvalidChain(String),
	/// The connected network reports a different chain than the one declared.
	#[error("Chain mismatch: declared chain {declared}, connected chain {live}")]
	ChainMismatch { declared: u64, live: u64 },
	/// Reading the live chain id failed.
	#[error("Chain query failed: {0}")]
	ChainQuery(String),
	/// The chain binding cannot derive typed-data domains.
	#[error("Missing capability: {0}")]
	MissingCapability(String),
	/// The chain binding cannot serialize transactions.
	#[error("Missing serialization capability for chain {0}")]
	SerializationCapabilityMissing(u64),
	/// The authorized signer failed to sign.
	#[error("Signer error: {0}")]
	Signer(String),
	/// Reading the account's hook registry failed or returned malformed data.
	#[error("Capability query failed: {0}")]
	CapabilityQuery(String),
	/// A signature or composite signature could not be encoded.
	#[error("Encoding error: {0}")]
	Encoding(String),
	/// The paymaster handler failed.
	#[error("Paymaster error: {0}")]
	Paymaster(String),
	/// The chain serializer rejected the transaction.
	#[error("Serialization failed: {0}")]
	Serialization(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_chain_mismatch_display() {
		let err = SigningError::ChainMismatch {
			declared: 2741,
			live: 11124,
		};
		assert_eq!(
			err.to_string(),
			"Chain mismatch: declared chain 2741, connected chain 11124"
		);
	}

	#[test]
	fn test_serialization_capability_display() {
		let err = SigningError::SerializationCapabilityMissing(2741);
		assert_eq!(
			err.to_string(),
			"Missing serialization capability for chain 2741"
		);
	}
}
