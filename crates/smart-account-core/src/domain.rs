//! Typed-data domain construction.

use crate::SigningError;
use smart_account_chain::ChainBinding;
use smart_account_types::{TypedTransaction, ZkTransaction};

/// Derives the typed data for `tx` through the binding's domain deriver.
///
/// `tx.chain_id` must be the live chain id; a deriver that binds the domain to
/// any other chain is rejected.
pub fn build_domain(
	binding: &ChainBinding,
	tx: &ZkTransaction,
) -> Result<TypedTransaction, SigningError> {
	let deriver = binding.domain_deriver().ok_or_else(|| {
		SigningError::MissingCapability(format!(
			"Chain binding for chain {} cannot derive typed-data domains",
			tx.chain_id
		))
	})?;

	let typed = deriver
		.derive_domain(tx)
		.map_err(|e| SigningError::Encoding(format!("Failed to derive domain: {}", e)))?;

	match typed.chain_id() {
		Some(chain_id) if chain_id == tx.chain_id => {},
		other => {
			return Err(SigningError::Encoding(format!(
				"Domain bound to chain {:?}, expected {}",
				other, tx.chain_id
			)));
		},
	}

	tracing::debug!(
		chain_id = tx.chain_id,
		from = %tx.from,
		"Built typed-data domain"
	);
	Ok(typed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, U256};
	use smart_account_chain::{MockChainIdSource, MockDomainDeriver};
	use smart_account_types::eip712::zksync_domain;
	use smart_account_types::utils::builders::TransactionRequestBuilder;
	use std::sync::Arc;

	fn transaction(chain_id: u64) -> ZkTransaction {
		TransactionRequestBuilder::new()
			.nonce(1)
			.gas(100_000)
			.build()
			.normalize(chain_id, address!("1111111111111111111111111111111111111111"))
			.unwrap()
	}

	#[test]
	fn test_build_domain_with_zksync_binding() {
		let binding = ChainBinding::zksync(Arc::new(MockChainIdSource::new()));
		let typed = build_domain(&binding, &transaction(2741)).unwrap();
		assert_eq!(typed.chain_id(), Some(2741));
		assert_eq!(typed.message.txType, U256::from(113));
		assert_eq!(
			typed.message.from,
			U256::from_be_slice(address!("1111111111111111111111111111111111111111").as_slice())
		);
	}

	#[test]
	fn test_missing_deriver() {
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()));
		let err = build_domain(&binding, &transaction(2741)).unwrap_err();
		assert!(matches!(err, SigningError::MissingCapability(_)));
	}

	#[test]
	fn test_deriver_bound_to_wrong_chain() {
		let mut deriver = MockDomainDeriver::new();
		deriver.expect_derive_domain().returning(|tx| {
			Ok(TypedTransaction {
				domain: zksync_domain(1),
				message: tx.typed_message(),
			})
		});
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()))
			.with_domain_deriver(Arc::new(deriver));

		let err = build_domain(&binding, &transaction(2741)).unwrap_err();
		assert!(matches!(err, SigningError::Encoding(msg) if msg.contains("expected 2741")));
	}

	#[test]
	fn test_deriver_with_oversized_chain_id() {
		let mut deriver = MockDomainDeriver::new();
		deriver.expect_derive_domain().returning(|tx| {
			let mut domain = zksync_domain(tx.chain_id);
			domain.chain_id = Some(U256::MAX);
			Ok(TypedTransaction {
				domain,
				message: tx.typed_message(),
			})
		});
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()))
			.with_domain_deriver(Arc::new(deriver));

		let err = build_domain(&binding, &transaction(2741)).unwrap_err();
		assert!(matches!(err, SigningError::Encoding(msg) if msg.contains("None")));
	}

	#[test]
	fn test_build_domain_is_deterministic() {
		let binding = ChainBinding::zksync(Arc::new(MockChainIdSource::new()));
		let tx = transaction(11124);
		assert_eq!(
			build_domain(&binding, &tx).unwrap(),
			build_domain(&binding, &tx).unwrap()
		);
	}
}
