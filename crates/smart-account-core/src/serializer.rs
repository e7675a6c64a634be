//! Broadcastable encoding of the signed transaction.

use crate::SigningError;
use alloy_primitives::Bytes;
use smart_account_chain::ChainBinding;
use smart_account_types::ZkTransaction;

/// Serializes `tx` with `signature` in its custom-signature field using the
/// binding's serializer.
pub fn serialize_signed_transaction(
	binding: &ChainBinding,
	tx: &ZkTransaction,
	signature: &Bytes,
) -> Result<Bytes, SigningError> {
	let serializer = binding
		.serializer()
		.ok_or(SigningError::SerializationCapabilityMissing(tx.chain_id))?;

	serializer
		.serialize_transaction(tx, signature)
		.map_err(|e| SigningError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::Address;
	use smart_account_chain::{ChainError, MockChainIdSource, MockTransactionSerializer};
	use smart_account_types::utils::builders::TransactionRequestBuilder;
	use std::sync::Arc;

	fn transaction() -> ZkTransaction {
		TransactionRequestBuilder::new()
			.build()
			.normalize(2741, Address::repeat_byte(0x11))
			.unwrap()
	}

	#[test]
	fn test_missing_serializer() {
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()));
		let err = serialize_signed_transaction(&binding, &transaction(), &Bytes::from(vec![1; 65]))
			.unwrap_err();
		assert!(matches!(err, SigningError::SerializationCapabilityMissing(2741)));
	}

	#[test]
	fn test_serializer_receives_signature() {
		let mut serializer = MockTransactionSerializer::new();
		serializer
			.expect_serialize_transaction()
			.withf(|tx, signature| tx.chain_id == 2741 && signature.len() == 65)
			.times(1)
			.returning(|_, _| Ok(Bytes::from(vec![0x71])));
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()))
			.with_serializer(Arc::new(serializer));

		let out = serialize_signed_transaction(&binding, &transaction(), &Bytes::from(vec![1; 65]))
			.unwrap();
		assert_eq!(out.as_ref(), &[0x71]);
	}

	#[test]
	fn test_serializer_failure() {
		let mut serializer = MockTransactionSerializer::new();
		serializer
			.expect_serialize_transaction()
			.returning(|_, _| Err(ChainError::Encoding("bad".to_string())));
		let binding = ChainBinding::new(Arc::new(MockChainIdSource::new()))
			.with_serializer(Arc::new(serializer));

		let err = serialize_signed_transaction(&binding, &transaction(), &Bytes::from(vec![1; 65]))
			.unwrap_err();
		assert!(matches!(err, SigningError::Serialization(_)));
	}
}
