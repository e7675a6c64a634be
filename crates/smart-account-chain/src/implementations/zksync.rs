//! zkSync EIP-712 (type `0x71`) domain derivation and serialization.
//!
//! Wire layout:
//!
//! ```text
//! 0x71 || rlp([nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data,
//!              chainId, r, s, chainId, from, gasPerPubdata, factoryDeps,
//!              customSignature, paymasterParams])
//! ```
//!
//! Authorization travels in `customSignature`; the ECDSA `r`/`s` slots are
//! empty and the `v` slot repeats the chain id.

use crate::{ChainError, DomainDeriver, TransactionSerializer};
use alloy_primitives::{Bytes, B256, U256};
use alloy_rlp::{Encodable, Header};
use smart_account_types::eip712::zksync_domain;
use smart_account_types::{TypedTransaction, ZkTransaction, EIP712_TX_TYPE};

/// Domain deriver and serializer for zkSync-based chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZkSyncEip712;

impl DomainDeriver for ZkSyncEip712 {
	fn derive_domain(&self, tx: &ZkTransaction) -> Result<TypedTransaction, ChainError> {
		Ok(TypedTransaction {
			domain: zksync_domain(tx.chain_id),
			message: tx.typed_message(),
		})
	}
}

impl TransactionSerializer for ZkSyncEip712 {
	fn serialize_transaction(
		&self,
		tx: &ZkTransaction,
		custom_signature: &Bytes,
	) -> Result<Bytes, ChainError> {
		if custom_signature.is_empty() {
			return Err(ChainError::Encoding(
				"Custom signature cannot be empty".to_string(),
			));
		}

		let mut payload = Vec::new();
		tx.nonce.encode(&mut payload);
		tx.max_priority_fee_per_gas.encode(&mut payload);
		tx.max_fee_per_gas.encode(&mut payload);
		tx.gas_limit.encode(&mut payload);
		match &tx.to {
			Some(to) => to.encode(&mut payload),
			None => Bytes::new().encode(&mut payload),
		}
		tx.value.encode(&mut payload);
		tx.data.encode(&mut payload);
		tx.chain_id.encode(&mut payload);
		// Empty r and s
		U256::ZERO.encode(&mut payload);
		U256::ZERO.encode(&mut payload);
		tx.chain_id.encode(&mut payload);
		tx.from.encode(&mut payload);
		tx.gas_per_pubdata.encode(&mut payload);
		Vec::<B256>::new().encode(&mut payload);
		custom_signature.encode(&mut payload);
		match &tx.paymaster {
			Some(params) => {
				let mut inner = Vec::new();
				params.paymaster.encode(&mut inner);
				params.input.encode(&mut inner);
				list_header(inner.len()).encode(&mut payload);
				payload.extend_from_slice(&inner);
			},
			None => list_header(0).encode(&mut payload),
		}

		let mut out = Vec::with_capacity(payload.len() + 10);
		out.push(EIP712_TX_TYPE);
		list_header(payload.len()).encode(&mut out);
		out.extend_from_slice(&payload);

		tracing::debug!(
			chain_id = tx.chain_id,
			size = out.len(),
			"Serialized EIP-712 transaction"
		);
		Ok(Bytes::from(out))
	}
}

fn list_header(payload_length: usize) -> Header {
	Header {
		list: true,
		payload_length,
	}
}
