//! zkSync EIP-712 transaction typed data.
//!
//! A zkSync "EIP-712" transaction (type `0x71`) is authorized by a signature
//! over the typed-data struct below, hashed under the `zkSync`/`2` domain.
//! Smart accounts receive that authorization through the transaction's
//! `customSignature` field rather than through the ECDSA r/s/v slots.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, Eip712Domain, SolStruct};
use std::borrow::Cow;

/// EIP-2718 type byte of zkSync EIP-712 transactions.
pub const EIP712_TX_TYPE: u8 = 0x71;
/// Default gas per pubdata byte limit.
pub const DEFAULT_GAS_PER_PUBDATA: u64 = 50_000;
/// EIP-712 domain name used by zkSync-based chains.
pub const DOMAIN_NAME: &str = "zkSync";
/// EIP-712 domain version used by zkSync-based chains.
pub const DOMAIN_VERSION: &str = "2";

sol! {
	/// Typed-data message signed for a zkSync EIP-712 transaction.
	///
	/// Addresses are widened to `uint256` as the protocol requires.
	#[derive(Debug, PartialEq, Eq)]
	struct Transaction {
		uint256 txType;
		uint256 from;
		uint256 to;
		uint256 gasLimit;
		uint256 gasPerPubdataByteLimit;
		uint256 maxFeePerGas;
		uint256 maxPriorityFeePerGas;
		uint256 paymaster;
		uint256 nonce;
		uint256 value;
		bytes data;
		bytes32[] factoryDeps;
		bytes paymasterInput;
	}
}

/// The typed-data `Transaction` struct under its Rust-side name.
pub type Eip712Transaction = Transaction;

/// Paymaster sponsoring a transaction together with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymasterParams {
	pub paymaster: Address,
	pub input: Bytes,
}

/// Normalized transaction shared by the domain builder and the serializer.
///
/// Built once per signing call from the caller's request; `chain_id` is always
/// the chain id fetched live for that call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZkTransaction {
	pub chain_id: u64,
	pub from: Address,
	pub to: Option<Address>,
	pub nonce: U256,
	pub gas_limit: U256,
	pub max_fee_per_gas: U256,
	pub max_priority_fee_per_gas: U256,
	pub gas_per_pubdata: U256,
	pub value: U256,
	pub data: Bytes,
	pub paymaster: Option<PaymasterParams>,
}

impl ZkTransaction {
	/// Builds the typed-data message for this transaction.
	///
	/// Factory dependencies are not supported, so the hash list is always empty.
	pub fn typed_message(&self) -> Eip712Transaction {
		Transaction {
			txType: U256::from(EIP712_TX_TYPE),
			from: address_to_uint(&self.from),
			to: self.to.as_ref().map(address_to_uint).unwrap_or_default(),
			gasLimit: self.gas_limit,
			gasPerPubdataByteLimit: self.gas_per_pubdata,
			maxFeePerGas: self.max_fee_per_gas,
			maxPriorityFeePerGas: self.max_priority_fee_per_gas,
			paymaster: self
				.paymaster
				.as_ref()
				.map(|p| address_to_uint(&p.paymaster))
				.unwrap_or_default(),
			nonce: self.nonce,
			value: self.value,
			data: self.data.clone(),
			factoryDeps: Vec::<B256>::new(),
			paymasterInput: self
				.paymaster
				.as_ref()
				.map(|p| p.input.clone())
				.unwrap_or_default(),
		}
	}
}

/// Builds the zkSync EIP-712 domain for a chain.
pub fn zksync_domain(chain_id: u64) -> Eip712Domain {
	Eip712Domain::new(
		Some(Cow::Borrowed(DOMAIN_NAME)),
		Some(Cow::Borrowed(DOMAIN_VERSION)),
		Some(U256::from(chain_id)),
		None,
		None,
	)
}

/// Typed data handed to the signer: the domain plus the transaction message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedTransaction {
	pub domain: Eip712Domain,
	pub message: Eip712Transaction,
}

impl TypedTransaction {
	/// Returns the chain id the domain is bound to, or `None` when it is
	/// absent or does not fit in a `u64`.
	pub fn chain_id(&self) -> Option<u64> {
		self.domain.chain_id.and_then(|id| u64::try_from(id).ok())
	}

	/// Computes the EIP-712 digest: keccak256(0x1901 || domainSeparator || structHash).
	pub fn signing_hash(&self) -> B256 {
		self.message.eip712_signing_hash(&self.domain)
	}
}

fn address_to_uint(address: &Address) -> U256 {
	U256::from_be_slice(address.as_slice())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, keccak256};

	fn sample_transaction() -> ZkTransaction {
		ZkTransaction {
			chain_id: 2741,
			from: address!("1111111111111111111111111111111111111111"),
			to: Some(address!("2222222222222222222222222222222222222222")),
			nonce: U256::from(7),
			gas_limit: U256::from(500_000),
			max_fee_per_gas: U256::from(25_000_000),
			max_priority_fee_per_gas: U256::ZERO,
			gas_per_pubdata: U256::from(DEFAULT_GAS_PER_PUBDATA),
			value: U256::from(1),
			data: Bytes::from(vec![0xab, 0xcd]),
			paymaster: None,
		}
	}

	#[test]
	fn test_type_hash_matches_protocol_definition() {
		let expected = keccak256(
			"Transaction(uint256 txType,uint256 from,uint256 to,uint256 gasLimit,uint256 gasPerPubdataByteLimit,uint256 maxFeePerGas,uint256 maxPriorityFeePerGas,uint256 paymaster,uint256 nonce,uint256 value,bytes data,bytes32[] factoryDeps,bytes paymasterInput)",
		);
		assert_eq!(sample_transaction().typed_message().eip712_type_hash(), expected);
	}

	#[test]
	fn test_typed_message_widens_addresses() {
		let message = sample_transaction().typed_message();
		assert_eq!(message.txType, U256::from(0x71));
		assert_eq!(
			message.from,
			U256::from_be_slice(&[0x11; 20])
		);
		assert_eq!(message.to, U256::from_be_slice(&[0x22; 20]));
		assert_eq!(message.paymaster, U256::ZERO);
		assert!(message.paymasterInput.is_empty());
		assert!(message.factoryDeps.is_empty());
	}

	#[test]
	fn test_typed_message_includes_paymaster() {
		let mut tx = sample_transaction();
		tx.paymaster = Some(PaymasterParams {
			paymaster: address!("3333333333333333333333333333333333333333"),
			input: Bytes::from(vec![0x01]),
		});
		let message = tx.typed_message();
		assert_eq!(message.paymaster, U256::from_be_slice(&[0x33; 20]));
		assert_eq!(message.paymasterInput.as_ref(), &[0x01]);
	}

	#[test]
	fn test_domain_binds_chain_id() {
		let domain = zksync_domain(11124);
		assert_eq!(domain.name.as_deref(), Some("zkSync"));
		assert_eq!(domain.version.as_deref(), Some("2"));
		assert_eq!(domain.chain_id, Some(U256::from(11124)));
		assert_eq!(domain.verifying_contract, None);
	}

	#[test]
	fn test_chain_id_out_of_range() {
		let mut typed = TypedTransaction {
			domain: zksync_domain(2741),
			message: sample_transaction().typed_message(),
		};
		typed.domain.chain_id = Some(U256::from(u64::MAX) + U256::from(1));
		assert_eq!(typed.chain_id(), None);

		typed.domain.chain_id = None;
		assert_eq!(typed.chain_id(), None);
	}

	#[test]
	fn test_signing_hash_depends_on_chain() {
		let message = sample_transaction().typed_message();
		let mainnet = TypedTransaction {
			domain: zksync_domain(2741),
			message: message.clone(),
		};
		let testnet = TypedTransaction {
			domain: zksync_domain(11124),
			message,
		};
		assert_eq!(mainnet.chain_id(), Some(2741));
		assert_eq!(mainnet.signing_hash(), mainnet.clone().signing_hash());
		assert_ne!(mainnet.signing_hash(), testnet.signing_hash());
	}
}
