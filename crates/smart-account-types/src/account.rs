//! Account-related types for the signing system.
//!
//! This module defines types for blockchain addresses, signatures and the
//! caller-supplied transaction request that flows into the signing pipeline.

use crate::eip712::{PaymasterParams, ZkTransaction, DEFAULT_GAS_PER_PUBDATA};
use crate::utils::{bytes20_to_alloy_address, with_0x_prefix};
use alloy_primitives::{Address as AlloyAddress, Bytes, Signature as AlloySignature, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length in bytes of an ECDSA signature in `r || s || v` form.
pub const RAW_SIGNATURE_LENGTH: usize = 65;

/// Blockchain address representation.
///
/// Stores addresses as raw bytes so that malformed input can be carried up to
/// the point where it is rejected with a meaningful error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub Vec<u8>);

impl Address {
	/// Converts into a 20-byte Alloy address.
	pub fn to_alloy(&self) -> Result<AlloyAddress, String> {
		bytes20_to_alloy_address(&self.0)
	}
}

impl From<AlloyAddress> for Address {
	fn from(address: AlloyAddress) -> Self {
		Address(address.as_slice().to_vec())
	}
}

/// Serializes as a 0x-prefixed hex string.
impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

/// Accepts hex strings with or without 0x prefix; rejects anything but 20 bytes.
impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		crate::utils::parse_address(&s).map_err(serde::de::Error::custom)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Cryptographic signature representation.
///
/// Stores signatures as raw bytes in the standard Ethereum format (r, s, v).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl Signature {
	/// Returns true when the signature has the 65-byte `r || s || v` shape.
	pub fn is_raw_ecdsa(&self) -> bool {
		self.0.len() == RAW_SIGNATURE_LENGTH
	}
}

impl From<AlloySignature> for Signature {
	fn from(sig: AlloySignature) -> Self {
		let mut bytes = Vec::with_capacity(RAW_SIGNATURE_LENGTH);
		bytes.extend_from_slice(&sig.r().to_be_bytes::<32>());
		bytes.extend_from_slice(&sig.s().to_be_bytes::<32>());
		// Typed-data signatures use the pre-EIP-155 form: v = 27 + y_parity
		bytes.push(if sig.v() { 28 } else { 27 });
		Signature(bytes)
	}
}

impl From<Signature> for Bytes {
	fn from(sig: Signature) -> Self {
		Bytes::from(sig.0)
	}
}

/// Caller-supplied transaction to be signed on behalf of a smart account.
///
/// All numeric fields are normalized to fixed-width integers when the request
/// is turned into a [`ZkTransaction`]; the request itself is never mutated by
/// the pipeline except to fill in paymaster parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
	/// Recipient address (None for deployments).
	pub to: Option<Address>,
	/// Transaction calldata.
	#[serde(default)]
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	#[serde(default)]
	pub value: U256,
	/// Account nonce.
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas: Option<U256>,
	/// Maximum fee per gas.
	pub max_fee_per_gas: Option<U256>,
	/// Maximum priority fee per gas.
	pub max_priority_fee_per_gas: Option<U256>,
	/// Gas per pubdata byte limit; defaults to [`DEFAULT_GAS_PER_PUBDATA`].
	pub gas_per_pubdata: Option<U256>,
	/// Chain the caller expects to sign for, overriding the binding's chain.
	pub chain_id: Option<u64>,
	/// Smart-account address, overriding the configured account.
	pub account: Option<Address>,
	/// Paymaster contract sponsoring the transaction.
	pub paymaster: Option<Address>,
	/// Paymaster-specific input.
	pub paymaster_input: Option<Vec<u8>>,
}

impl TransactionRequest {
	/// Checks the request for inconsistencies that no later step could recover from.
	pub fn validate(&self) -> Result<(), String> {
		if let Some(to) = &self.to {
			to.to_alloy().map_err(|e| format!("Invalid recipient: {}", e))?;
		}
		if let Some(paymaster) = &self.paymaster {
			paymaster
				.to_alloy()
				.map_err(|e| format!("Invalid paymaster: {}", e))?;
		}
		if let (Some(max_fee), Some(priority_fee)) =
			(self.max_fee_per_gas, self.max_priority_fee_per_gas)
		{
			if priority_fee > max_fee {
				return Err(format!(
					"Max priority fee per gas ({}) cannot be higher than max fee per gas ({})",
					priority_fee, max_fee
				));
			}
		}
		Ok(())
	}

	/// Returns the paymaster parameters carried by this request, if any.
	pub fn paymaster_params(&self) -> Result<Option<PaymasterParams>, String> {
		match &self.paymaster {
			Some(paymaster) => Ok(Some(PaymasterParams {
				paymaster: paymaster.to_alloy()?,
				input: Bytes::from(self.paymaster_input.clone().unwrap_or_default()),
			})),
			None => Ok(None),
		}
	}

	/// Applies paymaster parameters to the request.
	pub fn with_paymaster(mut self, params: &PaymasterParams) -> Self {
		self.paymaster = Some(params.paymaster.into());
		self.paymaster_input = Some(params.input.to_vec());
		self
	}

	/// Normalizes the request into the fixed-width transaction that is both
	/// hashed for signing and serialized for broadcast.
	///
	/// `chain_id` must be the chain id fetched live for this call.
	pub fn normalize(&self, chain_id: u64, from: AlloyAddress) -> Result<ZkTransaction, String> {
		let to = self.to.as_ref().map(Address::to_alloy).transpose()?;

		Ok(ZkTransaction {
			chain_id,
			from,
			to,
			nonce: U256::from(self.nonce.unwrap_or_default()),
			gas_limit: self.gas.unwrap_or_default(),
			max_fee_per_gas: self.max_fee_per_gas.unwrap_or_default(),
			max_priority_fee_per_gas: self.max_priority_fee_per_gas.unwrap_or_default(),
			gas_per_pubdata: self
				.gas_per_pubdata
				.unwrap_or(U256::from(DEFAULT_GAS_PER_PUBDATA)),
			value: self.value,
			data: Bytes::from(self.data.clone()),
			paymaster: self.paymaster_params()?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::builders::TransactionRequestBuilder;
	use crate::utils::parse_address;
	use alloy_primitives::{address, b256};

	#[test]
	fn test_address_display() {
		let address = parse_address("0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b").unwrap();
		assert_eq!(
			address.to_string(),
			"0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b"
		);
	}

	#[test]
	fn test_address_serde() {
		let address = parse_address("0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b").unwrap();
		let json = serde_json::to_string(&address).unwrap();
		assert_eq!(json, "\"0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b\"");

		let parsed: Address = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, address);
	}

	#[test]
	fn test_address_deserialization_rejects_short_address() {
		let result: Result<Address, _> = serde_json::from_str("\"0x1234\"");
		assert!(result.is_err());
	}

	#[test]
	fn test_address_to_alloy() {
		let address = Address(vec![0x11; 20]);
		assert_eq!(
			address.to_alloy().unwrap(),
			address!("1111111111111111111111111111111111111111")
		);
		assert!(Address(vec![0x11; 19]).to_alloy().is_err());
	}

	#[test]
	fn test_signature_from_alloy() {
		let sig = AlloySignature::new(U256::from(1), U256::from(2), true);
		let converted = Signature::from(sig);
		assert!(converted.is_raw_ecdsa());
		assert_eq!(converted.0[31], 1);
		assert_eq!(converted.0[63], 2);
		assert_eq!(converted.0[64], 28);

		let sig = AlloySignature::new(U256::from(1), U256::from(2), false);
		assert_eq!(Signature::from(sig).0[64], 27);
	}

	#[test]
	fn test_validate_rejects_priority_fee_above_max_fee() {
		let request = TransactionRequestBuilder::new()
			.max_fee_per_gas(10)
			.max_priority_fee_per_gas(11)
			.build();
		let err = request.validate().unwrap_err();
		assert!(err.contains("cannot be higher"));
	}

	#[test]
	fn test_validate_rejects_malformed_recipient() {
		let request = TransactionRequestBuilder::new()
			.to(Address(vec![0xaa; 19]))
			.build();
		assert!(request.validate().is_err());
	}

	#[test]
	fn test_normalize_applies_defaults() {
		let request = TransactionRequest::default();
		let from = address!("2222222222222222222222222222222222222222");
		let tx = request.normalize(2741, from).unwrap();

		assert_eq!(tx.chain_id, 2741);
		assert_eq!(tx.from, from);
		assert_eq!(tx.to, None);
		assert_eq!(tx.nonce, U256::ZERO);
		assert_eq!(tx.gas_per_pubdata, U256::from(DEFAULT_GAS_PER_PUBDATA));
		assert!(tx.paymaster.is_none());
	}

	#[test]
	fn test_normalize_carries_paymaster() {
		let request = TransactionRequestBuilder::new()
			.paymaster(Address(vec![0x33; 20]), vec![0xde, 0xad])
			.build();
		let tx = request.normalize(11124, AlloyAddress::ZERO).unwrap();
		let params = tx.paymaster.unwrap();
		assert_eq!(params.paymaster, AlloyAddress::repeat_byte(0x33));
		assert_eq!(params.input.as_ref(), &[0xde, 0xad]);
	}

	#[test]
	fn test_with_paymaster_round_trips_params() {
		let params = PaymasterParams {
			paymaster: AlloyAddress::repeat_byte(0x44),
			input: Bytes::from(b256!(
				"00000000000000000000000000000000000000000000000000000000000000ff"
			)
			.to_vec()),
		};
		let request = TransactionRequest::default().with_paymaster(&params);
		assert_eq!(request.paymaster_params().unwrap(), Some(params));
	}
}
