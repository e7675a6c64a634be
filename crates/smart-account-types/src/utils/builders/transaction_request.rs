//! Builder for TransactionRequest

use crate::account::{Address, TransactionRequest};
use alloy_primitives::U256;

/// Builder for creating `TransactionRequest` instances with a fluent API.
///
/// # Examples
///
/// ```
/// use smart_account_types::utils::builders::TransactionRequestBuilder;
/// use smart_account_types::Address;
///
/// let request = TransactionRequestBuilder::new()
///     .to(Address(vec![0x12; 20]))
///     .value(1000)
///     .nonce(3)
///     .gas(500_000)
///     .build();
/// assert_eq!(request.nonce, Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionRequestBuilder {
	request: TransactionRequest,
}

impl TransactionRequestBuilder {
	/// Creates a builder for an empty request.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn to(mut self, to: Address) -> Self {
		self.request.to = Some(to);
		self
	}

	/// Sets the recipient from a hex string.
	pub fn to_hex(mut self, hex: &str) -> Result<Self, String> {
		self.request.to = Some(crate::utils::parse_address(hex)?);
		Ok(self)
	}

	pub fn data(mut self, data: Vec<u8>) -> Self {
		self.request.data = data;
		self
	}

	pub fn value(mut self, value: u64) -> Self {
		self.request.value = U256::from(value);
		self
	}

	pub fn nonce(mut self, nonce: u64) -> Self {
		self.request.nonce = Some(nonce);
		self
	}

	pub fn gas(mut self, gas: u64) -> Self {
		self.request.gas = Some(U256::from(gas));
		self
	}

	pub fn max_fee_per_gas(mut self, fee: u64) -> Self {
		self.request.max_fee_per_gas = Some(U256::from(fee));
		self
	}

	pub fn max_priority_fee_per_gas(mut self, fee: u64) -> Self {
		self.request.max_priority_fee_per_gas = Some(U256::from(fee));
		self
	}

	/// Sets both fee fields from gwei values.
	pub fn fees_gwei(self, max_fee: u64, priority_fee: u64) -> Self {
		self.max_fee_per_gas(max_fee * 1_000_000_000)
			.max_priority_fee_per_gas(priority_fee * 1_000_000_000)
	}

	pub fn gas_per_pubdata(mut self, gas_per_pubdata: u64) -> Self {
		self.request.gas_per_pubdata = Some(U256::from(gas_per_pubdata));
		self
	}

	pub fn chain_id(mut self, chain_id: u64) -> Self {
		self.request.chain_id = Some(chain_id);
		self
	}

	pub fn account(mut self, account: Address) -> Self {
		self.request.account = Some(account);
		self
	}

	pub fn paymaster(mut self, paymaster: Address, input: Vec<u8>) -> Self {
		self.request.paymaster = Some(paymaster);
		self.request.paymaster_input = Some(input);
		self
	}

	pub fn build(self) -> TransactionRequest {
		self.request
	}
}
