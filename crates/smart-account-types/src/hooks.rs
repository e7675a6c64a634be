//! Validation-hook payloads and the composite signature layout.
//!
//! A smart account acting through a delegated authority (session key,
//! guardian) is authorized by a composite signature: the signer's raw ECDSA
//! signature, the validator module that interprets it, and one payload per
//! validation hook enabled on the account, in the account's own hook order.

use crate::account::Address;
use alloy_primitives::{Address as AlloyAddress, Bytes};
use alloy_sol_types::{sol_data, SolType};
use std::collections::BTreeMap;

/// ABI shape of the composite signature: `(bytes, address, bytes[])`.
type CompositeSignatureAbi = (sol_data::Bytes, sol_data::Address, sol_data::Array<sol_data::Bytes>);

/// Immutable mapping from hook address to the payload that hook expects.
///
/// Hooks that need no extra data are the common case, so a lookup for an
/// absent hook yields empty bytes rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookPayloadMap(BTreeMap<AlloyAddress, Bytes>);

impl HookPayloadMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the payload for `hook`, or empty bytes when none was supplied.
	pub fn payload_for(&self, hook: &AlloyAddress) -> Bytes {
		self.0.get(hook).cloned().unwrap_or_default()
	}

	/// Number of hooks with an explicit payload.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(AlloyAddress, Bytes)> for HookPayloadMap {
	fn from_iter<T: IntoIterator<Item = (AlloyAddress, Bytes)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Whether the account's enabled hooks are read live for this call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookQuery {
	/// Query the account contract for its enabled validation hooks.
	#[default]
	Live,
	/// Skip the query and compose an empty hook payload list. Used for the
	/// account's initial transaction, before its contract code exists.
	Skip,
}

/// Delegated authority acting for a smart account through a validator module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedAuthority {
	/// Validator module that decodes and checks the composite signature.
	pub validator: Address,
	/// Caller-supplied payloads keyed by hook address.
	pub hook_payloads: HookPayloadMap,
	/// How the enabled hook list is obtained.
	pub hooks: HookQuery,
}

impl DelegatedAuthority {
	pub fn new(validator: Address) -> Self {
		Self {
			validator,
			hook_payloads: HookPayloadMap::default(),
			hooks: HookQuery::Live,
		}
	}

	pub fn with_hook_payloads(mut self, hook_payloads: HookPayloadMap) -> Self {
		self.hook_payloads = hook_payloads;
		self
	}

	/// Marks the call as the account's initial transaction.
	pub fn initial_transaction(mut self) -> Self {
		self.hooks = HookQuery::Skip;
		self
	}
}

/// How the signer's authority over the smart account is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningMode {
	/// The signer acts as itself; the raw signature is used unchanged.
	Direct,
	/// The signer acts for the account through a validator module.
	Delegated(DelegatedAuthority),
}

impl SigningMode {
	/// Delegated mode through `validator` with no hook payloads.
	pub fn delegated(validator: Address) -> Self {
		SigningMode::Delegated(DelegatedAuthority::new(validator))
	}
}

/// Composite signature decoded by the account contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSignature {
	/// Raw 65-byte signature produced by the authorized signer.
	pub signature: Bytes,
	/// Validator module interpreting the signature.
	pub validator: AlloyAddress,
	/// One payload per enabled hook, in the account's hook order.
	pub hook_data: Vec<Bytes>,
}

impl CompositeSignature {
	/// ABI-encodes the signature as the parameter list `(bytes, address, bytes[])`.
	pub fn abi_encode(&self) -> Bytes {
		Bytes::from(CompositeSignatureAbi::abi_encode_params(&(
			self.signature.clone(),
			self.validator,
			self.hook_data.clone(),
		)))
	}

	/// Strictly decodes an encoded composite signature.
	pub fn abi_decode(data: &[u8]) -> Result<Self, alloy_sol_types::Error> {
		let (signature, validator, hook_data) =
			CompositeSignatureAbi::abi_decode_params_validate(data)?;
		Ok(Self {
			signature,
			validator,
			hook_data,
		})
	}
}
