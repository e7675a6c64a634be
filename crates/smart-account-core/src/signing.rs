//! Typed-data signing by the authorized signer.

use crate::SigningError;
use alloy_primitives::{Address, Bytes};
use smart_account_signer::AccountInterface;
use smart_account_types::{TypedTransaction, RAW_SIGNATURE_LENGTH};
use std::sync::Arc;

/// Invokes the authorized signer over typed data.
///
/// The smart account itself never signs; this is always the owner or session
/// key acting for it.
#[derive(Clone)]
pub struct TypedDataSigner {
	signer: Arc<dyn AccountInterface>,
}

impl TypedDataSigner {
	pub fn new(signer: Arc<dyn AccountInterface>) -> Self {
		Self { signer }
	}

	/// Address of the authorized signer.
	pub async fn address(&self) -> Result<Address, SigningError> {
		let address = self
			.signer
			.address()
			.await
			.map_err(|e| SigningError::Signer(e.to_string()))?;
		address
			.to_alloy()
			.map_err(|e| SigningError::Signer(format!("Signer reported a malformed address: {}", e)))
	}

	/// Signs `typed` once and returns the raw `r || s || v` signature.
	pub async fn sign(&self, typed: &TypedTransaction) -> Result<Bytes, SigningError> {
		let signature = self
			.signer
			.sign_typed_data(typed)
			.await
			.map_err(|e| SigningError::Signer(e.to_string()))?;

		if !signature.is_raw_ecdsa() {
			return Err(SigningError::Encoding(format!(
				"Signer returned {} bytes, expected {}",
				signature.0.len(),
				RAW_SIGNATURE_LENGTH
			)));
		}

		Ok(signature.into())
	}
}
