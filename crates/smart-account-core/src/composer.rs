//! Final signature layout.
//!
//! Direct signing passes the raw signature through. Delegated signing wraps it
//! as the ABI parameter list `(bytes signature, address validator, bytes[] hookData)`,
//! which the account contract decodes strictly.

use crate::SigningError;
use alloy_primitives::Bytes;
use smart_account_types::{CompositeSignature, SigningMode, RAW_SIGNATURE_LENGTH};

/// Encodes the signature the account contract expects for `mode`.
///
/// `hook_data` is ignored in direct mode.
pub fn compose_signature(
	mode: &SigningMode,
	raw_signature: Bytes,
	hook_data: Vec<Bytes>,
) -> Result<Bytes, SigningError> {
	if raw_signature.len() != RAW_SIGNATURE_LENGTH {
		return Err(SigningError::Encoding(format!(
			"Raw signature must be {} bytes, got {}",
			RAW_SIGNATURE_LENGTH,
			raw_signature.len()
		)));
	}

	match mode {
		SigningMode::Direct => Ok(raw_signature),
		SigningMode::Delegated(authority) => {
			let validator = authority
				.validator
				.to_alloy()
				.map_err(|e| SigningError::Encoding(format!("Invalid validator address: {}", e)))?;

			let encoded = CompositeSignature {
				signature: raw_signature,
				validator,
				hook_data,
			}
			.abi_encode();

			tracing::debug!(size = encoded.len(), "Composed delegated signature");
			Ok(encoded)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use smart_account_types::Address;

	fn raw() -> Bytes {
		Bytes::from(vec![0x11; 65])
	}

	#[test]
	fn test_direct_mode_is_passthrough() {
		let composed =
			compose_signature(&SigningMode::Direct, raw(), vec![Bytes::from(vec![1])]).unwrap();
		assert_eq!(composed, raw());
	}

	#[test]
	fn test_delegated_mode_decodes_to_inputs() {
		let mode = SigningMode::delegated(Address(vec![0xab; 20]));
		let hook_data = vec![Bytes::from(vec![0x12, 0x34]), Bytes::new()];
		let composed = compose_signature(&mode, raw(), hook_data.clone()).unwrap();

		let decoded = CompositeSignature::abi_decode(&composed).unwrap();
		assert_eq!(decoded.signature, raw());
		assert_eq!(decoded.validator.as_slice(), &[0xab; 20]);
		assert_eq!(decoded.hook_data, hook_data);
	}

	#[test]
	fn test_rejects_wrong_length_signature() {
		let err = compose_signature(&SigningMode::Direct, Bytes::from(vec![0x11; 64]), vec![])
			.unwrap_err();
		assert!(matches!(err, SigningError::Encoding(_)));
	}

	#[test]
	fn test_rejects_malformed_validator() {
		let mode = SigningMode::delegated(Address(vec![0xab; 19]));
		let err = compose_signature(&mode, raw(), vec![]).unwrap_err();
		assert!(matches!(err, SigningError::Encoding(msg) if msg.contains("validator")));
	}
}
