//! Conversion utilities between hex strings, raw bytes and Alloy addresses.

use super::formatting::without_0x_prefix;
use crate::Address;
use alloy_primitives::Address as AlloyAddress;

/// Converts a 20-byte slice to an Alloy `Address`.
///
/// Returns an error string if the slice is not exactly 20 bytes.
pub fn bytes20_to_alloy_address(bytes: &[u8]) -> Result<AlloyAddress, String> {
	if bytes.len() != 20 {
		return Err(format!("Expected 20-byte address, got {}", bytes.len()));
	}
	Ok(AlloyAddress::from_slice(bytes))
}

/// Parses a hex string (with or without "0x") into a 20-byte [`Address`].
pub fn parse_address(hex_str: &str) -> Result<Address, String> {
	let bytes =
		hex::decode(without_0x_prefix(hex_str)).map_err(|e| format!("Invalid hex: {}", e))?;
	if bytes.len() != 20 {
		return Err(format!(
			"Invalid address length: expected 20 bytes, got {}",
			bytes.len()
		));
	}
	Ok(Address(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_address() {
		let address = parse_address("0xABCDabcdABCDabcdABCDabcdABCDabcdABCDabcd").unwrap();
		assert_eq!(address.0.len(), 20);
		assert_eq!(address.0[0], 0xab);

		assert!(parse_address("abcd").is_err());
		assert!(parse_address("0xnothex").is_err());
	}

	#[test]
	fn test_bytes20_to_alloy_address() {
		assert_eq!(
			bytes20_to_alloy_address(&[0x01; 20]).unwrap(),
			AlloyAddress::repeat_byte(0x01)
		);
		let err = bytes20_to_alloy_address(&[0x01; 21]).unwrap_err();
		assert_eq!(err, "Expected 20-byte address, got 21");
	}
}
