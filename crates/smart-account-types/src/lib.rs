//! Common types for the smart-account signing system.
//!
//! This crate defines the data model shared by every stage of the signing
//! pipeline: addresses and signatures, the caller-facing transaction request,
//! hook payloads and the composite signature layout, the supported-chain
//! registry and the zkSync EIP-712 typed data the signer operates on.

/// Address, signature and transaction request types.
pub mod account;
/// Supported-chain registry and network configuration types.
pub mod chains;
/// zkSync EIP-712 transaction typed data.
pub mod eip712;
/// Hook payloads, signing modes and the composite signature layout.
pub mod hooks;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Utility functions for common type conversions.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

pub use account::*;
pub use chains::{
	deserialize_networks, ChainInfo, NetworkConfig, NetworksConfig, RpcEndpoint, SupportedChains,
	ABSTRACT_MAINNET_CHAIN_ID, ABSTRACT_TESTNET_CHAIN_ID,
};
pub use eip712::{
	Eip712Transaction, PaymasterParams, TypedTransaction, ZkTransaction, DEFAULT_GAS_PER_PUBDATA,
	EIP712_TX_TYPE,
};
pub use hooks::*;
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use utils::{bytes20_to_alloy_address, parse_address, with_0x_prefix, without_0x_prefix};
pub use validation::*;
