//! Smart-account transaction signing.
//!
//! Produces chain-bound, contract-verifiable signatures for smart accounts
//! that hold no key of their own. An authorized signer signs the zkSync
//! EIP-712 typed data of a transaction; in delegated mode that raw signature
//! is wrapped together with the validator module address and one payload per
//! enabled validation hook, and the result is embedded in the transaction's
//! custom-signature field.
//!
//! ```text
//! validate -> [paymaster] -> build domain -> sign -> [resolve hooks] -> compose -> serialize
//! ```

pub mod composer;
pub mod domain;
mod error;
pub mod factory;
pub mod hooks;
pub mod paymaster;
pub mod pipeline;
pub mod serializer;
pub mod signing;
pub mod validation;

pub use error::SigningError;
pub use factory::{build_from_config, BuildError};
pub use paymaster::{PaymasterError, PaymasterHandler, StaticPaymaster};
pub use pipeline::{SmartAccountSigner, SmartAccountSignerBuilder};
