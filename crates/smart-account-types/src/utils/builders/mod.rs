//! Builder patterns for signing types
//!
//! Fluent APIs for constructing requests with sensible defaults, used by
//! callers and by tests across the workspace.

pub mod transaction_request;

pub use transaction_request::TransactionRequestBuilder;
