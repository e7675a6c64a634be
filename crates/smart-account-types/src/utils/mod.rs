//! Utility functions for common type conversions and transformations.

pub mod builders;
pub mod conversion;
pub mod formatting;

pub use conversion::{bytes20_to_alloy_address, parse_address};
pub use formatting::{with_0x_prefix, without_0x_prefix};
