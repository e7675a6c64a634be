//! Registry trait for self-registering implementations.
//!
//! Capability crates expose each concrete implementation through a `Registry`
//! type so that configuration can select it by name.

/// A named implementation together with the factory that builds it.
pub trait ImplementationRegistry {
	/// Name used to select the implementation in configuration.
	const NAME: &'static str;
	/// Factory function type of the capability.
	type Factory;

	/// Returns the factory function for this implementation.
	fn factory() -> Self::Factory;
}
