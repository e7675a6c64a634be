//! Validation-hook payload resolution for delegated signing.

use crate::SigningError;
use alloy_primitives::{Address, Bytes};
use smart_account_chain::AccountContract;
use smart_account_types::{DelegatedAuthority, HookQuery};
use std::sync::Arc;

/// Reads the account's enabled validation hooks and pairs each with its payload.
#[derive(Clone)]
pub struct HookResolver {
	contract: Option<Arc<dyn AccountContract>>,
}

impl HookResolver {
	pub fn new(contract: Option<Arc<dyn AccountContract>>) -> Self {
		Self { contract }
	}

	/// Returns one payload per enabled hook, in the account's hook order.
	///
	/// Hooks absent from the authority's payload map get empty bytes.
	pub async fn resolve(
		&self,
		account: Address,
		authority: &DelegatedAuthority,
	) -> Result<Vec<Bytes>, SigningError> {
		if authority.hooks == HookQuery::Skip {
			tracing::debug!(account = %account, "Skipping hook query");
			return Ok(Vec::new());
		}

		let contract = self.contract.as_ref().ok_or_else(|| {
			SigningError::MissingCapability("No account contract reader installed".to_string())
		})?;

		let hooks = contract
			.list_enabled_hooks(account, true)
			.await
			.map_err(|e| SigningError::CapabilityQuery(e.to_string()))?;

		let payloads: Vec<Bytes> = hooks
			.iter()
			.map(|hook| authority.hook_payloads.payload_for(hook))
			.collect();

		tracing::debug!(
			account = %account,
			hooks = hooks.len(),
			with_payload = payloads.iter().filter(|p| !p.is_empty()).count(),
			"Resolved hook payloads"
		);
		Ok(payloads)
	}
}
