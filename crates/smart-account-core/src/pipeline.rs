//! The signing pipeline.
//!
//! One call runs Validate, [Paymaster], BuildDomain, Sign, [ResolveHooks],
//! Compose and Serialize in that order. The first failing step ends the call.

use crate::composer::compose_signature;
use crate::domain::build_domain;
use crate::hooks::HookResolver;
use crate::paymaster::PaymasterHandler;
use crate::serializer::serialize_signed_transaction;
use crate::signing::TypedDataSigner;
use crate::validation::{validate_request, ChainBindingValidator};
use crate::SigningError;
use alloy_primitives::{Address, Bytes};
use smart_account_chain::{AccountContract, ChainBinding};
use smart_account_signer::AccountInterface;
use smart_account_types::{
	Address as AccountAddress, HookPayloadMap, SigningMode, SupportedChains, TransactionRequest,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Signs transactions on behalf of a smart account.
///
/// Holds only shared, immutable capabilities; concurrent calls are independent.
pub struct SmartAccountSigner {
	binding: ChainBinding,
	validator: ChainBindingValidator,
	signer: TypedDataSigner,
	hooks: HookResolver,
	/// Smart account signed for when a request names none.
	account: Option<Address>,
	/// Validator module used by [`SmartAccountSigner::delegated_mode`].
	default_validator: Option<AccountAddress>,
	paymaster: Option<Arc<dyn PaymasterHandler>>,
}

impl SmartAccountSigner {
	/// Starts a builder for a pipeline bound to `binding` and signing with `signer`.
	pub fn builder(
		binding: ChainBinding,
		signer: Arc<dyn AccountInterface>,
	) -> SmartAccountSignerBuilder {
		SmartAccountSignerBuilder::new(binding, signer)
	}

	pub fn supported_chains(&self) -> &SupportedChains {
		self.validator.supported_chains()
	}

	pub fn chain_binding(&self) -> &ChainBinding {
		&self.binding
	}

	/// Delegated mode through the configured validator, if one is configured.
	pub fn delegated_mode(&self, hook_payloads: HookPayloadMap) -> Option<SigningMode> {
		self.default_validator.clone().map(|validator| {
			SigningMode::Delegated(
				smart_account_types::DelegatedAuthority::new(validator)
					.with_hook_payloads(hook_payloads),
			)
		})
	}

	/// Signs `request` and returns the broadcastable transaction bytes.
	#[instrument(skip_all, fields(
		chain_id = ?request.chain_id.or(self.binding.chain_id()),
		mode = mode_label(&mode),
	))]
	pub async fn sign_transaction(
		&self,
		request: TransactionRequest,
		mode: SigningMode,
	) -> Result<Bytes, SigningError> {
		match self.run(request, &mode).await {
			Ok(signed) => {
				debug!(size = signed.len(), "Signed transaction");
				Ok(signed)
			},
			Err(e) => {
				warn!(error = %e, "Signing failed");
				Err(e)
			},
		}
	}

	async fn run(
		&self,
		mut request: TransactionRequest,
		mode: &SigningMode,
	) -> Result<Bytes, SigningError> {
		let account = self.resolve_account(&request)?;
		validate_request(&request)?;

		let declared = request.chain_id.or(self.binding.chain_id());
		let chain_id = self.validator.validate(declared, &self.binding).await?;

		if request.paymaster.is_none() {
			if let Some(handler) = &self.paymaster {
				let params = handler
					.paymaster_params(&request, chain_id)
					.await
					.map_err(|e| SigningError::Paymaster(e.to_string()))?;
				if let Some(params) = params {
					debug!(paymaster = %params.paymaster, "Applied paymaster");
					request = request.with_paymaster(&params);
				}
			}
		}

		let from = match mode {
			SigningMode::Direct => self.signer.address().await?,
			SigningMode::Delegated(_) => account,
		};
		let tx = request
			.normalize(chain_id, from)
			.map_err(SigningError::InvalidTransaction)?;

		let typed = build_domain(&self.binding, &tx)?;
		let raw_signature = self.signer.sign(&typed).await?;

		let hook_data = match mode {
			SigningMode::Direct => Vec::new(),
			SigningMode::Delegated(authority) => self.hooks.resolve(account, authority).await?,
		};

		let signature = compose_signature(mode, raw_signature, hook_data)?;
		serialize_signed_transaction(&self.binding, &tx, &signature)
	}

	fn resolve_account(&self, request: &TransactionRequest) -> Result<Address, SigningError> {
		match &request.account {
			Some(account) => account
				.to_alloy()
				.map_err(|e| SigningError::InvalidTransaction(format!("Invalid account: {}", e))),
			None => self.account.ok_or_else(|| {
				SigningError::MissingAccount(
					"No smart account in the request or the signer configuration".to_string(),
				)
			}),
		}
	}
}

fn mode_label(mode: &SigningMode) -> &'static str {
	match mode {
		SigningMode::Direct => "direct",
		SigningMode::Delegated(_) => "delegated",
	}
}

/// Builder for [`SmartAccountSigner`].
pub struct SmartAccountSignerBuilder {
	binding: ChainBinding,
	signer: Arc<dyn AccountInterface>,
	supported_chains: SupportedChains,
	account_contract: Option<Arc<dyn AccountContract>>,
	account: Option<Address>,
	default_validator: Option<AccountAddress>,
	paymaster: Option<Arc<dyn PaymasterHandler>>,
}

impl SmartAccountSignerBuilder {
	/// Defaults to the Abstract networks with no account, hook reader or paymaster.
	pub fn new(binding: ChainBinding, signer: Arc<dyn AccountInterface>) -> Self {
		Self {
			binding,
			signer,
			supported_chains: SupportedChains::abstract_networks(),
			account_contract: None,
			account: None,
			default_validator: None,
			paymaster: None,
		}
	}

	pub fn supported_chains(mut self, supported_chains: SupportedChains) -> Self {
		self.supported_chains = supported_chains;
		self
	}

	/// Installs the reader used to list the account's hooks in delegated mode.
	pub fn account_contract(mut self, contract: Arc<dyn AccountContract>) -> Self {
		self.account_contract = Some(contract);
		self
	}

	/// Sets the smart account signed for when a request names none.
	pub fn account(mut self, account: Address) -> Self {
		self.account = Some(account);
		self
	}

	pub fn default_validator(mut self, validator: AccountAddress) -> Self {
		self.default_validator = Some(validator);
		self
	}

	pub fn paymaster(mut self, handler: Arc<dyn PaymasterHandler>) -> Self {
		self.paymaster = Some(handler);
		self
	}

	pub fn build(self) -> SmartAccountSigner {
		SmartAccountSigner {
			binding: self.binding,
			validator: ChainBindingValidator::new(self.supported_chains),
			signer: TypedDataSigner::new(self.signer),
			hooks: HookResolver::new(self.account_contract),
			account: self.account,
			default_validator: self.default_validator,
			paymaster: self.paymaster,
		}
	}
}
