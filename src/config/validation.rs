//! Synchronous response-type gate applied before any login side effects.

// self
use crate::{_prelude::*, config::OpenIdConfiguration};

/// Pure predicate deciding whether a configuration requests a supported flow.
///
/// A `false` verdict is terminal for the current login attempt; the orchestrator
/// logs once and stops without touching the network or any shared state.
pub trait ResponseTypeValidation
where
	Self: Send + Sync,
{
	/// Checks whether the configuration's response type maps to a supported flow.
	fn has_config_valid_response_type(&self, config: &OpenIdConfiguration) -> bool;
}

/// Default validation accepting the authorization-code and implicit variants.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResponseTypeValidation;
impl ResponseTypeValidation for DefaultResponseTypeValidation {
	fn has_config_valid_response_type(&self, config: &OpenIdConfiguration) -> bool {
		config.is_code_flow() || config.is_implicit_flow()
	}
}
