//! Optional observability helpers for login flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oidc_login_broker.login` with the `config`
//!   and `stage` fields, and to route the default [`LoginLogger`] through `tracing` events.
//! - Enable `metrics` to increment the `oidc_login_broker_login_total` counter once per attempt
//!   and once per terminal outcome, labeled by `outcome`.

mod logger;
mod metrics;
mod tracing;

pub use logger::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Terminal states (plus entry) observed for each login attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoginOutcome {
	/// Entry into `login_standard`.
	Attempt,
	/// Response-type validation rejected the configuration.
	AbortedInvalidConfig,
	/// URL construction reported its soft failure.
	AbortedEmptyUrl,
	/// Caller-supplied handler received the URL.
	CompletedHandlerDispatch,
	/// Default dispatcher received the URL.
	CompletedDefaultRedirect,
	/// Discovery failure propagated to the caller.
	MetadataFailure,
}
impl LoginOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoginOutcome::Attempt => "attempt",
			LoginOutcome::AbortedInvalidConfig => "aborted_invalid_config",
			LoginOutcome::AbortedEmptyUrl => "aborted_empty_url",
			LoginOutcome::CompletedHandlerDispatch => "completed_handler_dispatch",
			LoginOutcome::CompletedDefaultRedirect => "completed_default_redirect",
			LoginOutcome::MetadataFailure => "metadata_failure",
		}
	}
}
impl Display for LoginOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
