//! High-level login orchestration powered by the broker facade.

pub mod standard;

pub use standard::*;

// self
use crate::{
	_prelude::*,
	authorize::AuthorizeUrlBuilder,
	config::ResponseTypeValidation,
	discovery::WellKnownResolver,
	obs::LoginLogger,
	redirect::RedirectDispatcher,
	state::FlowStateStore,
};
#[cfg(feature = "reqwest")]
use crate::{
	authorize::StandardAuthorizeUrlBuilder,
	config::DefaultResponseTypeValidation,
	discovery::{HttpWellKnownResolver, WellKnownCache},
	obs::TracingLogger,
	redirect::StdoutRedirect,
	state::MemoryFlowStateStore,
};

/// Coordinates standard OIDC logins for any number of tenant configurations.
///
/// The broker owns the six collaborator seams (validation, discovery, URL
/// construction, flow state, redirect dispatch, logging) so the login pipeline
/// can focus on step ordering and exactly-once side effects. Collaborators are
/// shared by reference; cloning the broker is cheap and every clone operates on
/// the same caches and flow state.
#[derive(Clone)]
pub struct LoginBroker {
	/// Synchronous response-type gate consulted before any side effect.
	pub validation: Arc<dyn ResponseTypeValidation>,
	/// Discovery resolver awaited before URL construction.
	pub well_known: Arc<dyn WellKnownResolver>,
	/// Authorize-URL builder invoked with the per-call custom parameters.
	pub authorize: Arc<dyn AuthorizeUrlBuilder>,
	/// Keyed flow-state store written only after a URL exists.
	pub flow_state: Arc<dyn FlowStateStore>,
	/// Default dispatch target when no per-call handler is supplied.
	pub redirect: Arc<dyn RedirectDispatcher>,
	/// Structured diagnostic sink; side channel only.
	pub logger: Arc<dyn LoginLogger>,
}
impl LoginBroker {
	/// Creates a broker from explicitly provided collaborators.
	pub fn with_collaborators(
		validation: Arc<dyn ResponseTypeValidation>,
		well_known: Arc<dyn WellKnownResolver>,
		authorize: Arc<dyn AuthorizeUrlBuilder>,
		flow_state: Arc<dyn FlowStateStore>,
		redirect: Arc<dyn RedirectDispatcher>,
		logger: Arc<dyn LoginLogger>,
	) -> Self {
		Self { validation, well_known, authorize, flow_state, redirect, logger }
	}

	/// Replaces the default redirect dispatcher.
	pub fn with_redirect(mut self, redirect: Arc<dyn RedirectDispatcher>) -> Self {
		self.redirect = redirect;

		self
	}

	/// Replaces the default logger.
	pub fn with_logger(mut self, logger: Arc<dyn LoginLogger>) -> Self {
		self.logger = logger;

		self
	}
}
#[cfg(feature = "reqwest")]
impl LoginBroker {
	/// Creates a broker with the crate's default collaborator stack.
	///
	/// The resolver and URL builder share the provided [`WellKnownCache`], so
	/// callers can pre-seed or invalidate discovery documents from outside.
	/// Use [`LoginBroker::with_redirect`] to install a real navigation target
	/// and [`LoginBroker::with_collaborators`] for full control.
	pub fn new(cache: WellKnownCache) -> Self {
		Self::with_collaborators(
			Arc::new(DefaultResponseTypeValidation),
			Arc::new(HttpWellKnownResolver::new(cache.clone())),
			Arc::new(StandardAuthorizeUrlBuilder::new(cache)),
			Arc::new(MemoryFlowStateStore::default()),
			Arc::new(StdoutRedirect),
			Arc::new(TracingLogger),
		)
	}
}
impl Debug for LoginBroker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("LoginBroker(..)")
	}
}
