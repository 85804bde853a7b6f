//! Standard (redirect-based) login orchestration.
//!
//! [`LoginBroker::login_standard`] drives the one-shot pipeline: response-type
//! validation, discovery resolution, authorize-URL construction, flow-state
//! commit, redirect dispatch. Each step either proceeds or terminates the
//! attempt; nothing retries and nothing runs twice. Concurrent calls for the
//! same configuration are intentionally neither serialized nor deduplicated:
//! the flow-state writes are idempotent, so overlap costs at most a redundant
//! fetch and dispatch.

// self
use crate::{
	_prelude::*,
	authorize::CustomParams,
	config::OpenIdConfiguration,
	flows::LoginBroker,
	obs::{self, LoginOutcome, LoginSpan},
};

/// Caller-supplied dispatch override receiving the built authorize URL.
pub type UrlHandler = Box<dyn FnOnce(&Url) + Send>;

/// Per-call login options; constructed fresh per invocation and consumed by it.
#[derive(Default)]
pub struct LoginOptions {
	/// Extra query parameters forwarded verbatim to URL construction.
	pub custom_params: Option<CustomParams>,
	/// When present, receives the URL instead of the default dispatcher.
	pub url_handler: Option<UrlHandler>,
}
impl LoginOptions {
	/// Creates empty options (default dispatch, no custom parameters).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets or replaces the custom query parameters.
	pub fn with_custom_params(mut self, custom_params: CustomParams) -> Self {
		self.custom_params = Some(custom_params);

		self
	}

	/// Sets or replaces the per-call URL handler.
	pub fn with_url_handler(mut self, handler: impl FnOnce(&Url) + Send + 'static) -> Self {
		self.url_handler = Some(Box::new(handler));

		self
	}
}
impl Debug for LoginOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginOptions")
			.field("custom_params", &self.custom_params)
			.field("url_handler_set", &self.url_handler.is_some())
			.finish()
	}
}

enum Dispatch {
	AbortedInvalidConfig,
	AbortedEmptyUrl,
	Handler,
	DefaultRedirect,
}
impl Dispatch {
	const fn outcome(&self) -> LoginOutcome {
		match self {
			Dispatch::AbortedInvalidConfig => LoginOutcome::AbortedInvalidConfig,
			Dispatch::AbortedEmptyUrl => LoginOutcome::AbortedEmptyUrl,
			Dispatch::Handler => LoginOutcome::CompletedHandlerDispatch,
			Dispatch::DefaultRedirect => LoginOutcome::CompletedDefaultRedirect,
		}
	}
}

impl LoginBroker {
	/// Initiates a standard browser-based login for one configuration.
	///
	/// An unsupported response type or a URL-construction failure is logged once
	/// and absorbed (`Ok(())`); only a discovery failure surfaces as `Err`, in
	/// which case no flow state was touched and nothing was dispatched. On
	/// success the URL goes to the per-call `url_handler` when supplied,
	/// otherwise to the broker's redirect dispatcher, never both.
	pub async fn login_standard(
		&self,
		config: &OpenIdConfiguration,
		options: LoginOptions,
	) -> Result<()> {
		let span = LoginSpan::new(config, "login_standard");

		obs::record_login_outcome(LoginOutcome::Attempt);

		let result = span.instrument(self.drive_standard(config, options)).await;

		match &result {
			Ok(dispatch) => obs::record_login_outcome(dispatch.outcome()),
			Err(_) => obs::record_login_outcome(LoginOutcome::MetadataFailure),
		}

		result.map(|_| ())
	}

	async fn drive_standard(
		&self,
		config: &OpenIdConfiguration,
		options: LoginOptions,
	) -> Result<Dispatch> {
		if !self.validation.has_config_valid_response_type(config) {
			self.logger.log_error(config, "Invalid response type!", None);

			return Ok(Dispatch::AbortedInvalidConfig);
		}

		self.logger.log_debug(config, "BEGIN Authorize OIDC Flow, no auth data");
		self.well_known.query_and_store(config).await?;

		let LoginOptions { custom_params, url_handler } = options;
		let custom_params = custom_params.unwrap_or_default();
		let Some(url) = self.authorize.authorize_url(config, &custom_params).await else {
			self.logger.log_error(config, "Could not create URL", Some(""));

			return Ok(Dispatch::AbortedEmptyUrl);
		};

		// Both flags must land before the user agent leaves the application.
		self.flow_state.set_code_flow_in_progress(&config.config_id);
		self.flow_state.reset_silent_renew_running(&config.config_id);

		if let Some(handler) = url_handler {
			handler(&url);

			return Ok(Dispatch::Handler);
		}

		self.redirect.redirect_to(&url);

		Ok(Dispatch::DefaultRedirect)
	}
}
