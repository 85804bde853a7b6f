//! Per-tenant OpenID Connect configuration values and response-type validation.
//!
//! `id` exposes the validated [`ConfigId`] used to key discovery caching and flow
//! state. `validation` defines [`ResponseTypeValidation`], the synchronous gate
//! every standard login passes before any network traffic occurs.

pub mod id;
pub mod validation;

pub use id::*;
pub use validation::*;

// self
use crate::_prelude::*;

const DEFAULT_RESPONSE_TYPE: &str = "code";
const DEFAULT_SCOPE: &str = "openid profile email";

/// Immutable configuration describing one identity-provider tenant.
///
/// Treated as a value by every flow: `login_standard` borrows it and never
/// mutates it. Host applications typically deserialize one instance per tenant
/// at startup and keep them for the application session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenIdConfiguration {
	/// Unique identifier, stable for the tenant's lifetime.
	pub config_id: ConfigId,
	/// Requested OIDC flow variant (`code`, `id_token`, `id_token token`).
	pub response_type: String,
	/// Location of the provider's discovery document, with or without the
	/// `/.well-known/openid-configuration` suffix.
	pub auth_wellknown_endpoint_url: Option<Url>,
	/// OAuth 2.0 client identifier registered with the provider.
	pub client_id: String,
	/// Redirect URI the provider sends the user agent back to.
	pub redirect_url: Option<Url>,
	/// Space-delimited scope string requested during authorization.
	pub scope: String,
}
impl OpenIdConfiguration {
	/// Creates a configuration with the crate defaults (code flow, standard scopes).
	pub fn new(config_id: ConfigId) -> Self {
		Self {
			config_id,
			response_type: DEFAULT_RESPONSE_TYPE.into(),
			auth_wellknown_endpoint_url: None,
			client_id: String::new(),
			redirect_url: None,
			scope: DEFAULT_SCOPE.into(),
		}
	}

	/// Sets or replaces the requested response type.
	pub fn with_response_type(mut self, response_type: impl Into<String>) -> Self {
		self.response_type = response_type.into();

		self
	}

	/// Sets or replaces the discovery-document location.
	pub fn with_auth_wellknown_endpoint_url(mut self, url: Url) -> Self {
		self.auth_wellknown_endpoint_url = Some(url);

		self
	}

	/// Sets or replaces the OAuth 2.0 client identifier.
	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = client_id.into();

		self
	}

	/// Sets or replaces the redirect URI.
	pub fn with_redirect_url(mut self, url: Url) -> Self {
		self.redirect_url = Some(url);

		self
	}

	/// Sets or replaces the requested scope string.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Checks whether the configuration requests the authorization-code flow.
	pub fn is_code_flow(&self) -> bool {
		self.response_type == "code"
	}

	/// Checks whether the configuration requests an implicit flow variant.
	pub fn is_implicit_flow(&self) -> bool {
		matches!(self.response_type.as_str(), "id_token" | "id_token token")
	}
}
