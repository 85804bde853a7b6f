//! Discovery-document contracts, per-configuration caching, and the resolver seam.
//!
//! [`WellKnownResolver`] is the asynchronous boundary `login_standard` awaits
//! before building an authorize URL. The built-in [`HttpWellKnownResolver`]
//! consults a shared [`WellKnownCache`] first and only then fetches the
//! provider's `/.well-known/openid-configuration` document over HTTP.

#[cfg(feature = "reqwest")] pub mod http;
#[cfg(feature = "reqwest")] pub use http::HttpWellKnownResolver;

// self
use crate::{
	_prelude::*,
	config::{ConfigId, OpenIdConfiguration},
	error::ConfigError,
};

const WELL_KNOWN_SUFFIX: &str = "/.well-known/openid-configuration";

/// Boxed future produced by [`WellKnownResolver`] implementations.
pub type DiscoveryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Ensures discovery metadata for a configuration is present before use.
///
/// Implementations must populate the cache entry for `config.config_id` on
/// success. Failures propagate to the caller untouched; the orchestrator never
/// masks them.
pub trait WellKnownResolver
where
	Self: Send + Sync,
{
	/// Resolves (fetching if absent) the discovery document for the configuration.
	fn query_and_store<'a>(
		&'a self,
		config: &'a OpenIdConfiguration,
	) -> DiscoveryFuture<'a, AuthWellKnownEndpoints>;
}

/// Decoded provider discovery document.
///
/// Every field is optional; providers routinely omit endpoints they do not
/// implement and unknown document keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthWellKnownEndpoints {
	/// Provider issuer identifier.
	pub issuer: Option<String>,
	/// Authorization endpoint used to start browser-based flows.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for code exchanges.
	pub token_endpoint: Option<Url>,
	/// UserInfo endpoint.
	pub userinfo_endpoint: Option<Url>,
	/// JSON Web Key Set location.
	pub jwks_uri: Option<Url>,
	/// RP-initiated logout endpoint.
	pub end_session_endpoint: Option<Url>,
	/// Session-management iframe location.
	pub check_session_iframe: Option<Url>,
	/// Token revocation endpoint.
	pub revocation_endpoint: Option<Url>,
	/// Token introspection endpoint.
	pub introspection_endpoint: Option<Url>,
	/// Pushed authorization request endpoint.
	#[serde(rename = "pushed_authorization_request_endpoint")]
	pub par_endpoint: Option<Url>,
}

/// Thread-safe discovery cache keyed by [`ConfigId`].
///
/// Once an entry is stored it is reused by every subsequent login for that
/// configuration until [`WellKnownCache::invalidate`] removes it; deciding when
/// to invalidate belongs to the surrounding application, not this crate.
#[derive(Clone, Debug, Default)]
pub struct WellKnownCache(Arc<RwLock<HashMap<ConfigId, AuthWellKnownEndpoints>>>);
impl WellKnownCache {
	/// Returns the cached document for the configuration, if present.
	pub fn get(&self, config_id: &ConfigId) -> Option<AuthWellKnownEndpoints> {
		self.0.read().get(config_id).cloned()
	}

	/// Stores or replaces the document for the configuration.
	pub fn insert(&self, config_id: ConfigId, endpoints: AuthWellKnownEndpoints) {
		self.0.write().insert(config_id, endpoints);
	}

	/// Removes the cached document, returning it when one existed.
	pub fn invalidate(&self, config_id: &ConfigId) -> Option<AuthWellKnownEndpoints> {
		self.0.write().remove(config_id)
	}

	/// Checks whether a document is cached for the configuration.
	pub fn contains(&self, config_id: &ConfigId) -> bool {
		self.0.read().contains_key(config_id)
	}
}

/// Computes the concrete document URL for a configuration.
///
/// The configured location may already point at the document; the suffix is only
/// appended when no `.well-known` segment is present, matching common provider
/// configuration habits.
pub fn well_known_document_url(config: &OpenIdConfiguration) -> Result<Url> {
	let configured = config.auth_wellknown_endpoint_url.as_ref().ok_or_else(|| {
		ConfigError::MissingWellKnownUrl { config: config.config_id.to_string() }
	})?;

	if configured.as_str().contains(".well-known") {
		return Ok(configured.clone());
	}

	let base = configured.as_str().trim_end_matches('/');

	Url::parse(&format!("{base}{WELL_KNOWN_SUFFIX}"))
		.map_err(|source| ConfigError::InvalidWellKnownUrl { source }.into())
}
