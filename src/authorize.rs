//! Authorize-URL assembly: custom parameters, the builder seam, and the default
//! builder with state/nonce/PKCE generation.
//!
//! The builder deliberately signals failure through `Option<Url>` instead of an
//! error: a missing cached document, authorization endpoint, client identifier,
//! or redirect URL yields `None`, which the orchestrator logs and absorbs
//! without aborting the caller.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, config::OpenIdConfiguration, discovery::WellKnownCache};

const STATE_LEN: usize = 32;
const NONCE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Boxed future produced by [`AuthorizeUrlBuilder`] implementations.
pub type AuthorizeFuture<'a> = Pin<Box<dyn Future<Output = Option<Url>> + 'a + Send>>;

/// Produces the authorization URL for a validated, metadata-loaded configuration.
pub trait AuthorizeUrlBuilder
where
	Self: Send + Sync,
{
	/// Builds the authorize URL, or `None` when construction is impossible.
	fn authorize_url<'a>(
		&'a self,
		config: &'a OpenIdConfiguration,
		custom_params: &'a CustomParams,
	) -> AuthorizeFuture<'a>;
}

/// Primitive value accepted inside [`CustomParams`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// String parameter value.
	Text(String),
	/// Integer parameter value.
	Number(i64),
	/// Boolean parameter value.
	Flag(bool),
}
impl Display for ParamValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ParamValue::Text(value) => f.write_str(value),
			ParamValue::Number(value) => write!(f, "{value}"),
			ParamValue::Flag(value) => write!(f, "{value}"),
		}
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Text(value.into())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Number(value)
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Flag(value)
	}
}

/// Caller-supplied query parameters forwarded verbatim to URL construction.
///
/// Keys are kept in lexicographic order so generated URLs are deterministic for
/// a given parameter set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomParams(BTreeMap<String, ParamValue>);
impl CustomParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a parameter.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Inserts a parameter, consuming and returning the set.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Iterates parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Checks whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of parameters in the set.
	pub fn len(&self) -> usize {
		self.0.len()
	}
}
impl<K, V> FromIterator<(K, V)> for CustomParams
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// Default builder assembling the authorize URL from cached discovery metadata.
///
/// Each invocation generates a fresh `state` and `nonce`, plus an S256 PKCE
/// challenge when the configuration requests the code flow.
#[derive(Clone, Debug)]
pub struct StandardAuthorizeUrlBuilder {
	cache: WellKnownCache,
}
impl StandardAuthorizeUrlBuilder {
	/// Creates a builder over the shared discovery cache.
	pub fn new(cache: WellKnownCache) -> Self {
		Self { cache }
	}

	fn build(&self, config: &OpenIdConfiguration, custom_params: &CustomParams) -> Option<Url> {
		let endpoints = self.cache.get(&config.config_id)?;
		let mut url = endpoints.authorization_endpoint?;
		let redirect_url = config.redirect_url.as_ref()?;

		if config.client_id.is_empty() {
			return None;
		}

		let state = random_string(STATE_LEN);
		let nonce = random_string(NONCE_LEN);
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", &config.client_id);
		pairs.append_pair("redirect_uri", redirect_url.as_str());
		pairs.append_pair("response_type", &config.response_type);
		pairs.append_pair("scope", &config.scope);
		pairs.append_pair("nonce", &nonce);
		pairs.append_pair("state", &state);

		if config.is_code_flow() {
			let verifier = random_string(PKCE_VERIFIER_LEN);

			pairs.append_pair("code_challenge", &compute_pkce_challenge(&verifier));
			pairs.append_pair("code_challenge_method", "S256");
		}

		for (key, value) in custom_params.iter() {
			pairs.append_pair(key, &value.to_string());
		}

		drop(pairs);

		Some(url)
	}
}
impl AuthorizeUrlBuilder for StandardAuthorizeUrlBuilder {
	fn authorize_url<'a>(
		&'a self,
		config: &'a OpenIdConfiguration,
		custom_params: &'a CustomParams,
	) -> AuthorizeFuture<'a> {
		Box::pin(async move { self.build(config, custom_params) })
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}
