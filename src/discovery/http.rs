//! Reqwest-backed discovery resolver with cache-first semantics.

// self
use crate::{
	_prelude::*,
	config::OpenIdConfiguration,
	discovery::{self, AuthWellKnownEndpoints, DiscoveryFuture, WellKnownCache, WellKnownResolver},
	error::DiscoveryError,
};

/// Fetches and caches provider discovery documents over HTTPS.
///
/// A cache hit short-circuits the network entirely, so repeated logins for the
/// same configuration cost one fetch. Concurrent first-time logins for one
/// configuration may each fetch; the cache tolerates the duplicate insert.
#[derive(Clone, Debug, Default)]
pub struct HttpWellKnownResolver {
	client: ReqwestClient,
	cache: WellKnownCache,
}
impl HttpWellKnownResolver {
	/// Creates a resolver over the shared cache with a default reqwest client.
	pub fn new(cache: WellKnownCache) -> Self {
		Self { client: ReqwestClient::default(), cache }
	}

	/// Creates a resolver that reuses a caller-provided reqwest client.
	pub fn with_client(client: ReqwestClient, cache: WellKnownCache) -> Self {
		Self { client, cache }
	}

	/// Shared cache handle backing this resolver.
	pub fn cache(&self) -> &WellKnownCache {
		&self.cache
	}

	async fn fetch_document(&self, config: &OpenIdConfiguration) -> Result<AuthWellKnownEndpoints> {
		let url = discovery::well_known_document_url(config)?;
		let response = self.client.get(url).send().await.map_err(DiscoveryError::from)?;
		let status = response.status();

		if !status.is_success() {
			return Err(DiscoveryError::Endpoint { status: status.as_u16() }.into());
		}

		let body = response.bytes().await.map_err(DiscoveryError::from)?;
		let mut deserializer = serde_json::Deserializer::from_slice(&body);
		let endpoints = serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			DiscoveryError::DocumentParse { source, status: Some(status.as_u16()) }
		})?;

		Ok(endpoints)
	}
}
impl WellKnownResolver for HttpWellKnownResolver {
	fn query_and_store<'a>(
		&'a self,
		config: &'a OpenIdConfiguration,
	) -> DiscoveryFuture<'a, AuthWellKnownEndpoints> {
		Box::pin(async move {
			if let Some(cached) = self.cache.get(&config.config_id) {
				return Ok(cached);
			}

			let endpoints = self.fetch_document(config).await?;

			self.cache.insert(config.config_id.clone(), endpoints.clone());

			Ok(endpoints)
		})
	}
}
