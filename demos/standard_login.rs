//! Walks through a standard login against a pre-seeded discovery cache, handing the
//! authorize URL to a per-call handler instead of the default dispatcher.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use oidc_login_broker::{
	authorize::CustomParams,
	config::{ConfigId, OpenIdConfiguration},
	discovery::{AuthWellKnownEndpoints, WellKnownCache},
	flows::{LoginBroker, LoginOptions},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let cache = WellKnownCache::default();
	let config_id = ConfigId::new("demo-tenant")?;

	// Seed the discovery document up front; against a live provider the broker's
	// resolver fetches and caches it on the first login instead.
	cache.insert(
		config_id.clone(),
		AuthWellKnownEndpoints {
			issuer: Some("https://provider.example.com".into()),
			authorization_endpoint: Some(Url::parse("https://provider.example.com/authorize")?),
			..Default::default()
		},
	);

	let broker = LoginBroker::new(cache);
	let config = OpenIdConfiguration::new(config_id)
		.with_auth_wellknown_endpoint_url(Url::parse("https://provider.example.com")?)
		.with_client_id("demo-client")
		.with_redirect_url(Url::parse("https://app.example.com/oauth/callback")?);
	let options = LoginOptions::new()
		.with_custom_params(CustomParams::new().with("prompt", "login"))
		.with_url_handler(|url: &Url| println!("Send your user to {url}."));

	broker.login_standard(&config, options).await?;

	println!("Code flow is now marked as in progress for this tenant.");

	Ok(())
}
