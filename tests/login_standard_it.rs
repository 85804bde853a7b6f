#![cfg(feature = "reqwest")]

// std
use std::sync::{Arc, Mutex};
// crates.io
use httpmock::prelude::*;
// self
use oidc_login_broker::{
	authorize::StandardAuthorizeUrlBuilder,
	config::{ConfigId, DefaultResponseTypeValidation, OpenIdConfiguration},
	discovery::{AuthWellKnownEndpoints, HttpWellKnownResolver, WellKnownCache},
	error::{DiscoveryError, Error},
	flows::{LoginBroker, LoginOptions},
	obs::LoginLogger,
	redirect::RedirectDispatcher,
	state::MemoryFlowStateStore,
	url::Url,
};

const CLIENT_ID: &str = "client-it";
const DISCOVERY_BODY: &str = r#"{
	"issuer": "https://idp.example.com",
	"authorization_endpoint": "https://idp.example.com/authorize",
	"token_endpoint": "https://idp.example.com/token",
	"jwks_uri": "https://idp.example.com/jwks"
}"#;

#[derive(Default)]
struct RecordingRedirect {
	seen: Mutex<Vec<Url>>,
}
impl RedirectDispatcher for RecordingRedirect {
	fn redirect_to(&self, url: &Url) {
		self.seen.lock().expect("Redirect mutex should not be poisoned.").push(url.clone());
	}
}

#[derive(Default)]
struct RecordingLogger {
	errors: Mutex<Vec<(String, Option<String>)>>,
	debugs: Mutex<Vec<String>>,
}
impl LoginLogger for RecordingLogger {
	fn log_error(&self, _: &OpenIdConfiguration, message: &str, detail: Option<&str>) {
		self.errors
			.lock()
			.expect("Logger mutex should not be poisoned.")
			.push((message.to_owned(), detail.map(str::to_owned)));
	}

	fn log_debug(&self, _: &OpenIdConfiguration, message: &str) {
		self.debugs
			.lock()
			.expect("Logger mutex should not be poisoned.")
			.push(message.to_owned());
	}
}

struct TestStack {
	broker: LoginBroker,
	cache: WellKnownCache,
	flow_state: Arc<MemoryFlowStateStore>,
	redirect: Arc<RecordingRedirect>,
	logger: Arc<RecordingLogger>,
}

fn build_default_stack() -> TestStack {
	let cache = WellKnownCache::default();
	let flow_state = Arc::new(MemoryFlowStateStore::default());
	let redirect = Arc::new(RecordingRedirect::default());
	let logger = Arc::new(RecordingLogger::default());
	let broker = LoginBroker::with_collaborators(
		Arc::new(DefaultResponseTypeValidation),
		Arc::new(HttpWellKnownResolver::new(cache.clone())),
		Arc::new(StandardAuthorizeUrlBuilder::new(cache.clone())),
		flow_state.clone(),
		redirect.clone(),
		logger.clone(),
	);

	TestStack { broker, cache, flow_state, redirect, logger }
}

fn build_config(config_id: &str, server: &MockServer) -> OpenIdConfiguration {
	OpenIdConfiguration::new(
		ConfigId::new(config_id).expect("Configuration identifier should be valid."),
	)
	.with_auth_wellknown_endpoint_url(
		Url::parse(&server.base_url()).expect("Mock server base URL should parse."),
	)
	.with_client_id(CLIENT_ID)
	.with_redirect_url(
		Url::parse("https://app.example.com/callback").expect("Redirect URI should parse."),
	)
}

#[tokio::test]
async fn full_pipeline_fetches_discovery_and_redirects_once() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(200).header("content-type", "application/json").body(DISCOVERY_BODY);
		})
		.await;
	let stack = build_default_stack();
	let config = build_config("tenant-main", &server);

	stack
		.broker
		.login_standard(&config, LoginOptions::new())
		.await
		.expect("Login should complete.");

	mock.assert_async().await;

	let dispatched = stack.redirect.seen.lock().expect("Redirect mutex should not be poisoned.").clone();

	assert_eq!(dispatched.len(), 1);

	let url = &dispatched[0];

	assert_eq!(url.host_str(), Some("idp.example.com"));
	assert_eq!(url.path(), "/authorize");

	let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("client_id"), Some(&CLIENT_ID.into()));
	assert_eq!(pairs.get("response_type"), Some(&"code".into()));
	assert!(pairs.contains_key("state"));
	assert!(pairs.contains_key("nonce"));
	assert!(pairs.contains_key("code_challenge"));
	assert!(stack.flow_state.is_code_flow_in_progress(&config.config_id));
	assert!(!stack.flow_state.is_silent_renew_running(&config.config_id));
	assert!(
		stack.logger.errors.lock().expect("Logger mutex should not be poisoned.").is_empty(),
		"A successful login must not log errors."
	);
	assert_eq!(
		stack.logger.debugs.lock().expect("Logger mutex should not be poisoned.").as_slice(),
		&["BEGIN Authorize OIDC Flow, no auth data".to_owned()]
	);
}

#[tokio::test]
async fn discovery_failure_propagates_without_state_or_dispatch() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(500);
		})
		.await;
	let stack = build_default_stack();
	let config = build_config("tenant-err", &server);
	let err = stack
		.broker
		.login_standard(&config, LoginOptions::new())
		.await
		.expect_err("Discovery failures must propagate.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Discovery(DiscoveryError::Endpoint { status: 500 })));
	assert!(stack.redirect.seen.lock().expect("Redirect mutex should not be poisoned.").is_empty());
	assert_eq!(
		stack.flow_state.state_of(&config.config_id),
		None,
		"Flow state must stay untouched when the metadata fetch fails."
	);
}

#[tokio::test]
async fn second_login_reuses_the_cached_discovery_document() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(200).header("content-type", "application/json").body(DISCOVERY_BODY);
		})
		.await;
	let stack = build_default_stack();
	let config = build_config("tenant-cached", &server);

	stack
		.broker
		.login_standard(&config, LoginOptions::new())
		.await
		.expect("First login should complete.");
	stack
		.broker
		.login_standard(&config, LoginOptions::new())
		.await
		.expect("Second login should complete.");

	assert_eq!(mock.hits_async().await, 1, "The discovery document must be fetched once.");
	assert_eq!(stack.redirect.seen.lock().expect("Redirect mutex should not be poisoned.").len(), 2);
}

#[tokio::test]
async fn missing_client_id_aborts_with_the_url_soft_failure() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(200).header("content-type", "application/json").body(DISCOVERY_BODY);
		})
		.await;
	let stack = build_default_stack();
	let config = build_config("tenant-no-client", &server).with_client_id("");

	stack
		.broker
		.login_standard(&config, LoginOptions::new())
		.await
		.expect("The URL soft failure must not surface as an error.");

	let errors = stack.logger.errors.lock().expect("Logger mutex should not be poisoned.").clone();

	assert_eq!(errors.as_slice(), &[("Could not create URL".to_owned(), Some(String::new()))]);
	assert!(stack.redirect.seen.lock().expect("Redirect mutex should not be poisoned.").is_empty());
	assert_eq!(stack.flow_state.state_of(&config.config_id), None);
}

#[tokio::test]
async fn url_handler_receives_the_url_on_the_default_stack() {
	let stack = build_default_stack();
	let config_id = ConfigId::new("tenant-handler").expect("Identifier should be valid.");

	// Seed the shared cache so no network is involved.
	stack.cache.insert(
		config_id.clone(),
		AuthWellKnownEndpoints {
			authorization_endpoint: Some(
				Url::parse("https://idp.example.com/authorize")
					.expect("Authorization endpoint fixture should parse."),
			),
			..Default::default()
		},
	);

	let config = OpenIdConfiguration::new(config_id)
		.with_client_id(CLIENT_ID)
		.with_redirect_url(
			Url::parse("https://app.example.com/callback").expect("Redirect URI should parse."),
		);
	let handled = Arc::new(Mutex::new(Vec::new()));
	let handled_in_handler = handled.clone();
	let options = LoginOptions::new().with_url_handler(move |url: &Url| {
		handled_in_handler
			.lock()
			.expect("Handler mutex should not be poisoned.")
			.push(url.clone());
	});

	stack.broker.login_standard(&config, options).await.expect("Login should complete.");

	assert_eq!(handled.lock().expect("Handler mutex should not be poisoned.").len(), 1);
	assert!(
		stack.redirect.seen.lock().expect("Redirect mutex should not be poisoned.").is_empty(),
		"The default dispatcher must never run when a handler is supplied."
	);
}
