//! Multi-tenant OpenID Connect login initiation: per-tenant discovery caching,
//! authorize-URL assembly, and pluggable redirect dispatch in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authorize;
pub mod config;
pub mod discovery;
pub mod error;
pub mod flows;
pub mod obs;
pub mod redirect;
pub mod state;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Stub collaborators and assembly helpers for login-pipeline tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use crate::{
		authorize::{AuthorizeFuture, AuthorizeUrlBuilder, CustomParams},
		config::{ConfigId, OpenIdConfiguration, ResponseTypeValidation},
		discovery::{AuthWellKnownEndpoints, DiscoveryFuture, WellKnownResolver},
		error::DiscoveryError,
		flows::LoginBroker,
		obs::LoginLogger,
		redirect::RedirectDispatcher,
		state::FlowStateStore,
	};

	/// Validation stub with a fixed verdict.
	pub struct StubValidation(pub bool);
	impl ResponseTypeValidation for StubValidation {
		fn has_config_valid_response_type(&self, _: &OpenIdConfiguration) -> bool {
			self.0
		}
	}

	/// Resolver stub that yields empty metadata or fails with a fixed HTTP status.
	#[derive(Default)]
	pub struct StubResolver {
		fail_status: Option<u16>,
		calls: AtomicUsize,
	}
	impl StubResolver {
		/// Resolver that always succeeds with empty metadata.
		pub fn resolving() -> Self {
			Self::default()
		}

		/// Resolver that always fails with the provided status.
		pub fn failing(status: u16) -> Self {
			Self { fail_status: Some(status), calls: AtomicUsize::new(0) }
		}

		/// Number of resolve calls observed so far.
		pub fn call_count(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl WellKnownResolver for StubResolver {
		fn query_and_store<'a>(
			&'a self,
			_: &'a OpenIdConfiguration,
		) -> DiscoveryFuture<'a, AuthWellKnownEndpoints> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let fail_status = self.fail_status;

			Box::pin(async move {
				match fail_status {
					Some(status) => Err(DiscoveryError::Endpoint { status }.into()),
					None => Ok(AuthWellKnownEndpoints::default()),
				}
			})
		}
	}

	/// URL-builder stub yielding a fixed result and recording received parameters.
	pub struct StubUrlBuilder {
		url: Option<Url>,
		/// Custom parameter sets received, in call order.
		pub seen: Mutex<Vec<CustomParams>>,
	}
	impl StubUrlBuilder {
		/// Builder that always yields the provided URL (or the soft failure).
		pub fn returning(url: Option<Url>) -> Self {
			Self { url, seen: Mutex::new(Vec::new()) }
		}
	}
	impl AuthorizeUrlBuilder for StubUrlBuilder {
		fn authorize_url<'a>(
			&'a self,
			_: &'a OpenIdConfiguration,
			custom_params: &'a CustomParams,
		) -> AuthorizeFuture<'a> {
			self.seen.lock().push(custom_params.clone());

			let url = self.url.clone();

			Box::pin(async move { url })
		}
	}

	/// Flow-state fake counting the orchestrator's writes.
	#[derive(Default)]
	pub struct CountingFlowStateStore {
		set_code_flow_calls: AtomicUsize,
		reset_silent_renew_calls: AtomicUsize,
	}
	impl CountingFlowStateStore {
		/// Number of `set_code_flow_in_progress` calls observed.
		pub fn set_code_flow_calls(&self) -> usize {
			self.set_code_flow_calls.load(Ordering::SeqCst)
		}

		/// Number of `reset_silent_renew_running` calls observed.
		pub fn reset_silent_renew_calls(&self) -> usize {
			self.reset_silent_renew_calls.load(Ordering::SeqCst)
		}
	}
	impl FlowStateStore for CountingFlowStateStore {
		fn set_code_flow_in_progress(&self, _: &ConfigId) {
			self.set_code_flow_calls.fetch_add(1, Ordering::SeqCst);
		}

		fn reset_silent_renew_running(&self, _: &ConfigId) {
			self.reset_silent_renew_calls.fetch_add(1, Ordering::SeqCst);
		}
	}

	/// Redirect fake recording every dispatched URL.
	#[derive(Default)]
	pub struct RecordingRedirect {
		/// URLs dispatched, in call order.
		pub seen: Mutex<Vec<Url>>,
	}
	impl RedirectDispatcher for RecordingRedirect {
		fn redirect_to(&self, url: &Url) {
			self.seen.lock().push(url.clone());
		}
	}

	/// Logger fake recording every error and debug line.
	#[derive(Default)]
	pub struct RecordingLogger {
		/// `(config id, message, detail)` triples recorded by `log_error`.
		pub errors: Mutex<Vec<(String, String, Option<String>)>>,
		/// Messages recorded by `log_debug`.
		pub debugs: Mutex<Vec<String>>,
	}
	impl LoginLogger for RecordingLogger {
		fn log_error(&self, config: &OpenIdConfiguration, message: &str, detail: Option<&str>) {
			self.errors.lock().push((
				config.config_id.to_string(),
				message.to_owned(),
				detail.map(str::to_owned),
			));
		}

		fn log_debug(&self, _: &OpenIdConfiguration, message: &str) {
			self.debugs.lock().push(message.to_owned());
		}
	}

	/// Broker under test plus handles to every fake it was wired from.
	pub struct FakeBrokerParts {
		/// Broker wired entirely from stubs.
		pub broker: LoginBroker,
		/// Resolver stub handle.
		pub resolver: Arc<StubResolver>,
		/// URL-builder stub handle.
		pub url_builder: Arc<StubUrlBuilder>,
		/// Flow-state fake handle.
		pub flow_state: Arc<CountingFlowStateStore>,
		/// Redirect fake handle.
		pub redirect: Arc<RecordingRedirect>,
		/// Logger fake handle.
		pub logger: Arc<RecordingLogger>,
	}

	/// Assembles a broker whose collaborators are all stubs, returning the handles.
	pub fn build_fake_broker(
		valid: bool,
		resolver: StubResolver,
		url: Option<Url>,
	) -> FakeBrokerParts {
		let resolver = Arc::new(resolver);
		let url_builder = Arc::new(StubUrlBuilder::returning(url));
		let flow_state = Arc::new(CountingFlowStateStore::default());
		let redirect = Arc::new(RecordingRedirect::default());
		let logger = Arc::new(RecordingLogger::default());
		let broker = LoginBroker::with_collaborators(
			Arc::new(StubValidation(valid)),
			resolver.clone(),
			url_builder.clone(),
			flow_state.clone(),
			redirect.clone(),
			logger.clone(),
		);

		FakeBrokerParts { broker, resolver, url_builder, flow_state, redirect, logger }
	}

	/// Configuration fixture used across login-pipeline tests.
	pub fn test_config() -> OpenIdConfiguration {
		OpenIdConfiguration::new(
			ConfigId::new("config-1").expect("Test identifier should be valid."),
		)
		.with_response_type("stubValue")
		.with_auth_wellknown_endpoint_url(
			Url::parse("https://idp.example.com/authWellknownEndpoint")
				.expect("Test well-known URL should parse."),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
