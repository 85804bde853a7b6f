//! Broker-level error types shared across discovery, configuration, and flows.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
///
/// Invalid response types and empty authorize URLs are deliberately absent: both
/// are recovered inside `login_standard` via the logger side-channel. Only the
/// discovery step propagates failures to the caller.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Discovery-document fetch or decode failure.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration does not declare an auth well-known endpoint URL.
	#[error("Configuration `{config}` does not declare an auth well-known endpoint URL.")]
	MissingWellKnownUrl {
		/// Configuration identifier string.
		config: String,
	},
	/// Well-known endpoint URL cannot be extended with the discovery suffix.
	#[error("Auth well-known endpoint URL is invalid.")]
	InvalidWellKnownUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Failures surfaced while fetching or decoding a provider discovery document.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while fetching the discovery document.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Discovery endpoint answered with a non-success status.
	#[error("Discovery endpoint answered with HTTP status {status}.")]
	Endpoint {
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Discovery endpoint responded with malformed JSON that could not be parsed.
	#[error("Discovery endpoint returned a malformed document.")]
	DocumentParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl DiscoveryError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for DiscoveryError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
