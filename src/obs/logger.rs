// self
use crate::{_prelude::*, config::OpenIdConfiguration};

/// Structured diagnostic sink consumed by the login orchestrator.
///
/// Strictly a side channel: nothing in the pipeline branches on logger behavior,
/// and every logged error carries the originating configuration for
/// traceability across tenants.
pub trait LoginLogger
where
	Self: Send + Sync,
{
	/// Reports a recoverable login failure.
	fn log_error(&self, config: &OpenIdConfiguration, message: &str, detail: Option<&str>);

	/// Reports pipeline progress useful during integration debugging.
	fn log_debug(&self, config: &OpenIdConfiguration, message: &str);
}

/// Default logger emitting `tracing` events (silent when the feature is off).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;
impl LoginLogger for TracingLogger {
	fn log_error(&self, config: &OpenIdConfiguration, message: &str, detail: Option<&str>) {
		#[cfg(feature = "tracing")]
		{
			tracing::error!(config = %config.config_id, detail, "{message}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (config, message, detail);
		}
	}

	fn log_debug(&self, config: &OpenIdConfiguration, message: &str) {
		#[cfg(feature = "tracing")]
		{
			tracing::debug!(config = %config.config_id, "{message}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (config, message);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::ConfigId;

	#[test]
	fn tracing_logger_noop_without_tracing() {
		let config = OpenIdConfiguration::new(
			ConfigId::new("config-1").expect("Identifier fixture should be valid."),
		);

		TracingLogger.log_error(&config, "Could not create URL", Some(""));
		TracingLogger.log_debug(&config, "BEGIN Authorize OIDC Flow, no auth data");
	}
}
