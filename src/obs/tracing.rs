// self
use crate::{_prelude::*, config::OpenIdConfiguration};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedLogin<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedLogin<F> = F;

/// A span builder wrapping one login attempt.
#[derive(Clone, Debug)]
pub struct LoginSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl LoginSpan {
	/// Creates a new span tagged with the configuration + stage.
	pub fn new(config: &OpenIdConfiguration, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oidc_login_broker.login",
				config = %config.config_id,
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (config, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedLogin<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
