// self
use crate::obs::LoginOutcome;

/// Records a login outcome via the global metrics recorder (when enabled).
pub fn record_login_outcome(outcome: LoginOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oidc_login_broker_login_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
