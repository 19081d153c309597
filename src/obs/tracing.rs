// self
use crate::{_prelude::*, error::RefreshError, obs::PhaseKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedPhase<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedPhase<F> = F;

/// A span builder used by gateway phases.
#[derive(Clone, Debug)]
pub struct PhaseSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl PhaseSpan {
	/// Creates a new span tagged with the provided phase + stage.
	pub fn new(kind: PhaseKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("auth_gateway.phase", phase = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedPhase<Fut>
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

/// Logs a transport failure surfaced to the immediate caller.
pub fn log_transport_failure(url: &Url, err: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%url, error = %err, "Gateway call failed before a response was received.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (url, err);
	}
}

/// Logs a refresh cycle that ended without a session.
pub fn log_refresh_failure(err: &RefreshError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %err, "Session refresh failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

/// Logs how many queued callers a refresh cycle released.
pub fn log_waiters_released(count: usize, err: Option<&RefreshError>) {
	#[cfg(feature = "tracing")]
	{
		match err {
			None => tracing::debug!(count, "Released queued callers for replay."),
			Some(err) => tracing::debug!(count, error = %err, "Rejected queued callers."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (count, err);
	}
}

/// Logs the navigation to the login location.
pub fn log_login_redirect(location: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(location, "Navigating to the login location.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = location;
	}
}
