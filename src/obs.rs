//! Optional observability helpers for gateway calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth_gateway.phase` with the `phase` and
//!   `stage` (call site) fields, plus events for transport failures, failed refresh cycles, waiter
//!   release, and login redirects.
//! - Enable `metrics` to increment the `auth_gateway_phase_total` counter for every
//!   attempt/success/failure/queued/redirected outcome, labeled by `phase` + `outcome`, and
//!   `auth_gateway_waiters_released_total` labeled by the cycle `verdict` (`replay`/`rejected`).

mod tracing;

pub use tracing::*;

// self
use crate::_prelude::*;

/// Phases of a gateway call observed by the instrumentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
	/// First attempt of a protected call (or a waiter's fresh attempt).
	Call,
	/// Refresh exchange against the refresh endpoint.
	Refresh,
	/// One-shot replay after a successful refresh.
	Replay,
}
impl PhaseKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseKind::Call => "call",
			PhaseKind::Refresh => "refresh",
			PhaseKind::Replay => "replay",
		}
	}
}
impl Display for PhaseKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseOutcome {
	/// Entry to a phase.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Caller queued behind an in-flight refresh.
	Queued,
	/// Caller received the login redirect sentinel.
	Redirected,
}
impl PhaseOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseOutcome::Attempt => "attempt",
			PhaseOutcome::Success => "success",
			PhaseOutcome::Failure => "failure",
			PhaseOutcome::Queued => "queued",
			PhaseOutcome::Redirected => "redirected",
		}
	}
}
impl Display for PhaseOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a phase outcome via the global metrics recorder (when enabled).
pub fn record_phase_outcome(kind: PhaseKind, outcome: PhaseOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"auth_gateway_phase_total",
			"phase" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts the queued callers a settled refresh cycle handed back, split by verdict.
pub fn record_waiters_released(count: usize, rejected: bool) {
	#[cfg(feature = "metrics")]
	{
		let verdict = if rejected { "rejected" } else { "replay" };

		metrics::counter!("auth_gateway_waiters_released_total", "verdict" => verdict)
			.increment(count as u64);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (count, rejected);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(PhaseKind::Replay.to_string(), "replay");
		assert_eq!(PhaseOutcome::Redirected.to_string(), "redirected");
	}

	#[test]
	fn recorders_accept_every_shape() {
		record_phase_outcome(PhaseKind::Refresh, PhaseOutcome::Failure);
		record_waiters_released(0, false);
		record_waiters_released(3, true);
	}
}
