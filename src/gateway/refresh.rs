//! Refresh exchange: one bodiless, credentialed `POST` to the refresh endpoint.
//!
//! Any 2xx status renews the session; the body is ignored. Every other status, and any transport
//! failure, ends the cycle. The exchange is never retried.

// crates.io
use http::{HeaderMap, Method};
// self
use crate::{
	_prelude::*,
	error::RefreshError,
	gateway::Gateway,
	http::{GatewayHttpClient, OutboundRequest},
	obs::{self, PhaseKind, PhaseOutcome, PhaseSpan},
	request::Credentials,
};

impl<C> Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Runs one refresh exchange. Callers must hold the coordinator's refresh guard.
	pub(super) async fn refresh_session(&self) -> Result<(), RefreshError> {
		const KIND: PhaseKind = PhaseKind::Refresh;

		let span = PhaseSpan::new(KIND, "refresh_session");

		span.instrument(async move {
			obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

			let method = Method::POST;
			let headers = HeaderMap::new();
			let request = OutboundRequest {
				url: self.config.refresh_url().clone(),
				method: &method,
				headers: &headers,
				body: None,
				credentials: Credentials::Include,
			};
			let result = match self.http_client.execute(request).await {
				Ok(response) if response.is_success() => Ok(()),
				Ok(response) => Err(RefreshError::Rejected { status: response.status.as_u16() }),
				Err(err) => Err(RefreshError::Transport { message: err.to_string() }),
			};

			match &result {
				Ok(()) => obs::record_phase_outcome(KIND, PhaseOutcome::Success),
				Err(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Failure),
			}

			result
		})
		.await
	}
}
