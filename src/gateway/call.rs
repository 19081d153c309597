//! Protected call orchestration.
//!
//! [`Gateway::call`] sends the request with credentials forced on. A non-401 response is
//! returned untouched. A 401 claims the coordinator: the first claimant runs the refresh
//! exchange and replays its own request once, while later claimants wait for that cycle and
//! then start over with a fresh attempt. Transport failures go straight back to the caller
//! and never trigger a refresh.

// self
use crate::{
	_prelude::*,
	coordinator::{RefreshClaim, RefreshGuard},
	error::TransportError,
	gateway::Gateway,
	http::{GatewayHttpClient, OutboundRequest},
	obs::{self, PhaseKind, PhaseOutcome, PhaseSpan},
	request::{Credentials, RequestOptions},
	response::{CallOutcome, GatewayResponse},
};

impl<C> Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Performs `options.method` against `target`, refreshing the session once on `401`.
	///
	/// `target` is resolved against [`GatewayConfig::base_url`](crate::config::GatewayConfig).
	/// Returns [`CallOutcome::RedirectedToLogin`] after a failed refresh this call drove itself,
	/// and [`Error::Refresh`] when this call was queued behind someone else's failed refresh.
	pub async fn call(&self, target: &str, options: &RequestOptions) -> Result<CallOutcome> {
		let url = self.config.resolve(target)?;
		let span = PhaseSpan::new(PhaseKind::Call, "call");

		span.instrument(self.call_resolved(url, options)).await
	}

	/// Shorthand for a `GET` without headers or body.
	pub async fn get(&self, target: &str) -> Result<CallOutcome> {
		self.call(target, &RequestOptions::new()).await
	}

	async fn call_resolved(&self, url: Url, options: &RequestOptions) -> Result<CallOutcome> {
		const KIND: PhaseKind = PhaseKind::Call;

		loop {
			obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

			let response = self.send(KIND, &url, options).await?;

			if !response.is_unauthorized() {
				obs::record_phase_outcome(KIND, PhaseOutcome::Success);

				return Ok(CallOutcome::Success(response));
			}

			match self.coordinator.claim() {
				RefreshClaim::Leader(guard) => return self.lead_refresh(guard, &url, options).await,
				RefreshClaim::Waiter(waiter) => {
					obs::record_phase_outcome(KIND, PhaseOutcome::Queued);

					if let Err(err) = waiter.wait().await {
						obs::record_phase_outcome(KIND, PhaseOutcome::Failure);

						return Err(err.into());
					}
				},
			}
		}
	}

	async fn lead_refresh(
		&self,
		guard: RefreshGuard<'_>,
		url: &Url,
		options: &RequestOptions,
	) -> Result<CallOutcome> {
		match self.refresh_session().await {
			Ok(()) => {
				guard.settle(Ok(()));

				self.replay(url, options).await
			},
			Err(err) => {
				obs::log_refresh_failure(&err);
				guard.settle(Err(err));
				obs::log_login_redirect(&self.config.login_location);
				self.navigator.navigate(&self.config.login_location);
				obs::record_phase_outcome(PhaseKind::Call, PhaseOutcome::Redirected);

				Ok(CallOutcome::RedirectedToLogin)
			},
		}
	}

	async fn replay(&self, url: &Url, options: &RequestOptions) -> Result<CallOutcome> {
		const KIND: PhaseKind = PhaseKind::Replay;

		let span = PhaseSpan::new(KIND, "replay");

		span.instrument(async move {
			obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

			let outcome = CallOutcome::from_response(self.send(KIND, url, options).await?);

			match outcome {
				CallOutcome::Success(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Success),
				_ => obs::record_phase_outcome(KIND, PhaseOutcome::Failure),
			}

			Ok(outcome)
		})
		.await
	}

	async fn send(
		&self,
		kind: PhaseKind,
		url: &Url,
		options: &RequestOptions,
	) -> Result<GatewayResponse> {
		let request = OutboundRequest {
			url: url.clone(),
			method: &options.method,
			headers: &options.headers,
			body: options.body.as_deref(),
			credentials: Credentials::Include,
		};

		self.http_client.execute(request).await.map_err(|err| {
			obs::log_transport_failure(url, &err);
			obs::record_phase_outcome(kind, PhaseOutcome::Failure);

			TransportError::network(url, err).into()
		})
	}
}
