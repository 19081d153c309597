//! Authenticated request gateway: protected calls, the refresh exchange, and replays.

mod call;
mod refresh;

// self
use crate::{
	_prelude::*,
	config::GatewayConfig,
	coordinator::{RefreshCoordinator, RefreshMetrics},
	http::GatewayHttpClient,
	navigate::{LoginNavigator, MemoryNavigator},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestHttpClient>;

/// Wraps a transport so that expired sessions are refreshed once and calls replayed.
///
/// The gateway owns the HTTP client, configuration, login navigator, and the
/// [`RefreshCoordinator`] shared by all of its clones, so every clone participates in the same
/// de-duplicated refresh cycle. Cloning is cheap.
pub struct Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// HTTP client used for every protected call, replay, and refresh exchange.
	pub http_client: Arc<C>,
	/// Endpoint configuration.
	pub config: GatewayConfig,
	/// Receiver of the login redirect after a failed refresh.
	pub navigator: Arc<dyn LoginNavigator>,
	coordinator: Arc<RefreshCoordinator>,
}
impl<C> Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	/// Creates a gateway around the caller-provided transport.
	///
	/// Login redirects are recorded by a fresh [`MemoryNavigator`] until
	/// [`Gateway::with_navigator`] installs another one.
	pub fn with_http_client(config: GatewayConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			navigator: Arc::new(MemoryNavigator::default()),
			coordinator: Default::default(),
		}
	}

	/// Sets or replaces the login navigator.
	pub fn with_navigator(mut self, navigator: impl 'static + LoginNavigator) -> Self {
		self.navigator = Arc::new(navigator);

		self
	}

	/// Returns the coordinator shared by every clone of this gateway.
	pub fn coordinator(&self) -> &RefreshCoordinator {
		&self.coordinator
	}

	/// Returns the refresh cycle counters.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		self.coordinator.metrics()
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient> {
	/// Creates a gateway backed by a reqwest transport with an in-memory cookie jar.
	pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			navigator: self.navigator.clone(),
			coordinator: self.coordinator.clone(),
		}
	}
}
impl<C> Debug for Gateway<C>
where
	C: ?Sized + GatewayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("config", &self.config)
			.field("refreshing", &self.coordinator.is_refreshing())
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, coordinator::RefreshClaim};

	#[test]
	fn clones_share_one_coordinator() {
		let (gateway, navigator) = build_reqwest_test_gateway("http://localhost:8000/");
		let clone = gateway.clone();
		let claim = gateway.coordinator().claim();

		assert!(matches!(claim, RefreshClaim::Leader(_)));
		assert!(clone.coordinator().is_refreshing());
		assert!(matches!(clone.coordinator().claim(), RefreshClaim::Waiter(_)));

		drop(claim);

		assert!(!clone.coordinator().is_refreshing());
		assert_eq!(navigator.count(), 0);
	}

	#[test]
	fn debug_reports_refresh_state() {
		let (gateway, _navigator) = build_reqwest_test_gateway("http://localhost:8000/");
		let rendered = format!("{gateway:?}");

		assert!(rendered.contains("refreshing: false"));
		assert!(rendered.contains("/refresh"));
	}
}
