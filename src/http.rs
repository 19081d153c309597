//! Transport primitives for gateway calls.
//!
//! The module exposes [`GatewayHttpClient`] alongside [`OutboundRequest`] so downstream crates
//! can plug in a custom HTTP stack without touching the refresh coordination. The gateway builds
//! an [`OutboundRequest`] for every protected call, replay, and refresh exchange and expects a
//! fully buffered [`GatewayResponse`] back. Any non-2xx status is a response, not an error;
//! implementations return `Err` only when no response was received at all.

// crates.io
use http::{HeaderMap, Method};
// self
use crate::{_prelude::*, request::Credentials, response::GatewayResponse};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`GatewayHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<GatewayResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing gateway requests.
///
/// The trait acts as the gateway's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so they can be shared across cloned gateways, and the futures they
/// return must be `Send` so callers can spawn gateway calls onto multi-threaded executors.
pub trait GatewayHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and buffers the full response.
	///
	/// Honor [`OutboundRequest::credentials`]: the gateway always passes
	/// [`Credentials::Include`] and relies on the transport to attach the session cookies.
	fn execute<'a>(
		&'a self,
		request: OutboundRequest<'a>,
	) -> TransportFuture<'a, Self::TransportError>;
}

/// Request handed to a [`GatewayHttpClient`].
///
/// Method, headers, and body are borrowed from the caller's
/// [`RequestOptions`](crate::request::RequestOptions) so a replay reuses them verbatim.
#[derive(Clone, Debug)]
pub struct OutboundRequest<'a> {
	/// Fully resolved target URL.
	pub url: Url,
	/// HTTP method.
	pub method: &'a Method,
	/// Request headers.
	pub headers: &'a HeaderMap,
	/// Optional request body.
	pub body: Option<&'a [u8]>,
	/// Credential mode the transport must apply.
	pub credentials: Credentials,
}

/// Reqwest-backed transport that keeps a credentialed client (shared cookie jar) next to an
/// anonymous one.
///
/// Requests with [`Credentials::Include`] or [`Credentials::SameOrigin`] go through the
/// credentialed client, so cookies set by the refresh endpoint are attached to the replay.
/// [`Credentials::Omit`] uses the anonymous client.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	credentialed: ReqwestClient,
	anonymous: ReqwestClient,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a transport with an in-memory cookie jar.
	pub fn new() -> Result<Self, ConfigError> {
		let credentialed = ReqwestClient::builder().cookie_store(true).build()?;
		let anonymous = ReqwestClient::builder().build()?;

		Ok(Self { credentialed, anonymous })
	}

	/// Wraps caller-configured clients (timeouts, TLS, custom cookie providers).
	///
	/// `credentialed` must carry a cookie store for session refreshes to take effect.
	pub fn with_clients(credentialed: ReqwestClient, anonymous: ReqwestClient) -> Self {
		Self { credentialed, anonymous }
	}

	fn client_for(&self, credentials: Credentials) -> &ReqwestClient {
		match credentials {
			Credentials::Omit => &self.anonymous,
			Credentials::SameOrigin | Credentials::Include => &self.credentialed,
		}
	}
}
#[cfg(feature = "reqwest")]
impl GatewayHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute<'a>(
		&'a self,
		request: OutboundRequest<'a>,
	) -> TransportFuture<'a, Self::TransportError> {
		let client = self.client_for(request.credentials);

		Box::pin(async move {
			let mut builder = client
				.request(request.method.clone(), request.url)
				.headers(request.headers.clone());

			if let Some(body) = request.body {
				builder = builder.body(body.to_vec());
			}

			let response = builder.send().await?;
			let url = response.url().to_owned();
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(GatewayResponse { url, status, headers, body })
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use http::Method;
	use httpmock::prelude::*;
	// self
	use super::*;

	fn outbound<'a>(
		url: Url,
		method: &'a Method,
		headers: &'a HeaderMap,
		credentials: Credentials,
	) -> OutboundRequest<'a> {
		OutboundRequest { url, method, headers, body: None, credentials }
	}

	#[tokio::test]
	async fn credentialed_requests_carry_session_cookies() {
		let server = MockServer::start_async().await;
		let refresh_mock = server
			.mock_async(|when, then| {
				when.method(POST).path("/refresh");
				then.status(204).header("set-cookie", "session=fresh; Path=/");
			})
			.await;
		let with_cookie = server
			.mock_async(|when, then| {
				when.method(GET).path("/me").header("cookie", "session=fresh");
				then.status(200).body("cookie");
			})
			.await;
		let client = ReqwestHttpClient::new().expect("Reqwest transport should build.");
		let headers = HeaderMap::new();
		let refresh = client
			.execute(outbound(
				Url::parse(&server.url("/refresh")).expect("Refresh URL should parse."),
				&Method::POST,
				&headers,
				Credentials::Include,
			))
			.await
			.expect("Refresh request should reach the mock server.");

		assert_eq!(refresh.status.as_u16(), 204);

		let me = client
			.execute(outbound(
				Url::parse(&server.url("/me")).expect("Protected URL should parse."),
				&Method::GET,
				&headers,
				Credentials::Include,
			))
			.await
			.expect("Credentialed request should reach the mock server.");

		assert_eq!(me.status.as_u16(), 200);
		assert_eq!(me.text(), "cookie");

		refresh_mock.assert_async().await;
		with_cookie.assert_async().await;
	}

	#[tokio::test]
	async fn non_success_statuses_are_responses() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path("/missing");
				then.status(404).body("nope");
			})
			.await;
		let client = ReqwestHttpClient::new().expect("Reqwest transport should build.");
		let headers = HeaderMap::new();
		let response = client
			.execute(outbound(
				Url::parse(&server.url("/missing")).expect("Missing URL should parse."),
				&Method::GET,
				&headers,
				Credentials::Omit,
			))
			.await
			.expect("404 should surface as a response.");

		assert_eq!(response.status.as_u16(), 404);
		assert_eq!(response.text(), "nope");

		mock.assert_async().await;
	}
}
