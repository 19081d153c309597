//! Responses and per-call outcomes returned by the gateway.

// crates.io
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::DecodeError};

/// Fully buffered HTTP response produced by a [`GatewayHttpClient`](crate::http::GatewayHttpClient).
#[derive(Clone, Debug)]
pub struct GatewayResponse {
	/// Final URL the response was received from.
	pub url: Url,
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl GatewayResponse {
	/// Creates a response without headers.
	pub fn new(url: Url, status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { url, status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Returns `true` for any 2xx status.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Returns `true` when the status is `401 Unauthorized`.
	pub fn is_unauthorized(&self) -> bool {
		self.status == StatusCode::UNAUTHORIZED
	}

	/// Returns the body as lossily decoded UTF-8.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Decodes the body as JSON, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| DecodeError::Json {
			url: self.url.to_string(),
			status: self.status.as_u16(),
			source,
		})
	}
}

/// Result of a single [`Gateway::call`](crate::gateway::Gateway::call).
///
/// Transport failures and rejected refresh cycles are reported through
/// [`Error`](crate::error::Error) instead.
#[derive(Clone, Debug)]
pub enum CallOutcome {
	/// The call (or its replay after a refresh) returned a non-401 status.
	Success(GatewayResponse),
	/// The replay after a successful refresh was still unauthorized.
	Unauthorized(GatewayResponse),
	/// The refresh failed and navigation to the login location was triggered.
	RedirectedToLogin,
}
impl CallOutcome {
	/// Wraps a response, classifying `401` as [`CallOutcome::Unauthorized`].
	pub fn from_response(response: GatewayResponse) -> Self {
		if response.is_unauthorized() { Self::Unauthorized(response) } else { Self::Success(response) }
	}

	/// Returns the response carried by the outcome, if any.
	pub fn response(&self) -> Option<&GatewayResponse> {
		match self {
			Self::Success(response) | Self::Unauthorized(response) => Some(response),
			Self::RedirectedToLogin => None,
		}
	}

	/// Consumes the outcome and returns its response, if any.
	pub fn into_response(self) -> Option<GatewayResponse> {
		match self {
			Self::Success(response) | Self::Unauthorized(response) => Some(response),
			Self::RedirectedToLogin => None,
		}
	}

	/// Returns `true` when the gateway navigated to the login location.
	pub fn is_redirected(&self) -> bool {
		matches!(self, Self::RedirectedToLogin)
	}

	/// Returns a stable label suitable for span or log fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Success(_) => "success",
			Self::Unauthorized(_) => "unauthorized",
			Self::RedirectedToLogin => "redirected_to_login",
		}
	}
}
