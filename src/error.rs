//! Gateway-level error types shared across the transport, refresh, and decoding layers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
///
/// A redirect to the login location is not an error; it is reported through
/// [`CallOutcome::RedirectedToLogin`](crate::response::CallOutcome::RedirectedToLogin).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); never retried.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The refresh cycle this call was queued behind did not succeed.
	#[error(transparent)]
	Refresh(#[from] RefreshError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and request construction failures raised before any network activity.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed (invalid header name or value).
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[from] serde_json::Error),
	/// Call target is empty.
	#[error("Call target must not be empty.")]
	EmptyTarget,
	/// Call target cannot be resolved against the base URL.
	#[error("Call target `{target}` cannot be resolved.")]
	InvalidTarget {
		/// Target as supplied by the caller.
		target: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<http::header::InvalidHeaderName> for ConfigError {
	fn from(e: http::header::InvalidHeaderName) -> Self {
		Self::HttpRequest(e.into())
	}
}
impl From<http::header::InvalidHeaderValue> for ConfigError {
	fn from(e: http::header::InvalidHeaderValue) -> Self {
		Self::HttpRequest(e.into())
	}
}

/// Transport-level failures raised before a response was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{url}`.")]
	Network {
		/// URL of the request that failed.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error raised while calling `url`.
	pub fn network(url: &Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.to_string(), source: Box::new(src) }
	}
}

/// Reasons a refresh cycle failed, as observed by every caller queued behind it.
///
/// The value is cloned into each waiter, so transport details are captured as text.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RefreshError {
	/// Refresh endpoint answered with a non-success status.
	#[error("Refresh endpoint rejected the session with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the refresh endpoint.
		status: u16,
	},
	/// Refresh endpoint could not be reached.
	#[error("Refresh endpoint could not be reached: {message}.")]
	Transport {
		/// Rendered transport failure.
		message: String,
	},
	/// The caller driving the refresh went away before reporting an outcome.
	#[error("Refresh cycle was abandoned before it completed.")]
	Abandoned,
}

/// Response body decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body is not the expected JSON document.
	#[error("Response body from `{url}` is not valid JSON for the requested type.")]
	Json {
		/// URL the response was received from.
		url: String,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
