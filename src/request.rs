//! Request descriptors handed to [`Gateway::call`](crate::gateway::Gateway::call).

// crates.io
use http::{HeaderMap, HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
// self
use crate::{_prelude::*, error::ConfigError};

/// Whether session cookies accompany a request.
///
/// The gateway always sends protected calls and refresh calls with [`Credentials::Include`],
/// whatever the caller configured; the flag exists for transports shared with other callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
	/// Never attach cookies.
	Omit,
	/// Attach cookies only for same-origin targets.
	#[default]
	SameOrigin,
	/// Always attach cookies.
	Include,
}
impl Credentials {
	/// Returns a stable label suitable for span or log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Credentials::Omit => "omit",
			Credentials::SameOrigin => "same_origin",
			Credentials::Include => "include",
		}
	}
}
impl Display for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Option set for a single call: method, headers, body, and credential mode.
///
/// Values are immutable once handed to the gateway; the gateway only borrows them, so the same
/// options are reused verbatim for a replay after a successful refresh.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// HTTP method (defaults to `GET`).
	pub method: Method,
	/// Request headers.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
	/// Caller-requested credential mode; overridden by the gateway.
	pub credentials: Credentials,
}
impl RequestOptions {
	/// Creates `GET` options without headers or body.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates options for the provided method.
	pub fn with_method(method: Method) -> Self {
		Self { method, ..Self::default() }
	}

	/// Overrides the HTTP method.
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Appends a header, validating name and value.
	pub fn header(
		mut self,
		name: impl AsRef<str>,
		value: impl AsRef<str>,
	) -> Result<Self, ConfigError> {
		let name = HeaderName::try_from(name.as_ref())?;
		let value = HeaderValue::try_from(value.as_ref())?;

		self.headers.append(name, value);

		Ok(self)
	}

	/// Sets a raw body.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `value` as the JSON body and sets `content-type: application/json`.
	pub fn json<T>(mut self, value: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(value)?);
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		Ok(self)
	}

	/// Overrides the credential mode.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = credentials;

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_to_get_without_body() {
		let options = RequestOptions::new();

		assert_eq!(options.method, Method::GET);
		assert!(options.headers.is_empty());
		assert!(options.body.is_none());
		assert_eq!(options.credentials, Credentials::SameOrigin);
	}

	#[test]
	fn json_body_sets_content_type() {
		let options = RequestOptions::with_method(Method::POST)
			.json(&serde_json::json!({ "name": "Ada" }))
			.expect("JSON body should serialize.");

		assert_eq!(options.body.as_deref(), Some(br#"{"name":"Ada"}"#.as_slice()));
		assert_eq!(
			options.headers.get(CONTENT_TYPE).map(HeaderValue::as_bytes),
			Some(b"application/json".as_slice())
		);
	}

	#[test]
	fn header_rejects_invalid_names() {
		let err = RequestOptions::new()
			.header("bad header", "value")
			.expect_err("Header names with spaces should be rejected.");

		assert!(matches!(err, ConfigError::HttpRequest(_)));
	}
}
