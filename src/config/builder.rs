// self
use crate::{
	_prelude::*,
	config::{DEFAULT_LOGIN_LOCATION, DEFAULT_REFRESH_ENDPOINT, GatewayConfig},
};

/// Errors raised while constructing or validating a [`GatewayConfig`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum GatewayConfigError {
	/// Base URL must use `http` or `https`.
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Refresh endpoint is empty.
	#[error("Missing refresh endpoint.")]
	MissingRefreshEndpoint,
	/// Refresh endpoint cannot be joined onto the base URL.
	#[error("The refresh endpoint `{endpoint}` cannot be resolved: {reason}.")]
	InvalidRefreshEndpoint {
		/// Endpoint that failed validation.
		endpoint: String,
		/// Rendered parsing failure.
		reason: String,
	},
	/// Login location is empty.
	#[error("Missing login location.")]
	MissingLoginLocation,
}

/// Builder for [`GatewayConfig`] values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfigBuilder {
	/// Base URL relative call targets are resolved against.
	pub base_url: Url,
	/// Refresh endpoint path (defaults to `/refresh`).
	#[serde(default = "default_refresh_endpoint")]
	pub refresh_endpoint: String,
	/// Login location (defaults to `/login`).
	#[serde(default = "default_login_location")]
	pub login_location: String,
}
impl GatewayConfigBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			refresh_endpoint: default_refresh_endpoint(),
			login_location: default_login_location(),
		}
	}

	/// Overrides the refresh endpoint.
	pub fn refresh_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.refresh_endpoint = endpoint.into();

		self
	}

	/// Overrides the login location.
	pub fn login_location(mut self, location: impl Into<String>) -> Self {
		self.login_location = location.into();

		self
	}

	/// Validates the builder and produces a [`GatewayConfig`].
	pub fn build(self) -> Result<GatewayConfig, GatewayConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(GatewayConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}

		let refresh_endpoint = self.refresh_endpoint.trim();

		if refresh_endpoint.is_empty() {
			return Err(GatewayConfigError::MissingRefreshEndpoint);
		}

		let refresh_url = self.base_url.join(refresh_endpoint).map_err(|err| {
			GatewayConfigError::InvalidRefreshEndpoint {
				endpoint: refresh_endpoint.to_owned(),
				reason: err.to_string(),
			}
		})?;
		let login_location = self.login_location.trim();

		if login_location.is_empty() {
			return Err(GatewayConfigError::MissingLoginLocation);
		}

		Ok(GatewayConfig {
			refresh_endpoint: refresh_endpoint.to_owned(),
			login_location: login_location.to_owned(),
			base_url: self.base_url,
			refresh_url,
		})
	}
}

fn default_refresh_endpoint() -> String {
	DEFAULT_REFRESH_ENDPOINT.into()
}

fn default_login_location() -> String {
	DEFAULT_LOGIN_LOCATION.into()
}
