//! Gateway configuration: where protected calls, the refresh endpoint, and the login page live.

mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Default refresh endpoint path.
pub const DEFAULT_REFRESH_ENDPOINT: &str = "/refresh";
/// Default login location.
pub const DEFAULT_LOGIN_LOCATION: &str = "/login";

/// Validated gateway configuration.
///
/// Build one with [`GatewayConfig::builder`] or deserialize it; both paths run the same
/// validation, so a `GatewayConfig` value always carries a resolvable refresh endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GatewayConfigBuilder", into = "GatewayConfigBuilder")]
pub struct GatewayConfig {
	/// Base URL relative call targets are resolved against.
	pub base_url: Url,
	/// Refresh endpoint path (or absolute URL) as configured.
	pub refresh_endpoint: String,
	/// Location handed to the [`LoginNavigator`](crate::navigate::LoginNavigator) after a
	/// failed refresh.
	pub login_location: String,
	refresh_url: Url,
}
impl GatewayConfig {
	/// Creates a builder seeded with the provided base URL and default endpoints.
	pub fn builder(base_url: Url) -> GatewayConfigBuilder {
		GatewayConfigBuilder::new(base_url)
	}

	/// Returns the fully resolved refresh endpoint URL.
	pub fn refresh_url(&self) -> &Url {
		&self.refresh_url
	}

	/// Resolves a call target against the base URL.
	///
	/// Absolute targets are kept as-is; anything else is joined onto [`Self::base_url`].
	pub fn resolve(&self, target: &str) -> Result<Url, ConfigError> {
		let target = target.trim();

		if target.is_empty() {
			return Err(ConfigError::EmptyTarget);
		}

		self.base_url
			.join(target)
			.map_err(|source| ConfigError::InvalidTarget { target: target.to_owned(), source })
	}
}
impl From<GatewayConfig> for GatewayConfigBuilder {
	fn from(config: GatewayConfig) -> Self {
		Self {
			base_url: config.base_url,
			refresh_endpoint: config.refresh_endpoint,
			login_location: config.login_location,
		}
	}
}
impl TryFrom<GatewayConfigBuilder> for GatewayConfig {
	type Error = GatewayConfigError;

	fn try_from(builder: GatewayConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> GatewayConfig {
		GatewayConfig::builder(
			Url::parse("https://app.example.com/").expect("Base URL fixture should parse."),
		)
		.build()
		.expect("Default gateway config should build.")
	}

	#[test]
	fn resolve_joins_relative_targets() {
		let config = config();

		assert_eq!(
			config.resolve("/api/protected").expect("Relative target should resolve.").as_str(),
			"https://app.example.com/api/protected"
		);
		assert_eq!(
			config
				.resolve("https://other.example.com/data")
				.expect("Absolute target should resolve.")
				.as_str(),
			"https://other.example.com/data"
		);
	}

	#[test]
	fn resolve_rejects_empty_targets() {
		assert!(matches!(config().resolve("   "), Err(ConfigError::EmptyTarget)));
	}

	#[test]
	fn deserialized_config_is_validated() {
		let config: GatewayConfig =
			serde_json::from_str(r#"{"base_url":"http://localhost:8000/"}"#)
				.expect("Minimal config should deserialize.");

		assert_eq!(config.refresh_url().as_str(), "http://localhost:8000/refresh");
		assert_eq!(config.login_location, "/login");

		let err = serde_json::from_str::<GatewayConfig>(
			r#"{"base_url":"ftp://localhost/","login_location":"/login"}"#,
		)
		.expect_err("Non-HTTP base URLs should be rejected.");

		assert!(err.to_string().contains("http"));
	}
}
