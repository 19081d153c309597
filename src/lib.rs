//! Session-aware HTTP gateway—performs protected calls, refreshes an expired session exactly
//! once no matter how many callers hit `401` at the same time, and replays their requests.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod http;
pub mod navigate;
pub mod obs;
pub mod request;
pub mod response;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::GatewayConfig, gateway::ReqwestGateway, http::ReqwestHttpClient,
		navigate::MemoryNavigator,
	};

	/// Builds a gateway for `base_url` backed by a cookie-jar reqwest transport, together with the
	/// navigator that records its login redirects.
	pub fn build_reqwest_test_gateway(base_url: &str) -> (ReqwestGateway, MemoryNavigator) {
		let config = GatewayConfig::builder(
			Url::parse(base_url).expect("Failed to parse test gateway base URL."),
		)
		.build()
		.expect("Failed to build test gateway config.");
		let http_client =
			ReqwestHttpClient::new().expect("Failed to build cookie-jar Reqwest client for tests.");
		let navigator = MemoryNavigator::default();
		let gateway =
			ReqwestGateway::with_http_client(config, http_client).with_navigator(navigator.clone());

		(gateway, navigator)
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
