//! Demonstrates the page-load collaborator: one protected call through the gateway, with the
//! session expiring first so the refresh + replay path runs, then every outcome shape handled.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde::Deserialize;
use url::Url;
// self
use auth_gateway::{
	config::GatewayConfig, error::Error, gateway::ReqwestGateway, response::CallOutcome,
};

#[derive(Debug, Deserialize)]
struct Protected {
	data: u32,
}

async fn load_data(gateway: &ReqwestGateway) {
	match gateway.get("/api/protected").await {
		Ok(CallOutcome::Success(response)) if response.is_success() =>
			match response.json::<Protected>() {
				Ok(protected) => println!("Loaded protected data: {}.", protected.data),
				Err(e) => println!("Protected data could not be decoded: {e}."),
			},
		Ok(CallOutcome::Success(response)) =>
			println!("Protected call answered with HTTP {}.", response.status),
		Ok(CallOutcome::Unauthorized(_)) =>
			println!("Still unauthorized after a refresh; nothing else to do."),
		Ok(CallOutcome::RedirectedToLogin) =>
			println!("Session could not be renewed; navigation to the login page started."),
		Err(Error::Refresh(e)) => println!("Queued behind a failed refresh: {e}."),
		Err(e) => println!("Protected call failed: {e}."),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/protected").header_missing("cookie");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/refresh");
			then.status(200).header("set-cookie", "session=demo; Path=/");
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/protected").header("cookie", "session=demo");
			then.status(200).header("content-type", "application/json").body("{\"data\":1}");
		})
		.await;
	let config = GatewayConfig::builder(Url::parse(&server.base_url())?).build()?;
	let gateway = ReqwestGateway::new(config)?
		.with_navigator(|location: &str| println!("Navigating to {location}."));

	println!("Page loaded, checking the session...");
	load_data(&gateway).await;

	expired.assert_async().await;
	refresh.assert_async().await;
	fresh.assert_async().await;

	Ok(())
}
