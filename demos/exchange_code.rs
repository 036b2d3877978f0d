//! Demonstrates exchanging an authorization code, refreshing, and revoking against a mock
//! provider with the default reqwest transport.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use url::Url;
// self
use appleid_client::{
	auth::{ClientCredentials, ClientId},
	client::ReqwestAppleClient,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::{AppleEndpoints, TokenTypeHint},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"expires_in\":3600,\"id_token\":\"demo.id.token\",\"refresh_token\":\"demo-refresh\",\"token_type\":\"Bearer\"}",
			);
		})
		.await;
	let revoke_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/revoke");
			then.status(200);
		})
		.await;
	let endpoints = AppleEndpoints::builder()
		.token_endpoint(Url::parse(&server.url("/auth/token"))?)
		.revocation_endpoint(Url::parse(&server.url("/auth/revoke"))?)
		.keys_endpoint(Url::parse(&server.url("/auth/keys"))?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		ReqwestHttpClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	// A real client secret comes from `ClientSecretBuilder`; see the `client_secret` demo.
	let credentials = ClientCredentials::new(ClientId::new("com.example.web")?, "demo-secret");
	let client = ReqwestAppleClient::with_http_client(
		credentials,
		endpoints,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	);
	let tokens = client.exchange_authorization_code("demo-code").await?;

	println!("Access token expires at {}.", tokens.expires_at());

	let refresh_token =
		tokens.refresh_token.ok_or_else(|| eyre!("Code exchange returned no refresh token."))?;
	let refreshed = client.exchange_refresh_token(refresh_token.expose()).await?;

	println!("Refreshed access token: {}.", refreshed.access_token.expose());

	client.revoke_token(refresh_token.expose(), TokenTypeHint::RefreshToken).await?;

	println!("Refresh token revoked.");

	token_mock.assert_calls_async(2).await;
	revoke_mock.assert_async().await;

	Ok(())
}
