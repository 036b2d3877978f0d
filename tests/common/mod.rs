//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use appleid_client::{
	auth::{ClientCredentials, ClientId},
	client::ReqwestAppleClient,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::AppleEndpoints,
	url::Url,
};

pub const CLIENT_ID: &str = "com.example.web";
pub const CLIENT_SECRET: &str = "signed-client-secret";

pub const TOKEN_BODY: &str = r#"{"access_token":"access-123","expires_in":3600,"id_token":"eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiIwMDEifQ.sig","refresh_token":"refresh-456","token_type":"Bearer"}"#;

/// Reqwest transport that trusts the self-signed certificates served by `httpmock` and keeps
/// the crate's no-redirect policy.
pub fn insecure_http_client() -> ReqwestHttpClient {
	let client = ReqwestHttpClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Points every endpoint at `base`, keeping the provider's path layout.
pub fn endpoints(base: &str) -> AppleEndpoints {
	let join = |path: &str| {
		Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
			.expect("Failed to parse mock endpoint URL.")
	};

	AppleEndpoints::builder()
		.token_endpoint(join("/auth/token"))
		.revocation_endpoint(join("/auth/revoke"))
		.keys_endpoint(join("/auth/keys"))
		.build()
		.expect("Mock endpoints should pass validation.")
}

pub fn credentials() -> ClientCredentials {
	ClientCredentials::new(
		ClientId::new(CLIENT_ID).expect("Client identifier fixture should be valid."),
		CLIENT_SECRET,
	)
}

/// Client wired to `base` through the insecure reqwest transport.
pub fn client(base: &str) -> ReqwestAppleClient {
	ReqwestAppleClient::with_http_client(
		credentials(),
		endpoints(base),
		insecure_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	)
}
