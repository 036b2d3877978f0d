#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use appleid_client::{
	auth::TokenType,
	error::{DecodeError, Error, ProviderError},
	provider::ErrorCode,
};

#[tokio::test]
async fn authorization_code_exchange_returns_all_tokens() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(common::TOKEN_BODY);
		})
		.await;
	let response = common::client(&server.base_url())
		.exchange_authorization_code("c0de")
		.await
		.expect("Authorization code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(response.access_token.expose(), "access-123");
	assert_eq!(response.id_token.expose(), "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiIwMDEifQ.sig");
	assert_eq!(response.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-456"));
	assert_eq!(response.expires_in.whole_seconds(), 3600);
	assert_eq!(response.token_type, TokenType::Bearer);
}

#[tokio::test]
async fn refresh_exchange_never_reports_a_refresh_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(200).header("content-type", "application/json").body(common::TOKEN_BODY);
		})
		.await;
	let response = common::client(&server.base_url())
		.exchange_refresh_token("refresh-456")
		.await
		.expect("Refresh token exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(response.access_token.expose(), "access-123");
	assert_eq!(response.refresh_token, None);
}

#[tokio::test]
async fn bad_request_maps_to_provider_rejection() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\"}");
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_authorization_code("expired-code")
		.await
		.expect_err("Expired codes should be rejected.");

	mock.assert_async().await;

	assert_eq!(err.provider_code(), Some(ErrorCode::InvalidGrant));

	match err {
		Error::Provider(provider) => {
			assert!(!provider.is_local());
			assert!(matches!(provider, ProviderError::Rejected { description: None, .. }));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn rejection_keeps_error_description() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\",\"error_description\":\"client secret expired\"}");
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_refresh_token("refresh-456")
		.await
		.expect_err("Expired client secrets should be rejected.");

	mock.assert_async().await;

	assert!(matches!(
		err,
		Error::Provider(ProviderError::Rejected { code: ErrorCode::InvalidClient, description: Some(ref text) })
			if text == "client secret expired"
	));
}

#[tokio::test]
async fn unknown_error_code_is_a_decode_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"slow_down\"}");
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_authorization_code("c0de")
		.await
		.expect_err("Codes outside the enumeration should not decode.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode(DecodeError::Json { status: Some(400), .. })));
}

#[tokio::test]
async fn success_without_access_token_is_a_decode_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"expires_in\":3600,\"id_token\":\"id\",\"token_type\":\"Bearer\"}",
			);
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_authorization_code("c0de")
		.await
		.expect_err("Responses without an access token should not decode.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode(DecodeError::Json { status: Some(200), .. })));
}

#[tokio::test]
async fn success_without_expires_in_is_a_decode_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"a\",\"id_token\":\"id\",\"token_type\":\"Bearer\"}",
			);
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_refresh_token("refresh-456")
		.await
		.expect_err("Responses without expires_in should not decode.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode(DecodeError::MissingExpiresIn)));
}

#[tokio::test]
async fn server_error_status_is_not_a_provider_rejection() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(500).header("content-type", "text/plain").body("upstream exploded");
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_authorization_code("c0de")
		.await
		.expect_err("HTTP 500 should fail.");

	mock.assert_async().await;

	match err {
		Error::Decode(decode) => assert_eq!(decode.status(), Some(500)),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn error_body_on_unexpected_status_is_a_decode_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let err = common::client(&server.base_url())
		.exchange_authorization_code("c0de")
		.await
		.expect_err("HTTP 401 should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode(DecodeError::UnexpectedResponse { status: Some(401), .. })));
}
