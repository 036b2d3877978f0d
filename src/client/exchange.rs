//! Token endpoint exchanges.
//!
//! Both grants post a form-encoded body to the token endpoint and decode the same response
//! shape; [`GrantType`] decides which fields the body carries. The authorization-code grant is
//! the only one that yields a refresh token; the refresh grant always reports none, whatever
//! the body contains.

// self
use crate::{
	_prelude::*,
	auth::TokenResponse,
	client::AppleClient,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, CallKind, CallOutcome, CallSpan},
	provider::GrantType,
};

impl<C, M> AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code (from the sign-in redirect) for tokens.
	///
	/// Sends `client_id`, `client_secret`, `code`, and `grant_type=authorization_code`. The code
	/// is forwarded verbatim; an empty or stale code is rejected by the provider, not locally.
	pub async fn exchange_authorization_code(&self, code: &str) -> Result<TokenResponse> {
		self.exchange(GrantType::AuthorizationCode, code, "exchange_authorization_code").await
	}

	/// Exchanges a refresh token for a new access token and identity token.
	///
	/// The returned [`TokenResponse::refresh_token`] is always `None`; keep using the refresh
	/// token obtained from the original code exchange.
	pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
		self.exchange(GrantType::RefreshToken, refresh_token, "exchange_refresh_token").await
	}

	async fn exchange(
		&self,
		grant: GrantType,
		value: &str,
		stage: &'static str,
	) -> Result<TokenResponse> {
		let kind = CallKind::from(grant);
		let span = CallSpan::new(kind, stage);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result =
			span.instrument(async move { self.facade()?.exchange(grant, value).await }).await;

		record_result(kind, &result);

		result
	}
}

pub(crate) fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}
