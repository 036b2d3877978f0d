//! Token revocation.

// self
use crate::{
	_prelude::*,
	client::{AppleClient, exchange},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, CallKind, CallOutcome, CallSpan},
	provider::TokenTypeHint,
};

impl<C, M> AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Invalidates an access or refresh token.
	///
	/// Sends `token`, `token_type_hint`, `client_id`, and `client_secret`. Any `200 OK` is
	/// success regardless of body, including for tokens that were already invalid. A `400`
	/// with an error body yields [`crate::error::ProviderError::Rejected`]; transport failures
	/// surface as [`Error::Transport`].
	pub async fn revoke_token(&self, token: &str, hint: TokenTypeHint) -> Result<()> {
		const KIND: CallKind = CallKind::Revocation;

		let span = CallSpan::new(KIND, "revoke_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result =
			span.instrument(async move { self.facade()?.revoke_token(token, hint).await }).await;

		exchange::record_result(KIND, &result);

		result
	}
}
