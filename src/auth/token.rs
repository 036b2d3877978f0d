//! Tokens issued by a successful exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token type; the provider only issues bearer tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
	/// `Bearer` token (RFC 6750).
	#[default]
	Bearer,
}
impl TokenType {
	/// Returns the canonical label.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenType::Bearer => "bearer",
		}
	}
}
impl Display for TokenType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Decoded token endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// Access token used for provider APIs such as user migration.
	pub access_token: TokenSecret,
	/// Signed identity token (JWT) describing the user; opaque to this crate.
	pub id_token: TokenSecret,
	/// Refresh token; only populated by authorization-code exchanges.
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime of the access token.
	pub expires_in: Duration,
	/// Token type label.
	pub token_type: TokenType,
	/// Local instant the response was decoded.
	pub received_at: OffsetDateTime,
}
impl TokenResponse {
	/// Instant the access token expires, measured from [`TokenResponse::received_at`].
	pub fn expires_at(&self) -> OffsetDateTime {
		self.received_at + self.expires_in
	}

	/// Returns true once the access token has expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at()
	}
}
