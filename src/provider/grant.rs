//! Closed enumerations that shape token and revocation request bodies.

// self
use crate::_prelude::*;

/// Grant types accepted by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Exchange an authorization code delivered to the app.
	AuthorizationCode,
	/// Validate an existing refresh token.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Hint telling the revocation endpoint which kind of token is being revoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
	/// The token is an access token.
	AccessToken,
	/// The token is a refresh token.
	RefreshToken,
}
impl TokenTypeHint {
	/// Returns the RFC 7009 `token_type_hint` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenTypeHint::AccessToken => "access_token",
			TokenTypeHint::RefreshToken => "refresh_token",
		}
	}
}
impl Display for TokenTypeHint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
