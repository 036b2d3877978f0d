//! Client identifier and signed secret pair.

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientSecret, TokenSecret},
};

/// Client identifier plus the signed client secret sent with every token or revocation call.
///
/// Immutable once built; rebuild with a fresh [`ClientSecret`] when the old one expires.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	client_id: ClientId,
	client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Pairs a client identifier with an already signed client secret.
	pub fn new(client_id: ClientId, client_secret: impl Into<TokenSecret>) -> Self {
		Self { client_id, client_secret: client_secret.into() }
	}

	/// Client identifier (`client_id`).
	pub fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	/// Signed client secret (`client_secret`).
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}
}
impl From<(ClientId, ClientSecret)> for ClientCredentials {
	fn from((client_id, secret): (ClientId, ClientSecret)) -> Self {
		Self::new(client_id, secret.into_secret())
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_redacts_secret() {
		let credentials = ClientCredentials::new(
			ClientId::new("com.example.app").expect("Client fixture should be valid."),
			"eyJhbGciOiJFUzI1NiJ9.payload.signature",
		);
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("com.example.app"));
		assert!(!rendered.contains("payload"));
		assert_eq!(
			credentials.client_secret().expose(),
			"eyJhbGciOiJFUzI1NiJ9.payload.signature"
		);
	}
}
