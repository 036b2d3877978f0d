//! ES256-signed client secrets.
//!
//! The provider does not issue static client secrets. Instead the caller signs a short claims
//! set with the private key registered for its team and sends the compact token as
//! `client_secret`:
//!
//! - `iss`: the 10-character team identifier.
//! - `iat`: the signing instant, in whole seconds since the epoch.
//! - `exp`: `iat` plus the configured lifetime, at most 15,777,000 seconds later.
//! - `aud`: always `https://appleid.apple.com`.
//! - `sub`: the App ID or Services ID that is also used as `client_id`.
//!
//! The builder performs no I/O besides the optional [`PrivateKey::from_pem_file`] helper.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, KeyId, TeamId, TokenSecret},
	error::{ConfigError, SigningError},
	provider::APPLE_ISSUER,
};

/// Longest lifetime the provider accepts for a client secret.
pub const MAX_CLIENT_SECRET_LIFETIME: Duration = Duration::seconds(15_777_000);
/// Lifetime used when the builder is not told otherwise.
pub const DEFAULT_CLIENT_SECRET_LIFETIME: Duration = Duration::days(90);

/// PKCS#8 P-256 private key used to sign client secrets.
#[derive(Clone)]
pub struct PrivateKey(EncodingKey);
impl PrivateKey {
	/// Parses a PEM-encoded EC private key.
	///
	/// The curve is checked when signing; a non P-256 key fails with [`SigningError::Sign`].
	pub fn from_pem(pem: &[u8]) -> Result<Self, SigningError> {
		EncodingKey::from_ec_pem(pem)
			.map(Self)
			.map_err(|source| SigningError::InvalidPrivateKey { source })
	}

	/// Reads and parses a PEM-encoded EC private key file (the `.p8` download).
	pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, SigningError> {
		let path = path.as_ref();
		let pem = std::fs::read(path)
			.map_err(|source| SigningError::PrivateKeyRead { path: path.to_owned(), source })?;

		Self::from_pem(&pem)
	}
}
impl Debug for PrivateKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PrivateKey(<redacted>)")
	}
}

/// Claims signed into a client secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecretClaims {
	/// Team identifier.
	pub iss: String,
	/// Issued-at, seconds since the epoch.
	pub iat: i64,
	/// Expiration, seconds since the epoch.
	pub exp: i64,
	/// Audience; always [`APPLE_ISSUER`].
	pub aud: String,
	/// App ID or Services ID.
	pub sub: String,
}
impl ClientSecretClaims {
	/// Instant the secret was signed.
	pub fn issued_at(&self) -> OffsetDateTime {
		OffsetDateTime::UNIX_EPOCH + Duration::seconds(self.iat)
	}

	/// Instant the secret stops being accepted.
	pub fn expires_at(&self) -> OffsetDateTime {
		OffsetDateTime::UNIX_EPOCH + Duration::seconds(self.exp)
	}
}

/// Signed client secret plus the claims it carries.
#[derive(Clone, Debug)]
pub struct ClientSecret {
	secret: TokenSecret,
	claims: ClientSecretClaims,
}
impl ClientSecret {
	/// Compact signed token to send as `client_secret`.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}

	/// Claims that were signed.
	pub fn claims(&self) -> &ClientSecretClaims {
		&self.claims
	}

	/// Returns true once the secret has expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.claims.expires_at()
	}

	/// Consumes the wrapper, returning the signed token.
	pub fn into_secret(self) -> TokenSecret {
		self.secret
	}
}

/// Builds and signs client secrets for one team/client pair.
#[derive(Clone, Debug)]
pub struct ClientSecretBuilder {
	team_id: TeamId,
	client_id: ClientId,
	key_id: Option<KeyId>,
	lifetime: Duration,
}
impl ClientSecretBuilder {
	/// Creates a builder with the default 90-day lifetime and no `kid` header.
	pub fn new(team_id: TeamId, client_id: ClientId) -> Self {
		Self { team_id, client_id, key_id: None, lifetime: DEFAULT_CLIENT_SECRET_LIFETIME }
	}

	/// Sets the `kid` header identifying the registered signing key.
	pub fn key_id(mut self, key_id: KeyId) -> Self {
		self.key_id = Some(key_id);

		self
	}

	/// Overrides the lifetime; must be positive and no longer than
	/// [`MAX_CLIENT_SECRET_LIFETIME`]. Sub-second parts are dropped.
	pub fn lifetime(mut self, lifetime: Duration) -> Result<Self, ConfigError> {
		let seconds = lifetime.whole_seconds();

		if seconds <= 0 || lifetime > MAX_CLIENT_SECRET_LIFETIME {
			return Err(ConfigError::ClientSecretLifetime {
				seconds,
				max: MAX_CLIENT_SECRET_LIFETIME.whole_seconds(),
			});
		}

		self.lifetime = Duration::seconds(seconds);

		Ok(self)
	}

	/// Client identifier the secret is issued for.
	pub fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	/// Claims for a secret signed at `now`; `iat` and `exp` share that single sample.
	pub fn claims_at(&self, now: OffsetDateTime) -> ClientSecretClaims {
		let iat = now.unix_timestamp();

		ClientSecretClaims {
			iss: self.team_id.to_string(),
			iat,
			exp: iat + self.lifetime.whole_seconds(),
			aud: APPLE_ISSUER.into(),
			sub: self.client_id.to_string(),
		}
	}

	/// Signs a secret valid from the current time.
	pub fn sign(&self, key: &PrivateKey) -> Result<ClientSecret, SigningError> {
		self.sign_at(key, OffsetDateTime::now_utc())
	}

	/// Signs a secret valid from `now`.
	pub fn sign_at(
		&self,
		key: &PrivateKey,
		now: OffsetDateTime,
	) -> Result<ClientSecret, SigningError> {
		let claims = self.claims_at(now);
		let mut header = Header::new(Algorithm::ES256);

		header.kid = self.key_id.as_ref().map(ToString::to_string);

		let token = jsonwebtoken::encode(&header, &claims, &key.0)
			.map_err(|source| SigningError::Sign { source })?;

		Ok(ClientSecret { secret: TokenSecret::new(token), claims })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> ClientSecretBuilder {
		ClientSecretBuilder::new(
			TeamId::new("ABCDE12345").expect("Team fixture should be valid."),
			ClientId::new("com.example.service").expect("Client fixture should be valid."),
		)
	}

	#[test]
	fn claims_share_one_instant() {
		let now = OffsetDateTime::UNIX_EPOCH + Duration::seconds(1_700_000_000);
		let claims = builder().claims_at(now + Duration::milliseconds(999));

		assert_eq!(claims.iat, 1_700_000_000);
		assert_eq!(claims.exp - claims.iat, DEFAULT_CLIENT_SECRET_LIFETIME.whole_seconds());
		assert_eq!(claims.iss, "ABCDE12345");
		assert_eq!(claims.sub, "com.example.service");
		assert_eq!(claims.aud, "https://appleid.apple.com");
		assert_eq!(claims.issued_at(), now);
	}

	#[test]
	fn lifetime_is_bounded() {
		assert!(builder().lifetime(MAX_CLIENT_SECRET_LIFETIME).is_ok());
		assert!(matches!(
			builder().lifetime(MAX_CLIENT_SECRET_LIFETIME + Duration::SECOND),
			Err(ConfigError::ClientSecretLifetime { seconds: 15_777_001, max: 15_777_000 })
		));
		assert!(builder().lifetime(Duration::ZERO).is_err());
		assert!(builder().lifetime(Duration::milliseconds(500)).is_err());
		assert!(builder().lifetime(-Duration::DAY).is_err());
	}

	#[test]
	fn lifetime_drops_sub_second_parts() {
		let claims = builder()
			.lifetime(Duration::seconds(60) + Duration::milliseconds(700))
			.expect("Lifetime within range should be accepted.")
			.claims_at(OffsetDateTime::UNIX_EPOCH);

		assert_eq!(claims.exp, 60);
	}

	#[test]
	fn malformed_pem_is_a_signing_error() {
		let err = PrivateKey::from_pem(b"not a key").expect_err("Garbage PEM should be rejected.");

		assert!(matches!(err, SigningError::InvalidPrivateKey { .. }));
	}

	#[test]
	fn missing_key_file_is_a_signing_error() {
		let err = PrivateKey::from_pem_file("/nonexistent/AuthKey_ABC.p8")
			.expect_err("Missing key file should be rejected.");

		assert!(matches!(err, SigningError::PrivateKeyRead { .. }));
	}
}
