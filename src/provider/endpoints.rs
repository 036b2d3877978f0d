//! Endpoint configuration with Apple's production URLs as defaults.

// self
use crate::_prelude::*;

/// Issuer of identity tokens and audience of client secrets.
pub const APPLE_ISSUER: &str = "https://appleid.apple.com";
/// Token endpoint used for authorization-code and refresh-token grants.
pub const TOKEN_URL: &str = "https://appleid.apple.com/auth/token";
/// Revocation endpoint.
pub const REVOCATION_URL: &str = "https://appleid.apple.com/auth/revoke";
/// Public signing key set (JWKS) endpoint.
pub const KEYS_URL: &str = "https://appleid.apple.com/auth/keys";

/// Errors raised while constructing or validating endpoint sets.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointError {
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Endpoint set the client talks to.
///
/// Deserializing fills any missing field with Apple's production URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleEndpoints {
	/// Token endpoint used for exchanges and refreshes.
	#[serde(default = "default_token")]
	pub token: Url,
	/// Revocation endpoint.
	#[serde(default = "default_revocation")]
	pub revocation: Url,
	/// Public key set endpoint.
	#[serde(default = "default_keys")]
	pub keys: Url,
}
impl AppleEndpoints {
	/// Creates a builder seeded with the production endpoints.
	pub fn builder() -> AppleEndpointsBuilder {
		AppleEndpointsBuilder::default()
	}

	/// Validates that every endpoint uses HTTPS.
	pub fn validate(&self) -> Result<(), EndpointError> {
		validate_endpoint("token", &self.token)?;
		validate_endpoint("revocation", &self.revocation)?;
		validate_endpoint("keys", &self.keys)?;

		Ok(())
	}
}
impl Default for AppleEndpoints {
	fn default() -> Self {
		Self { token: default_token(), revocation: default_revocation(), keys: default_keys() }
	}
}

/// Builder for [`AppleEndpoints`] values.
#[derive(Debug, Default)]
pub struct AppleEndpointsBuilder {
	/// Token endpoint override.
	pub token_endpoint: Option<Url>,
	/// Revocation endpoint override.
	pub revocation_endpoint: Option<Url>,
	/// Key set endpoint override.
	pub keys_endpoint: Option<Url>,
}
impl AppleEndpointsBuilder {
	/// Overrides the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the revocation endpoint.
	pub fn revocation_endpoint(mut self, url: Url) -> Self {
		self.revocation_endpoint = Some(url);

		self
	}

	/// Overrides the key set endpoint.
	pub fn keys_endpoint(mut self, url: Url) -> Self {
		self.keys_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting endpoint set.
	pub fn build(self) -> Result<AppleEndpoints, EndpointError> {
		let endpoints = AppleEndpoints {
			token: self.token_endpoint.unwrap_or_else(default_token),
			revocation: self.revocation_endpoint.unwrap_or_else(default_revocation),
			keys: self.keys_endpoint.unwrap_or_else(default_keys),
		};

		endpoints.validate()?;

		Ok(endpoints)
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointError> {
	if url.scheme() != "https" {
		Err(EndpointError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn default_token() -> Url {
	parse_const(TOKEN_URL)
}

fn default_revocation() -> Url {
	parse_const(REVOCATION_URL)
}

fn default_keys() -> Url {
	parse_const(KEYS_URL)
}

fn parse_const(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in endpoint constants are valid URLs.")
}
