//! Public signing keys published by the provider.
//!
//! Key sets are fetched fresh on every call and never cached or merged; callers own any
//! refresh policy and match `kid` themselves.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::DecodingKey;
// self
use crate::_prelude::*;

/// Errors raised while interpreting a single key record.
#[derive(Debug, ThisError)]
pub enum KeyMaterialError {
	/// A base64url component could not be decoded.
	#[error("Key `{kid}` has an invalid base64url {component} component.")]
	InvalidComponent {
		/// Key identifier of the record.
		kid: String,
		/// Which component failed (`n` or `e`).
		component: &'static str,
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// Components could not be turned into a verification key.
	#[error("Key `{kid}` cannot be used as an RSA verification key.")]
	InvalidKey {
		/// Key identifier of the record.
		kid: String,
		/// Underlying key construction failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

/// Ordered list of key records, as returned by the key set endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
	/// Key records in provider order.
	pub keys: Vec<Jwk>,
}
impl KeySet {
	/// Returns true when the provider published no keys.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Iterates over the records in provider order.
	pub fn iter(&self) -> std::slice::Iter<'_, Jwk> {
		self.keys.iter()
	}
}
impl<'a> IntoIterator for &'a KeySet {
	type IntoIter = std::slice::Iter<'a, Jwk>;
	type Item = &'a Jwk;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Single JSON Web Key record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
	/// Signing algorithm, e.g. `RS256`.
	pub alg: String,
	/// RSA public exponent, base64url without padding.
	pub e: String,
	/// Key identifier matched against the `kid` header of identity tokens.
	pub kid: String,
	/// Key type, e.g. `RSA`.
	pub kty: String,
	/// RSA modulus, base64url without padding.
	pub n: String,
	/// Intended usage, e.g. `sig`.
	#[serde(rename = "use")]
	pub usage: String,
}
impl Jwk {
	/// Decoded modulus bytes (big-endian).
	pub fn modulus(&self) -> Result<Vec<u8>, KeyMaterialError> {
		self.decode_component("n", &self.n)
	}

	/// Decoded exponent bytes (big-endian).
	pub fn exponent(&self) -> Result<Vec<u8>, KeyMaterialError> {
		self.decode_component("e", &self.e)
	}

	/// Builds a verification key for identity tokens signed with this record.
	pub fn decoding_key(&self) -> Result<DecodingKey, KeyMaterialError> {
		DecodingKey::from_rsa_components(&self.n, &self.e)
			.map_err(|source| KeyMaterialError::InvalidKey { kid: self.kid.clone(), source })
	}

	fn decode_component(
		&self,
		component: &'static str,
		value: &str,
	) -> Result<Vec<u8>, KeyMaterialError> {
		URL_SAFE_NO_PAD.decode(value).map_err(|source| KeyMaterialError::InvalidComponent {
			kid: self.kid.clone(),
			component,
			source,
		})
	}
}
