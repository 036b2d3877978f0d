//! Strongly typed identifiers used in client credentials and client-secret claims.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				$validate($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const TEAM_ID_LEN: usize = 10;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (team, client, key).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (team, client, key).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (team, client, key).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The identifier must be an exact number of ASCII alphanumeric characters.
	#[error("{kind} identifier must be exactly {len} ASCII alphanumeric characters.")]
	InvalidFormat {
		/// Kind of identifier (team, client, key).
		kind: &'static str,
		/// Required character count.
		len: usize,
	},
}

def_id! {
	TeamId,
	"10-character developer team identifier; the `iss` claim of client secrets.",
	"Team",
	validate_team
}
def_id! {
	ClientId,
	"App ID or Services ID used as `client_id` and as the `sub` claim of client secrets.",
	"Client",
	validate_view
}
def_id! {
	KeyId,
	"Identifier of the private key registered with the provider; the `kid` header.",
	"Key",
	validate_view
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.chars().count() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

fn validate_team(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	validate_view(kind, view)?;

	if view.len() != TEAM_ID_LEN || !view.bytes().all(|b| b.is_ascii_alphanumeric()) {
		return Err(IdentifierError::InvalidFormat { kind, len: TEAM_ID_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty() {
		assert!(ClientId::new(" com.example.app").is_err(), "Leading whitespace must be rejected.");
		assert!(ClientId::new("com.example.app ").is_err(), "Trailing whitespace must be rejected.");

		let client =
			ClientId::new("com.example.app").expect("Client fixture should be considered valid.");

		assert_eq!(client.as_ref(), "com.example.app");
		assert!(KeyId::new("").is_err());
		assert!(KeyId::new("with space").is_err());
	}

	#[test]
	fn team_id_requires_ten_alphanumerics() {
		TeamId::new("ABCDE12345").expect("Ten alphanumerics should be accepted.");

		assert_eq!(
			TeamId::new("ABCDE1234"),
			Err(IdentifierError::InvalidFormat { kind: "Team", len: 10 })
		);
		assert!(TeamId::new("ABCDE123456").is_err());
		assert!(TeamId::new("ABCDE-1234").is_err());
		assert!(matches!(TeamId::new(""), Err(IdentifierError::Empty { kind: "Team" })));
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let team: TeamId =
			serde_json::from_str("\"ABCDE12345\"").expect("Team should deserialize successfully.");

		assert_eq!(team.as_ref(), "ABCDE12345");
		assert!(serde_json::from_str::<TeamId>("\"short\"").is_err());
		assert!(serde_json::from_str::<ClientId>("\"with space\"").is_err());
	}

	#[test]
	fn unicode_whitespace_and_length_limits() {
		let nbsp = format!("com.example{}app", '\u{00A0}');

		assert!(ClientId::new(&nbsp).is_err());

		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		ClientId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(ClientId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<ClientId, u8> = HashMap::from_iter([(
			ClientId::new("com.example.app").expect("Client used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("com.example.app"), Some(&7));
	}
}
