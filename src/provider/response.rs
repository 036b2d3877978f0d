//! Error body returned by the token and revocation endpoints.

// self
use crate::_prelude::*;

/// Error codes the provider may return in the `error` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
	/// Request is malformed: missing or unsupported parameter, repeated credentials, or more
	/// than one client authentication mechanism.
	InvalidRequest,
	/// Client authentication failed (bad client id or client secret).
	InvalidClient,
	/// Authorization code or refresh token is invalid, expired, or already used.
	InvalidGrant,
	/// Client is not authorized to use this grant type.
	UnauthorizedClient,
	/// Grant type is not supported by the provider.
	UnsupportedGrantType,
	/// Requested scope is invalid.
	InvalidScope,
	/// Provider failed internally; also synthesized locally when no response was received.
	ServerError,
}
impl ErrorCode {
	/// Returns the wire value of the code.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorCode::InvalidRequest => "invalid_request",
			ErrorCode::InvalidClient => "invalid_client",
			ErrorCode::InvalidGrant => "invalid_grant",
			ErrorCode::UnauthorizedClient => "unauthorized_client",
			ErrorCode::UnsupportedGrantType => "unsupported_grant_type",
			ErrorCode::InvalidScope => "invalid_scope",
			ErrorCode::ServerError => "server_error",
		}
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Decoded `400 Bad Request` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{error}")]
pub struct ErrorResponse {
	/// Single allowed value describing why the request failed.
	pub error: ErrorCode,
	/// Optional human-readable detail; the provider usually omits it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
}
impl ErrorResponse {
	/// Creates a response carrying only an error code.
	pub fn new(error: ErrorCode) -> Self {
		Self { error, error_description: None }
	}
}
impl oauth2::ErrorResponse for ErrorResponse {}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_every_documented_code() {
		let codes = [
			ErrorCode::InvalidRequest,
			ErrorCode::InvalidClient,
			ErrorCode::InvalidGrant,
			ErrorCode::UnauthorizedClient,
			ErrorCode::UnsupportedGrantType,
			ErrorCode::InvalidScope,
			ErrorCode::ServerError,
		];

		for code in codes {
			let body = format!("{{\"error\":\"{code}\"}}");
			let decoded: ErrorResponse =
				serde_json::from_str(&body).expect("Documented error codes should decode.");

			assert_eq!(decoded, ErrorResponse::new(code));
		}
	}

	#[test]
	fn rejects_unknown_codes() {
		let result = serde_json::from_str::<ErrorResponse>(r#"{"error":"access_denied"}"#);

		assert!(result.is_err());
	}

	#[test]
	fn display_is_the_wire_code() {
		assert_eq!(ErrorResponse::new(ErrorCode::InvalidClient).to_string(), "invalid_client");
	}
}
