//! Client-level error types shared across exchanges, revocation, key retrieval, and signing.

// self
use crate::{_prelude::*, provider::ErrorCode};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider reported (or was assumed to report) an OAuth error.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Response body did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Client secret could not be signed.
	#[error(transparent)]
	Signing(#[from] SigningError),
}
impl Error {
	/// Returns the provider error code carried by this failure, if any.
	///
	/// Transport failures during token exchanges surface as [`ErrorCode::ServerError`].
	pub fn provider_code(&self) -> Option<ErrorCode> {
		match self {
			Self::Provider(err) => Some(err.code()),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint configuration contains an invalid URL.
	#[error("Endpoint configuration contains an invalid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Endpoint configuration failed validation.
	#[error(transparent)]
	Endpoints(#[from] crate::provider::EndpointError),
	/// The `oauth2` client refused to build a request.
	#[error(transparent)]
	Request(#[from] oauth2::ConfigurationError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// Requested client-secret lifetime is outside the range the provider accepts.
	#[error("Client secret lifetime must be between 1 and {max} seconds, got {seconds}.")]
	ClientSecretLifetime {
		/// Requested lifetime in seconds.
		seconds: i64,
		/// Maximum accepted lifetime in seconds.
		max: i64,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured cause.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// OAuth errors attributed to the provider.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// Provider answered `400 Bad Request` with a structured error body.
	#[error("Provider rejected the request: {code}.")]
	Rejected {
		/// Error code decoded from the response body.
		code: ErrorCode,
		/// Optional `error_description` sent alongside the code.
		description: Option<String>,
	},
	/// No response was received; reported as `server_error` because there is no body to decode.
	#[error("Provider could not be reached; reporting server_error.")]
	Unreachable {
		/// Transport failure that prevented a response.
		#[source]
		source: TransportError,
	},
}
impl ProviderError {
	/// Returns the error code, synthesizing [`ErrorCode::ServerError`] for unreachable providers.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Rejected { code, .. } => *code,
			Self::Unreachable { .. } => ErrorCode::ServerError,
		}
	}

	/// Returns true when the code was synthesized locally rather than sent by the provider.
	pub fn is_local(&self) -> bool {
		matches!(self, Self::Unreachable { .. })
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Provider responded with JSON that does not match the expected shape.
	#[error("Provider returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Provider returned a response that cannot be decoded at all.
	#[error("Provider returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of what was wrong with the response.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl DecodeError {
	/// HTTP status attached to the failure, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Json { status, .. } | Self::UnexpectedResponse { status, .. } => *status,
			Self::MissingExpiresIn | Self::ExpiresInOutOfRange => None,
		}
	}
}

/// Failures raised while producing a signed client secret.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Private key is not a PEM-encoded EC key.
	#[error("Private key is missing or malformed.")]
	InvalidPrivateKey {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Private key file could not be read.
	#[error("Private key file `{}` could not be read.", path.display())]
	PrivateKeyRead {
		/// Path that was read.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Signature could not be produced (e.g. the key is not on the P-256 curve).
	#[error("Client secret could not be signed with ES256.")]
	Sign {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unreachable_provider_reports_server_error() {
		let err = ProviderError::Unreachable {
			source: TransportError::Other { message: "connection reset".into() },
		};

		assert_eq!(err.code(), ErrorCode::ServerError);
		assert!(err.is_local());
		assert!(err.source().is_some());

		let err = Error::from(err);

		assert_eq!(err.provider_code(), Some(ErrorCode::ServerError));
	}

	#[test]
	fn rejected_provider_keeps_remote_code() {
		let err = ProviderError::Rejected { code: ErrorCode::InvalidGrant, description: None };

		assert_eq!(err.code(), ErrorCode::InvalidGrant);
		assert!(!err.is_local());
		assert_eq!(err.to_string(), "Provider rejected the request: invalid_grant.");
	}

	#[test]
	fn non_provider_errors_have_no_code() {
		let err = Error::from(DecodeError::MissingExpiresIn);

		assert_eq!(err.provider_code(), None);
	}
}
