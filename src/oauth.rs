//! Internal OAuth client facade over the `oauth2` crate.
//!
//! The facade owns request construction (form-encoded bodies with `client_id` and
//! `client_secret` in the body) and the mapping of `oauth2` failures into the crate taxonomy:
//!
//! - `400 Bad Request` with a decodable body becomes [`ProviderError::Rejected`].
//! - A transport failure during a token exchange becomes [`ProviderError::Unreachable`], which
//!   reports `server_error` without pretending the provider said so.
//! - Anything else that cannot be decoded becomes a [`DecodeError`].

pub use oauth2;

// crates.io
use oauth2::{
	AccessToken, AuthType, AuthorizationCode, ClientId as OAuthClientId,
	ClientSecret as OAuthClientSecret, EndpointNotSet, EndpointSet, ExtraTokenFields,
	HttpClientError, RefreshToken, RequestTokenError, RevocationUrl, StandardRevocableToken,
	StandardTokenResponse, TokenResponse as _, TokenUrl,
	basic::{BasicTokenIntrospectionResponse, BasicTokenType},
};
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, TokenResponse, TokenSecret, TokenType},
	error::{ConfigError, DecodeError, ProviderError, TransportError},
	http::{ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	obs::CallKind,
	provider::{AppleEndpoints, ErrorResponse, GrantType, TokenTypeHint},
};

// Roughly 136 years; anything larger is not a real lifetime.
const MAX_EXPIRES_IN_SECS: u64 = u32::MAX as u64;

/// Provider-specific fields carried next to the standard token response fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenFields {
	/// Signed identity token.
	pub id_token: String,
}
impl ExtraTokenFields for IdTokenFields {}

/// Raw token endpoint response as decoded by `oauth2`.
pub type AppleTokenResponse = StandardTokenResponse<IdTokenFields, BasicTokenType>;

type ConfiguredClient = oauth2::Client<
	ErrorResponse,
	AppleTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	ErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
	EndpointSet,
>;

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	///
	/// Return [`Error::Transport`] for failures where no response was received; token
	/// exchanges report those as `server_error`.
	fn map_transport_error(
		&self,
		call: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		// Calls share one classification today.
		let _ = (call, meta);

		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: "unknown HTTP client failure".into() }.into(),
		}
	}
}

pub(crate) struct AppleFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> AppleFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn from_credentials(
		credentials: &ClientCredentials,
		endpoints: &AppleEndpoints,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let token_url = TokenUrl::new(endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let revocation_url = RevocationUrl::new(endpoints.revocation.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let oauth_client: ConfiguredClient =
			oauth2::Client::new(OAuthClientId::new(credentials.client_id().to_string()))
				.set_client_secret(OAuthClientSecret::new(
					credentials.client_secret().expose().to_owned(),
				))
				.set_auth_type(AuthType::RequestBody)
				.set_token_uri(token_url)
				.set_revocation_url(revocation_url);

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
		})
	}

	/// Posts `grant` to the token endpoint; `value` is the code or the refresh token.
	pub(crate) async fn exchange(&self, grant: GrantType, value: &str) -> Result<TokenResponse> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let result = match grant {
			GrantType::AuthorizationCode =>
				self.oauth_client
					.exchange_code(AuthorizationCode::new(value.to_owned()))
					.request_async(&instrumented)
					.await,
			GrantType::RefreshToken => {
				let refresh_secret = RefreshToken::new(value.to_owned());

				self.oauth_client
					.exchange_refresh_token(&refresh_secret)
					.request_async(&instrumented)
					.await
			},
		};
		let response = result.map_err(|err| {
			map_exchange_error(grant.into(), meta.take(), err, self.error_mapper.as_ref())
		})?;

		map_token_response(response, RefreshTokenPolicy::from(grant), meta.take())
	}

	pub(crate) async fn revoke_token(&self, token: &str, hint: TokenTypeHint) -> Result<()> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let token = match hint {
			TokenTypeHint::AccessToken =>
				StandardRevocableToken::AccessToken(AccessToken::new(token.to_owned())),
			TokenTypeHint::RefreshToken =>
				StandardRevocableToken::RefreshToken(RefreshToken::new(token.to_owned())),
		};

		let result = self
			.oauth_client
			.revoke_token(token)
			.map_err(ConfigError::from)?
			.request_async(&instrumented)
			.await;
		let Err(err) = result else {
			return Ok(());
		};
		let meta = meta.take();
		let status = meta_status(meta.as_ref());

		// `oauth2` only accepts `200 OK`; any other success status with an empty body is fine.
		if status.is_some_and(|code| (200..300).contains(&code)) {
			return Ok(());
		}

		Err(match err {
			RequestTokenError::ServerResponse(response) => map_server_response(response, status),
			RequestTokenError::Request(error) =>
				self.error_mapper.map_transport_error(CallKind::Revocation, meta.as_ref(), error),
			RequestTokenError::Parse(source, _body) => DecodeError::Json { source, status }.into(),
			RequestTokenError::Other(message) =>
				DecodeError::UnexpectedResponse { message, status }.into(),
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RefreshTokenPolicy {
	Keep,
	// The provider never rotates refresh tokens on a refresh grant.
	Discard,
}
impl From<GrantType> for RefreshTokenPolicy {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::AuthorizationCode => Self::Keep,
			GrantType::RefreshToken => Self::Discard,
		}
	}
}

fn map_token_response(
	response: AppleTokenResponse,
	refresh_policy: RefreshTokenPolicy,
	meta: Option<ResponseMetadata>,
) -> Result<TokenResponse> {
	let expires_in = response.expires_in().ok_or(DecodeError::MissingExpiresIn)?.as_secs();

	if expires_in > MAX_EXPIRES_IN_SECS {
		return Err(DecodeError::ExpiresInOutOfRange.into());
	}

	let expires_in = i64::try_from(expires_in).map_err(|_| DecodeError::ExpiresInOutOfRange)?;
	let token_type = match response.token_type() {
		BasicTokenType::Bearer => TokenType::Bearer,
		other =>
			return Err(DecodeError::UnexpectedResponse {
				message: format!("unsupported token_type {}", other.as_ref()),
				status: meta_status(meta.as_ref()),
			}
			.into()),
	};
	let refresh_token = match refresh_policy {
		RefreshTokenPolicy::Keep =>
			response.refresh_token().map(|token| TokenSecret::new(token.secret().to_owned())),
		RefreshTokenPolicy::Discard => None,
	};

	Ok(TokenResponse {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		id_token: TokenSecret::new(response.extra_fields().id_token.clone()),
		refresh_token,
		expires_in: Duration::seconds(expires_in),
		token_type,
		received_at: OffsetDateTime::now_utc(),
	})
}

fn map_exchange_error<E, M>(
	call: CallKind,
	meta: Option<ResponseMetadata>,
	err: RequestTokenError<HttpClientError<E>, ErrorResponse>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta_ref = meta.as_ref();
	let status = meta_status(meta_ref);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response(response, status),
		RequestTokenError::Request(error) => match mapper.map_transport_error(call, meta_ref, error)
		{
			Error::Transport(source) => ProviderError::Unreachable { source }.into(),
			other => other,
		},
		RequestTokenError::Parse(source, _body) => DecodeError::Json { source, status }.into(),
		RequestTokenError::Other(message) =>
			DecodeError::UnexpectedResponse { message, status }.into(),
	}
}

// Only `400 Bad Request` carries a documented error body. A custom transport that never
// reports a status is given the benefit of the doubt.
fn map_server_response(response: ErrorResponse, status: Option<u16>) -> Error {
	match status {
		Some(400) | None => ProviderError::Rejected {
			code: response.error,
			description: response.error_description,
		}
		.into(),
		Some(code) => DecodeError::UnexpectedResponse {
			message: format!("HTTP {code} is not a token response (error body: {})", response.error),
			status,
		}
		.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}
