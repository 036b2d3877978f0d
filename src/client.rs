//! Client entry point that owns credentials, endpoints, and the transport.

pub mod exchange;
pub mod public_keys;
pub mod revoke;

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::TokenHttpClient,
	oauth::{AppleFacade, TransportErrorMapper},
	provider::AppleEndpoints,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestAppleClient = AppleClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Talks to the provider's token, revocation, and key set endpoints.
///
/// The client holds only immutable state (credentials, endpoints, transport handles), so it
/// can be cloned or shared across tasks freely. Every operation sends exactly one request;
/// deadlines and retries are the transport's business.
pub struct AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Endpoints the client talks to.
	pub endpoints: AppleEndpoints,
	credentials: ClientCredentials,
}
impl<C, M> AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credentials: ClientCredentials,
		endpoints: AppleEndpoints,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			endpoints,
			credentials,
		}
	}

	/// Replaces the endpoint set, e.g. to point at a mock server.
	pub fn with_endpoints(mut self, endpoints: AppleEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Credentials sent with token and revocation requests.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.credentials
	}

	pub(crate) fn facade(&self) -> Result<AppleFacade<C, M>> {
		AppleFacade::from_credentials(
			&self.credentials,
			&self.endpoints,
			self.http_client.clone(),
			self.transport_mapper.clone(),
		)
	}
}
#[cfg(feature = "reqwest")]
impl AppleClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client for Apple's production endpoints.
	///
	/// The client provisions its own reqwest-backed transport that never follows redirects;
	/// use [`AppleClient::with_http_client`] to supply one with a deadline.
	pub fn new(credentials: ClientCredentials) -> Result<Self> {
		Ok(Self::with_http_client(
			credentials,
			AppleEndpoints::default(),
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}
}
impl<C, M> Clone for AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			endpoints: self.endpoints.clone(),
			credentials: self.credentials.clone(),
		}
	}
}
impl<C, M> Debug for AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppleClient")
			.field("endpoints", &self.endpoints)
			.field("client_id", self.credentials.client_id())
			.field("client_secret_set", &!self.credentials.client_secret().expose().is_empty())
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::auth::ClientId;

	#[test]
	fn new_builds_production_client() {
		let client = AppleClient::new(ClientCredentials::new(
			ClientId::new("com.example.app").expect("Client fixture should be valid."),
			"top-secret-jwt",
		))
		.expect("Default client should build.");

		assert_eq!(client.endpoints, AppleEndpoints::default());
	}

	#[test]
	fn debug_omits_client_secret() {
		let client = AppleClient::new(ClientCredentials::new(
			ClientId::new("com.example.app").expect("Client fixture should be valid."),
			"top-secret-jwt",
		))
		.expect("Default client should build.");
		let rendered = format!("{client:?}");

		assert!(rendered.contains("com.example.app"));
		assert!(rendered.contains("client_secret_set: true"));
		assert!(!rendered.contains("top-secret-jwt"));
	}
}
