//! Public key set retrieval.
//!
//! The key set endpoint has no documented error body, so anything other than a `2xx` JSON key
//! set is a decode failure carrying the observed status.

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{Method, Request, header},
};
// self
use crate::{
	_prelude::*,
	client::{AppleClient, exchange},
	error::{ConfigError, DecodeError},
	http::{ResponseMetadataSlot, TokenHttpClient},
	keys::KeySet,
	oauth::TransportErrorMapper,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<C, M> AppleClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the provider's current signing keys.
	///
	/// Every call issues a fresh `GET`; nothing is cached or merged with earlier results.
	/// Records keep the order the provider published them in.
	pub async fn fetch_public_keys(&self) -> Result<KeySet> {
		const KIND: CallKind = CallKind::PublicKeys;

		let span = CallSpan::new(KIND, "fetch_public_keys");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.request_public_keys()).await;

		exchange::record_result(KIND, &result);

		result
	}

	async fn request_public_keys(&self) -> Result<KeySet> {
		let request = Request::builder()
			.method(Method::GET)
			.uri(self.endpoints.keys.as_str())
			.header(header::ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = handle.call(request).await.map_err(|err| {
			let meta = meta.take();

			self.transport_mapper.map_transport_error(CallKind::PublicKeys, meta.as_ref(), err)
		})?;
		let status = response.status();

		if !status.is_success() {
			return Err(DecodeError::UnexpectedResponse {
				message: format!("key set endpoint answered HTTP {status}"),
				status: Some(status.as_u16()),
			}
			.into());
		}

		let mut deserializer = serde_json::Deserializer::from_slice(response.body());

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::from(DecodeError::Json { source, status: Some(status.as_u16()) }))
	}
}
