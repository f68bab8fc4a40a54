//! Transport primitives for the strategy's two outbound calls.
//!
//! [`StrategyHttpClient`] is the crate's only dependency on an HTTP stack: it
//! hands the `oauth2` crate an [`AsyncHttpClient`] handle for token exchanges
//! and performs the authenticated profile GET itself. A reqwest-backed
//! implementation ships behind the `reqwest` feature; custom transports plug
//! in by implementing the trait.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Boxed future returned by [`StrategyHttpClient::get_protected_resource`].
pub type ResourceFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ResourceResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the strategy's
/// token exchanges and authenticated profile fetches.
///
/// Implementations must be `Send + Sync + 'static` so a strategy can be
/// shared across tasks behind `Arc` without additional wrappers, and the
/// handles they return must own whatever state their request futures need to
/// remain `Send` for the lifetime of the in-flight operation.
pub trait StrategyHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle passed to the `oauth2` crate for token exchanges.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle for a single token exchange.
	fn token_handle(&self) -> Self::Handle;

	/// Issues an authenticated GET against the provider's profile endpoint.
	///
	/// Implementations authenticate with the access token as an OAuth bearer
	/// credential and must return the body exactly as received; the strategy
	/// retains it verbatim in the normalized profile.
	fn get_protected_resource(
		&self,
		url: Url,
		access_token: String,
	) -> ResourceFuture<'_, Self::TransportError>;
}

/// Raw response captured from a protected-resource fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceResponse {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Response body, unmodified.
	pub body: String,
}
impl ResourceResponse {
	/// Whether the provider answered with a 2xx status.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure any custom [`ReqwestClient`] to disable redirect following for
/// token requests, because the strategy passes this client into the `oauth2`
/// crate when it builds the exchange facade.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl StrategyHttpClient for ReqwestHttpClient {
	type Handle = ReqwestTokenHandle;
	type TransportError = ReqwestError;

	fn token_handle(&self) -> Self::Handle {
		ReqwestTokenHandle(self.0.clone())
	}

	fn get_protected_resource(
		&self,
		url: Url,
		access_token: String,
	) -> ResourceFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.get(url).bearer_auth(access_token).send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(ResourceResponse { status, body })
		})
	}
}

/// Token-exchange handle returned by [`ReqwestHttpClient`] for the `oauth2` crate.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestTokenHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestTokenHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
