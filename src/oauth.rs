//! Internal facade over the `oauth2` crate.
//!
//! The handshake state machine (redirect construction, code exchange, client
//! authentication) is delegated wholesale to `oauth2`; this module only wires
//! the strategy configuration into a [`BasicClient`], injects extra request
//! parameters, and maps request failures into the crate taxonomy.

pub use oauth2;

// std
use std::time::Duration;
// crates.io
use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	error::{ConfigError, ParseError, TransportError},
	http::StrategyHttpClient,
	params::AuthParams,
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Normalized result of a successful authorization-code exchange.
///
/// The host application hands this to its own verify logic together with the
/// fetched profile; the strategy does not persist tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSet {
	/// Opaque access token used to authenticate provider API calls.
	pub access_token: String,
	/// Refresh token, when the provider issues one.
	pub refresh_token: Option<String>,
	/// Scopes granted by the provider, when echoed back.
	pub scopes: Option<Vec<String>>,
	/// Provider-reported token lifetime, when supplied.
	pub expires_in: Option<Duration>,
}
impl TokenSet {
	fn from_response(response: BasicTokenResponse) -> Self {
		Self {
			access_token: response.access_token().secret().clone(),
			refresh_token: response.refresh_token().map(|token| token.secret().clone()),
			scopes: response
				.scopes()
				.map(|scopes| scopes.iter().map(|scope| scope.to_string()).collect()),
			expires_in: response.expires_in(),
		}
	}
}

pub(crate) struct OAuth2Facade<C>
where
	C: ?Sized + StrategyHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
}
impl<C> OAuth2Facade<C>
where
	C: ?Sized + StrategyHttpClient,
{
	pub(crate) fn from_config(
		config: &StrategyConfig,
		http_client: Arc<C>,
	) -> Result<Self, ConfigError> {
		let auth_url = AuthUrl::new(config.authorization_url.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(config.token_url.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let redirect_url = RedirectUrl::new(config.callback_url.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "callback", source })?;
		let oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url);

		Ok(Self { oauth_client, http_client })
	}

	pub(crate) fn authorize_url(
		&self,
		scopes: &[&str],
		separator: char,
		extra_params: &AuthParams,
	) -> (Url, String) {
		let mut request = self.oauth_client.authorize_url(CsrfToken::new_random);

		if separator == ' ' {
			for scope in scopes {
				request = request.add_scope(Scope::new((*scope).to_owned()));
			}
		} else if let Some(joined) = join_scopes(scopes, separator) {
			request = request.add_scope(Scope::new(joined));
		}
		for (key, value) in extra_params {
			request = request.add_extra_param(key.as_str(), value.as_str());
		}

		let (url, state) = request.url();

		(url, state.secret().clone())
	}

	pub(crate) async fn exchange_code(
		&self,
		code: &str,
		extra_params: &AuthParams,
	) -> Result<TokenSet> {
		let handle = self.http_client.token_handle();
		let mut request = self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));

		for (key, value) in extra_params {
			request = request.add_extra_param(key.as_str(), value.as_str());
		}

		let response = request.request_async(&handle).await.map_err(map_request_error)?;

		Ok(TokenSet::from_response(response))
	}
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => {
			let reason = if let Some(description) = response.error_description() {
				format!("{}: {description}", response.error().as_ref())
			} else {
				response.error().as_ref().to_owned()
			};

			Error::TokenEndpoint { reason }
		},
		RequestTokenError::Request(error) => map_transport_error(error),
		RequestTokenError::Parse(source, _body) => ParseError::TokenResponse { source }.into(),
		RequestTokenError::Other(message) => Error::TokenEndpoint { reason: message },
	}
}

fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::HttpRequest(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) =>
			Error::TokenEndpoint { reason: format!("HTTP client error occurred: {message}") },
		_ => Error::TokenEndpoint { reason: "HTTP client error occurred".into() },
	}
}

fn join_scopes(scopes: &[&str], separator: char) -> Option<String> {
	if scopes.is_empty() {
		return None;
	}

	let mut buf = String::new();

	for (idx, scope) in scopes.iter().enumerate() {
		if idx > 0 {
			buf.push(separator);
		}

		buf.push_str(scope);
	}

	Some(buf)
}
