//! The Open Humans authentication strategy.
//!
//! [`OpenHumansStrategy`] adapts the generic `oauth2` client to the Open
//! Humans provider: it derives endpoints from the configuration, forwards the
//! `origin` parameter on both the authorization and token-exchange legs, and
//! normalizes the member profile once an access token is obtained. The host
//! framework registers the strategy under [`OpenHumansStrategy::NAME`] and
//! drives the two-call sequence (authorize redirect, then exchange + profile
//! fetch); the strategy itself holds no mutable state.

// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	error::{ConfigError, TransportError},
	http::StrategyHttpClient,
	oauth::{OAuth2Facade, TokenSet},
	obs::{StageSpan, StrategyStage},
	params::{self, AuthParams},
	profile::Profile,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const BODY_PREVIEW_LIMIT: usize = 256;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestStrategy = OpenHumansStrategy<ReqwestHttpClient>;

/// Authorize redirect produced by [`OpenHumansStrategy::start_authorization`].
///
/// The caller sends the end user to `url` and persists `state` for its own
/// redirect-handler check; state validation is the host's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL to redirect the end user to.
	pub url: Url,
	/// Random state value embedded in the authorize URL.
	pub state: String,
}

/// Open Humans OAuth 2.0 authentication strategy.
///
/// Composes a [`StrategyConfig`] with an HTTP transport and the `oauth2`
/// handshake facade. Configuration is read-only after construction, so a
/// single strategy serves concurrent authentication attempts behind `Arc`.
pub struct OpenHumansStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	config: StrategyConfig,
	facade: OAuth2Facade<C>,
	http_client: Arc<C>,
}
impl<C> OpenHumansStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	/// Identifier the host framework registers the strategy under.
	pub const NAME: &'static str = "open-humans";

	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		config: StrategyConfig,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		let http_client = http_client.into();
		let facade = OAuth2Facade::from_config(&config, http_client.clone())?;

		Ok(Self { config, facade, http_client })
	}

	/// Strategy name used for route registration.
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// The configuration the strategy was constructed with.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Extra parameters forwarded with the authorization redirect.
	pub fn authorization_params(&self) -> AuthParams {
		params::origin_params(self.config.origin.as_deref())
	}

	/// Extra parameters forwarded with the token exchange.
	pub fn token_params(&self) -> AuthParams {
		params::origin_params(self.config.origin.as_deref())
	}

	/// Builds the authorize redirect for the requested scopes.
	///
	/// Scopes are joined with the configured separator; the configured origin
	/// is appended via [`authorization_params`](Self::authorization_params).
	pub fn start_authorization(&self, scopes: &[&str]) -> AuthorizationRequest {
		let _guard = StageSpan::new(StrategyStage::Authorize).entered();
		let (url, state) = self.facade.authorize_url(
			scopes,
			self.config.scope_separator,
			&self.authorization_params(),
		);

		AuthorizationRequest { url, state }
	}

	/// Exchanges an authorization code for a [`TokenSet`].
	///
	/// The handshake itself is delegated to the `oauth2` crate;
	/// [`token_params`](Self::token_params) are injected as extra form fields.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
		let span = StageSpan::new(StrategyStage::TokenExchange);

		span.instrument(self.facade.exchange_code(code, &self.token_params())).await
	}

	/// Retrieves and normalizes the member profile for an access token.
	///
	/// Transport failures are wrapped into [`TransportError::Network`] before
	/// propagation, non-success statuses fail with
	/// [`Error::ProfileEndpoint`], and malformed bodies propagate a parse
	/// error; the strategy never yields a partial profile. No retries are
	/// attempted.
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		let span = StageSpan::new(StrategyStage::UserProfile);
		let fetch = async {
			let response = self
				.http_client
				.get_protected_resource(self.config.profile_url.clone(), access_token.to_owned())
				.await
				.map_err(TransportError::network)?;

			if !response.is_success() {
				return Err(Error::ProfileEndpoint {
					status: response.status,
					body_preview: truncate_preview(response.body),
				});
			}

			Ok(Profile::from_response(response.body)?)
		};

		span.instrument(fetch).await
	}
}
#[cfg(feature = "reqwest")]
impl OpenHumansStrategy<ReqwestHttpClient> {
	/// Creates a strategy backed by the crate's default reqwest transport.
	pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for OpenHumansStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenHumansStrategy")
			.field("name", &Self::NAME)
			.field("config", &self.config)
			.finish()
	}
}

fn truncate_preview(body: String) -> Option<String> {
	if body.is_empty() {
		return None;
	}
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return Some(body);
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	Some(buf)
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::config::ApiVersion;

	fn strategy(origin: Option<&str>) -> ReqwestStrategy {
		let mut builder = StrategyConfig::builder("app-id", "app-secret")
			.callback_url(
				Url::parse("https://app.example.net/callback")
					.expect("Callback fixture should parse successfully."),
			)
			.api_version(ApiVersion::V2);

		if let Some(origin) = origin {
			builder = builder.origin(origin);
		}

		OpenHumansStrategy::new(
			builder.build().expect("Strategy test configuration should build successfully."),
		)
		.expect("Strategy should build from a valid configuration.")
	}

	#[test]
	fn strategy_registers_under_the_provider_name() {
		assert_eq!(strategy(None).name(), "open-humans");
	}

	#[test]
	fn both_request_legs_share_the_origin_mapping() {
		let strategy = strategy(Some("my-research-portal"));

		assert_eq!(strategy.authorization_params(), strategy.token_params());
		assert_eq!(
			strategy.authorization_params().get("origin").map(String::as_str),
			Some("external")
		);

		let unconfigured = self::strategy(None);

		assert!(unconfigured.authorization_params().is_empty());
		assert!(unconfigured.token_params().is_empty());
	}

	#[test]
	fn authorize_redirect_embeds_the_returned_state() {
		let strategy = strategy(Some("open-humans"));
		let request = strategy.start_authorization(&["read"]);
		let state = request
			.url
			.query_pairs()
			.find(|(key, _)| key == "state")
			.map(|(_, value)| value.into_owned())
			.expect("Authorize URL should carry a state parameter.");

		assert_eq!(state, request.state);
		assert!(
			request
				.url
				.query_pairs()
				.any(|(key, value)| key == "origin" && value == "open-humans")
		);
	}

	#[test]
	fn body_previews_are_truncated() {
		assert_eq!(truncate_preview(String::new()), None);
		assert_eq!(truncate_preview("short".into()), Some("short".into()));

		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let preview = truncate_preview(long).expect("Long bodies should keep a preview.");

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
	}
}
