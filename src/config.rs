//! Strategy configuration: client credentials, endpoint derivation, and validation.
//!
//! Open Humans has shipped two wire layouts. The legacy deployment ([`ApiVersion::V1`])
//! lives at `www.openhumans.org` with trailing-slash OAuth paths and the
//! `/api/member/` profile endpoint; the current deployment ([`ApiVersion::V2`])
//! lives at `openhumans.org` with `/oauth2/access_token` and
//! `/api/profile/current/`. Endpoints default to `{host}{path}` for the
//! selected version and may be overridden individually.

// self
use crate::{_prelude::*, error::ConfigError};

/// Known Open Humans deployment variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVersion {
	/// Legacy deployment (`www.openhumans.org`, `/api/member/`).
	V1,
	#[default]
	/// Current deployment (`openhumans.org`, `/api/profile/current/`).
	V2,
}
impl ApiVersion {
	/// Default provider host for the deployment.
	pub const fn default_host(self) -> &'static str {
		match self {
			ApiVersion::V1 => "https://www.openhumans.org",
			ApiVersion::V2 => "https://openhumans.org",
		}
	}

	pub(crate) const fn authorize_path(self) -> &'static str {
		match self {
			ApiVersion::V1 => "/oauth2/authorize/",
			ApiVersion::V2 => "/oauth2/authorize",
		}
	}

	pub(crate) const fn token_path(self) -> &'static str {
		match self {
			ApiVersion::V1 => "/oauth2/token/",
			ApiVersion::V2 => "/oauth2/access_token",
		}
	}

	pub(crate) const fn profile_path(self) -> &'static str {
		match self {
			ApiVersion::V1 => "/api/member/",
			ApiVersion::V2 => "/api/profile/current/",
		}
	}
}

/// Immutable strategy configuration, fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct StrategyConfig {
	/// OAuth application identifier issued by Open Humans.
	pub client_id: String,
	/// OAuth application secret issued by Open Humans.
	pub client_secret: String,
	/// URL the provider redirects back to after granting authorization.
	pub callback_url: Url,
	/// Deployment variant the endpoints were derived for.
	pub api_version: ApiVersion,
	/// Provider root used to derive endpoints.
	pub host_url: Url,
	/// Authorization endpoint (derived unless overridden).
	pub authorization_url: Url,
	/// Token endpoint (derived unless overridden).
	pub token_url: Url,
	/// Member profile endpoint (derived unless overridden).
	pub profile_url: Url,
	/// Character used to join scopes in the authorize URL.
	pub scope_separator: char,
	/// Configured origin forwarded as the provider's `origin` parameter.
	pub origin: Option<String>,
}
impl StrategyConfig {
	/// Creates a new builder seeded with the required credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> StrategyConfigBuilder {
		StrategyConfigBuilder::new(client_id, client_secret)
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("callback_url", &self.callback_url)
			.field("api_version", &self.api_version)
			.field("host_url", &self.host_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("profile_url", &self.profile_url)
			.field("scope_separator", &self.scope_separator)
			.field("origin", &self.origin)
			.finish()
	}
}

/// Builder for [`StrategyConfig`] values.
#[derive(Debug)]
pub struct StrategyConfigBuilder {
	client_id: String,
	client_secret: String,
	callback_url: Option<Url>,
	api_version: ApiVersion,
	host_url: Option<Url>,
	authorization_url: Option<Url>,
	token_url: Option<Url>,
	profile_url: Option<Url>,
	scope_separator: char,
	origin: Option<String>,
}
impl StrategyConfigBuilder {
	/// Creates a new builder seeded with the required credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			callback_url: None,
			api_version: ApiVersion::default(),
			host_url: None,
			authorization_url: None,
			token_url: None,
			profile_url: None,
			scope_separator: ' ',
			origin: None,
		}
	}

	/// Sets the callback URL the provider redirects back to.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Selects the deployment variant endpoints are derived for.
	pub fn api_version(mut self, version: ApiVersion) -> Self {
		self.api_version = version;

		self
	}

	/// Overrides the provider host used for endpoint derivation.
	///
	/// A path component on the host is preserved in every derived endpoint.
	pub fn host_url(mut self, url: Url) -> Self {
		self.host_url = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the member profile endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Overrides the scope separator (defaults to a single space).
	pub fn scope_separator(mut self, separator: char) -> Self {
		self.scope_separator = separator;

		self
	}

	/// Sets the origin value forwarded to the provider.
	pub fn origin(mut self, origin: impl Into<String>) -> Self {
		self.origin = Some(origin.into());

		self
	}

	/// Consumes the builder, derives missing endpoints, and validates the result.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		let callback_url = self.callback_url.ok_or(ConfigError::MissingCallbackUrl)?;

		if self.scope_separator.is_control() {
			return Err(ConfigError::InvalidScopeSeparator { separator: self.scope_separator });
		}

		let version = self.api_version;
		let host_url = match self.host_url {
			Some(url) => url,
			None => Url::parse(version.default_host())
				.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "host", source })?,
		};
		let authorization_url = match self.authorization_url {
			Some(url) => url,
			None => derive_endpoint(&host_url, "authorization", version.authorize_path())?,
		};
		let token_url = match self.token_url {
			Some(url) => url,
			None => derive_endpoint(&host_url, "token", version.token_path())?,
		};
		let profile_url = match self.profile_url {
			Some(url) => url,
			None => derive_endpoint(&host_url, "profile", version.profile_path())?,
		};

		Ok(StrategyConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			callback_url,
			api_version: version,
			host_url,
			authorization_url,
			token_url,
			profile_url,
			scope_separator: self.scope_separator,
			origin: self.origin,
		})
	}
}

// Appends the version path to the full host URL, so a host carrying a path
// component (e.g. a reverse-proxy prefix) keeps it in the derived endpoint.
fn derive_endpoint(
	host: &Url,
	endpoint: &'static str,
	path: &'static str,
) -> Result<Url, ConfigError> {
	let mut derived = host.as_str().trim_end_matches('/').to_owned();

	derived.push_str(path);

	Url::parse(&derived).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
