//! Strategy-level error types shared across configuration, transport, and profile mapping.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Malformed provider payload.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// Token endpoint rejected the authorization-code exchange.
	#[error("Token endpoint rejected the exchange: {reason}.")]
	TokenEndpoint {
		/// Provider- or strategy-supplied reason string.
		reason: String,
	},
	/// Profile endpoint answered with a non-success status.
	#[error("Profile endpoint returned status {status}.")]
	ProfileEndpoint {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Truncated response body for diagnostics.
		body_preview: Option<String>,
	},
}

/// Configuration and validation failures raised while assembling the strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier was empty or missing.
	#[error("Missing OAuth client identifier.")]
	MissingClientId,
	/// Client secret was empty or missing.
	#[error("Missing OAuth client secret.")]
	MissingClientSecret,
	/// Callback URL is required for the authorization-code flow.
	#[error("Missing callback URL.")]
	MissingCallbackUrl,
	/// A derived or supplied endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Reject scope separators that are control characters.
	#[error("Scope separator must be a printable character.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: char,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}

/// Transport-level failures (network, IO).
///
/// Raw transport error types never cross the public boundary; they are boxed
/// into the `source` chain instead.
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

/// Structured parse failures for provider payloads.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Profile endpoint returned a body that is not valid JSON.
	#[error("Profile endpoint returned malformed JSON.")]
	Profile {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
