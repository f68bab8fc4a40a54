//! Open Humans OAuth 2.0 login strategy—derive provider endpoints, forward origin
//! parameters, and normalize member profiles on top of a pluggable transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod params;
pub mod profile;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{ApiVersion, StrategyConfig, StrategyConfigBuilder},
		strategy::{OpenHumansStrategy, ReqwestStrategy},
	};

	/// Callback URL shared by the test fixtures.
	pub fn test_callback_url() -> Url {
		Url::parse("https://app.example.net/auth/open-humans/callback")
			.expect("Test callback URL should parse successfully.")
	}

	/// Builder seeded with test credentials and the shared callback URL.
	pub fn test_config_builder() -> StrategyConfigBuilder {
		StrategyConfig::builder("client-it", "secret-it").callback_url(test_callback_url())
	}

	/// Builds a configuration whose endpoints derive from a mock server host.
	pub fn test_config(host: &str, version: ApiVersion) -> StrategyConfig {
		test_config_builder()
			.host_url(Url::parse(host).expect("Test host URL should parse successfully."))
			.api_version(version)
			.origin("external-app")
			.build()
			.expect("Test configuration should build successfully.")
	}

	/// Constructs a reqwest-backed strategy pointed at a mock server host.
	pub fn build_reqwest_test_strategy(host: &str, version: ApiVersion) -> ReqwestStrategy {
		OpenHumansStrategy::new(test_config(host, version))
			.expect("Test strategy should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
#[cfg(test)] use openhumans_oauth2 as _;
