//! Origin parameter mapping shared by the authorization and token-exchange steps.
//!
//! Open Humans distinguishes logins started from its own site from logins
//! started by third-party applications via an `origin` query parameter. Any
//! configured value other than the literal `open-humans` is forwarded as
//! `external`.

// std
use std::collections::BTreeMap;
// self
use crate::_prelude::*;

/// Extra key-value pairs appended to outbound authorization/token requests.
///
/// A plain `BTreeMap` keeps the strategy HTTP client agnostic and the
/// parameter order deterministic.
pub type AuthParams = BTreeMap<String, String>;

/// Classified `origin` values accepted by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
	/// Login initiated from the Open Humans site itself.
	OpenHumans,
	/// Login initiated by a third-party application.
	External,
}
impl Origin {
	/// Maps a configured origin string onto the provider's two accepted values.
	pub fn classify(value: &str) -> Self {
		if value == Origin::OpenHumans.as_str() { Origin::OpenHumans } else { Origin::External }
	}

	/// Returns the wire value forwarded to the provider.
	pub const fn as_str(self) -> &'static str {
		match self {
			Origin::OpenHumans => "open-humans",
			Origin::External => "external",
		}
	}
}
impl Display for Origin {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Builds the extra request parameters for a configured origin.
///
/// Pure function used identically for both the authorization redirect and the
/// token exchange. An absent or empty origin yields an empty map, so no
/// `origin` parameter reaches the provider.
pub fn origin_params(origin: Option<&str>) -> AuthParams {
	let mut params = AuthParams::new();

	if let Some(value) = origin.filter(|value| !value.is_empty()) {
		params.insert("origin".into(), Origin::classify(value).as_str().into());
	}

	params
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn origin_literal_is_forwarded_verbatim() {
		let params = origin_params(Some("open-humans"));

		assert_eq!(params.get("origin").map(String::as_str), Some("open-humans"));
	}

	#[test]
	fn other_origins_map_to_external() {
		let params = origin_params(Some("anything-else"));

		assert_eq!(params.get("origin").map(String::as_str), Some("external"));
	}

	#[test]
	fn absent_origin_yields_empty_params() {
		assert!(origin_params(None).is_empty());
	}

	#[test]
	fn empty_origin_is_treated_as_absent() {
		assert!(origin_params(Some("")).is_empty());
	}

	#[test]
	fn classification_is_case_sensitive() {
		assert_eq!(Origin::classify("open-humans"), Origin::OpenHumans);
		assert_eq!(Origin::classify("Open-Humans"), Origin::External);
	}
}
