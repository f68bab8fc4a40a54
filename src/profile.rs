//! Normalized member profile returned by [`user_profile`](crate::strategy::OpenHumansStrategy::user_profile).
//!
//! The provider's JSON document is mapped into a fixed, framework-agnostic
//! shape. Fields the normalization does not capture stay reachable through
//! [`Profile::parsed`], and the exact transport body is retained in
//! [`Profile::raw_body`].

// crates.io
use serde_json::Value as JsonValue;
// self
use crate::{_prelude::*, error::ParseError};

/// Constant provider identifier stamped on every profile.
pub const PROVIDER: &str = "open-humans";

/// Normalized Open Humans member profile.
///
/// Constructed fresh per fetch and immutable afterwards; the strategy never
/// persists profiles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
	/// Always [`PROVIDER`].
	pub provider: &'static str,
	/// Member identifier (`id` field; numeric identifiers are stringified).
	pub id: Option<String>,
	/// Member username (`username` field).
	pub username: Option<String>,
	/// Full display name (`name` field), when the member shares one.
	pub display_name: Option<String>,
	/// URL of the member's public profile (`url` field).
	pub profile_url: Option<String>,
	/// Proxied or contact email addresses, when exposed by the granted scopes.
	pub emails: Vec<String>,
	/// Exact response body as returned by the transport, unmodified.
	pub raw_body: String,
	/// Full parsed document for provider-specific fields the normalization skips.
	pub parsed: JsonValue,
}
impl Profile {
	/// Parses a raw profile response body and maps it into the normalized shape.
	///
	/// Malformed bodies propagate [`ParseError::Profile`]; the strategy never
	/// yields a partially-populated profile for undecodable payloads.
	pub(crate) fn from_response(raw_body: String) -> Result<Self, ParseError> {
		let deserializer = &mut serde_json::Deserializer::from_str(&raw_body);
		let parsed: JsonValue = serde_path_to_error::deserialize(deserializer)
			.map_err(|source| ParseError::Profile { source })?;

		Ok(Self::from_parts(raw_body, parsed))
	}

	fn from_parts(raw_body: String, parsed: JsonValue) -> Self {
		Self {
			provider: PROVIDER,
			id: string_field(&parsed, "id"),
			username: string_field(&parsed, "username"),
			display_name: string_field(&parsed, "name"),
			profile_url: string_field(&parsed, "url"),
			emails: email_fields(&parsed),
			raw_body,
			parsed,
		}
	}

	/// Looks up a provider-specific field the normalization does not capture.
	pub fn extra(&self, key: &str) -> Option<&JsonValue> {
		self.parsed.get(key)
	}
}

fn string_field(value: &JsonValue, key: &str) -> Option<String> {
	match value.get(key)? {
		JsonValue::String(text) => Some(text.clone()),
		JsonValue::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

fn email_fields(value: &JsonValue) -> Vec<String> {
	if let Some(JsonValue::Array(entries)) = value.get("emails") {
		return entries
			.iter()
			.filter_map(|entry| entry.as_str().map(str::to_owned))
			.collect();
	}

	string_field(value, "email").into_iter().collect()
}
