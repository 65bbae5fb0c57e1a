//! Open-record token returned by the access-token and token-info endpoints.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

const REDACTED_FIELDS: [&str; 3] = ["access_token", "refresh_token", "id_token"];

/// Token payload exactly as the provider returned it.
///
/// Providers disagree on which fields they send (some omit `expires_in`, token-info endpoints
/// return claims instead of an access token), so no field is guaranteed. The accessors below
/// read the common RFC 6749 members when present; [`deserialize_into`](Self::deserialize_into)
/// maps the whole record onto a caller-defined struct.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(JsonMap<String, JsonValue>);
impl Token {
	/// Wraps a parsed JSON object.
	pub fn new(fields: JsonMap<String, JsonValue>) -> Self {
		Self(fields)
	}

	/// Returns a raw field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Returns the `access_token` member. Callers must avoid logging this string.
	pub fn access_token(&self) -> Option<&str> {
		self.str_field("access_token")
	}

	/// Returns the `token_type` member.
	pub fn token_type(&self) -> Option<&str> {
		self.str_field("token_type")
	}

	/// Returns the `refresh_token` member. Callers must avoid logging this string.
	pub fn refresh_token(&self) -> Option<&str> {
		self.str_field("refresh_token")
	}

	/// Returns the `scope` member.
	pub fn scope(&self) -> Option<&str> {
		self.str_field("scope")
	}

	/// Returns `expires_in` in seconds, accepting numbers and numeric strings.
	pub fn expires_in(&self) -> Option<u64> {
		match self.0.get("expires_in")? {
			JsonValue::Number(number) => number.as_u64(),
			JsonValue::String(text) => text.trim().parse().ok(),
			_ => None,
		}
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &JsonMap<String, JsonValue> {
		&self.0
	}

	/// Consumes the token and returns the underlying JSON object.
	pub fn into_inner(self) -> JsonMap<String, JsonValue> {
		self.0
	}

	/// Deserializes the record into a caller-defined shape.
	pub fn deserialize_into<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: DeserializeOwned,
	{
		serde_path_to_error::deserialize(JsonValue::Object(self.0.clone()))
	}

	fn str_field(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(JsonValue::as_str)
	}
}
impl From<JsonMap<String, JsonValue>> for Token {
	fn from(fields: JsonMap<String, JsonValue>) -> Self {
		Self(fields)
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in &self.0 {
			if REDACTED_FIELDS.contains(&key.as_str()) {
				map.entry(key, &"<redacted>");
			} else {
				map.entry(key, value);
			}
		}

		map.finish()
	}
}
