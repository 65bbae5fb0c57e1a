//! Wire-level helpers for the token and token-info endpoints: client authentication, response
//! parsing, and normalization of provider error bodies.

pub use oauth2;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{HttpResponse, http::StatusCode};
// self
use crate::{
	_prelude::*,
	error::{ErrorField, TokenError, TokenInfoError, TransportError},
	token::Token,
};

/// Media type of token request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Media type expected from both endpoints.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Builds the `Authorization: Basic` header value for the client credentials.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

/// Classifies an access-token endpoint response.
///
/// HTTP 200 yields the parsed [`Token`]; a 200 whose body is not a JSON object is a
/// [`TransportError::MalformedResponse`]. Every other status becomes a [`TokenError`] built
/// by [`token_error_from_body`].
pub fn parse_token_response(endpoint: &str, response: &HttpResponse) -> Result<Token> {
	let status = response.status();

	if status != StatusCode::OK {
		return Err(token_error_from_body(endpoint, status.as_u16(), response.body()).into());
	}

	parse_object(endpoint, status.as_u16(), response.body()).map(Token::new)
}

/// Classifies a token-info endpoint response.
///
/// The body is parsed as JSON regardless of the status; HTTP 200 yields the [`Token`], any other
/// status a [`TokenInfoError`] carrying the parsed body.
pub fn parse_token_info_response(endpoint: &str, response: &HttpResponse) -> Result<Token> {
	let status = response.status().as_u16();

	if response.status() == StatusCode::OK {
		return parse_object(endpoint, status, response.body()).map(Token::new);
	}

	let mut de = serde_json::Deserializer::from_slice(response.body());
	let data: JsonValue = serde_path_to_error::deserialize(&mut de).map_err(|source| {
		TransportError::MalformedResponse { endpoint: endpoint.to_owned(), status, source }
	})?;

	Err(TokenInfoError { status, data, endpoint: endpoint.to_owned() }.into())
}

/// Normalizes a provider error body into a [`TokenError`].
///
/// Bodies following RFC 6749 §5.2 contribute their `error` and `error_description` members.
/// Non-conformant bodies are kept whole in [`ErrorField::Body`], and bodies that are not JSON
/// at all surface their parse failure through [`ErrorField::Unparseable`].
pub fn token_error_from_body(endpoint: &str, status: u16, body: &[u8]) -> TokenError {
	let (error, error_description) = match serde_json::from_slice::<JsonValue>(body) {
		Ok(value) => {
			let error = match value.get("error") {
				Some(JsonValue::String(code)) if !code.is_empty() => ErrorField::Code(code.clone()),
				Some(other) if is_truthy(other) => ErrorField::Body(other.clone()),
				_ => ErrorField::Body(value.clone()),
			};
			let error_description =
				value.get("error_description").filter(|value| is_truthy(value)).map(|value| {
					match value {
						JsonValue::String(text) => text.clone(),
						other => other.to_string(),
					}
				});

			(error, error_description)
		},
		Err(e) => (ErrorField::Unparseable(e.to_string()), None),
	};

	TokenError { error, error_description, status, endpoint: endpoint.to_owned() }
}

fn parse_object(endpoint: &str, status: u16, body: &[u8]) -> Result<JsonMap<String, JsonValue>> {
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| {
		TransportError::MalformedResponse { endpoint: endpoint.to_owned(), status, source }.into()
	})
}

fn is_truthy(value: &JsonValue) -> bool {
	match value {
		JsonValue::Null => false,
		JsonValue::Bool(flag) => *flag,
		JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		JsonValue::String(text) => !text.is_empty(),
		JsonValue::Array(_) | JsonValue::Object(_) => true,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	const ENDPOINT: &str = "https://auth.example/token";

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be valid.");

		response
	}

	#[test]
	fn basic_auth_header_encodes_pair() {
		assert_eq!(basic_auth_header("client123", "s3cret"), "Basic Y2xpZW50MTIzOnMzY3JldA==");
	}

	#[test]
	fn ok_response_yields_token() {
		let token =
			parse_token_response(ENDPOINT, &response(200, r#"{"access_token":"abc","expires_in":3600}"#))
				.expect("HTTP 200 with a JSON object should yield a token.");

		assert_eq!(
			JsonValue::Object(token.into_inner()),
			json!({ "access_token": "abc", "expires_in": 3600 })
		);
	}

	#[test]
	fn ok_response_with_malformed_body_is_transport_error() {
		let err = parse_token_response(ENDPOINT, &response(200, "<html>oops</html>"))
			.expect_err("Non-JSON success bodies must fail.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::MalformedResponse { status: 200, .. })
		));
	}

	#[test]
	fn rfc_error_body_is_normalized() {
		let err = token_error_from_body(
			ENDPOINT,
			401,
			br#"{"error":"invalid_client","error_description":"bad secret"}"#,
		);

		assert_eq!(err.error, ErrorField::Code("invalid_client".into()));
		assert_eq!(err.error_description.as_deref(), Some("bad secret"));
		assert_eq!(err.status, 401);
		assert_eq!(err.endpoint, ENDPOINT);
	}

	#[test]
	fn non_conformant_error_body_falls_back_to_whole_body() {
		let err = token_error_from_body(ENDPOINT, 500, br#"{"message":"internal"}"#);

		assert_eq!(err.error, ErrorField::Body(json!({ "message": "internal" })));
		assert_eq!(err.error_description, None);

		let err = token_error_from_body(ENDPOINT, 400, br#"{"error":{"code":42}}"#);

		assert_eq!(err.error, ErrorField::Body(json!({ "code": 42 })));
	}

	#[test]
	fn unparseable_error_body_keeps_parse_failure() {
		let err = token_error_from_body(ENDPOINT, 502, b"Bad Gateway");

		assert!(matches!(err.error, ErrorField::Unparseable(ref message) if !message.is_empty()));
		assert_eq!(err.status, 502);
	}

	#[test]
	fn token_info_error_carries_parsed_body() {
		let err = parse_token_info_response(
			"https://auth.example/tokeninfo",
			&response(401, r#"{"error":"invalid_token"}"#),
		)
		.expect_err("Non-200 token info responses must fail.");

		match err {
			Error::TokenInfo(TokenInfoError { status, data, .. }) => {
				assert_eq!(status, 401);
				assert_eq!(data, json!({ "error": "invalid_token" }));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
