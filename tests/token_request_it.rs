#![cfg(all(feature = "reqwest", feature = "test"))]

// std
use std::net::TcpListener;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use oauth2_grant::{
	_preludet::*,
	error::{ErrorField, TokenError, TransportError},
	flows::BodyParameters,
	obs::LogLevel,
	reader::MemoryCredentialReader,
};

const CLIENT_ID: &str = "client123";
const CLIENT_SECRET: &str = "s3cret";
const BASIC_AUTH: &str = "Basic Y2xpZW50MTIzOnMzY3JldA==";

fn endpoint(server: &MockServer) -> Url {
	Url::parse(&server.url("/oauth2/access_token")).expect("Mock token endpoint should parse.")
}

fn password_body() -> BodyParameters {
	let mut body = BodyParameters::new();

	body.insert("grant_type".into(), "password".into());
	body.insert("username".into(), "robot".into());
	body.insert("password".into(), "hunter2".into());
	body.insert("scope".into(), "uid cn".into());

	body
}

#[tokio::test]
async fn success_returns_provider_json_and_logs_debug() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/access_token")
				.header("authorization", BASIC_AUTH)
				.header("content-type", "application/x-www-form-urlencoded")
				.header("accept", "application/json")
				.body("grant_type=password&username=robot&password=hunter2&scope=uid+cn");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": "abc",
				"token_type": "Bearer",
				"expires_in": 3600
			}));
		})
		.await;
	let (client, logger) = build_reqwest_test_client(MemoryCredentialReader::default());
	let endpoint = endpoint(&server);
	let token = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint, None)
		.await
		.expect("Token request should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token(), Some("abc"));
	assert_eq!(token.token_type(), Some("Bearer"));
	assert_eq!(token.expires_in(), Some(3600));
	assert_eq!(logger.messages(LogLevel::Debug), [format!("Successful request to {endpoint}.")]);
	assert!(logger.messages(LogLevel::Error).is_empty());
}

#[tokio::test]
async fn query_params_are_appended_to_endpoint() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/access_token")
				.query_param("realm", "/services")
				.query_param("tenant", "a b");
			then.status(200).json_body(json!({ "access_token": "abc" }));
		})
		.await;
	let (client, _) = build_reqwest_test_client(MemoryCredentialReader::default());
	let mut query = IndexMap::new();

	query.insert("realm".to_owned(), "/services".to_owned());
	query.insert("tenant".to_owned(), "a b".to_owned());

	client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint(&server), Some(&query))
		.await
		.expect("Token request with query params should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn rfc_error_body_is_normalized_and_logged() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(401).json_body(json!({
				"error": "invalid_client",
				"error_description": "Client authentication failed."
			}));
		})
		.await;
	let (client, logger) = build_reqwest_test_client(MemoryCredentialReader::default());
	let endpoint = endpoint(&server);
	let err = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint, None)
		.await
		.expect_err("HTTP 401 must fail.");

	match err {
		Error::Token(TokenError { error, error_description, status, endpoint: reported }) => {
			assert_eq!(error, ErrorField::Code("invalid_client".into()));
			assert_eq!(error_description.as_deref(), Some("Client authentication failed."));
			assert_eq!(status, 401);
			assert_eq!(reported, endpoint.as_str());
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let errors = logger.messages(LogLevel::Error);

	assert_eq!(errors.len(), 1);
	assert!(errors[0].starts_with(&format!("Unsuccessful request to {endpoint}")));
	assert!(!errors[0].contains(CLIENT_SECRET));
	assert!(logger.messages(LogLevel::Debug).is_empty());
}

#[tokio::test]
async fn non_conformant_error_body_is_kept_whole() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(500).json_body(json!({ "message": "internal" }));
		})
		.await;
	let (client, _) = build_reqwest_test_client(MemoryCredentialReader::default());
	let err = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint(&server), None)
		.await
		.expect_err("HTTP 500 must fail.");

	match err {
		Error::Token(TokenError { error, error_description, status, .. }) => {
			assert_eq!(error, ErrorField::Body(json!({ "message": "internal" })));
			assert_eq!(error_description, None);
			assert_eq!(status, 500);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn non_json_error_body_keeps_parse_failure() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(502).header("content-type", "text/html").body("<html>Bad Gateway</html>");
		})
		.await;
	let (client, _) = build_reqwest_test_client(MemoryCredentialReader::default());
	let err = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint(&server), None)
		.await
		.expect_err("HTTP 502 must fail.");

	assert!(matches!(
		err,
		Error::Token(TokenError { error: ErrorField::Unparseable(_), status: 502, .. })
	));
}

#[tokio::test]
async fn non_json_success_body_is_malformed_response() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(200).body("access_token=abc");
		})
		.await;
	let (client, logger) = build_reqwest_test_client(MemoryCredentialReader::default());
	let err = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint(&server), None)
		.await
		.expect_err("Non-JSON HTTP 200 must fail.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::MalformedResponse { status: 200, .. })
	));
	assert_eq!(logger.messages(LogLevel::Error).len(), 1);
}

#[tokio::test]
async fn connection_refused_wraps_cause_with_endpoint() {
	let port = TcpListener::bind("127.0.0.1:0")
		.and_then(|listener| listener.local_addr())
		.expect("An ephemeral port should be available.")
		.port();
	let endpoint = Url::parse(&format!("http://127.0.0.1:{port}/oauth2/access_token"))
		.expect("Closed endpoint should parse.");
	let (client, logger) = build_reqwest_test_client(MemoryCredentialReader::default());
	let err = client
		.request_token(&password_body(), CLIENT_ID, CLIENT_SECRET, &endpoint, None)
		.await
		.expect_err("Requests to a closed port must fail.");

	match &err {
		Error::Transport(TransportError::TokenRequest { endpoint: reported, .. }) => {
			assert_eq!(reported, endpoint.as_str());
			assert!(err.source().is_some(), "The transport cause must stay attached.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(
		err.to_string(),
		format!("Error requesting access token from {endpoint}.")
	);
	assert_eq!(logger.messages(LogLevel::Error).len(), 1);
}
