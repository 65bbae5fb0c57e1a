//! Access-token requests: full grant dispatch and direct requests with a caller-built body.

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	config::OAuthConfig,
	credentials,
	error::{ConfigError, TransportError},
	flows::{BodyParameters, GrantClient, body, common},
	http::TokenHttpClient,
	oauth,
	obs::{Operation, OperationSpan},
	token::Token,
};

impl<C> GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Obtains a token for the grant described by `config`.
	///
	/// The configuration is validated first, then credentials are resolved (from the directory
	/// source or inline fields), the grant-specific form body is built, and the request is sent
	/// to the access-token endpoint. Every call starts from scratch: nothing is cached between
	/// calls and failures are never retried.
	pub async fn get_access_token(&self, config: &OAuthConfig) -> Result<Token> {
		let operation = Operation::from(config.grant_type());
		let span =
			OperationSpan::start(operation, "get_access_token", &config.access_token_endpoint);
		let result = span
			.instrument(async move {
				config.validate()?;

				let credentials =
					credentials::resolve(config, self.credential_reader.as_ref()).await?;
				let body = body::build_body(config, &credentials)?;

				self.send_token_request(
					&body,
					&credentials.client_id,
					credentials.client_secret.expose(),
					&config.access_token_endpoint,
					config.query_params.as_ref(),
				)
				.await
			})
			.await;

		span.finish(&result);

		result
	}

	/// Posts a caller-built form body to `endpoint`, authenticating with HTTP Basic.
	///
	/// `query_params`, when present, are appended to the endpoint URL. HTTP 200 yields the
	/// parsed [`Token`]; other statuses surface as [`TokenError`](crate::error::TokenError) and
	/// network failures as [`TransportError::TokenRequest`]. Success is logged at debug level and
	/// failure at error level, with the endpoint (never the secrets) in the message.
	pub async fn request_token(
		&self,
		body: &BodyParameters,
		client_id: &str,
		client_secret: &str,
		endpoint: &Url,
		query_params: Option<&IndexMap<String, String>>,
	) -> Result<Token> {
		let span = OperationSpan::start(Operation::TokenRequest, "request_token", endpoint);
		let result = span
			.instrument(self.send_token_request(
				body,
				client_id,
				client_secret,
				endpoint,
				query_params,
			))
			.await;

		span.finish(&result);

		result
	}

	async fn send_token_request(
		&self,
		body: &BodyParameters,
		client_id: &str,
		client_secret: &str,
		endpoint: &Url,
		query_params: Option<&IndexMap<String, String>>,
	) -> Result<Token> {
		let result = self.exchange(body, client_id, client_secret, endpoint, query_params).await;

		match &result {
			Ok(_) => self.logger.debug(&format!("Successful request to {endpoint}.")),
			Err(e) => self.logger.error(&format!("Unsuccessful request to {endpoint}"), e),
		}

		result
	}

	async fn exchange(
		&self,
		body: &BodyParameters,
		client_id: &str,
		client_secret: &str,
		endpoint: &Url,
		query_params: Option<&IndexMap<String, String>>,
	) -> Result<Token> {
		let request = Request::builder()
			.method(Method::POST)
			.uri(common::token_request_url(endpoint, query_params))
			.header(AUTHORIZATION, oauth::basic_auth_header(client_id, client_secret))
			.header(CONTENT_TYPE, oauth::FORM_CONTENT_TYPE)
			.header(ACCEPT, oauth::JSON_CONTENT_TYPE)
			.body(body::encode_form(body).into_bytes())
			.map_err(ConfigError::from)?;
		let handle = self.http_client.handle();
		let response = handle
			.call(request)
			.await
			.map_err(|e| TransportError::token_request(endpoint.as_str(), e))?;

		oauth::parse_token_response(endpoint.as_str(), &response)
	}
}
