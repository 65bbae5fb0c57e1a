//! Token introspection against a provider token-info endpoint.

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{Method, Request, header::ACCEPT},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	flows::{GrantClient, common},
	http::TokenHttpClient,
	oauth,
	obs::{Operation, OperationSpan},
	token::Token,
};

impl<C> GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Looks up `access_token` at `token_info_url` with a `GET ...?access_token=<token>`.
	///
	/// HTTP 200 yields the provider's JSON record; any other status yields a
	/// [`TokenInfoError`](crate::error::TokenInfoError) carrying the parsed body. Failures are
	/// logged at warn level and still returned to the caller.
	pub async fn token_info(&self, token_info_url: &Url, access_token: &str) -> Result<Token> {
		let span = OperationSpan::start(Operation::TokenInfo, "token_info", token_info_url);
		let result = span.instrument(self.lookup(token_info_url, access_token)).await;

		match &result {
			Ok(_) => self.logger.debug(&format!("Successful request to {token_info_url}.")),
			Err(e) => self.logger.warn(&format!("Error validating token via {token_info_url}: {e}")),
		}

		span.finish(&result);

		result
	}

	async fn lookup(&self, token_info_url: &Url, access_token: &str) -> Result<Token> {
		let url = common::append_query(
			token_info_url.as_str(),
			&common::encode_query([("access_token", access_token)]),
		);
		let request = Request::builder()
			.method(Method::GET)
			.uri(url)
			.header(ACCEPT, oauth::JSON_CONTENT_TYPE)
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let handle = self.http_client.handle();
		let response = handle
			.call(request)
			.await
			.map_err(|e| TransportError::token_info_unreachable(token_info_url.as_str(), e))?;

		oauth::parse_token_info_response(token_info_url.as_str(), &response)
	}
}
