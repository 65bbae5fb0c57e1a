//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`TokenHttpClient`] and hand out an [`AsyncHttpClient`] handle per exchange.
//! 2. Return transport failures as [`HttpClientError`]; the client wraps them with the endpoint.
//! 3. Pass the transport to [`GrantClient::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_grant::{
	config::{Grant, OAuthConfig},
	credentials::{CredentialsSource, InlineCredentials},
	error::{Error, TransportError},
	flows::GrantClient,
	http::TokenHttpClient,
	oauth::oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client: GrantClient<OfflineHttpClient> = GrantClient::with_http_client(OfflineHttpClient);
	let config = OAuthConfig::new(
		Grant::ClientCredentials,
		Url::parse("https://provider.example.com/token")?,
		CredentialsSource::Inline(InlineCredentials::new("demo-client", "demo-secret")),
	);

	match client.get_access_token(&config).await {
		Err(Error::Transport(TransportError::TokenRequest { endpoint, source })) => {
			println!("Token request to {endpoint} failed: {source}.");
		},
		Err(e) => return Err(e.into()),
		Ok(_) => println!("Unexpected token from an offline transport."),
	}

	Ok(())
}

#[derive(Debug)]
struct OfflineError;
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Network is unreachable.")
	}
}
impl StdError for OfflineError {}

/// Transport that never reaches the network.
#[derive(Clone, Copy, Debug)]
struct OfflineHttpClient;
impl TokenHttpClient for OfflineHttpClient {
	type Handle = OfflineHandle;
	type TransportError = OfflineError;

	fn handle(&self) -> Self::Handle {
		OfflineHandle
	}
}

struct OfflineHandle;
impl<'c> AsyncHttpClient<'c> for OfflineHandle {
	type Error = HttpClientError<OfflineError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let uri = request.uri().to_string();

		Box::pin(async move {
			println!("Dropping request to {uri}.");

			Err(HttpClientError::Reqwest(Box::new(OfflineError)))
		})
	}
}
