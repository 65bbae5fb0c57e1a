//! Demonstrates building an authorization URL and exchanging the returned code through the
//! authorization code grant with inline client credentials.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use indexmap::IndexMap;
use url::Url;
// self
use oauth2_grant::{
	config::{Grant, OAuthConfig},
	credentials::{CredentialsSource, InlineCredentials},
	flows::{self, ReqwestGrantClient},
};

const REDIRECT_URI: &str = "https://app.example.com/callback";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let mut extra = IndexMap::new();

	extra.insert("scope".to_owned(), "openid profile".to_owned());
	extra.insert("state".to_owned(), "opaque-state".to_owned());

	let authorize_url =
		flows::authorization_url(&server.url("/authorize"), REDIRECT_URI, "demo-client", Some(&extra));

	println!("Send the user agent to {authorize_url}.");

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").body(
				"grant_type=authorization_code&code=demo-code&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback",
			);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh\"}");
		})
		.await;
	let config = OAuthConfig::new(
		Grant::authorization_code("demo-code", REDIRECT_URI),
		Url::parse(&server.url("/token"))?,
		CredentialsSource::Inline(InlineCredentials::new("demo-client", "demo-secret")),
	);
	let token = ReqwestGrantClient::new().get_access_token(&config).await?;

	println!("Refresh token issued: {}.", token.refresh_token().is_some());

	token_mock.assert_async().await;

	Ok(())
}
