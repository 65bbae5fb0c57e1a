//! Demonstrates the password grant with credentials read from a directory (kept in memory
//! here), followed by a token-info lookup of the issued token.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oauth2_grant::{
	config::{Grant, OAuthConfig},
	credentials::{CLIENT_FILE, CredentialsSource, USER_FILE},
	flows::ReqwestGrantClient,
	reader::MemoryCredentialReader,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/access_token")
				.query_param("realm", "/services")
				.body("grant_type=password&username=robot&password=hunter2&scope=uid+cn");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":28800}",
			);
		})
		.await;
	let info_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth2/tokeninfo").query_param("access_token", "demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"uid\":\"robot\",\"scope\":[\"uid\",\"cn\"],\"expires_in\":28799}");
		})
		.await;
	let reader = MemoryCredentialReader::default()
		.with_file(
			"/meta/credentials",
			CLIENT_FILE,
			serde_json::json!({ "client_id": "demo-client", "client_secret": "demo-secret" }),
		)
		.with_file(
			"/meta/credentials",
			USER_FILE,
			serde_json::json!({ "application_username": "robot", "application_password": "hunter2" }),
		);
	let client = ReqwestGrantClient::new().with_credential_reader(Arc::new(reader));
	let config = OAuthConfig::new(
		Grant::Password,
		Url::parse(&server.url("/oauth2/access_token"))?,
		CredentialsSource::Directory("/meta/credentials".into()),
	)
	.with_scopes(["uid", "cn"])
	.with_query_param("realm", "/services");
	let token = client.get_access_token(&config).await?;

	println!("Token expires in {:?} seconds.", token.expires_in());

	let access_token = token.access_token().unwrap_or_default();
	let info = client.token_info(&Url::parse(&server.url("/oauth2/tokeninfo"))?, access_token).await?;

	println!("Token belongs to {:?}.", info.get("uid"));

	token_mock.assert_async().await;
	info_mock.assert_async().await;

	Ok(())
}
