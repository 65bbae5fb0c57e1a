//! Credential sources and the resolver that merges client and user credentials.
//!
//! Client credentials are always required. User credentials are only resolved for the
//! password grant. A [`CredentialsSource::Directory`] source reads `client.json` and
//! `user.json` through a [`CredentialReader`]; both reads are polled together (they overlap
//! whenever the reader's futures actually suspend) and the resolution fails as soon as either
//! of them does. Once a directory is configured there is
//! no fallback to inline values.

pub mod secret;

pub use secret::*;

// self
use crate::{
	_prelude::*,
	config::{GrantType, OAuthConfig},
	error::{ConfigError, CredentialSourceError},
	reader::{CredentialMap, CredentialReader},
};

/// File holding `client_id` and `client_secret`.
pub const CLIENT_FILE: &str = "client.json";
/// File holding `application_username` and `application_password`.
pub const USER_FILE: &str = "user.json";

/// Origin of client (and user) credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialsSource {
	/// Directory containing [`CLIENT_FILE`] and, for the password grant, [`USER_FILE`].
	Directory(PathBuf),
	/// Credentials supplied directly in configuration.
	Inline(InlineCredentials),
}

/// Credentials supplied directly in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Application username for the password grant.
	pub username: Option<String>,
	/// Application password for the password grant.
	pub password: Option<Secret>,
}
impl InlineCredentials {
	/// Creates inline client credentials without a user pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			username: None,
			password: None,
		}
	}

	/// Attaches the application username/password pair used by the password grant.
	pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
		self.username = Some(username.into());
		self.password = Some(Secret::new(password));

		self
	}
}

/// Client half of the resolved credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
}

/// User half of the resolved credentials (password grant only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserCredentials {
	/// Application username.
	pub application_username: String,
	/// Application password.
	pub application_password: Secret,
}

/// Merged client and user credentials used for a single token request.
///
/// Created fresh for every request and never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Application username, present for the password grant.
	pub application_username: Option<String>,
	/// Application password, present for the password grant.
	pub application_password: Option<Secret>,
}
impl ResolvedCredentials {
	/// Merges the disjoint client and user halves.
	pub fn merge(client: ClientCredentials, user: Option<UserCredentials>) -> Self {
		let (application_username, application_password) = match user {
			Some(user) => (Some(user.application_username), Some(user.application_password)),
			None => (None, None),
		};

		Self {
			client_id: client.client_id,
			client_secret: client.client_secret,
			application_username,
			application_password,
		}
	}
}

/// Resolves the credentials required by `config`.
///
/// User credentials are only looked up for the password grant; their absence is reported as
/// [`ConfigError::MissingUserCredentials`] for inline sources and as a
/// [`CredentialSourceError`] for directory sources.
pub async fn resolve(
	config: &OAuthConfig,
	reader: &dyn CredentialReader,
) -> Result<ResolvedCredentials> {
	let needs_user = config.grant_type() == GrantType::Password;

	match &config.credentials {
		CredentialsSource::Directory(dir) =>
			if needs_user {
				let (client, user) =
					futures::try_join!(read_client(reader, dir), read_user(reader, dir))?;

				Ok(ResolvedCredentials::merge(client, Some(user)))
			} else {
				Ok(ResolvedCredentials::merge(read_client(reader, dir).await?, None))
			},
		CredentialsSource::Inline(inline) => {
			let client = ClientCredentials {
				client_id: inline.client_id.clone(),
				client_secret: inline.client_secret.clone(),
			};
			let user = if needs_user {
				match (&inline.username, &inline.password) {
					(Some(username), Some(password)) => Some(UserCredentials {
						application_username: username.clone(),
						application_password: password.clone(),
					}),
					_ => return Err(ConfigError::MissingUserCredentials.into()),
				}
			} else {
				None
			};

			Ok(ResolvedCredentials::merge(client, user))
		},
	}
}

async fn read_client(
	reader: &dyn CredentialReader,
	dir: &Path,
) -> Result<ClientCredentials, CredentialSourceError> {
	let map = reader.read(dir, CLIENT_FILE).await?;
	let path = dir.join(CLIENT_FILE);

	Ok(ClientCredentials {
		client_id: string_field(&map, &path, "client_id")?,
		client_secret: Secret::new(string_field(&map, &path, "client_secret")?),
	})
}

async fn read_user(
	reader: &dyn CredentialReader,
	dir: &Path,
) -> Result<UserCredentials, CredentialSourceError> {
	let map = reader.read(dir, USER_FILE).await?;
	let path = dir.join(USER_FILE);

	Ok(UserCredentials {
		application_username: string_field(&map, &path, "application_username")?,
		application_password: Secret::new(string_field(&map, &path, "application_password")?),
	})
}

fn string_field(
	map: &CredentialMap,
	path: &Path,
	field: &'static str,
) -> Result<String, CredentialSourceError> {
	map.get(field)
		.and_then(JsonValue::as_str)
		.map(ToOwned::to_owned)
		.ok_or_else(|| CredentialSourceError::MissingField { path: path.to_path_buf(), field })
}
