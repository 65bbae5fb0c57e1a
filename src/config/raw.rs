//! Flat, loosely-typed configuration record used for deserialization.

// self
use crate::{
	_prelude::*,
	config::{Grant, GrantType, OAuthConfig},
	credentials::{CredentialsSource, InlineCredentials, Secret},
	error::ConfigError,
};

/// Flat configuration record as it appears in a settings file.
///
/// Every grant-specific field is optional here; [`TryFrom`] into [`OAuthConfig`] picks the
/// grant from `grant_type`, requires the fields it needs, and rejects the fields that belong
/// to another grant.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOAuthConfig {
	/// RFC 6749 grant type tag.
	pub grant_type: String,
	/// Access-token endpoint URL.
	pub access_token_endpoint: String,
	/// Directory holding `client.json` and `user.json`.
	pub credentials_dir: Option<PathBuf>,
	/// Inline client identifier.
	pub client_id: Option<String>,
	/// Inline client secret.
	pub client_secret: Option<String>,
	/// Inline application username (password grant only).
	pub application_username: Option<String>,
	/// Inline application password (password grant only).
	pub application_password: Option<String>,
	/// Authorization code (authorization code grant only).
	pub code: Option<String>,
	/// Redirect URI (authorization code grant only).
	pub redirect_uri: Option<String>,
	/// Refresh token (refresh grant only).
	pub refresh_token: Option<String>,
	/// Requested scopes.
	pub scopes: Option<Vec<String>>,
	/// Extra form fields.
	pub body_params: Option<IndexMap<String, String>>,
	/// Extra query parameters for the access-token endpoint.
	pub query_params: Option<IndexMap<String, String>>,
}
impl TryFrom<RawOAuthConfig> for OAuthConfig {
	type Error = ConfigError;

	fn try_from(raw: RawOAuthConfig) -> Result<Self, Self::Error> {
		let grant_type = raw.grant_type.parse::<GrantType>()?;
		let access_token_endpoint = Url::parse(&raw.access_token_endpoint).map_err(|source| {
			ConfigError::InvalidEndpoint { endpoint: raw.access_token_endpoint.clone(), source }
		})?;
		let user_fields = [
			("application_username", raw.application_username.is_some()),
			("application_password", raw.application_password.is_some()),
		];
		let grant = match grant_type {
			GrantType::Password => {
				reject(
					grant_type,
					[
						("code", raw.code.is_some()),
						("redirect_uri", raw.redirect_uri.is_some()),
						("refresh_token", raw.refresh_token.is_some()),
					],
				)?;

				Grant::Password
			},
			GrantType::ClientCredentials => {
				reject(
					grant_type,
					[
						("code", raw.code.is_some()),
						("redirect_uri", raw.redirect_uri.is_some()),
						("refresh_token", raw.refresh_token.is_some()),
					],
				)?;
				reject(grant_type, user_fields)?;

				Grant::ClientCredentials
			},
			GrantType::AuthorizationCode => {
				reject(grant_type, [("refresh_token", raw.refresh_token.is_some())])?;
				reject(grant_type, user_fields)?;

				Grant::AuthorizationCode {
					code: require(grant_type, "code", raw.code)?,
					redirect_uri: require(grant_type, "redirect_uri", raw.redirect_uri)?,
				}
			},
			GrantType::RefreshToken => {
				reject(
					grant_type,
					[("code", raw.code.is_some()), ("redirect_uri", raw.redirect_uri.is_some())],
				)?;
				reject(grant_type, user_fields)?;

				Grant::Refresh {
					refresh_token: Secret::new(require(
						grant_type,
						"refresh_token",
						raw.refresh_token,
					)?),
				}
			},
		};
		let credentials = match raw.credentials_dir {
			Some(dir) => {
				if [
					&raw.client_id,
					&raw.client_secret,
					&raw.application_username,
					&raw.application_password,
				]
				.iter()
				.any(|value| value.is_some())
				{
					return Err(ConfigError::AmbiguousCredentialsSource);
				}

				CredentialsSource::Directory(dir)
			},
			None => CredentialsSource::Inline(InlineCredentials {
				client_id: require(grant_type, "client_id", raw.client_id)?,
				client_secret: Secret::new(require(grant_type, "client_secret", raw.client_secret)?),
				username: raw.application_username,
				password: raw.application_password.map(Secret::new),
			}),
		};
		let config = OAuthConfig {
			access_token_endpoint,
			credentials,
			grant,
			scopes: raw.scopes,
			body_params: raw.body_params,
			query_params: raw.query_params,
		};

		config.validate()?;

		Ok(config)
	}
}

fn reject<const N: usize>(
	grant: GrantType,
	fields: [(&'static str, bool); N],
) -> Result<(), ConfigError> {
	match fields.into_iter().find(|(_, present)| *present) {
		Some((field, _)) => Err(ConfigError::UnexpectedField { grant, field }),
		None => Ok(()),
	}
}

fn require(
	grant: GrantType,
	field: &'static str,
	value: Option<String>,
) -> Result<String, ConfigError> {
	value.ok_or(ConfigError::MissingField { grant, field })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn parse(value: JsonValue) -> Result<OAuthConfig, serde_json::Error> {
		serde_json::from_value(value)
	}

	#[test]
	fn deserializes_password_grant_with_directory() {
		let config = parse(serde_json::json!({
			"grant_type": "password",
			"access_token_endpoint": "https://auth.example/token",
			"credentials_dir": "/run/secrets/oauth",
			"scopes": ["uid", "cn"],
			"query_params": { "realm": "/services" }
		}))
		.expect("Password grant with directory should deserialize.");

		assert_eq!(config.grant, Grant::Password);
		assert_eq!(config.credentials, CredentialsSource::Directory("/run/secrets/oauth".into()));
		assert_eq!(config.scopes, Some(vec!["uid".to_owned(), "cn".to_owned()]));
	}

	#[test]
	fn deserializes_authorization_code_inline() {
		let config = parse(serde_json::json!({
			"grant_type": "authorization_code",
			"access_token_endpoint": "https://auth.example/token",
			"client_id": "id",
			"client_secret": "secret",
			"code": "abc",
			"redirect_uri": "https://app.example/cb"
		}))
		.expect("Authorization code grant should deserialize.");

		assert_eq!(config.grant, Grant::authorization_code("abc", "https://app.example/cb"));
		assert_eq!(
			config.credentials,
			CredentialsSource::Inline(InlineCredentials::new("id", "secret"))
		);
	}

	#[test]
	fn rejects_fields_of_another_grant() {
		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "client_credentials".into(),
			access_token_endpoint: "https://auth.example/token".into(),
			client_id: Some("id".into()),
			client_secret: Some("secret".into()),
			refresh_token: Some("refresh".into()),
			..Default::default()
		})
		.expect_err("Refresh token must not be accepted for client credentials.");

		assert!(matches!(
			err,
			ConfigError::UnexpectedField {
				grant: GrantType::ClientCredentials,
				field: "refresh_token"
			}
		));

		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "refresh_token".into(),
			access_token_endpoint: "https://auth.example/token".into(),
			client_id: Some("id".into()),
			client_secret: Some("secret".into()),
			refresh_token: Some("refresh".into()),
			application_username: Some("alice".into()),
			..Default::default()
		})
		.expect_err("User credentials belong to the password grant only.");

		assert!(matches!(err, ConfigError::UnexpectedField { field: "application_username", .. }));
	}

	#[test]
	fn rejects_ambiguous_and_incomplete_sources() {
		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "client_credentials".into(),
			access_token_endpoint: "https://auth.example/token".into(),
			credentials_dir: Some("/run/secrets".into()),
			client_id: Some("id".into()),
			..Default::default()
		})
		.expect_err("Directory and inline credentials must not be mixed.");

		assert!(matches!(err, ConfigError::AmbiguousCredentialsSource));

		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "password".into(),
			access_token_endpoint: "https://auth.example/token".into(),
			client_id: Some("id".into()),
			client_secret: Some("secret".into()),
			application_username: Some("alice".into()),
			..Default::default()
		})
		.expect_err("Inline password grant needs both user fields.");

		assert!(matches!(err, ConfigError::MissingUserCredentials));
	}

	#[test]
	fn rejects_unknown_grant_and_bad_endpoint() {
		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "implicit".into(),
			access_token_endpoint: "https://auth.example/token".into(),
			..Default::default()
		})
		.expect_err("Unknown grant tags must fail.");

		assert!(matches!(err, ConfigError::UnsupportedGrant { .. }));

		let err = OAuthConfig::try_from(RawOAuthConfig {
			grant_type: "client_credentials".into(),
			access_token_endpoint: "not a url".into(),
			..Default::default()
		})
		.expect_err("Unparseable endpoints must fail.");

		assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
	}

	#[test]
	fn unknown_keys_fail_deserialization() {
		let result = parse(serde_json::json!({
			"grant_type": "client_credentials",
			"access_token_endpoint": "https://auth.example/token",
			"client_id": "id",
			"client_secret": "secret",
			"client_assertion": "jwt"
		}));

		assert!(result.is_err());
	}
}
