//! Grant-specific form bodies for the access-token endpoint.

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	config::{Grant, OAuthConfig},
	credentials::ResolvedCredentials,
	error::ConfigError,
};

/// Ordered form fields sent to the access-token endpoint.
///
/// Keys are unique; inserting an existing key replaces its value in place, so field order is
/// stable across requests.
pub type BodyParameters = IndexMap<String, String>;

/// Builds the form body for the grant carried by `config`.
///
/// `grant_type` always comes first, followed by the grant-specific fields, then `scope` (the
/// configured scopes joined by a single space) when scopes are configured. Configured
/// `body_params` are merged last and override any computed field of the same name.
pub fn build_body(
	config: &OAuthConfig,
	credentials: &ResolvedCredentials,
) -> Result<BodyParameters, ConfigError> {
	let mut body = BodyParameters::new();

	body.insert("grant_type".into(), config.grant_type().as_str().into());

	match &config.grant {
		Grant::Password => {
			let (Some(username), Some(password)) =
				(&credentials.application_username, &credentials.application_password)
			else {
				return Err(ConfigError::MissingUserCredentials);
			};

			body.insert("username".into(), username.clone());
			body.insert("password".into(), password.expose().to_owned());
		},
		Grant::ClientCredentials => (),
		Grant::AuthorizationCode { code, redirect_uri } => {
			body.insert("code".into(), code.clone());
			body.insert("redirect_uri".into(), redirect_uri.clone());
		},
		Grant::Refresh { refresh_token } => {
			body.insert("refresh_token".into(), refresh_token.expose().to_owned());
		},
	}

	if let Some(scopes) = &config.scopes {
		body.insert("scope".into(), scopes.join(" "));
	}
	if let Some(extra) = &config.body_params {
		for (key, value) in extra {
			body.insert(key.clone(), value.clone());
		}
	}

	Ok(body)
}

/// Serializes the body as `application/x-www-form-urlencoded`.
pub fn encode_form(body: &BodyParameters) -> String {
	Serializer::new(String::new()).extend_pairs(body.iter()).finish()
}
