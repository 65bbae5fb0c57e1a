//! Token request configuration: the active grant, the credentials source, and the optional
//! scope/body/query extensions.
//!
//! [`OAuthConfig`] is usually built in code through [`OAuthConfig::new`] and the `with_*`
//! setters, or deserialized from a flat record (see [`RawOAuthConfig`]) that is checked for
//! fields belonging to a different grant before it becomes a typed configuration.

/// Grant tags and the grant-specific request parameters.
pub mod grant;
/// Flat configuration record and its checked conversion.
pub mod raw;

pub use grant::*;
pub use raw::*;

// self
use crate::{
	_prelude::*,
	credentials::{CredentialsSource, InlineCredentials},
	error::ConfigError,
};

/// Complete description of a single token request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOAuthConfig")]
pub struct OAuthConfig {
	/// Provider endpoint that exchanges credentials for tokens.
	pub access_token_endpoint: Url,
	/// Where client (and user) credentials come from.
	pub credentials: CredentialsSource,
	/// Active grant and its parameters.
	pub grant: Grant,
	/// Scopes joined with a single space into the `scope` form field.
	pub scopes: Option<Vec<String>>,
	/// Extra form fields merged over the computed ones.
	pub body_params: Option<IndexMap<String, String>>,
	/// Query parameters appended to the access-token endpoint.
	pub query_params: Option<IndexMap<String, String>>,
}
impl OAuthConfig {
	/// Creates a configuration without scopes or extra parameters.
	pub fn new(grant: Grant, access_token_endpoint: Url, credentials: CredentialsSource) -> Self {
		Self {
			access_token_endpoint,
			credentials,
			grant,
			scopes: None,
			body_params: None,
			query_params: None,
		}
	}

	/// Sets the requested scopes.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Adds (or replaces) an extra form field.
	pub fn with_body_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.body_params.get_or_insert_with(IndexMap::new).insert(key.into(), value.into());

		self
	}

	/// Adds (or replaces) a query parameter for the access-token endpoint.
	pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query_params.get_or_insert_with(IndexMap::new).insert(key.into(), value.into());

		self
	}

	/// Returns the active grant type.
	pub fn grant_type(&self) -> GrantType {
		self.grant.grant_type()
	}

	/// Checks the configuration for problems detectable without any I/O.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let grant = self.grant_type();

		if !matches!(self.access_token_endpoint.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme {
				endpoint: self.access_token_endpoint.to_string(),
			});
		}

		match &self.grant {
			Grant::AuthorizationCode { code, redirect_uri } => {
				require_non_empty(grant, "code", code)?;
				require_non_empty(grant, "redirect_uri", redirect_uri)?;
			},
			Grant::Refresh { refresh_token } if refresh_token.is_empty() =>
				return Err(ConfigError::MissingField { grant, field: "refresh_token" }),
			Grant::Refresh { .. } => (),
			Grant::Password | Grant::ClientCredentials => (),
		}

		if let CredentialsSource::Inline(inline) = &self.credentials {
			require_non_empty(grant, "client_id", &inline.client_id)?;

			if grant == GrantType::Password && !has_user_credentials(inline) {
				return Err(ConfigError::MissingUserCredentials);
			}
		}

		Ok(())
	}
}

fn require_non_empty(grant: GrantType, field: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.is_empty() { Err(ConfigError::MissingField { grant, field }) } else { Ok(()) }
}

fn has_user_credentials(inline: &InlineCredentials) -> bool {
	let username = inline.username.as_deref().is_some_and(|value| !value.is_empty());
	let password = inline.password.as_ref().is_some_and(|value| !value.is_empty());

	username && password
}
