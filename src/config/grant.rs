// std
use std::str::FromStr;
// self
use crate::{_prelude::*, credentials::Secret, error::ConfigError};

/// OAuth 2.0 grant types understood by the token request engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Resource Owner Password Credentials grant.
	Password,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
	/// Authorization Code grant (the code comes from the redirect callback).
	AuthorizationCode,
	/// Refresh Token grant.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 `grant_type` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::Password => "password",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for GrantType {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"password" => Ok(GrantType::Password),
			"client_credentials" => Ok(GrantType::ClientCredentials),
			"authorization_code" => Ok(GrantType::AuthorizationCode),
			"refresh_token" => Ok(GrantType::RefreshToken),
			other => Err(ConfigError::UnsupportedGrant { grant: other.to_owned() }),
		}
	}
}

/// Grant-specific request parameters; exactly one grant is active per configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grant {
	/// Password grant; the username/password pair comes from the credentials source.
	Password,
	/// Client Credentials grant.
	ClientCredentials,
	/// Authorization Code grant.
	AuthorizationCode {
		/// Code returned to the redirect URI.
		code: String,
		/// Redirect URI used when requesting the code.
		redirect_uri: String,
	},
	/// Refresh Token grant.
	Refresh {
		/// Refresh token issued by a previous exchange.
		refresh_token: Secret,
	},
}
impl Grant {
	/// Builds an authorization code grant.
	pub fn authorization_code(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
		Self::AuthorizationCode { code: code.into(), redirect_uri: redirect_uri.into() }
	}

	/// Builds a refresh token grant.
	pub fn refresh(refresh_token: impl Into<String>) -> Self {
		Self::Refresh { refresh_token: Secret::new(refresh_token) }
	}

	/// Returns the grant type tag for this grant.
	pub const fn grant_type(&self) -> GrantType {
		match self {
			Grant::Password => GrantType::Password,
			Grant::ClientCredentials => GrantType::ClientCredentials,
			Grant::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Grant::Refresh { .. } => GrantType::RefreshToken,
		}
	}
}
