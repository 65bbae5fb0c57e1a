//! Logging and optional observability helpers.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `oauth2_grant.operation` with the `operation` and
//!   `stage` fields, and to use [`TracingLogger`].
//! - Enable `metrics` to increment the `oauth2_grant_request_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod logger;
mod metrics;
mod tracing;

pub use logger::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, config::GrantType};

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Full password grant (resolve + request).
	Password,
	/// Full client credentials grant (resolve + request).
	ClientCredentials,
	/// Full authorization code grant (resolve + request).
	AuthorizationCode,
	/// Full refresh token grant (resolve + request).
	Refresh,
	/// Direct token request with a caller-built body.
	TokenRequest,
	/// Token introspection.
	TokenInfo,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Password => "password",
			Operation::ClientCredentials => "client_credentials",
			Operation::AuthorizationCode => "authorization_code",
			Operation::Refresh => "refresh",
			Operation::TokenRequest => "token_request",
			Operation::TokenInfo => "token_info",
		}
	}
}
impl From<GrantType> for Operation {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::Password => Operation::Password,
			GrantType::ClientCredentials => Operation::ClientCredentials,
			GrantType::AuthorizationCode => Operation::AuthorizationCode,
			GrantType::RefreshToken => Operation::Refresh,
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a public operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
