//! Crate-level error types shared across configuration, credential resolution, and the token
//! endpoints.

// self
use crate::{_prelude::*, config::GrantType};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential file missing or unreadable.
	#[error(transparent)]
	CredentialSource(#[from] CredentialSourceError),
	/// Network failure or malformed provider response.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint rejected the request.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Token-info endpoint rejected the token.
	#[error(transparent)]
	TokenInfo(#[from] TokenInfoError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint URL cannot be parsed.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Offending endpoint string.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint URL does not use HTTP(S).
	#[error("Endpoint `{endpoint}` must use the http or https scheme.")]
	UnsupportedScheme {
		/// Offending endpoint string.
		endpoint: String,
	},

	/// Grant tag is not one of the supported grant types.
	#[error("Grant type `{grant}` is not supported.")]
	UnsupportedGrant {
		/// Raw grant tag supplied by the caller.
		grant: String,
	},
	/// A field required by the grant is absent or empty.
	#[error("The {grant} grant requires a non-empty `{field}`.")]
	MissingField {
		/// Grant being configured.
		grant: GrantType,
		/// Missing field name.
		field: &'static str,
	},
	/// A field that belongs to another grant type was supplied.
	#[error("Field `{field}` is not allowed for the {grant} grant.")]
	UnexpectedField {
		/// Grant being configured.
		grant: GrantType,
		/// Foreign field name.
		field: &'static str,
	},
	/// Both a credentials directory and inline client credentials were supplied.
	#[error("Configure either `credentials_dir` or inline client credentials, not both.")]
	AmbiguousCredentialsSource,
	/// Password grant lacks a resolvable username/password pair.
	#[error("The password grant requires an application username and password.")]
	MissingUserCredentials,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while reading a credential file.
#[derive(Debug, ThisError)]
pub enum CredentialSourceError {
	/// Credential file does not exist.
	#[error("Credential file {} was not found.", path.display())]
	NotFound {
		/// Path that was looked up.
		path: PathBuf,
	},
	/// Credential file exists but could not be read.
	#[error("Failed to read credential file {}.", path.display())]
	Io {
		/// Path that was read.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Credential file is not a JSON object.
	#[error("Failed to parse credential file {}.", path.display())]
	Parse {
		/// Path that was parsed.
		path: PathBuf,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Credential file lacks a required string field.
	#[error("Credential file {} is missing the `{field}` field.", path.display())]
	MissingField {
		/// Path of the incomplete file.
		path: PathBuf,
		/// Missing field name.
		field: &'static str,
	},
}

/// Transport-level failures (network, malformed payloads).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The token request never completed.
	#[error("Error requesting access token from {endpoint}.")]
	TokenRequest {
		/// Access-token endpoint that was called.
		endpoint: String,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// The token-info endpoint could not be reached.
	#[error("Token-info endpoint {endpoint} is not reachable.")]
	TokenInfoUnreachable {
		/// Token-info endpoint that was called.
		endpoint: String,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a body that is not a JSON object.
	#[error("Endpoint {endpoint} returned malformed JSON (HTTP {status}).")]
	MalformedResponse {
		/// Endpoint that produced the payload.
		endpoint: String,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TransportError {
	/// Wraps a failed token request together with the endpoint it targeted.
	pub fn token_request(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::TokenRequest { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Wraps an unreachable token-info endpoint failure.
	pub fn token_info_unreachable(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::TokenInfoUnreachable { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

/// Provider-supplied `error` value normalized from a token endpoint failure.
///
/// RFC 6749 §5.2 asks for a string `error` member, but non-conformant providers are tolerated
/// by keeping whatever they sent.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorField {
	/// String `error` member of an RFC 6749 §5.2 error body.
	Code(String),
	/// Whole response body (or its non-string `error` member) when the body does not follow
	/// RFC 6749 §5.2.
	Body(JsonValue),
	/// The error body was not JSON; carries the parse failure message.
	Unparseable(String),
}
impl ErrorField {
	/// Returns the OAuth error code when the provider sent one.
	pub fn code(&self) -> Option<&str> {
		match self {
			Self::Code(code) => Some(code),
			_ => None,
		}
	}
}
impl Display for ErrorField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Code(code) => f.write_str(code),
			Self::Body(body) => write!(f, "{body}"),
			Self::Unparseable(message) => write!(f, "unparseable error body ({message})"),
		}
	}
}

/// Token endpoint responded with a non-200 status.
#[derive(Clone, Debug, ThisError)]
#[error("Error requesting access token from {endpoint}: HTTP {status}, {error}.")]
pub struct TokenError {
	/// Normalized `error` field.
	pub error: ErrorField,
	/// Provider-supplied `error_description`, if any.
	pub error_description: Option<String>,
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Access-token endpoint that was called.
	pub endpoint: String,
}

/// Token-info endpoint responded with a non-200 status.
#[derive(Clone, Debug, ThisError)]
#[error("Token-info endpoint {endpoint} rejected the token with HTTP {status}.")]
pub struct TokenInfoError {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Parsed response body.
	pub data: JsonValue,
	/// Token-info endpoint that was called.
	pub endpoint: String,
}
