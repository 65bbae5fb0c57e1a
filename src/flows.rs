//! Token request engine: the client facade and the grant-specific operations it exposes.

pub mod authorization;
pub mod body;
pub mod common;

mod token_info;
mod token_request;

pub use authorization::*;
pub use body::*;

// self
use crate::{
	_prelude::*,
	http::TokenHttpClient,
	obs::{Logger, NoopLogger},
	reader::{CredentialReader, FileCredentialReader},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestGrantClient = GrantClient<ReqwestHttpClient>;

/// Issues token requests and token-info lookups against OAuth 2.0 providers.
///
/// The client owns only shared, immutable collaborators (transport, credential reader,
/// logger). Every call builds its credentials and request body from scratch, so a single
/// client can serve concurrent callers without coordination. Nothing is cached and no call is
/// retried; retry policy belongs to the caller and deadlines belong to the transport.
pub struct GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Reader used for [`CredentialsSource::Directory`](crate::credentials::CredentialsSource)
	/// sources.
	pub credential_reader: Arc<dyn CredentialReader>,
	/// Logging capability; [`NoopLogger`] unless replaced.
	pub logger: Arc<dyn Logger>,
}
impl<C> GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a client around the caller-provided transport, reading credential files from
	/// disk and logging nothing.
	pub fn with_http_client(http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			credential_reader: Arc::new(FileCredentialReader),
			logger: Arc::new(NoopLogger),
		}
	}

	/// Replaces the credential reader.
	pub fn with_credential_reader(mut self, reader: Arc<dyn CredentialReader>) -> Self {
		self.credential_reader = reader;

		self
	}

	/// Replaces the logger.
	pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
		self.logger = logger;

		self
	}
}
#[cfg(feature = "reqwest")]
impl GrantClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	///
	/// Use [`ReqwestHttpClient::with_timeout`] together with [`GrantClient::with_http_client`]
	/// when requests need a deadline.
	pub fn new() -> Self {
		Self::with_http_client(ReqwestHttpClient::default())
	}
}
#[cfg(feature = "reqwest")]
impl Default for GrantClient<ReqwestHttpClient> {
	fn default() -> Self {
		Self::new()
	}
}
impl<C> Clone for GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			credential_reader: self.credential_reader.clone(),
			logger: self.logger.clone(),
		}
	}
}
impl<C> Debug for GrantClient<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GrantClient").finish_non_exhaustive()
	}
}
