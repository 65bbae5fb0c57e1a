//! OAuth 2.0 grant dispatch for services—resolve client and user credentials, build
//! grant-specific token requests, introspect tokens, and construct authorization URLs over any
//! async HTTP transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod reader;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::GrantClient,
		http::ReqwestHttpClient,
		obs::{LogLevel, Logger},
		reader::{CredentialReader, MemoryCredentialReader},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = GrantClient<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`GrantClient`] backed by an in-memory credential reader, a recording
	/// logger, and the reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		reader: MemoryCredentialReader,
	) -> (ReqwestTestClient, Arc<RecordingLogger>) {
		let logger = Arc::new(RecordingLogger::default());
		let reader: Arc<dyn CredentialReader> = Arc::new(reader);
		let client = ReqwestTestClient::with_http_client(test_reqwest_http_client())
			.with_credential_reader(reader)
			.with_logger(logger.clone());

		(client, logger)
	}

	/// [`Logger`] that keeps every entry in memory so tests can assert on side effects.
	#[derive(Debug, Default)]
	pub struct RecordingLogger(Mutex<Vec<(LogLevel, String)>>);
	impl RecordingLogger {
		/// Returns a snapshot of the recorded entries.
		pub fn entries(&self) -> Vec<(LogLevel, String)> {
			self.0.lock().clone()
		}

		/// Returns the messages recorded at `level`.
		pub fn messages(&self, level: LogLevel) -> Vec<String> {
			self.0
				.lock()
				.iter()
				.filter(|(entry_level, _)| *entry_level == level)
				.map(|(_, message)| message.clone())
				.collect()
		}
	}
	impl Logger for RecordingLogger {
		fn debug(&self, message: &str) {
			self.0.lock().push((LogLevel::Debug, message.to_owned()));
		}

		fn warn(&self, message: &str) {
			self.0.lock().push((LogLevel::Warn, message.to_owned()));
		}

		fn error(&self, message: &str, cause: &(dyn StdError + 'static)) {
			self.0.lock().push((LogLevel::Error, format!("{message}: {cause}")));
		}
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		path::{Path, PathBuf},
		pin::Pin,
		sync::Arc,
	};

	pub use indexmap::IndexMap;
	#[cfg(any(test, feature = "test"))] pub use parking_lot::Mutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
	#[cfg(any(test, feature = "test"))] pub use crate::error::Error;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
