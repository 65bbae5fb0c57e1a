//! Logging capability injected into the client.

// self
use crate::_prelude::*;

/// Severity of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
	/// Successful exchanges.
	Debug,
	/// Failed token validation.
	Warn,
	/// Failed token requests.
	Error,
}

/// Logging capability with `debug`, `warn`, and `error` severities.
///
/// Every method defaults to a no-op, so implementors only override the severities they care
/// about. Logging never influences control flow.
pub trait Logger
where
	Self: Send + Sync,
{
	/// Records a debug-level message.
	fn debug(&self, _message: &str) {}

	/// Records a warn-level message.
	fn warn(&self, _message: &str) {}

	/// Records an error-level message together with its cause.
	fn error(&self, _message: &str, _cause: &(dyn StdError + 'static)) {}
}

/// Null-object logger used when the caller supplies none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;
impl Logger for NoopLogger {}

/// Logger that forwards entries to the `tracing` macros under the `oauth2_grant` target.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;
#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
	fn debug(&self, message: &str) {
		tracing::debug!(target: "oauth2_grant", "{message}");
	}

	fn warn(&self, message: &str) {
		tracing::warn!(target: "oauth2_grant", "{message}");
	}

	fn error(&self, message: &str, cause: &(dyn StdError + 'static)) {
		tracing::error!(target: "oauth2_grant", error = %cause, "{message}");
	}
}
