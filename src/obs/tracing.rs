// self
use crate::{
	_prelude::*,
	obs::{self, Operation, Outcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Lifecycle of one client operation against one endpoint.
///
/// [`start`](Self::start) counts the attempt, [`instrument`](Self::instrument) runs the work
/// inside the `oauth2_grant.operation` span (fields `operation`, `stage`, `endpoint`, and
/// `outcome` once known), and [`finish`](Self::finish) records the outcome on both the span and
/// the metrics counter. The endpoint never carries secrets: access tokens are appended to
/// token-info URLs only after the span is built.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	operation: Operation,
	endpoint: String,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens the span for `operation` at `stage` and counts the attempt.
	pub fn start(operation: Operation, stage: &'static str, endpoint: &Url) -> Self {
		obs::record_outcome(operation, Outcome::Attempt);

		Self {
			operation,
			endpoint: endpoint.to_string(),
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"oauth2_grant.operation",
				operation = operation.as_str(),
				stage,
				endpoint = endpoint.as_str(),
				outcome = tracing::field::Empty,
			),
		}
	}

	/// Operation being observed.
	pub fn operation(&self) -> Operation {
		self.operation
	}

	/// Endpoint the operation talks to.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records the outcome of `result` and returns the outcome label.
	pub fn finish<T>(&self, result: &Result<T>) -> Outcome {
		let outcome = if result.is_ok() { Outcome::Success } else { Outcome::Failure };

		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());

		obs::record_outcome(self.operation, outcome);

		outcome
	}
}
