//! Flow provider error types.

use super::Year;

/// Errors from constructing or querying a flow provider.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
	/// No data for the requested year.
	#[error("no flow data for {year}: {reason}")]
	DataNotFound {
		/// The requested year.
		year: Year,
		/// Why the lookup failed.
		reason: String,
	},

	/// The data source could not be parsed.
	#[error("failed to parse flow data: {0}")]
	Parse(#[from] serde_json::Error),

	/// The data parsed but violates a data-integrity rule.
	#[error("flow data integrity error: {0}")]
	Integrity(String),

	/// Invalid provider configuration.
	#[error("invalid configuration: {0}")]
	Config(String),

	/// The data source could not be read.
	#[error("failed to read flow data: {0}")]
	Io(#[from] std::io::Error),
}

/// Result alias for flow provider operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors reported by a simulation result source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	/// The source has no result for the year.
	#[error("no simulation result for {0}")]
	NotFound(Year),

	/// A read failed in a way that may succeed when retried.
	#[error("transient read failure: {0}")]
	Transient(String),

	/// The result exists but cannot be decoded.
	#[error("malformed simulation result: {0}")]
	Malformed(String),
}

impl SourceError {
	/// Whether retrying the read could help.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Transient(_))
	}
}
