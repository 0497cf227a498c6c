pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Connection or auth failure. Fatal to the operation; never retried here.
	#[error("Engine unavailable: {message}")]
	EngineUnavailable { message: String },
	/// The engine rejected the query body. Carries the strategy that built it.
	#[error("Engine rejected the {strategy} query: {message}")]
	QueryExecution { strategy: &'static str, message: String },
	/// The response shape does not match the schema this layer queries for.
	/// Surfaced rather than degraded, since silently dropping aggregations
	/// would render inaccurate facet counts.
	#[error("Malformed engine response: {message}")]
	MalformedResponse { message: String },
}
impl Error {
	pub(crate) fn from_engine(err: shelf_engine::Error, strategy: &'static str) -> Self {
		match err {
			shelf_engine::Error::Rejected { status, reason } =>
				Self::QueryExecution { strategy, message: format!("{status}: {reason}") },
			shelf_engine::Error::Malformed { message } => Self::MalformedResponse { message },
			other => Self::EngineUnavailable { message: other.to_string() },
		}
	}
}
