pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Engine unreachable: {message}")]
	Unavailable { message: String },
	#[error("Engine rejected the query ({status}): {reason}")]
	Rejected { status: u16, reason: String },
	#[error("Engine response is malformed: {message}")]
	Malformed { message: String },
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			Self::Malformed { message: err.to_string() }
		} else {
			// Connect failures, timeouts, and client construction issues all
			// leave the engine out of reach from this layer's perspective.
			Self::Unavailable { message: err.to_string() }
		}
	}
}
