pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider request timed out after {timeout_ms} ms.")]
	Timeout { timeout_ms: u64 },
	#[error(transparent)]
	Http(reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	/// Timeouts are bounded waits, not generic transport failures; keep them
	/// distinguishable for callers that log or degrade differently.
	pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
		if err.is_timeout() { Self::Timeout { timeout_ms } } else { Self::Http(err) }
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}
