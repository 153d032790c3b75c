pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("FAQ source error: {0}")]
	Store(#[from] faqbot_store::Error),
	#[error("Embedding service error: {source}")]
	Embedding { source: faqbot_providers::Error },
	#[error("Completion service error: {source}")]
	Generation { source: faqbot_providers::Error },
}
impl Error {
	pub(crate) fn embedding(source: faqbot_providers::Error) -> Self {
		Self::Embedding { source }
	}

	pub(crate) fn generation(source: faqbot_providers::Error) -> Self {
		Self::Generation { source }
	}

	/// Upstream failures (including timeouts) are degradable: the chat path
	/// answers with the configured fallback message instead of propagating.
	pub fn is_provider_failure(&self) -> bool {
		matches!(self, Self::Embedding { .. } | Self::Generation { .. })
	}
}
