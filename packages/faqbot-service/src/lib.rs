pub mod chat;
pub mod list;
pub mod reload;
pub mod retrieve;

mod error;

pub use chat::{ChatRequest, ChatResponse, SourceRef};
pub use error::{Error, Result};
pub use list::{ListItem, ListResponse};
pub use reload::ReloadReport;
pub use retrieve::{RetrieveRequest, RetrieveResponse, RetrievedFaq};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use faqbot_config::{CompletionProviderConfig, Config, EmbeddingProviderConfig};
use faqbot_providers::{completion, embedding};
use faqbot_store::{FaqStore, FaqTable};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, faqbot_providers::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, faqbot_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
	) -> Self {
		Self { embedding, completion }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), completion: provider }
	}
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, faqbot_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, faqbot_providers::Result<String>> {
		Box::pin(completion::complete(cfg, messages))
	}
}

/// The request pipeline: embed the question, rank the FAQ table, compose a
/// grounded answer, optionally score it.
pub struct FaqService {
	pub cfg: Config,
	pub store: FaqStore,
	pub providers: Providers,
}
impl FaqService {
	/// Loads the FAQ table and embeds every question. Load failures are
	/// fatal here so a misconfigured source or provider never serves an
	/// empty table silently.
	pub async fn load(cfg: Config) -> Result<Self> {
		Self::load_with_providers(cfg, Providers::default()).await
	}

	pub async fn load_with_providers(cfg: Config, providers: Providers) -> Result<Self> {
		let table = build_table(&cfg, &providers).await?;

		Ok(Self { cfg, store: FaqStore::new(table), providers })
	}
}

pub(crate) async fn build_table(cfg: &Config, providers: &Providers) -> Result<FaqTable> {
	let mut entries = faqbot_store::load_entries(&cfg.faq.source, &cfg.faq)?;
	let questions: Vec<String> = entries.iter().map(|entry| entry.question.clone()).collect();
	let vectors = providers
		.embedding
		.embed(&cfg.providers.embedding, &questions)
		.await
		.map_err(Error::embedding)?;

	if vectors.len() != entries.len() {
		return Err(Error::Embedding {
			source: faqbot_providers::Error::InvalidResponse {
				message: format!(
					"Embedding provider returned {} vectors for {} questions.",
					vectors.len(),
					entries.len()
				),
			},
		});
	}

	for (entry, vector) in entries.iter_mut().zip(vectors) {
		entry.embedding = Some(vector);
	}

	tracing::info!(
		entries = entries.len(),
		embedding_version = %embedding_version(cfg),
		"Embedded FAQ table."
	);

	Ok(FaqTable { entries, embedding_version: embedding_version(cfg) })
}

/// Identifies which provider/model/dimensions produced a table's vectors.
/// Retrieval is only reproducible within one version.
pub fn embedding_version(cfg: &Config) -> String {
	format!(
		"{}:{}:{}",
		cfg.providers.embedding.provider_id,
		cfg.providers.embedding.model,
		cfg.providers.embedding.dimensions
	)
}
