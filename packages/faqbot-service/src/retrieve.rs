use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use faqbot_domain::similarity::cosine_similarity;
use faqbot_store::FaqTable;

use crate::{Error, FaqService, Result};

#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
	pub query: String,
	#[serde(default)]
	pub top_k: Option<u32>,
	#[serde(default)]
	pub min_score: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
	pub items: Vec<RetrievedFaq>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RetrievedFaq {
	pub index: usize,
	pub question: String,
	pub answer: String,
	pub score: f32,
}

impl FaqService {
	pub async fn retrieve(&self, request: RetrieveRequest) -> Result<RetrieveResponse> {
		let query = request.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &[query.to_string()])
			.await
			.map_err(Error::embedding)?;
		let Some(query_vec) = vectors.into_iter().next() else {
			return Err(Error::Embedding {
				source: faqbot_providers::Error::InvalidResponse {
					message: "Embedding provider returned no vectors.".to_string(),
				},
			});
		};
		let table = self.store.snapshot();
		let top_k = request.top_k.unwrap_or(self.cfg.retrieval.top_k);
		let min_score = request.min_score.unwrap_or(self.cfg.retrieval.min_score);

		Ok(RetrieveResponse { items: rank_entries(&query_vec, &table, top_k, min_score) })
	}
}

/// Linear scan over the table snapshot: cosine score, filter below
/// `min_score`, sort descending, keep `top_k`. The sort is stable, so tied
/// scores preserve the original table order. An empty table yields an empty
/// result. Takes the snapshot by reference so an ANN index can replace the
/// scan without touching callers.
pub fn rank_entries(
	query_vec: &[f32],
	table: &FaqTable,
	top_k: u32,
	min_score: f32,
) -> Vec<RetrievedFaq> {
	let mut scored = Vec::new();

	for entry in &table.entries {
		let Some(embedding) = entry.embedding.as_ref() else {
			tracing::warn!(index = entry.index, "FAQ entry has no embedding; skipping.");

			continue;
		};
		let Some(score) = cosine_similarity(query_vec, embedding) else {
			tracing::warn!(index = entry.index, "FAQ embedding is unusable; skipping.");

			continue;
		};

		if score < min_score {
			continue;
		}

		scored.push(RetrievedFaq {
			index: entry.index,
			question: entry.question.clone(),
			answer: entry.answer.clone(),
			score,
		});
	}

	scored.sort_by(|a, b| cmp_score_desc(a.score, b.score));
	scored.truncate(top_k as usize);

	scored
}

fn cmp_score_desc(a: f32, b: f32) -> Ordering {
	b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
