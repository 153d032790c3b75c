use std::time::Instant;

use serde::{Deserialize, Serialize};

use faqbot_domain::{
	evaluator::{self, Evaluation, EvaluationMethod},
	prompt,
};

use crate::{Error, FaqService, Result, retrieve};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
	pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
	pub answer: String,
	/// True when an upstream failure forced the configured fallback message.
	pub fallback: bool,
	pub quality: Option<Evaluation>,
	pub sources: Vec<SourceRef>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceRef {
	pub index: usize,
	pub question: String,
	pub score: f32,
}

struct Answered {
	text: String,
	context: String,
	sources: Vec<SourceRef>,
}

impl FaqService {
	/// Answers one user turn. Provider failures (embedding, completion,
	/// timeouts) degrade to the configured fallback message; they never
	/// propagate out of this call.
	pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
		let message = request.message.trim().to_string();

		if message.is_empty() {
			return Err(Error::InvalidRequest {
				message: "message must be non-empty.".to_string(),
			});
		}

		let started = Instant::now();
		let answered = match self.answer(&message).await {
			Ok(answered) => answered,
			Err(err) if err.is_provider_failure() => {
				tracing::error!(error = %err, "Answering failed; returning the fallback message.");

				return Ok(ChatResponse {
					answer: self.cfg.answer.fallback_message.clone(),
					fallback: true,
					quality: None,
					sources: Vec::new(),
				});
			},
			Err(err) => return Err(err),
		};
		let quality = self.evaluate(&message, &answered.text, &answered.context).await;

		tracing::info!(
			elapsed_ms = started.elapsed().as_millis() as u64,
			sources = answered.sources.len(),
			"Answered chat message."
		);

		Ok(ChatResponse {
			answer: answered.text,
			fallback: false,
			quality,
			sources: answered.sources,
		})
	}

	async fn answer(&self, message: &str) -> Result<Answered> {
		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &[message.to_string()])
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
		let ranked = retrieve::rank_entries(
			&query_vec,
			&table,
			self.cfg.retrieval.top_k,
			self.cfg.retrieval.min_score,
		);
		let max_docs = self.cfg.answer.max_docs as usize;
		let documents: Vec<String> = ranked
			.iter()
			.take(max_docs)
			.map(|item| format!("Q: {}\nA: {}", item.question, item.answer))
			.collect();
		let context = prompt::build_context(&documents);
		let messages = [
			serde_json::json!({ "role": "system", "content": prompt::ANSWER_SYSTEM_PROMPT }),
			serde_json::json!({
				"role": "user",
				"content": prompt::build_user_prompt(message, &context),
			}),
		];
		let text = self
			.providers
			.completion
			.complete(&self.cfg.providers.completion, &messages)
			.await
			.map_err(Error::generation)?;
		let sources = ranked
			.iter()
			.take(max_docs)
			.map(|item| SourceRef {
				index: item.index,
				question: item.question.clone(),
				score: item.score,
			})
			.collect();

		Ok(Answered { text, context, sources })
	}

	/// Best-effort quality scoring. Runs after the answer exists and can
	/// only attach or omit a score, never fail the chat.
	async fn evaluate(&self, query: &str, response: &str, context: &str) -> Option<Evaluation> {
		match self.cfg.evaluation.mode.as_str() {
			"off" => None,
			"model" => match self.evaluate_with_model(query, response, context).await {
				Some(evaluation) => Some(evaluation),
				None => {
					tracing::warn!("Model evaluation failed; falling back to heuristic scoring.");

					Some(evaluator::evaluate_heuristic(query, response, context))
				},
			},
			_ => Some(evaluator::evaluate_heuristic(query, response, context)),
		}
	}

	async fn evaluate_with_model(
		&self,
		query: &str,
		response: &str,
		context: &str,
	) -> Option<Evaluation> {
		// Score at temperature zero so repeated evaluations agree.
		let mut cfg = self.cfg.providers.completion.clone();

		cfg.temperature = 0.0;

		let messages = [serde_json::json!({
			"role": "user",
			"content": evaluator::build_evaluation_prompt(query, response, context),
		})];
		let reply = match self.providers.completion.complete(&cfg, &messages).await {
			Ok(reply) => reply,
			Err(err) => {
				tracing::warn!(error = %err, "Evaluator completion call failed.");

				return None;
			},
		};
		let scores = evaluator::parse_model_scores(&reply)?;

		Some(Evaluation { scores, reasons: Vec::new(), method: EvaluationMethod::Model })
	}
}
