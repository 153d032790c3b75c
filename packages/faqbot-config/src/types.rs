use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub faq: Faq,
	pub providers: Providers,
	pub retrieval: Retrieval,
	pub answer: Answer,
	#[serde(default)]
	pub evaluation: Evaluation,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Faq {
	/// CSV file with at least the question and answer columns; extra columns
	/// are ignored.
	pub source: PathBuf,
	#[serde(default = "default_question_column")]
	pub question_column: String,
	#[serde(default = "default_answer_column")]
	pub answer_column: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub completion: CompletionProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	#[serde(default = "default_batch_size")]
	pub batch_size: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CompletionProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	pub min_score: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Answer {
	pub max_docs: u32,
	#[serde(default = "default_fallback_message")]
	pub fallback_message: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Evaluation {
	pub mode: String,
}
impl Default for Evaluation {
	fn default() -> Self {
		Self { mode: "heuristic".to_string() }
	}
}

fn default_question_column() -> String {
	"question".to_string()
}

fn default_answer_column() -> String {
	"answer".to_string()
}

fn default_batch_size() -> u32 {
	16
}

fn default_fallback_message() -> String {
	"I'm sorry, I can't answer that right now. Please contact support for further assistance."
		.to_string()
}
