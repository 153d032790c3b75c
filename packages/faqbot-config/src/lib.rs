mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Answer, CompletionProviderConfig, Config, EmbeddingProviderConfig, Evaluation, Faq, Providers,
	Retrieval, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.faq.source.as_os_str().is_empty() {
		return Err(Error::Validation { message: "faq.source must be non-empty.".to_string() });
	}
	if cfg.faq.question_column.trim().is_empty() {
		return Err(Error::Validation {
			message: "faq.question_column must be non-empty.".to_string(),
		});
	}
	if cfg.faq.answer_column.trim().is_empty() {
		return Err(Error::Validation {
			message: "faq.answer_column must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.batch_size == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.batch_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.completion.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.completion.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.providers.completion.temperature) {
		return Err(Error::Validation {
			message: "providers.completion.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.providers.completion.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.completion.max_tokens must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("completion", &cfg.providers.completion.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if !cfg.retrieval.min_score.is_finite() {
		return Err(Error::Validation {
			message: "retrieval.min_score must be a finite number.".to_string(),
		});
	}
	if !(-1.0..=1.0).contains(&cfg.retrieval.min_score) {
		return Err(Error::Validation {
			message: "retrieval.min_score must be in the range -1.0-1.0.".to_string(),
		});
	}
	if cfg.answer.max_docs == 0 {
		return Err(Error::Validation {
			message: "answer.max_docs must be greater than zero.".to_string(),
		});
	}
	if cfg.answer.fallback_message.trim().is_empty() {
		return Err(Error::Validation {
			message: "answer.fallback_message must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.evaluation.mode.as_str(), "off" | "heuristic" | "model") {
		return Err(Error::Validation {
			message: "evaluation.mode must be one of off, heuristic, or model.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.faq.question_column.trim().is_empty() {
		cfg.faq.question_column = "question".to_string();
	}
	if cfg.faq.answer_column.trim().is_empty() {
		cfg.faq.answer_column = "answer".to_string();
	}
	if cfg.evaluation.mode.trim().is_empty() {
		cfg.evaluation.mode = "heuristic".to_string();
	}
}
