use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Embeds `texts` in configured batch slices and returns one vector per
/// input, in input order. Any batch failure fails the whole call; partial
/// results are never returned.
pub async fn embed(
	cfg: &faqbot_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	if texts.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder()
		.timeout(Duration::from_millis(cfg.timeout_ms))
		.build()
		.map_err(|err| Error::from_reqwest(err, cfg.timeout_ms))?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let batch_size = cfg.batch_size.max(1) as usize;
	let mut out = Vec::with_capacity(texts.len());

	for batch in texts.chunks(batch_size) {
		let body = serde_json::json!({
			"model": cfg.model,
			"input": batch,
			"dimensions": cfg.dimensions,
		});
		let res = client
			.post(&url)
			.headers(headers.clone())
			.json(&body)
			.send()
			.await
			.map_err(|err| Error::from_reqwest(err, cfg.timeout_ms))?;
		let json: Value = res
			.error_for_status()
			.map_err(|err| Error::from_reqwest(err, cfg.timeout_ms))?
			.json()
			.await
			.map_err(|err| Error::from_reqwest(err, cfg.timeout_ms))?;

		out.extend(parse_embedding_response(json, batch.len(), cfg.dimensions as usize)?);
	}

	Ok(out)
}

fn parse_embedding_response(
	json: Value,
	expected_count: usize,
	expected_dim: usize,
) -> Result<Vec<Vec<f32>>> {
	let data = json.get("data").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Embedding response is missing data array.".to_string() }
	})?;

	if data.len() != expected_count {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding response returned {} items for {} inputs.",
				data.len(),
				expected_count
			),
		});
	}

	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding = item.get("embedding").and_then(|v| v.as_array()).ok_or_else(|| {
			Error::InvalidResponse {
				message: "Embedding item is missing embedding array.".to_string(),
			}
		})?;

		if embedding.len() != expected_dim {
			return Err(Error::InvalidResponse {
				message: format!(
					"Embedding vector has {} dimensions, expected {expected_dim}.",
					embedding.len()
				),
			});
		}

		let mut vec = Vec::with_capacity(embedding.len());

		for value in embedding {
			let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
				message: "Embedding value must be numeric.".to_string(),
			})?;

			vec.push(number as f32);
		}

		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}
