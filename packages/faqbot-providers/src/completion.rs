use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// One chat-completion round trip. `messages` follow the OpenAI chat shape;
/// the reply is the first choice's message content.
pub async fn complete(
	cfg: &faqbot_config::CompletionProviderConfig,
	messages: &[Value],
) -> Result<String> {
	let client = Client::builder()
		.timeout(Duration::from_millis(cfg.timeout_ms))
		.build()
		.map_err(|err| Error::from_reqwest(err, cfg.timeout_ms))?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
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

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})?;
	let content = content.trim();

	if content.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response content is empty.".to_string(),
		});
	}

	Ok(content.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "We are open 9-5, Monday to Friday." } }
			]
		});

		assert_eq!(
			parse_completion_response(json).expect("parse failed"),
			"We are open 9-5, Monday to Friday."
		);
	}

	#[test]
	fn rejects_missing_content() {
		let json = serde_json::json!({ "choices": [] });

		assert!(matches!(
			parse_completion_response(json),
			Err(Error::InvalidResponse { .. })
		));
	}

	#[test]
	fn rejects_blank_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "   " } }
			]
		});

		assert!(matches!(
			parse_completion_response(json),
			Err(Error::InvalidResponse { .. })
		));
	}
}
