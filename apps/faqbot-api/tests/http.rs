use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use serde_json::{Map, Value};
use tower::ServiceExt;

use faqbot_api::{routes, state::AppState};
use faqbot_config::{
	Answer, CompletionProviderConfig, Config, EmbeddingProviderConfig, Evaluation, Faq,
	Retrieval, Service,
};
use faqbot_service::{BoxFuture, CompletionProvider, EmbeddingProvider, FaqService, Providers};

fn fixture_path() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/faqs.csv")
}

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		faq: Faq {
			source: fixture_path(),
			question_column: "question".to_string(),
			answer_column: "answer".to_string(),
		},
		providers: faqbot_config::Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "mock".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test".to_string(),
				path: "/embeddings".to_string(),
				model: "mock-embed".to_string(),
				dimensions: 2,
				batch_size: 8,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			completion: CompletionProviderConfig {
				provider_id: "mock".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test".to_string(),
				path: "/chat/completions".to_string(),
				model: "mock-chat".to_string(),
				temperature: 0.1,
				max_tokens: 256,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		retrieval: Retrieval { top_k: 4, min_score: 0.0 },
		answer: Answer {
			max_docs: 2,
			fallback_message: "I'm sorry, I can't answer that right now.".to_string(),
		},
		evaluation: Evaluation { mode: "off".to_string() },
	}
}

struct KeywordEmbedding;

impl EmbeddingProvider for KeywordEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, faqbot_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			Ok(texts
				.iter()
				.map(|text| {
					let lower = text.to_lowercase();

					if lower.contains("hours") || lower.contains("open") {
						vec![1.0, 0.0]
					} else {
						vec![0.0, 1.0]
					}
				})
				.collect())
		})
	}
}

struct CannedCompletion;

impl CompletionProvider for CannedCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a CompletionProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, faqbot_providers::Result<String>> {
		Box::pin(async move { Ok("We are open 9-5, Monday to Friday.".to_string()) })
	}
}

async fn test_state() -> AppState {
	let service = FaqService::load_with_providers(
		test_config(),
		Providers::new(Arc::new(KeywordEmbedding), Arc::new(CannedCompletion)),
	)
	.await
	.expect("Service must load from the fixture table.");

	AppState::with_service(service)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.expect("Failed to build request.")
}

async fn body_json(response: axum::response::Response) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read body.");

	serde_json::from_slice(&bytes).expect("Body must be JSON.")
}

#[tokio::test]
async fn health_is_ok() {
	let app = routes::router(test_state().await);
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_returns_answer_and_sources() {
	let app = routes::router(test_state().await);
	let response = app
		.oneshot(json_request("/v1/chat", serde_json::json!({ "message": "when are you open" })))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;

	assert_eq!(body["answer"], "We are open 9-5, Monday to Friday.");
	assert_eq!(body["fallback"], false);
	assert_eq!(body["sources"][0]["question"], "What are your hours?");
}

#[tokio::test]
async fn blank_chat_message_is_a_bad_request() {
	let app = routes::router(test_state().await);
	let response = app
		.oneshot(json_request("/v1/chat", serde_json::json!({ "message": "  " })))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body_json(response).await;

	assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn retrieve_returns_ranked_items() {
	let app = routes::router(test_state().await);
	let response = app
		.oneshot(json_request(
			"/v1/faq/retrieve",
			serde_json::json!({ "query": "when are you open", "top_k": 1 }),
		))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;

	assert_eq!(body["items"].as_array().unwrap().len(), 1);
	assert_eq!(body["items"][0]["question"], "What are your hours?");
}

#[tokio::test]
async fn list_reports_the_served_table() {
	let app = routes::router(test_state().await);
	let response = app
		.oneshot(Request::builder().uri("/v1/faq/list").body(Body::empty()).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;

	assert_eq!(body["entries"], 2);
	assert_eq!(body["items"][1]["question"], "Refund policy?");
}

#[tokio::test]
async fn admin_reload_reports_table_size() {
	let app = routes::admin_router(test_state().await);
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/admin/reload")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;

	assert_eq!(body["entries"], 2);
	assert!(body["embedding_version"].as_str().unwrap().contains("mock-embed"));
}
