use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use faqbot_service::{
	ChatRequest, ChatResponse, Error as ServiceError, ListResponse, ReloadReport,
	RetrieveRequest, RetrieveResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/chat", post(chat))
		.route("/v1/faq/retrieve", post(retrieve))
		.route("/v1/faq/list", get(list))
		.with_state(state)
}

/// Reload mutates the served table; it stays on the loopback-only admin
/// listener.
pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reload", post(reload)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
	let response = state.service.chat(payload).await?;

	Ok(Json(response))
}

async fn retrieve(
	State(state): State<AppState>,
	Json(payload): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, ApiError> {
	let response = state.service.retrieve(payload).await?;

	Ok(Json(response))
}

async fn list(State(state): State<AppState>) -> Json<ListResponse> {
	Json(state.service.list())
}

async fn reload(State(state): State<AppState>) -> Result<Json<ReloadReport>, ApiError> {
	let response = state.service.reload().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "faq_source"),
			ServiceError::Embedding { .. } => (StatusCode::BAD_GATEWAY, "embedding_service"),
			ServiceError::Generation { .. } => (StatusCode::BAD_GATEWAY, "completion_service"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
