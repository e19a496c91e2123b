use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cedict_parser::{ParseError, Parser};
use cedict_types::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<Parser>,
    /// Upper bound on the lines of one batch request.
    pub max_lines: usize,
}

#[derive(Deserialize)]
pub struct ParseQuery {
    pub line: String,
}

#[derive(Serialize)]
pub struct BatchResponse<'a> {
    entries: Vec<Entry<'a>>,
    errors: Vec<LineError<'a>>,
    skipped: usize,
}

#[derive(Serialize)]
struct LineError<'a> {
    line_no: usize,
    line: &'a str,
    error: String,
    tag: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'static str>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/parse", get(parse_line).post(parse_batch))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn parse_line(
    State(state): State<AppState>,
    Query(params): Query<ParseQuery>,
) -> Result<Response, ApiError> {
    let entry = state.parser.parse(&params.line)?;
    Ok(Json(entry).into_response())
}

/// Parse a text body of dictionary lines. Comment and blank lines are only counted.
async fn parse_batch(State(state): State<AppState>, body: String) -> Result<Response, ApiError> {
    let line_count = body.lines().count();
    if line_count > state.max_lines {
        return Err(ApiError::bad_request(format!(
            "too many lines: {} (max {})",
            line_count, state.max_lines
        )));
    }

    let mut response = BatchResponse {
        entries: Vec::new(),
        errors: Vec::new(),
        skipped: 0,
    };
    for (idx, line) in body.lines().enumerate() {
        match state.parser.parse(line) {
            Ok(entry) => response.entries.push(entry),
            Err(err) if err.is_skip() => response.skipped += 1,
            Err(err) => response.errors.push(LineError {
                line_no: idx + 1,
                line,
                error: err.to_string(),
                tag: err.tag(),
            }),
        }
    }

    Ok(Json(response).into_response())
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::BadRequest(error) => ErrorResponse { error, tag: None },
            ApiError::Parse(err) => ErrorResponse {
                error: err.to_string(),
                tag: Some(err.tag()),
            },
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
