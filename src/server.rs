use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use eyre::Result;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::article::ArticleGenerator;
use crate::{ArticleLength, GenerationRequest, extract_video_id, transcript, youtube};

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    generator: Arc<ArticleGenerator>,
    caption_lang: String,
}

impl AppState {
    pub fn new(client: reqwest::Client, generator: ArticleGenerator, caption_lang: String) -> Self {
        Self {
            client,
            generator: Arc::new(generator),
            caption_lang,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GenerateRequest {
    url: String,
    style_preset: String,
    style_detail: String,
    length: String,
    language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    video_id: String,
    transcript: String,
    truncated: bool,
    article: String,
    mode: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
enum ApiError {
    MissingUrl,
    UnparseableUrl,
    TranscriptUnavailable,
    EmptyTranscript,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingUrl => (StatusCode::BAD_REQUEST, "Please provide a YouTube URL."),
            ApiError::UnparseableUrl => (StatusCode::BAD_REQUEST, "Unable to parse the YouTube video ID."),
            ApiError::TranscriptUnavailable => (
                StatusCode::BAD_GATEWAY,
                "Could not retrieve a transcript for this video. It may not have captions available.",
            ),
            ApiError::EmptyTranscript => (StatusCode::NOT_FOUND, "No transcript content was found for this video."),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate_handler))
        .with_state(state)
}

/// Serve the API until the process is stopped
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if body.url.trim().is_empty() {
        return Err(ApiError::MissingUrl);
    }

    let video_id = extract_video_id(&body.url).ok_or(ApiError::UnparseableUrl)?;

    let segments = youtube::fetch_captions(&state.client, &video_id, &state.caption_lang)
        .await
        .map_err(|e| {
            error!("Transcript fetch failed for {video_id}: {e}");
            ApiError::TranscriptUnavailable
        })?;

    let normalized = transcript::normalize(&segments);
    if normalized.text.is_empty() {
        return Err(ApiError::EmptyTranscript);
    }

    let request = GenerationRequest {
        transcript: normalized.text,
        segments,
        style_preset: body.style_preset,
        style_detail: body.style_detail,
        length: ArticleLength::from_choice(&body.length),
        language: body.language,
        truncated: normalized.truncated,
    };

    let outcome = state.generator.generate(&request).await;
    let mode = outcome.mode();

    Ok(Json(GenerateResponse {
        video_id,
        transcript: request.transcript,
        truncated: request.truncated,
        article: outcome.into_text(),
        mode,
    }))
}
