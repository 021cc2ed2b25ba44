//! # HTTP Routes
//!
//! axum router exposing the codec:
//!
//! | Method | Path      | Body                                  | Response                       |
//! |--------|-----------|---------------------------------------|--------------------------------|
//! | POST   | `/encode` | multipart `image` file + `message`    | `image/png` attachment         |
//! | POST   | `/decode` | multipart `image` file                | `{"message": "..."}`           |
//! | GET    | `/health` |                                       | `{"status": "ok", ...}`        |
//!
//! Failures are returned as `{"error": "..."}` with a 400 or 500 status.

use anyhow::Result;
use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use uuid::Uuid;

use super::config::ServerConfig;
use super::error::ApiError;
use super::server::{ServerCore, Upload};
use super::upload::UploadStore;
use crate::common::messages::{DecodeResponse, HealthResponse};

struct AppState {
    core: ServerCore,
}

/// Fields collected from a multipart form.
#[derive(Default)]
struct UploadForm {
    image: Option<Upload>,
    message: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                form.image = Some(Upload {
                    filename,
                    data: data.to_vec(),
                });
            }
            "message" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                form.message = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Build the application router around `core`.
pub fn router(config: &ServerConfig, core: ServerCore) -> Router {
    let state = Arc::new(AppState { core });

    let mut app = Router::new()
        .route("/encode", post(encode_handler))
        .route("/decode", post(decode_handler))
        .route("/health", get(health_check));

    if let Some(dir) = &config.server.frontend_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn run(config: ServerConfig) -> Result<()> {
    let store = UploadStore::new(&config.uploads)?;
    info!("📁 Staging uploads in {}", store.directory().display());

    let app = router(&config, ServerCore::new(store));

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    info!("🌐 Steganography API running on http://{}", listener.local_addr()?);
    info!("📡 Endpoints: POST /encode, POST /decode, GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "steganography-api".to_string(),
    })
}

async fn encode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;
    let (Some(image), Some(message)) = (form.image, form.message) else {
        return Err(ApiError::MissingImageOrMessage);
    };

    let request_id = Uuid::new_v4();
    let encoded = state.core.encode_upload(request_id, image, message).await?;

    let disposition = format!("attachment; filename=\"{}\"", encoded.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        encoded.png,
    )
        .into_response())
}

async fn decode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<DecodeResponse>, ApiError> {
    let form = read_form(multipart).await?;
    let image = form.image.ok_or(ApiError::MissingImage)?;

    let request_id = Uuid::new_v4();
    let message = state.core.decode_upload(request_id, image).await?;

    Ok(Json(DecodeResponse { message }))
}
