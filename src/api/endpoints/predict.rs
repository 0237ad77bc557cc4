//! Prediction endpoint — the whole pipeline for one uploaded image.
//!
//! `POST /predict?lang=<code>` accepts either a multipart `file` field (web
//! form) or a JSON body `{"file": "<base64>"}` (IoT devices). The handler
//! runs gates → classifier → recommendations → translation, then reports the
//! event best-effort before answering.

use std::io::Cursor;

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use base64::Engine;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::gate;
use crate::notify::{self, NotificationRecord};
use crate::translate::LocalizedRecommendation;

/// Upload ceiling, shared with the router's body-limit layer.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// JPEG quality for the re-encoded notification photo.
const NOTIFY_JPEG_QUALITY: u8 = 90;

#[derive(Deserialize)]
pub struct PredictParams {
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_class: String,
    pub confidence: f32,
    pub recommendations: LocalizedRecommendation,
}

/// JSON body variant: base64-encoded image bytes.
#[derive(Deserialize)]
struct Base64Upload {
    file: Option<String>,
}

/// `POST /predict?lang=<code>` — classify one uploaded leaf photo.
pub async fn predict(
    State(ctx): State<ApiContext>,
    Query(params): Query<PredictParams>,
    request: Request,
) -> Result<Json<PredictResponse>, ApiError> {
    // Readiness comes first: no payload parsing or image work on a server
    // that cannot classify anyway.
    let Some(resources) = ctx.state.resources.as_ref() else {
        return Err(ApiError::NotReady);
    };

    let lang = params
        .lang
        .as_deref()
        .unwrap_or("en")
        .trim()
        .to_lowercase();

    let image_bytes = read_image_payload(request).await?;

    let decoded = image::load_from_memory(&image_bytes)
        .map_err(|e| ApiError::BadRequest(format!("Failed to process image data: {e}")))?;
    let rgb = decoded.to_rgb8();

    gate::check_image(&rgb).map_err(|rejection| {
        tracing::info!(?rejection, "upload rejected by image gate");
        ApiError::BadRequest(rejection.message().to_string())
    })?;

    let prediction = resources.predictor.predict(&rgb)?;

    let localized = ctx
        .state
        .translator
        .localize(&prediction.recommendation, &lang)
        .await;

    report_prediction(&ctx, &prediction.label, prediction.confidence, &localized, &rgb).await;

    Ok(Json(PredictResponse {
        predicted_class: prediction.label,
        confidence: prediction.confidence,
        recommendations: localized,
    }))
}

/// Hand the event to both side channels. Best-effort by construction — the
/// notifier swallows every failure, and a JPEG re-encode fault only costs
/// the photo post, never the response.
async fn report_prediction(
    ctx: &ApiContext,
    label: &str,
    confidence: f32,
    localized: &LocalizedRecommendation,
    image: &RgbImage,
) {
    let record = NotificationRecord {
        timestamp: chrono::Utc::now().to_rfc3339(),
        predicted_class: label.to_string(),
        confidence,
        recommendations: localized.clone(),
    };

    let caption = notify::format_caption(label, confidence, localized);

    let photo = match encode_jpeg(image) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("failed to re-encode upload for notification: {e}");
            Vec::new()
        }
    };

    ctx.state.notifier.report(&record, photo, &caption).await;
}

/// Pull the raw image bytes out of whichever payload shape arrived.
async fn read_image_payload(request: Request) -> Result<Vec<u8>, ApiError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?;
        read_multipart_file(multipart).await
    } else if content_type.starts_with("application/json") {
        let body = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_BYTES)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {e}")))?;
        decode_base64_payload(&body)
    } else {
        Err(ApiError::UnsupportedMediaType)
    }
}

/// Find the `file` field and return its bytes.
async fn read_multipart_file(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if field.file_name().map_or(true, str::is_empty) {
            return Err(ApiError::BadRequest("No selected image file.".into()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read uploaded file: {e}")))?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("No selected image file.".into()));
        }

        return Ok(bytes.to_vec());
    }

    Err(ApiError::BadRequest("No image file provided.".into()))
}

fn decode_base64_payload(body: &[u8]) -> Result<Vec<u8>, ApiError> {
    let payload: Base64Upload = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {e}")))?;

    let encoded = payload.file.filter(|f| !f.is_empty()).ok_or_else(|| {
        ApiError::BadRequest("No 'file' key found in JSON payload (Base64 data missing).".into())
    })?;

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApiError::BadRequest(format!("Failed to process image data: {e}")))
}

fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, String> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut cursor, ImageOutputFormat::Jpeg(NOTIFY_JPEG_QUALITY))
        .map_err(|e| e.to_string())?;
    Ok(cursor.into_inner())
}
