// HTTP request handlers
use crate::application::profile_service::ConversionTarget;
use crate::domain::error::ConversionError;
use crate::domain::interval::Interval;
use crate::domain::profile::EnergyProfile;
use crate::domain::unit::EnergyUnit;
use crate::infrastructure::compression::brotli_decompress;
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

// Validated in `parse_target` so every rejection gets a JSON error body
#[derive(Deserialize)]
pub struct ConvertQuery {
    pub interval: Option<String>,
    pub unit: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

fn status_for(error: &ConversionError) -> StatusCode {
    if error.is_input_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Convert the profile in the request body to the requested interval and unit
pub async fn convert_profile(
    query: Result<Query<ConvertQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let target = match query.map_err(|e| e.body_text()).and_then(|Query(q)| parse_target(&q)) {
        Ok(target) => target,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, &message).await,
    };

    let compressed_body = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.trim() == "br");
    let raw = if compressed_body {
        match brotli_decompress(&body).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not decompress request body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, "request body is not valid brotli").await;
            }
        }
    } else {
        body.to_vec()
    };

    let source = match EnergyProfile::from_slice(&raw) {
        Ok(profile) => profile,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()).await,
    };

    match state.profile_service.convert(&source, target) {
        Ok((converted, summary)) => {
            tracing::info!(
                "Converted {} samples into {} ({} {} -> {} {})",
                summary.input_len,
                summary.output_len,
                source.interval,
                source.unit,
                target.interval,
                target.unit
            );
            match json_response(StatusCode::OK, &converted.to_value(), accepts_brotli(&headers)).await {
                Ok(response) => response,
                Err(status) => status.into_response(),
            }
        }
        Err(e) => {
            if e.is_input_error() {
                tracing::warn!("Rejected profile: {}", e);
            } else {
                tracing::error!("Conversion failed: {}", e);
            }
            error_response(status_for(&e), &e.to_string()).await
        }
    }
}

fn parse_target(query: &ConvertQuery) -> Result<ConversionTarget, String> {
    let interval = query
        .interval
        .as_deref()
        .ok_or("missing query parameter 'interval'")?;
    let unit = query
        .unit
        .as_deref()
        .ok_or("missing query parameter 'unit'")?;

    let minutes = interval
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("interval '{interval}' is not a whole number of minutes"))?;

    Ok(ConversionTarget {
        interval: Interval::new(minutes).map_err(|e| e.to_string())?,
        unit: unit.parse::<EnergyUnit>().map_err(|e| e.to_string())?,
    })
}
