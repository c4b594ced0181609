use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    normalize_therapist, parse_request_date, AvailabilityError, AvailabilityQuery,
    CheckAvailabilityRequest, DayScheduleParams,
};
use crate::services::availability::AvailabilityService;

// An empty body is read as `{}` so that it fails on the missing date.
fn parse_body(body: &[u8]) -> Result<CheckAvailabilityRequest, AvailabilityError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckAvailabilityRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| AvailabilityError::InvalidBody(e.to_string()))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<AppConfig>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request = parse_body(&body)?;
    debug!("check-availability request: {:?}", request);

    let query = AvailabilityQuery::try_from(request)?;
    let availability_service = AvailabilityService::new(&state)?;

    let availability = availability_service.check_availability(&query).await?;

    Ok(Json(json!(availability)))
}

#[axum::debug_handler]
pub async fn get_day_schedule(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<DayScheduleParams>,
) -> Result<Json<Value>, AppError> {
    let date = parse_request_date(params.date.as_deref())?;
    let therapist = normalize_therapist(params.therapist.as_deref());
    let availability_service = AvailabilityService::new(&state)?;

    let schedule = availability_service
        .day_schedule(date, therapist.as_deref())
        .await?;

    Ok(Json(json!(schedule)))
}
