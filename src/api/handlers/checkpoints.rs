use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CheckpointAnnouncement, CheckpointStatus},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct CreateCheckpointRequest {
    pub title: String,
    pub county: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<CheckpointStatus>,
    pub event_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub announcement_date: Option<String>,
    pub source_url: Option<String>,
    pub description: Option<String>,
}

/// Double-`Option` on the date fields: omitted means "leave unchanged",
/// explicit null means "clear".
#[derive(Debug, Deserialize)]
pub struct UpdateCheckpointRequest {
    pub title: Option<String>,
    pub county: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<CheckpointStatus>,
    pub event_date: Option<Option<String>>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
    pub announcement_date: Option<Option<String>>,
    pub source_url: Option<String>,
    pub description: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CheckpointAnnouncement>>> {
    let checkpoints = state.service_context.checkpoint_service.list_all().await?;
    Ok(Json(checkpoints))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckpointAnnouncement>> {
    let checkpoint = state
        .service_context
        .checkpoint_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

    Ok(Json(checkpoint))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckpointRequest>,
) -> Result<(StatusCode, Json<CheckpointAnnouncement>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let checkpoint = CheckpointAnnouncement {
        id: Uuid::new_v4(),
        title: request.title,
        county: request.county,
        location_name: request.location_name,
        address: request.address,
        latitude: request.latitude,
        longitude: request.longitude,
        status: request.status.unwrap_or(CheckpointStatus::PendingDetails),
        event_date: request.event_date,
        start_date: request.start_date,
        end_date: request.end_date,
        announcement_date: request.announcement_date,
        source_url: request.source_url,
        description: request.description,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let created = state
        .service_context
        .checkpoint_service
        .create(checkpoint)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCheckpointRequest>,
) -> Result<Json<CheckpointAnnouncement>> {
    let mut checkpoint = state
        .service_context
        .checkpoint_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

    if let Some(title) = request.title {
        checkpoint.title = title;
    }
    if let Some(county) = request.county {
        checkpoint.county = Some(county);
    }
    if let Some(location_name) = request.location_name {
        checkpoint.location_name = Some(location_name);
    }
    if let Some(address) = request.address {
        checkpoint.address = Some(address);
    }
    if let Some(latitude) = request.latitude {
        checkpoint.latitude = Some(latitude);
    }
    if let Some(longitude) = request.longitude {
        checkpoint.longitude = Some(longitude);
    }
    if let Some(status) = request.status {
        checkpoint.status = status;
    }
    if let Some(event_date) = request.event_date {
        checkpoint.event_date = event_date;
    }
    if let Some(start_date) = request.start_date {
        checkpoint.start_date = start_date;
    }
    if let Some(end_date) = request.end_date {
        checkpoint.end_date = end_date;
    }
    if let Some(announcement_date) = request.announcement_date {
        checkpoint.announcement_date = announcement_date;
    }
    if let Some(source_url) = request.source_url {
        checkpoint.source_url = Some(source_url);
    }
    if let Some(description) = request.description {
        checkpoint.description = Some(description);
    }

    checkpoint.updated_at = Utc::now();

    let updated = state
        .service_context
        .checkpoint_service
        .update(id, checkpoint)
        .await?;

    Ok(Json(updated))
}

pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckpointAnnouncement>> {
    let checkpoint = state.service_context.checkpoint_service.confirm(id).await?;
    Ok(Json(checkpoint))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckpointAnnouncement>> {
    let checkpoint = state.service_context.checkpoint_service.cancel(id).await?;
    Ok(Json(checkpoint))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.checkpoint_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
