use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Lead, LeadStatus},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListLeadsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub status: Option<LeadStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListLeadsQuery>,
) -> Result<Json<Vec<Lead>>> {
    let leads = if let Some(status) = params.status {
        state.service_context.lead_repo.list_by_status(status).await?
    } else {
        let limit = params.limit.unwrap_or(50).min(200);
        let offset = params.offset.unwrap_or(0).max(0);
        state.service_context.lead_repo.list(limit, offset).await?
    };

    Ok(Json(leads))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Lead>> {
    let lead = state
        .service_context
        .lead_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    Ok(Json(lead))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadStatusRequest>,
) -> Result<Json<Lead>> {
    // 404 before update so a bad id doesn't read as success.
    state
        .service_context
        .lead_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    let lead = state
        .service_context
        .lead_repo
        .update_status(id, request.status)
        .await?;

    Ok(Json(lead))
}
