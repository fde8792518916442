use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CheckpointAnnouncement, CreateLeadRequest, Lead, LeadChannel},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
    pub lead_source: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LeadFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 10000))]
    pub message: Option<String>,
    pub case_type: Option<String>,
    pub urgency: Option<String>,
    pub county: Option<String>,
    pub checkpoint_id: Option<String>,
    pub lead_source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatIntakeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    pub transcript: Vec<ChatMessage>,
    pub lead_source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub lead_id: Uuid,
    pub message: String,
}

pub async fn list_checkpoints(
    State(state): State<AppState>,
) -> Result<Json<Vec<CheckpointAnnouncement>>> {
    let checkpoints = state
        .service_context
        .checkpoint_service
        .list_public(Utc::now())
        .await?;

    Ok(Json(checkpoints))
}

pub async fn get_checkpoint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckpointAnnouncement>> {
    let checkpoint = state
        .service_context
        .checkpoint_service
        .find_public(id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Checkpoint not found".to_string()))?;

    Ok(Json(checkpoint))
}

pub async fn rss_feed(State(state): State<AppState>) -> Result<Response> {
    let checkpoints = state
        .service_context
        .checkpoint_service
        .list_public(Utc::now())
        .await?;

    let rss = generate_rss_feed(&checkpoints, &state.settings.server.site_url);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        rss,
    )
        .into_response())
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactFormRequest>,
) -> Result<(StatusCode, Json<IntakeResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_contact_method(&request.email, &request.phone)?;

    let lead = state
        .service_context
        .intake_service
        .submit(CreateLeadRequest {
            channel: LeadChannel::ContactForm,
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
            lead_source: request.lead_source,
            case_type: None,
            urgency: None,
            county: None,
            checkpoint_id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(intake_response(&lead))))
}

pub async fn submit_lead(
    State(state): State<AppState>,
    Json(request): Json<LeadFormRequest>,
) -> Result<(StatusCode, Json<IntakeResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_contact_method(&request.email, &request.phone)?;

    let lead = state
        .service_context
        .intake_service
        .submit(CreateLeadRequest {
            channel: LeadChannel::LeadForm,
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message.unwrap_or_default(),
            lead_source: request.lead_source,
            case_type: request.case_type,
            urgency: request.urgency,
            county: request.county,
            checkpoint_id: request.checkpoint_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(intake_response(&lead))))
}

pub async fn submit_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatIntakeRequest>,
) -> Result<(StatusCode, Json<IntakeResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_contact_method(&request.email, &request.phone)?;

    if request.transcript.is_empty() {
        return Err(AppError::BadRequest("Chat transcript is empty".to_string()));
    }

    // The recommender and the firm notification both work off the lead
    // message, so the transcript is flattened into one.
    let message = request
        .transcript
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.text))
        .collect::<Vec<_>>()
        .join("\n");

    let lead = state
        .service_context
        .intake_service
        .submit(CreateLeadRequest {
            channel: LeadChannel::Chat,
            name: request.name,
            email: request.email,
            phone: request.phone,
            message,
            lead_source: request.lead_source,
            case_type: None,
            urgency: None,
            county: None,
            checkpoint_id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(intake_response(&lead))))
}

fn require_contact_method(email: &Option<String>, phone: &Option<String>) -> Result<()> {
    let has_email = email.as_deref().is_some_and(|e| !e.trim().is_empty());
    let has_phone = phone.as_deref().is_some_and(|p| !p.trim().is_empty());

    if !has_email && !has_phone {
        return Err(AppError::BadRequest(
            "Provide an email address or a phone number so we can reach you".to_string(),
        ));
    }

    Ok(())
}

fn intake_response(lead: &Lead) -> IntakeResponse {
    IntakeResponse {
        lead_id: lead.id,
        message: "Thank you — an attorney will review your message shortly.".to_string(),
    }
}

// Helper function to generate RSS feed
fn generate_rss_feed(checkpoints: &[CheckpointAnnouncement], site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');

    let mut rss = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>DUI Checkpoint Announcements</title>
    <link>"#,
    );
    rss.push_str(base);
    rss.push_str("/dui-checkpoints</link>\n");
    rss.push_str("    <description>Sobriety checkpoint announcements across Ohio</description>\n");
    rss.push_str("    <language>en-us</language>\n");
    rss.push_str("    <lastBuildDate>");
    rss.push_str(&Utc::now().to_rfc2822());
    rss.push_str("</lastBuildDate>\n");

    for checkpoint in checkpoints.iter().take(20) {
        rss.push_str("    <item>\n");
        rss.push_str(&format!(
            "        <title><![CDATA[{}]]></title>\n",
            checkpoint.title
        ));
        if let Some(description) = &checkpoint.description {
            rss.push_str(&format!(
                "        <description><![CDATA[{}]]></description>\n",
                description
            ));
        }
        rss.push_str(&format!(
            "        <link>{}/dui-checkpoints?id={}</link>\n",
            base, checkpoint.id
        ));
        rss.push_str(&format!(
            "        <guid isPermaLink=\"false\">{}</guid>\n",
            checkpoint.id
        ));
        rss.push_str(&format!(
            "        <pubDate>{}</pubDate>\n",
            checkpoint.created_at.to_rfc2822()
        ));
        rss.push_str("    </item>\n");
    }

    rss.push_str("</channel>\n</rss>");
    rss
}
