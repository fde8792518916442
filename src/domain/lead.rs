use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prospective-client inquiry captured from one of the site's intake
/// surfaces. Stored verbatim for firm follow-up.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub channel: LeadChannel,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub lead_source: Option<String>,
    pub case_type: Option<String>,
    pub urgency: Option<String>,
    pub county: Option<String>,
    pub checkpoint_id: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "snake_case")]
pub enum LeadChannel {
    ContactForm,
    LeadForm,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Retained,
    Closed,
}

#[derive(Debug, Clone)]
pub struct CreateLeadRequest {
    pub channel: LeadChannel,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub lead_source: Option<String>,
    pub case_type: Option<String>,
    pub urgency: Option<String>,
    pub county: Option<String>,
    pub checkpoint_id: Option<String>,
}
