use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sobriety-checkpoint announcement scraped or entered from an upstream
/// source (county sheriff release, state patrol advisory, local news).
///
/// The date fields are kept as raw strings on purpose: upstream sources
/// publish anything from a clean `YYYY-MM-DD` to "sometime this weekend".
/// Records are stored as received and interpreted by the freshness policy,
/// which treats unparseable values as absent.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckpointAnnouncement {
    pub id: Uuid,
    pub title: String,
    pub county: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: CheckpointStatus,
    /// Calendar date of the checkpoint, nominally `YYYY-MM-DD`.
    pub event_date: Option<String>,
    /// Precise start time, nominally RFC 3339, when the source gave one.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// When the upstream source first published the announcement.
    pub announcement_date: Option<String>,
    pub source_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    /// Announced but the exact date/location is not confirmed yet.
    PendingDetails,
    Confirmed,
    Cancelled,
}
