use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateLeadRequest, Lead, LeadChannel, LeadStatus},
    error::{AppError, Result},
    repository::LeadRepository,
};

#[derive(FromRow)]
struct LeadRow {
    id: String,
    channel: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    message: String,
    lead_source: Option<String>,
    case_type: Option<String>,
    urgency: Option<String>,
    county: Option<String>,
    checkpoint_id: Option<String>,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, channel, name, email, phone, message, lead_source, case_type,
           urgency, county, checkpoint_id, status, created_at, updated_at
    FROM leads
"#;

pub struct SqliteLeadRepository {
    pool: SqlitePool,
}

impl SqliteLeadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_lead(row: LeadRow) -> Result<Lead> {
        Ok(Lead {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            channel: Self::parse_channel(&row.channel)?,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            lead_source: row.lead_source,
            case_type: row.case_type,
            urgency: row.urgency,
            county: row.county,
            checkpoint_id: row.checkpoint_id,
            status: Self::parse_status(&row.status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_channel(s: &str) -> Result<LeadChannel> {
        match s {
            "contact_form" => Ok(LeadChannel::ContactForm),
            "lead_form" => Ok(LeadChannel::LeadForm),
            "chat" => Ok(LeadChannel::Chat),
            _ => Err(AppError::Database(format!("Invalid lead channel: {}", s))),
        }
    }

    fn channel_to_str(channel: LeadChannel) -> &'static str {
        match channel {
            LeadChannel::ContactForm => "contact_form",
            LeadChannel::LeadForm => "lead_form",
            LeadChannel::Chat => "chat",
        }
    }

    fn parse_status(s: &str) -> Result<LeadStatus> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "retained" => Ok(LeadStatus::Retained),
            "closed" => Ok(LeadStatus::Closed),
            _ => Err(AppError::Database(format!("Invalid lead status: {}", s))),
        }
    }

    fn status_to_str(status: LeadStatus) -> &'static str {
        match status {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Retained => "retained",
            LeadStatus::Closed => "closed",
        }
    }
}

#[async_trait]
impl LeadRepository for SqliteLeadRepository {
    async fn create(&self, request: CreateLeadRequest) -> Result<Lead> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let channel_str = Self::channel_to_str(request.channel);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO leads (
                id, channel, name, email, phone, message, lead_source,
                case_type, urgency, county, checkpoint_id, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(channel_str)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.message)
        .bind(&request.lead_source)
        .bind(&request.case_type)
        .bind(&request.urgency)
        .bind(&request.county)
        .bind(&request.checkpoint_id)
        .bind("new")
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created lead".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, LeadRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id_str)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_lead(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadRow>(&format!(
            "{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_lead).collect()
    }

    async fn list_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadRow>(&format!(
            "{} WHERE status = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(Self::status_to_str(status))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_lead).collect()
    }

    async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead> {
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query("UPDATE leads SET status = ?, updated_at = ? WHERE id = ?")
            .bind(Self::status_to_str(status))
            .bind(now)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
