use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CheckpointAnnouncement, CheckpointStatus},
    error::{AppError, Result},
    repository::CheckpointRepository,
};

#[derive(FromRow)]
struct CheckpointRow {
    id: String,
    title: String,
    county: Option<String>,
    location_name: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
    event_date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    announcement_date: Option<String>,
    source_url: Option<String>,
    description: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, county, location_name, address, latitude, longitude,
           status, event_date, start_date, end_date, announcement_date,
           source_url, description, created_at, updated_at
    FROM checkpoints
"#;

pub struct SqliteCheckpointRepository {
    pool: SqlitePool,
}

impl SqliteCheckpointRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: CheckpointRow) -> Result<CheckpointAnnouncement> {
        Ok(CheckpointAnnouncement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            county: row.county,
            location_name: row.location_name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            status: Self::parse_status(&row.status)?,
            event_date: row.event_date,
            start_date: row.start_date,
            end_date: row.end_date,
            announcement_date: row.announcement_date,
            source_url: row.source_url,
            description: row.description,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_status(s: &str) -> Result<CheckpointStatus> {
        match s {
            "pending_details" => Ok(CheckpointStatus::PendingDetails),
            "confirmed" => Ok(CheckpointStatus::Confirmed),
            "cancelled" => Ok(CheckpointStatus::Cancelled),
            _ => Err(AppError::Database(format!("Invalid checkpoint status: {}", s))),
        }
    }

    fn status_to_str(status: CheckpointStatus) -> &'static str {
        match status {
            CheckpointStatus::PendingDetails => "pending_details",
            CheckpointStatus::Confirmed => "confirmed",
            CheckpointStatus::Cancelled => "cancelled",
        }
    }
}

#[async_trait]
impl CheckpointRepository for SqliteCheckpointRepository {
    async fn create(&self, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement> {
        let id_str = announcement.id.to_string();
        let status_str = Self::status_to_str(announcement.status);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO checkpoints (
                id, title, county, location_name, address, latitude, longitude,
                status, event_date, start_date, end_date, announcement_date,
                source_url, description, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&announcement.title)
        .bind(&announcement.county)
        .bind(&announcement.location_name)
        .bind(&announcement.address)
        .bind(announcement.latitude)
        .bind(announcement.longitude)
        .bind(status_str)
        .bind(&announcement.event_date)
        .bind(&announcement.start_date)
        .bind(&announcement.end_date)
        .bind(&announcement.announcement_date)
        .bind(&announcement.source_url)
        .bind(&announcement.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created checkpoint".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CheckpointAnnouncement>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, CheckpointRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id_str)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_announcement(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<CheckpointAnnouncement>> {
        let rows = sqlx::query_as::<_, CheckpointRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn list_by_status(&self, status: CheckpointStatus) -> Result<Vec<CheckpointAnnouncement>> {
        let rows = sqlx::query_as::<_, CheckpointRow>(&format!(
            "{} WHERE status = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(Self::status_to_str(status))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn update(&self, id: Uuid, announcement: CheckpointAnnouncement) -> Result<CheckpointAnnouncement> {
        let id_str = id.to_string();
        let status_str = Self::status_to_str(announcement.status);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE checkpoints
            SET title = ?, county = ?, location_name = ?, address = ?,
                latitude = ?, longitude = ?, status = ?, event_date = ?,
                start_date = ?, end_date = ?, announcement_date = ?,
                source_url = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.county)
        .bind(&announcement.location_name)
        .bind(&announcement.address)
        .bind(announcement.latitude)
        .bind(announcement.longitude)
        .bind(status_str)
        .bind(&announcement.event_date)
        .bind(&announcement.start_date)
        .bind(&announcement.end_date)
        .bind(&announcement.announcement_date)
        .bind(&announcement.source_url)
        .bind(&announcement.description)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated checkpoint".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM checkpoints WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
