use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use docket::{
    domain::{CheckpointAnnouncement, CheckpointStatus, CreateLeadRequest, LeadChannel},
    repository::{
        CheckpointRepository, LeadRepository, SqliteCheckpointRepository, SqliteLeadRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the database with development data")]
struct Args {
    /// Database URL; falls back to DATABASE_URL, then sqlite:docket.db
    #[arg(long)]
    database_url: Option<String>,

    /// How many faked leads to create
    #[arg(long, default_value_t = 8)]
    leads: usize,
}

const SAMPLE_MESSAGES: &[&str] = &[
    "I was arrested for OVI last night after a breath test, what do I do?",
    "My son is in jail and I need to know about bond.",
    "There is a checkpoint announced on route 33 this weekend?",
    "She filed a protection order against me and I have a hearing Friday.",
    "Charged with possession after a traffic stop.",
    "I think I'm being investigated for fraud at work.",
    "Just have a general question about your fees.",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:docket.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let checkpoint_repo = SqliteCheckpointRepository::new(db_pool.clone());
    let lead_repo = SqliteLeadRepository::new(db_pool.clone());

    println!("🚧 Creating checkpoint announcements...");

    let now = Utc::now();

    // Confirmed checkpoint this weekend, fully detailed.
    checkpoint_repo
        .create(CheckpointAnnouncement {
            id: Uuid::new_v4(),
            title: "OVI checkpoint on US-33 at Fishinger Road".to_string(),
            county: Some("Franklin".to_string()),
            location_name: Some("US-33 at Fishinger Road".to_string()),
            address: Some("Columbus, OH".to_string()),
            latitude: Some(39.9926),
            longitude: Some(-83.0727),
            status: CheckpointStatus::Confirmed,
            event_date: Some((now + Duration::days(2)).format("%Y-%m-%d").to_string()),
            start_date: Some((now + Duration::days(2)).to_rfc3339()),
            end_date: Some((now + Duration::days(2) + Duration::hours(4)).to_rfc3339()),
            announcement_date: Some((now - Duration::days(3)).to_rfc3339()),
            source_url: Some("https://statepatrol.ohio.gov/newsroom".to_string()),
            description: Some("State patrol advisory, exact hours 10pm-2am.".to_string()),
            created_at: now,
            updated_at: now,
        })
        .await?;

    // Freshly announced, details pending.
    checkpoint_repo
        .create(CheckpointAnnouncement {
            id: Uuid::new_v4(),
            title: "Checkpoint announced for Hamilton County".to_string(),
            county: Some("Hamilton".to_string()),
            location_name: None,
            address: None,
            latitude: None,
            longitude: None,
            status: CheckpointStatus::PendingDetails,
            event_date: None,
            start_date: None,
            end_date: None,
            announcement_date: Some((now - Duration::days(1)).to_rfc3339()),
            source_url: None,
            description: Some("Location to be released the day of the operation.".to_string()),
            created_at: now,
            updated_at: now,
        })
        .await?;

    // Stale pending record; the public list should not show this one.
    checkpoint_repo
        .create(CheckpointAnnouncement {
            id: Uuid::new_v4(),
            title: "Unconfirmed checkpoint rumor, Montgomery County".to_string(),
            county: Some("Montgomery".to_string()),
            location_name: None,
            address: None,
            latitude: None,
            longitude: None,
            status: CheckpointStatus::PendingDetails,
            event_date: Some("sometime in June".to_string()),
            start_date: None,
            end_date: None,
            announcement_date: Some((now - Duration::days(30)).to_rfc3339()),
            source_url: None,
            description: None,
            created_at: now - Duration::days(30),
            updated_at: now - Duration::days(30),
        })
        .await?;

    // Cancelled operation, kept for the admin record.
    checkpoint_repo
        .create(CheckpointAnnouncement {
            id: Uuid::new_v4(),
            title: "Cancelled: checkpoint on SR-256".to_string(),
            county: Some("Fairfield".to_string()),
            location_name: Some("SR-256 near the outlet mall".to_string()),
            address: None,
            latitude: None,
            longitude: None,
            status: CheckpointStatus::Cancelled,
            event_date: Some((now - Duration::days(5)).format("%Y-%m-%d").to_string()),
            start_date: None,
            end_date: None,
            announcement_date: Some((now - Duration::days(9)).to_rfc3339()),
            source_url: None,
            description: Some("Called off due to weather.".to_string()),
            created_at: now - Duration::days(9),
            updated_at: now - Duration::days(4),
        })
        .await?;

    println!("  ✅ Created 4 checkpoint announcements");

    println!("📨 Creating leads...");

    let mut rng = rand::thread_rng();
    let channels = [LeadChannel::ContactForm, LeadChannel::LeadForm, LeadChannel::Chat];

    for _ in 0..args.leads {
        let message = *SAMPLE_MESSAGES.choose(&mut rng).unwrap();
        let channel = *channels.choose(&mut rng).unwrap();

        lead_repo
            .create(CreateLeadRequest {
                channel,
                name: Name().fake(),
                email: Some(SafeEmail().fake()),
                phone: Some(PhoneNumber().fake()),
                message: message.to_string(),
                lead_source: Some("seed".to_string()),
                case_type: None,
                urgency: None,
                county: None,
                checkpoint_id: None,
            })
            .await?;
    }

    println!("  ✅ Created {} leads", args.leads);
    println!("🎉 Seeding complete");

    Ok(())
}
