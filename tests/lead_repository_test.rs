use docket::{
    domain::{CreateLeadRequest, LeadChannel, LeadStatus},
    repository::{LeadRepository, SqliteLeadRepository},
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

fn request(name: &str, message: &str) -> CreateLeadRequest {
    CreateLeadRequest {
        channel: LeadChannel::ContactForm,
        name: name.to_string(),
        email: Some("visitor@example.com".to_string()),
        phone: None,
        message: message.to_string(),
        lead_source: None,
        case_type: None,
        urgency: None,
        county: None,
        checkpoint_id: None,
    }
}

#[tokio::test]
async fn test_lead_crud() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteLeadRepository::new(pool.clone());

    // Create
    let lead = repo.create(request("Pat Doe", "Arrested for OVI")).await?;
    assert_eq!(lead.name, "Pat Doe");
    assert_eq!(lead.channel, LeadChannel::ContactForm);
    assert_eq!(lead.status, LeadStatus::New);

    // Find by ID
    let found = repo.find_by_id(lead.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().message, "Arrested for OVI");

    // List
    let leads = repo.list(10, 0).await?;
    assert_eq!(leads.len(), 1);

    // Update status
    let updated = repo.update_status(lead.id, LeadStatus::Contacted).await?;
    assert_eq!(updated.status, LeadStatus::Contacted);

    // List by status
    let contacted = repo.list_by_status(LeadStatus::Contacted).await?;
    assert_eq!(contacted.len(), 1);
    assert!(repo.list_by_status(LeadStatus::New).await?.is_empty());

    // Delete
    repo.delete(lead.id).await?;
    assert!(repo.find_by_id(lead.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_optional_fields_round_trip() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteLeadRepository::new(pool);

    let mut input = request("Chris Doe", "Checkpoint question");
    input.channel = LeadChannel::LeadForm;
    input.email = None;
    input.phone = Some("614-555-0100".to_string());
    input.case_type = Some("ovi".to_string());
    input.urgency = Some("in_custody".to_string());
    input.county = Some("Franklin".to_string());
    input.checkpoint_id = Some("us-33-fishinger".to_string());

    let lead = repo.create(input).await?;
    assert_eq!(lead.channel, LeadChannel::LeadForm);
    assert!(lead.email.is_none());
    assert_eq!(lead.phone.as_deref(), Some("614-555-0100"));
    assert_eq!(lead.case_type.as_deref(), Some("ovi"));
    assert_eq!(lead.urgency.as_deref(), Some("in_custody"));
    assert_eq!(lead.county.as_deref(), Some("Franklin"));
    assert_eq!(lead.checkpoint_id.as_deref(), Some("us-33-fishinger"));

    Ok(())
}
