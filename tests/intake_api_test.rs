use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use docket::{
    api,
    config::Settings,
    integrations::IntegrationManager,
    repository::{LeadRepository, SqliteLeadRepository},
    service::ServiceContext,
};

async fn test_app(admin_token: &str) -> anyhow::Result<(Router, Arc<ServiceContext>)> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let checkpoint_repo = Arc::new(docket::repository::SqliteCheckpointRepository::new(
        pool.clone(),
    ));
    let lead_repo = Arc::new(SqliteLeadRepository::new(pool.clone()));

    // No integrations registered: intake must succeed without any
    // notification backends configured.
    let service_context = Arc::new(ServiceContext::new(
        checkpoint_repo,
        lead_repo,
        Arc::new(IntegrationManager::new()),
        pool,
    ));

    let mut settings = Settings::default();
    settings.admin.api_token = admin_token.to_string();

    let app = api::create_app(service_context.clone(), Arc::new(settings));
    Ok((app, service_context))
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_contact_intake_persists_lead() -> anyhow::Result<()> {
    let (app, ctx) = test_app("").await?;

    let response = app
        .oneshot(json_post(
            "/public/intake/contact",
            json!({
                "name": "Pat Doe",
                "email": "pat@example.com",
                "message": "I was arrested for OVI last night"
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: Value = serde_json::from_slice(&body)?;
    assert!(parsed.get("lead_id").is_some());

    let leads = ctx.lead_repo.list(10, 0).await?;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].name, "Pat Doe");
    assert_eq!(leads[0].message, "I was arrested for OVI last night");

    Ok(())
}

#[tokio::test]
async fn test_intake_requires_a_contact_method() -> anyhow::Result<()> {
    let (app, ctx) = test_app("").await?;

    let response = app
        .oneshot(json_post(
            "/public/intake/contact",
            json!({
                "name": "Pat Doe",
                "message": "No way to reach me"
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.lead_repo.list(10, 0).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_chat_intake_flattens_transcript() -> anyhow::Result<()> {
    let (app, ctx) = test_app("").await?;

    let response = app
        .oneshot(json_post(
            "/public/intake/chat",
            json!({
                "name": "Chris Doe",
                "phone": "614-555-0100",
                "transcript": [
                    {"sender": "visitor", "text": "Is the checkpoint on US-33 real?"},
                    {"sender": "assistant", "text": "Yes, it was announced yesterday."}
                ]
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);

    let leads = ctx.lead_repo.list(10, 0).await?;
    assert_eq!(leads.len(), 1);
    assert!(leads[0].message.contains("visitor: Is the checkpoint on US-33 real?"));
    assert!(leads[0].message.contains("assistant: Yes"));

    Ok(())
}

#[tokio::test]
async fn test_admin_routes_require_token() -> anyhow::Result<()> {
    let (app, _ctx) = test_app("secret-token").await?;

    // No token: unauthorized.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/admin/leads")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong token: forbidden.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/admin/leads")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Right token: ok.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/admin/leads")
                .header(header::AUTHORIZATION, "Bearer secret-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_admin_disabled_without_configured_token() -> anyhow::Result<()> {
    let (app, _ctx) = test_app("").await?;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/admin/leads")
                .header(header::AUTHORIZATION, "Bearer anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
