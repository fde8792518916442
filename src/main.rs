use std::sync::Arc;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docket::{
    api,
    config::Settings,
    integrations::{email::EmailIntegration, webhook::WebhookIntegration, IntegrationManager},
    repository,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docket=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Docket server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let checkpoint_repo = Arc::new(repository::SqliteCheckpointRepository::new(db_pool.clone()));
    let lead_repo = Arc::new(repository::SqliteLeadRepository::new(db_pool.clone()));

    // Initialize integration manager
    let integration_manager = Arc::new(IntegrationManager::new());

    // Register integrations
    if let Some(email) = EmailIntegration::new(
        settings.integrations.email.clone(),
        settings.server.site_url.clone(),
    ) {
        integration_manager.register(Arc::new(email)).await;
    }

    if let Some(webhook) = WebhookIntegration::new(settings.integrations.webhook.clone()) {
        integration_manager.register(Arc::new(webhook)).await;
    }

    // Check integration health
    let health_results = integration_manager.health_check_all().await;
    for (name, result) in health_results {
        match result {
            Ok(_) => tracing::info!("Integration {} is healthy", name),
            Err(e) => tracing::warn!("Integration {} health check failed: {:?}", name, e),
        }
    }

    if settings.admin.api_token.is_empty() {
        tracing::warn!("No admin API token configured; /admin routes are disabled");
    }

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        checkpoint_repo,
        lead_repo,
        integration_manager,
        db_pool.clone(),
    ));

    // Create API app
    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
