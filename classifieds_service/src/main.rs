use anyhow::Context;
use classifieds_entrypoint::ClassifiedsEntrypoint;
use classifieds_service::domain::services::ClassifiedsServiceImpl;
use classifieds_service::outbound::{ClassifiedsPgStorage, EmailQueue, LoggingMailer};
use config::Config;
use sqlx::postgres::PgPoolOptions;

mod api;
mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ClassifiedsEntrypoint::default().init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::info!("initialized config");

    let (min_connections, max_connections) = config.environment.pool_bounds();

    let db = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(&config.database_url)
        .await
        .context("could not connect to the classifieds database")?;

    tracing::info!(
        min_connections,
        max_connections,
        "initialized database connection"
    );

    classifieds_db_client::MIGRATIONS
        .run(&db)
        .await
        .context("could not run migrations")?;
    tracing::info!("applied migrations");

    let queue = EmailQueue::spawn(LoggingMailer, config.default_from_email.clone());
    tracing::info!(from = %config.default_from_email, "started confirmation email worker");

    let service = ClassifiedsServiceImpl::new(ClassifiedsPgStorage::new(db), queue, config.images);

    api::setup_and_serve(service, &config).await
}
