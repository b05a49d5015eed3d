use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use connecthub::config::DEFAULT_SESSION_SECRET;
use connecthub::db::{self, catalog_repo};
use connecthub::{handlers, AppState, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    // JSON logs in production, human-readable otherwise
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connecthub=debug,actix_web=info,sqlx=warn".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(env = %config.app.env, "Configuration loaded");

    if config.is_production() && config.session.secret == DEFAULT_SESSION_SECRET {
        tracing::warn!("SESSION__SECRET is not set; sessions are signed with the development secret");
    }

    let pool = db::create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    catalog_repo::seed_reference_data(&pool)
        .await
        .context("Failed to seed reference data")?;

    tokio::fs::create_dir_all(&config.uploads.dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.uploads.dir))?;

    let bind_address = (config.app.host.clone(), config.app.port);
    let state = web::Data::new(AppState {
        db: pool,
        config: config.clone(),
    });

    tracing::info!("Starting HTTP server at {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let origins = state.config.allowed_origins();
        let cors = if origins.is_empty() {
            Cors::default()
        } else {
            origins
                .into_iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
