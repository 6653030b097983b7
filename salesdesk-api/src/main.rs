use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use salesdesk_api::{config, handlers, helpers, Database};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SalesDesk API"
    }))
}

#[get("/health")]
async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    let connected = match db.async_connection.lock().await {
        Ok(conn) => conn
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok(),
        Err(e) => {
            tracing::warn!("Health check could not get a connection: {}", e);
            false
        }
    };

    if connected {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        }))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("salesdesk-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let (config, config_path) = config::ApiConfig::load(args.config)?;
    tracing::info!("Loaded config from {:?}", config_path);

    let match_options = config.match_options()?;
    tracing::info!(
        "Matching with min score {} and at most {} results",
        match_options.min_score,
        match_options.max_results
    );

    let (db, db_path) = helpers::database::initialize_database(config.database_path().as_deref())?;
    tracing::info!("Database initialized at: {:?}", db_path);

    let (host, port) = if let Some(server_config) = &config.server {
        (server_config.host.clone(), server_config.port)
    } else {
        ("127.0.0.1".to_string(), 8080)
    };

    tracing::info!("Starting server on {}:{}", host, port);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(match_options))
            .service(hello)
            .service(health)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
