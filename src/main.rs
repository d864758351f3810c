//! music-catalog - a small self-hosted song catalog
//!
//! Serves CRUD routes over songs plus collection statistics, and doubles as a
//! command-line client for a running server.

mod api;
mod client;
mod config;
mod core;
mod db;
mod error;
mod models;
mod stores;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::client::commands::ClientCommand;
use crate::config::{UserConfig, DEFAULT_SERVER_URL};
use crate::stores::CatalogStore;

/// music-catalog - song catalog server and client
#[derive(Parser, Debug)]
#[command(name = "music-catalog")]
#[command(version)]
#[command(about = "A small self-hosted song catalog with collection statistics")]
struct Args {
    /// Host address to bind to
    #[arg(long, global = true, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (falls back to $PORT, then 5000)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Enable debug mode
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep songs in memory instead of the SQLite database
    #[arg(long, global = true)]
    in_memory: bool,

    /// Server used by client commands
    #[arg(long, global = true, default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    #[command(flatten)]
    Client(ClientCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize logging, keeping sqlx statement logs out of the default output
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn", log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    match args.command {
        Some(Command::Client(command)) => client::commands::run(&args.server, command).await,
        Some(Command::Serve) | None => {
            start_server(args.host, args.port, args.config, args.in_memory).await
        }
    }
}

async fn start_server(
    host: String,
    port: Option<u16>,
    config_dir: Option<PathBuf>,
    in_memory: bool,
) -> Result<()> {
    info!("music-catalog v{} starting...", env!("CARGO_PKG_VERSION"));

    // Initialize paths
    let paths = config::Paths::init(config_dir)?;
    info!("Config directory: {:?}", paths.config_dir());

    let mut config = UserConfig::load()?;
    if config.server_id.is_empty() {
        config.server_id = uuid::Uuid::new_v4().to_string();
        config.save()?;
    }
    config.apply_env_overrides();
    info!("Server id: {}", config.server_id);

    let store = open_store(&paths, &config, in_memory).await?;
    let store = actix_web::web::Data::from(store);

    let port = config::resolve_port(port, std::env::var("PORT").ok().as_deref());
    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    use actix_web::{middleware, App, HttpServer};

    let cors_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(store.clone())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

async fn open_store(
    paths: &config::Paths,
    config: &UserConfig,
    in_memory: bool,
) -> Result<Arc<dyn CatalogStore>> {
    if in_memory {
        tracing::warn!("Running with an in-memory catalog; songs are lost on exit");
        return Ok(limit_store(Arc::new(stores::SongStore::new()), config));
    }

    let engine = db::DbEngine::connect(&paths.app_db_path(), config.max_connections).await?;
    db::run_migrations(engine.pool()).await?;

    let table = db::SongTable::new(&engine);
    info!("Catalog holds {} songs", table.count().await?);
    Ok(limit_store(Arc::new(table), config))
}

fn limit_store(store: Arc<dyn CatalogStore>, config: &UserConfig) -> Arc<dyn CatalogStore> {
    match config.request_timeout() {
        Some(limit) => {
            info!("Store calls time out after {:?}", limit);
            Arc::new(stores::TimeoutStore::new(store, limit))
        }
        None => store,
    }
}

fn build_cors(config: &UserConfig) -> actix_cors::Cors {
    use actix_cors::Cors;

    if config.allows_any_origin() {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let args = Args::try_parse_from(["music-catalog"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.server, DEFAULT_SERVER_URL);
        assert_eq!(args.port, None);
    }

    #[test]
    fn test_client_subcommand() {
        let args = Args::try_parse_from([
            "music-catalog",
            "add",
            "--title",
            "Hurt",
            "--artist",
            "Johnny Cash",
            "--album",
            "American IV",
            "--genre",
            "Country",
            "--server",
            "http://catalog.local:8080",
        ])
        .unwrap();

        assert_eq!(args.server, "http://catalog.local:8080");
        match args.command {
            Some(Command::Client(ClientCommand::Add { artist, .. })) => {
                assert_eq!(artist, "Johnny Cash")
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_stats_local_flag() {
        let args = Args::try_parse_from(["music-catalog", "stats", "--local"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Client(ClientCommand::Stats { local: true }))
        ));
    }

    #[test]
    fn test_server_flags_after_serve() {
        let args = Args::try_parse_from([
            "music-catalog",
            "serve",
            "--port",
            "8080",
            "--in-memory",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();

        assert!(matches!(args.command, Some(Command::Serve)));
        assert_eq!(args.port, Some(8080));
        assert!(args.in_memory);
        assert_eq!(args.host, "127.0.0.1");
    }

    #[actix_web::test]
    async fn test_cors_configured_origins() {
        use actix_web::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
        use actix_web::{test, web, App, HttpResponse};

        let config = UserConfig {
            allowed_origins: vec!["http://allowed.test".to_string()],
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&config))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((ORIGIN, "http://allowed.test"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://allowed.test"
        );

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((ORIGIN, "http://elsewhere.test"))
            .to_request();
        // rejected origins either fail the call or come back without the header
        if let Ok(resp) = test::try_call_service(&app, req).await {
            assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        }
    }

    #[actix_web::test]
    async fn test_cors_any_origin_by_default() {
        use actix_web::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
        use actix_web::{test, web, App, HttpResponse};

        let app = test::init_service(
            App::new()
                .wrap(build_cors(&UserConfig::default()))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((ORIGIN, "http://anywhere.test"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }
}
