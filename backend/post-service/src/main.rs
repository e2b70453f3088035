use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use post_service::config::{Config, StorageBackend};
use post_service::db::{self, InMemoryPostStore, PgPostStore, PostStore};
use post_service::handlers::{configure_service, PostsController};
use post_service::middleware::MetricsMiddleware;
use post_service::views::{TeraRenderer, ViewRenderer};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let (json_layer, text_layer) = if json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn build_store(config: &Config) -> io::Result<Arc<dyn PostStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory post store; data is lost on restart");
            Ok(Arc::new(InMemoryPostStore::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!(database = ?config.database, "Connecting to PostgreSQL");
            let pool = db::create_pool(&config.database)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if config.database.run_migrations {
                db::run_migrations(&pool)
                    .await
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            }

            Ok(Arc::new(PgPostStore::new(pool)))
        }
    }
}

fn build_renderer(config: &Config) -> io::Result<Arc<dyn ViewRenderer>> {
    let renderer = match &config.views.templates_glob {
        Some(glob) => TeraRenderer::from_glob(glob),
        None => TeraRenderer::embedded(),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(Arc::new(renderer))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Post Service
///
/// # Routes
///
/// - `/posts` - index (HTML), create, clear
/// - `/posts/{id}` - show, update (PATCH), replace (PUT), delete
/// - `/health`, `/health/live`, `/health/ready` - probes
/// - `/metrics` - Prometheus metrics
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.app.log_json);

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        env = %config.app.env,
        storage = %config.storage.backend,
        "Configuration loaded"
    );

    let store = build_store(&config).await?;
    let renderer = build_renderer(&config)?;
    let controller = web::Data::new(PostsController::new(store, renderer));

    let bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let controller = controller.clone();
        App::new()
            .wrap(MetricsMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| configure_service(cfg, controller))
    })
    .bind(&bind_address)?
    .workers(config.app.workers)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            tracing::info!("HTTP server stopped");
            return result.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    server_task
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))??;

    tracing::info!("Post-service shutting down");
    Ok(())
}
