use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nextcar_api::bootstrap::{ensure_admin, AdminSeed};
use nextcar_api::config::ServerConfig;
use nextcar_api::router::build_app_router;
use nextcar_api::state::AppState;
use nextcar_api::storage::LocalMediaStore;
use nextcar_mail::{EmailConfig, EmailDelivery};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.app_env,
        "configuration loaded",
    );

    let pool = prepare_database().await;

    if let Some(seed) = AdminSeed::from_env() {
        ensure_admin(&pool, &seed)
            .await
            .expect("could not create the initial admin account");
    } else {
        tracing::debug!("no ADMIN_USERNAME/ADMIN_PASSWORD, admin seeding skipped");
    }

    let media = Arc::new(LocalMediaStore::new(
        config.media_root.clone(),
        config.media_base_url.clone(),
    ));
    tracing::info!(root = %config.media_root.display(), base_url = %config.media_base_url, "serving media from disk");

    let mailer = match EmailConfig::from_env().map(EmailDelivery::new) {
        Some(Ok(delivery)) => Some(Arc::new(delivery)),
        Some(Err(e)) => {
            tracing::error!(error = %e, "SMTP settings rejected; password reset emails will not be sent");
            None
        }
        None => {
            tracing::warn!("SMTP_HOST not set; password reset emails will not be sent");
            None
        }
    };

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
        mailer,
        started_at: Instant::now(),
    };
    let app = build_app_router(state, &config);

    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("could not bind the listen address");
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server terminated with an error");

    tracing::info!("shut down cleanly");
}

/// Connect, verify the connection, and bring the schema up to date.
async fn prepare_database() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = nextcar_db::create_pool(&url)
        .await
        .expect("could not connect to PostgreSQL");
    nextcar_db::health_check(&pool)
        .await
        .expect("PostgreSQL did not answer the health query");
    nextcar_db::run_migrations(&pool)
        .await
        .expect("database migrations failed");

    tracing::info!("database ready");
    pool
}

/// `RUST_LOG` filters; `LOG_FORMAT=json` emits one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nextcar_api=debug,tower_http=debug"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "draining connections");
}
