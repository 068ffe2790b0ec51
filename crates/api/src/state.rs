use std::sync::Arc;
use std::time::Instant;

use nextcar_core::media::MediaStore;
use nextcar_mail::EmailDelivery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: nextcar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded images and videos are stored.
    pub media: Arc<dyn MediaStore>,
    /// SMTP mailer; `None` when `SMTP_HOST` is not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// Process start, for the uptime reported by `/health`.
    pub started_at: Instant,
}
