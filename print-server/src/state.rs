//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::error::BoxError;
use crate::services::{
    CatalogService, LogMailer, Mailer, NotificationService, NotifyWorker, OrderService,
    PaymentGateway, SandboxGateway,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Mail delivery collaborator
    pub mailer: Arc<dyn Mailer>,
    /// Payment gateway collaborator
    pub gateway: Arc<dyn PaymentGateway>,
    /// Delay before deferred order confirmations fire (ms)
    pub confirmation_delay_ms: i64,
}

impl AppState {
    /// Initialize state with the default collaborators (log mailer,
    /// sandbox gateway).
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_collaborators(
            db.pool,
            Arc::new(LogMailer::new(config.mail_from.clone())),
            Arc::new(SandboxGateway),
            config.confirmation_delay_ms,
        ))
    }

    /// Assemble state from explicit collaborators (used by tests and by
    /// boundaries that bring their own transports).
    pub fn with_collaborators(
        pool: SqlitePool,
        mailer: Arc<dyn Mailer>,
        gateway: Arc<dyn PaymentGateway>,
        confirmation_delay_ms: i64,
    ) -> Self {
        Self {
            pool,
            mailer,
            gateway,
            confirmation_delay_ms,
        }
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(
            self.pool.clone(),
            self.mailer.clone(),
            self.gateway.clone(),
            self.confirmation_delay_ms,
        )
    }

    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(self.pool.clone())
    }

    pub fn notify_worker(&self) -> NotifyWorker {
        NotifyWorker::new(self.pool.clone(), self.mailer.clone())
    }
}
