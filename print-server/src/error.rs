//! Unified service-layer error type
//!
//! `ServiceError` bridges the gap between store-layer errors (`sqlx::Error`,
//! `BoxError`) and the structured [`AppError`] the boundary consumes. It
//! enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::database(...) })` boilerplate.

use shared::error::{AppError, ErrorCode};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to Database)
/// - `App`: Business-rule errors (pass-through with the original ErrorCode)
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Database or infrastructure error (sqlx, collaborator transports, serde)
    #[error("infrastructure error: {0}")]
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    #[error(transparent)]
    App(#[from] AppError),
}

impl ServiceError {
    /// The code the boundary would see for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Db(_) => ErrorCode::Database,
            ServiceError::App(err) => err.code,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::Database)
            }
        }
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
