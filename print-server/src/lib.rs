//! Print-shop order management backend
//!
//! # Module structure
//!
//! ```text
//! print-server/src/
//! ├── config/    # Environment configuration
//! ├── db/        # SQLite pool, migrations, store layer
//! ├── pricing/   # Pure price calculator and rate tables
//! ├── services/  # Orders, catalog, notifications, worker, seams
//! ├── state/     # Shared application state
//! └── utils/     # Logging, validation helpers
//! ```
//!
//! The HTTP transport, identity issuance and file-byte storage are external
//! collaborators; this crate exposes the service layer they sit on. Every
//! operation takes an explicit actor (user id + role) and returns a
//! structured result the boundary can map.

pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod services;
pub mod state;
pub mod utils;

// Re-export public types
pub use config::Config;
pub use db::DbService;
pub use error::{BoxError, ServiceError, ServiceResult};
pub use state::AppState;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
