//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate cache, repository and
//! validation calls for one use case each.

pub mod audit;
pub mod context;
pub mod error;
pub mod settings;

pub use audit::AuditService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult, GENERIC_FAILURE};
pub use settings::SettingsService;
