//! # nexus-service
//!
//! Application layer: guild settings and audit use cases over the prefix
//! cache and the SQLite repositories, plus validated request DTOs.

pub mod dto;
pub mod services;

pub use dto::PurgeRequest;
pub use services::{
    AuditService, ServiceContext, ServiceError, ServiceResult, SettingsService, GENERIC_FAILURE,
};
