//! Services Layer
//!
//! This module contains business logic extracted from HTTP handlers.

pub mod import_service;
pub mod maintenance_service;
pub mod product_service;

// Re-export for convenience
pub use import_service::{ImportReport, ImportService};
pub use product_service::{BulkUpdateReport, apply_visibility};
