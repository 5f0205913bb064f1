//! # HTTP Server Module
//!
//! Axum server for one form and its submissions.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/form-schema` - Active form schema
//! - `/api/submissions`, `/api/submissions/:id` - Submission CRUD and listing
//! - `/api/export.csv` - CSV export
//! - `/`, `/submissions` - Server-rendered form and table

pub mod config;
pub mod errors;
pub mod form_routes;
pub mod observability_routes;
pub mod server;
pub mod submission_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
