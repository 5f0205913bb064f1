//! dynaform - a schema-driven form server
//!
//! One field schema drives validation, rendering and the submissions table.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod present;
pub mod query;
pub mod render;
pub mod schema;
pub mod storage;
pub mod submissions;
