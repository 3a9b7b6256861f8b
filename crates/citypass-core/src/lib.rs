//! Shared error taxonomy and configuration for the citypass backend.

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, ErrorCodes, Result};
