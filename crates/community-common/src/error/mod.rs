//! Error types shared across layers

mod app_error;

pub use app_error::{domain_status, AppError, AppResult, ErrorResponse};
