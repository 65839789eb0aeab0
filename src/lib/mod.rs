//! Shared utilities for API access, configuration, errors, session storage,
//! and build metadata.
//!
//! Every request goes through [`api::ApiClient`], which reads the bearer
//! credential from the session store and ends the session when the API
//! answers 401. Callers must still avoid logging tokens or request bodies.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod storage;

pub use errors::AppError;
