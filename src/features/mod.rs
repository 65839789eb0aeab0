//! Domain-level features and their API clients. Routes import these modules
//! to keep view code focused on rendering.

pub mod auth;
pub mod projects;
