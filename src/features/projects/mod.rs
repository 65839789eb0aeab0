//! Projects resource. Only the list is needed by the dashboard core; the other
//! business resources follow the same client/types split.

pub mod client;
pub mod types;
