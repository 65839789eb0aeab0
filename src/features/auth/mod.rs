//! Auth feature module: the session state machine, role policy, route guards,
//! and sidebar filtering. Pages trust the enclosing guard for authentication
//! and tier checks and use [`role::has_role`] only for panel-level gates.
//!
//! Flow Overview: start-up rehydrates the session from storage without a
//! network call. Login posts credentials, then hands the returned session to
//! the store. Logout and any 401 from the API clear storage and flip the
//! state, which re-runs every guard. Tokens are held as secrets and never
//! logged.

pub mod client;
pub mod guards;
pub mod nav;
pub mod role;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod state;
pub mod token;
pub mod types;
