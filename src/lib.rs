//! Smeta admin dashboard: data synchronization and auth gating for the
//! construction-budget API.
//!
//! The framework-free core (`app_lib`, `features`, `hooks`) builds and tests
//! on any target. The Leptos shell (`app`, `components`, `routes`) is compiled
//! for `wasm32` only.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[path = "lib/mod.rs"]
pub mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
pub mod features;
pub mod hooks;
#[cfg(target_arch = "wasm32")]
mod routes;
