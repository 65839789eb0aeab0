//! Data-synchronization hooks shared by every page.
//!
//! [`AsyncResource`] keeps a read-only view of a producer in sync with its
//! dependencies; [`AsyncMutation`] runs side-effecting actions on demand.
//! Both are framework-free and single-threaded; `bindings` adapts them to
//! Leptos signals in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod bindings;
pub mod mutation;
pub mod resource;
pub mod state;
mod ticket;

use futures::future::LocalBoxFuture;

pub use mutation::AsyncMutation;
pub use resource::{AsyncResource, ResourceOptions};
pub use state::{MutationState, RequestState};

/// A started invocation. Run it on the UI task (`spawn_local`) or await it.
pub type Invocation = LocalBoxFuture<'static, ()>;
