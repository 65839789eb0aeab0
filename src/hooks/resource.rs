//! Async resource: turns a producer into `{data, loading, error}` that only
//! ever reflects the newest invocation of a still-mounted owner.
//!
//! Flow Overview:
//! - `mount()` starts the first invocation when enabled.
//! - `set_deps(deps)` starts a new invocation when the value changed.
//! - `set_enabled(true)` starts one when flipping from disabled;
//!   `set_enabled(false)` supersedes any in-flight invocation and clears
//!   `loading`, keeping the last data or error.
//! - `refetch()` always starts one, enabled or not.
//! - `dispose()` on unmount; outstanding invocations finish in the
//!   background but no longer touch state.
//!
//! Each operation that starts work returns the [`Invocation`] future; the
//! host decides where it runs (`spawn_local` in the browser, direct `.await`
//! in tests). The producer receives the current dependency value, so it
//! cannot close over a stale copy of it.

use super::{Invocation, state::RequestState, ticket::Epoch};
use crate::app_lib::AppError;
use futures::future::{FutureExt, LocalBoxFuture};
use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};
use tokio::sync::watch;
use tracing::{debug, trace};

type Producer<T, D> = Box<dyn Fn(D) -> LocalBoxFuture<'static, Result<T, AppError>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceOptions {
    /// When false the resource never fetches on its own; `refetch()` still works.
    pub enabled: bool,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ResourceOptions {
    #[must_use]
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }
}

struct Inner<T, D> {
    producer: Producer<T, D>,
    state: watch::Sender<RequestState<T>>,
    epoch: Epoch,
    deps: RefCell<D>,
    enabled: Cell<bool>,
    mounted: Cell<bool>,
}

/// Handle to one resource instance. Clones share state.
pub struct AsyncResource<T, D = ()> {
    inner: Rc<Inner<T, D>>,
}

impl<T, D> Clone for AsyncResource<T, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, D> AsyncResource<T, D>
where
    T: Clone + 'static,
    D: Clone + PartialEq + 'static,
{
    pub fn new<F, Fut>(deps: D, producer: F, options: ResourceOptions) -> Self
    where
        F: Fn(D) -> Fut + 'static,
        Fut: Future<Output = Result<T, AppError>> + 'static,
    {
        let (state, _) = watch::channel(RequestState::initial(options.enabled));
        Self {
            inner: Rc::new(Inner {
                producer: Box::new(move |deps| producer(deps).boxed_local()),
                state,
                epoch: Epoch::default(),
                deps: RefCell::new(deps),
                enabled: Cell::new(options.enabled),
                mounted: Cell::new(false),
            }),
        }
    }

    /// First activation. Later calls are no-ops.
    pub fn mount(&self) -> Option<Invocation> {
        if self.inner.mounted.replace(true) || self.inner.epoch.is_closed() {
            return None;
        }
        self.auto_start()
    }

    /// Records new dependencies; refetches only when they differ by value.
    pub fn set_deps(&self, deps: D) -> Option<Invocation> {
        if *self.inner.deps.borrow() == deps {
            return None;
        }
        self.inner.deps.replace(deps);
        if self.inner.mounted.get() {
            self.auto_start()
        } else {
            None
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> Option<Invocation> {
        let was_enabled = self.inner.enabled.replace(enabled);
        if enabled && !was_enabled && self.inner.mounted.get() {
            return self.start();
        }
        if !enabled && was_enabled && self.inner.state.borrow().loading {
            if let Some(ticket) = self.inner.epoch.issue() {
                trace!(?ticket, "resource disabled mid-flight");
                self.inner.state.send_modify(|state| state.loading = false);
            }
        }
        None
    }

    /// Starts a tracked invocation regardless of `enabled` or dependency changes.
    pub fn refetch(&self) -> Invocation {
        self.start().unwrap_or_else(|| async {}.boxed_local())
    }

    /// Unmount: every in-flight and future invocation becomes a no-op.
    pub fn dispose(&self) {
        if !self.inner.epoch.is_closed() {
            trace!("resource disposed");
        }
        self.inner.epoch.close();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.epoch.is_closed()
    }

    #[must_use]
    pub fn state(&self) -> RequestState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver that wakes whenever the state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.inner.state.subscribe()
    }

    fn auto_start(&self) -> Option<Invocation> {
        if self.inner.enabled.get() {
            self.start()
        } else {
            None
        }
    }

    fn start(&self) -> Option<Invocation> {
        let ticket = self.inner.epoch.issue()?;
        self.inner.state.send_modify(RequestState::begin);

        let deps = self.inner.deps.borrow().clone();
        let pending = (self.inner.producer)(deps);
        let owner = Rc::downgrade(&self.inner);
        debug!(?ticket, "resource invocation started");

        Some(
            async move {
                let outcome = pending.await;
                let Some(inner) = owner.upgrade() else {
                    return;
                };
                if !inner.epoch.is_current(ticket) {
                    trace!(?ticket, "discarding stale resource result");
                    return;
                }
                inner.state.send_modify(|state| state.settle(outcome));
            }
            .boxed_local(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AsyncResource, ResourceOptions};
    use crate::app_lib::AppError;
    use crate::hooks::RequestState;
    use std::{cell::RefCell, rc::Rc};
    use tokio::sync::oneshot;

    type Gate = oneshot::Sender<Result<u32, AppError>>;
    type Gates = Rc<RefCell<Vec<Option<Gate>>>>;

    /// Resource whose every invocation waits until the test releases it.
    fn gated<D: Clone + PartialEq + 'static>(
        deps: D,
        options: ResourceOptions,
    ) -> (AsyncResource<u32, D>, Gates, Rc<RefCell<Vec<D>>>) {
        let gates: Gates = Rc::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let producer_gates = gates.clone();
        let producer_seen = seen.clone();
        let resource = AsyncResource::new(
            deps,
            move |deps: D| {
                let (tx, rx) = oneshot::channel();
                producer_gates.borrow_mut().push(Some(tx));
                producer_seen.borrow_mut().push(deps);
                async move {
                    rx.await
                        .unwrap_or_else(|_| Err(AppError::Network("gate dropped".to_string())))
                }
            },
            options,
        );
        (resource, gates, seen)
    }

    fn release(gates: &Gates, index: usize, outcome: Result<u32, AppError>) {
        let gate = gates.borrow_mut()[index].take().expect("gate released twice");
        gate.send(outcome).expect("invocation dropped");
    }

    fn settled(data: u32) -> RequestState<u32> {
        RequestState {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    #[tokio::test]
    async fn mount_fetches_and_applies_success() {
        let (resource, gates, _) = gated((), ResourceOptions::default());
        assert!(resource.state().loading);

        let invocation = resource.mount().expect("enabled resource fetches on mount");
        assert!(resource.mount().is_none());

        release(&gates, 0, Ok(7));
        invocation.await;
        assert_eq!(resource.state(), settled(7));
    }

    #[tokio::test]
    async fn rejection_clears_data_and_stores_error() {
        let (resource, gates, _) = gated((), ResourceOptions::default());
        let first = resource.mount().unwrap();
        release(&gates, 0, Ok(1));
        first.await;

        let retry = resource.refetch();
        // Stale data stays visible while reloading.
        assert_eq!(resource.state().data, Some(1));
        assert!(resource.state().loading);

        let err = AppError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        release(&gates, 1, Err(err.clone()));
        retry.await;

        let state = resource.state();
        assert!(!state.loading);
        assert_eq!(state.data, None);
        assert_eq!(state.error, Some(err));
    }

    #[tokio::test]
    async fn results_after_dispose_are_discarded() {
        let (resource, gates, _) = gated((), ResourceOptions::default());
        let invocation = resource.mount().unwrap();
        let before = resource.state();

        resource.dispose();
        release(&gates, 0, Ok(9));
        invocation.await;
        assert_eq!(resource.state(), before);

        // Further triggers after unmount do nothing.
        resource.refetch().await;
        assert!(resource.set_deps(()).is_none());
        assert_eq!(gates.borrow().len(), 1);
    }

    #[tokio::test]
    async fn dropping_the_resource_mid_flight_is_harmless() {
        let (resource, gates, _) = gated((), ResourceOptions::default());
        let invocation = resource.mount().unwrap();
        drop(resource);

        release(&gates, 0, Err(AppError::Network("late".to_string())));
        invocation.await;
    }

    #[tokio::test]
    async fn older_invocation_resolving_last_does_not_overwrite_newer() {
        let (resource, gates, seen) = gated(1_u32, ResourceOptions::default());
        let older = resource.mount().unwrap();
        let newer = resource.set_deps(2).expect("changed deps refetch");
        assert_eq!(*seen.borrow(), vec![1, 2]);

        release(&gates, 1, Ok(20));
        newer.await;
        assert_eq!(resource.state(), settled(20));

        release(&gates, 0, Ok(10));
        older.await;
        assert_eq!(resource.state(), settled(20));
    }

    #[tokio::test]
    async fn older_invocation_resolving_first_keeps_loading() {
        let (resource, gates, _) = gated(1_u32, ResourceOptions::default());
        let older = resource.mount().unwrap();
        let newer = resource.set_deps(2).unwrap();

        release(&gates, 0, Err(AppError::Network("stale".to_string())));
        older.await;
        let state = resource.state();
        assert!(state.loading);
        assert_eq!(state.error, None);

        release(&gates, 1, Ok(2));
        newer.await;
        assert_eq!(resource.state(), settled(2));
    }

    #[tokio::test]
    async fn rapid_refetches_settle_on_the_last_call() {
        let (resource, gates, _) = gated((), ResourceOptions::enabled(false));
        let calls = [resource.refetch(), resource.refetch(), resource.refetch()];
        let mut changes = resource.subscribe();
        let _ = changes.borrow_and_update();

        let [first, second, third] = calls;
        release(&gates, 2, Ok(3));
        release(&gates, 0, Ok(1));
        release(&gates, 1, Ok(2));

        first.await;
        second.await;
        assert!(!changes.has_changed().unwrap());
        assert!(resource.state().loading);

        third.await;
        assert!(changes.has_changed().unwrap());
        assert_eq!(resource.state(), settled(3));
    }

    #[tokio::test]
    async fn unchanged_deps_do_not_refetch() {
        let (resource, gates, _) = gated(String::from("page=1"), ResourceOptions::default());
        let first = resource.mount().unwrap();
        assert!(resource.set_deps(String::from("page=1")).is_none());
        assert_eq!(gates.borrow().len(), 1);

        release(&gates, 0, Ok(1));
        first.await;
    }

    #[tokio::test]
    async fn disabled_resource_only_runs_on_demand() {
        let (resource, gates, seen) = gated(5_u32, ResourceOptions::enabled(false));
        assert_eq!(resource.state(), RequestState::idle());

        assert!(resource.mount().is_none());
        assert!(resource.set_deps(6).is_none());
        assert!(gates.borrow().is_empty());

        let manual = resource.refetch();
        release(&gates, 0, Ok(60));
        manual.await;
        assert_eq!(resource.state(), settled(60));

        let enabled = resource.set_enabled(true).expect("flip to enabled fetches");
        assert!(resource.set_enabled(true).is_none());
        release(&gates, 1, Ok(61));
        enabled.await;
        assert_eq!(resource.state(), settled(61));
        assert_eq!(*seen.borrow(), vec![6, 6]);
    }

    #[tokio::test]
    async fn disabling_mid_flight_stops_loading_and_drops_the_result() {
        let (resource, gates, _) = gated((), ResourceOptions::default());
        let first = resource.mount().expect("enabled resource fetches on mount");
        release(&gates, 0, Ok(3));
        first.await;

        let pending = resource.refetch();
        assert!(resource.state().loading);
        assert!(resource.set_enabled(false).is_none());
        assert_eq!(resource.state(), settled(3));

        release(&gates, 1, Ok(4));
        pending.await;
        assert_eq!(resource.state(), settled(3));

        let resumed = resource.set_enabled(true).expect("re-enabling fetches");
        assert!(resource.state().loading);
        release(&gates, 2, Ok(5));
        resumed.await;
        assert_eq!(resource.state(), settled(5));
    }

    #[tokio::test]
    async fn deps_changed_before_mount_are_used_on_mount() {
        let (resource, gates, seen) = gated(1_u32, ResourceOptions::default());
        assert!(resource.set_deps(3).is_none());

        let invocation = resource.mount().unwrap();
        release(&gates, 0, Ok(30));
        invocation.await;
        assert_eq!(*seen.borrow(), vec![3]);
    }
}
