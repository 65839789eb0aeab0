//! Leptos bindings for the async hooks. Each binding owns its hook for the
//! lifetime of the calling component: state is mirrored into a signal, the
//! dependency closure is tracked by an effect, and the hook is disposed in
//! `on_cleanup` so late responses never reach an unmounted view.

use super::{
    AsyncMutation, AsyncResource, Invocation, MutationState, RequestState, ResourceOptions,
};
use crate::app_lib::AppError;
use leptos::{prelude::*, task::spawn_local};
use std::{future::Future, rc::Rc};
use tokio::sync::watch;

/// Copies every change published on `changes` into `signal` until the
/// sender or the signal is gone.
pub(crate) fn mirror<S>(mut changes: watch::Receiver<S>, signal: RwSignal<S>)
where
    S: Clone + Send + Sync + 'static,
{
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let next = changes.borrow_and_update().clone();
            if signal.try_set(next).is_some() {
                break;
            }
        }
    });
}

/// Reactive view of an [`AsyncResource`] owned by the current component.
pub struct ResourceHandle<T: 'static> {
    state: RwSignal<RequestState<T>>,
    refetch: StoredValue<Rc<dyn Fn() -> Invocation>, LocalStorage>,
}

impl<T: 'static> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ResourceHandle<T> {}

impl<T> ResourceHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn state(&self) -> RequestState<T> {
        self.state.get()
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|state| state.data.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|state| state.loading)
    }

    pub fn error(&self) -> Option<AppError> {
        self.state.with(|state| state.error.clone())
    }

    /// Retry affordance for error banners.
    pub fn refetch(&self) {
        if let Some(invocation) = self.refetch.try_with_value(|refetch| refetch()) {
            spawn_local(invocation);
        }
    }
}

/// Fetches with `producer` on mount and whenever `deps()` changes by value.
pub fn use_async_resource<T, D, F, Fut>(
    deps: impl Fn() -> D + 'static,
    producer: F,
    options: ResourceOptions,
) -> ResourceHandle<T>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let resource = AsyncResource::new(deps(), producer, options);
    let state = RwSignal::new(resource.state());
    mirror(resource.subscribe(), state);

    let for_refetch = resource.clone();
    let refetch: Rc<dyn Fn() -> Invocation> = Rc::new(move || for_refetch.refetch());
    let refetch = StoredValue::new_local(refetch);
    let resource = StoredValue::new_local(resource);

    Effect::new(move |mounted: Option<()>| {
        let current = deps();
        let invocation = resource
            .try_with_value(|resource| {
                let changed = resource.set_deps(current);
                if mounted.is_none() {
                    resource.mount()
                } else {
                    changed
                }
            })
            .flatten();
        if let Some(invocation) = invocation {
            spawn_local(invocation);
        }
    });

    on_cleanup(move || {
        resource.try_with_value(AsyncResource::dispose);
    });

    ResourceHandle { state, refetch }
}

/// Reactive view of an [`AsyncMutation`] owned by the current component.
pub struct MutationHandle<T: 'static, V: 'static> {
    state: RwSignal<MutationState<T>>,
    mutation: StoredValue<AsyncMutation<T, V>, LocalStorage>,
}

impl<T: 'static, V: 'static> Clone for MutationHandle<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, V: 'static> Copy for MutationHandle<T, V> {}

impl<T, V> MutationHandle<T, V>
where
    T: Clone + Send + Sync + 'static,
    V: 'static,
{
    /// Runs the action and returns its outcome to the caller.
    ///
    /// # Errors
    /// Returns the action's error, or `AppError::Config` once the owning
    /// component is gone.
    pub async fn mutate(self, variables: V) -> Result<T, AppError> {
        let pending = self
            .mutation
            .try_with_value(|mutation| mutation.mutate(variables));
        match pending {
            Some(pending) => pending.await,
            None => Err(AppError::Config("This form is no longer open.".to_string())),
        }
    }

    pub fn reset(&self) {
        self.mutation.try_with_value(AsyncMutation::reset);
    }

    pub fn state(&self) -> MutationState<T> {
        self.state.get()
    }

    /// Result of the last successful cycle, until the next one starts.
    pub fn data(&self) -> Option<T> {
        self.state.with(|state| state.data.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|state| state.loading)
    }

    pub fn error(&self) -> Option<AppError> {
        self.state.with(|state| state.error.clone())
    }
}

/// Wraps a create/update/delete action for the current component.
pub fn use_async_mutation<T, V, F, Fut>(action: F) -> MutationHandle<T, V>
where
    T: Clone + Send + Sync + 'static,
    V: 'static,
    F: Fn(V) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let mutation = AsyncMutation::new(action);
    let state = RwSignal::new(mutation.state());
    mirror(mutation.subscribe(), state);

    let mutation = StoredValue::new_local(mutation);
    on_cleanup(move || {
        mutation.try_with_value(AsyncMutation::dispose);
    });

    MutationHandle { state, mutation }
}
