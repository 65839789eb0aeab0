//! Async mutation: create/update/delete actions that run only when the caller
//! asks. `mutate` both records the outcome in state and hands it back, so a
//! submit handler can close a dialog on success or show the validation error
//! inline on failure.
//!
//! Mutations use the same ticket discipline as resources: a second `mutate`
//! supersedes the first one's effect on state, and nothing is written after
//! `dispose()`. The caller always receives its own outcome.

use super::{state::MutationState, ticket::Epoch};
use crate::app_lib::AppError;
use futures::future::{FutureExt, LocalBoxFuture};
use std::{future::Future, rc::Rc};
use tokio::sync::watch;
use tracing::trace;

type Action<T, V> = Box<dyn Fn(V) -> LocalBoxFuture<'static, Result<T, AppError>>>;

struct Inner<T, V> {
    action: Action<T, V>,
    state: watch::Sender<MutationState<T>>,
    epoch: Epoch,
}

pub struct AsyncMutation<T, V> {
    inner: Rc<Inner<T, V>>,
}

impl<T, V> Clone for AsyncMutation<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, V> AsyncMutation<T, V>
where
    T: Clone + 'static,
    V: 'static,
{
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn(V) -> Fut + 'static,
        Fut: Future<Output = Result<T, AppError>> + 'static,
    {
        let (state, _) = watch::channel(MutationState::idle());
        Self {
            inner: Rc::new(Inner {
                action: Box::new(move |variables| action(variables).boxed_local()),
                state,
                epoch: Epoch::default(),
            }),
        }
    }

    /// Runs the action with `variables`.
    ///
    /// # Errors
    /// Returns the action's error after storing it in state.
    pub fn mutate(&self, variables: V) -> LocalBoxFuture<'static, Result<T, AppError>> {
        let ticket = self.inner.epoch.issue();
        if ticket.is_some() {
            self.inner.state.send_modify(MutationState::restart);
        }

        let pending = (self.inner.action)(variables);
        let owner = Rc::downgrade(&self.inner);

        async move {
            let outcome = pending.await;
            match (ticket, owner.upgrade()) {
                (Some(ticket), Some(inner)) if inner.epoch.is_current(ticket) => {
                    inner.state.send_modify(|state| state.settle(outcome.clone()));
                }
                _ => trace!("mutation outcome not applied to state"),
            }
            outcome
        }
        .boxed_local()
    }

    /// Back to idle, e.g. when a dialog closes. Supersedes any in-flight cycle.
    pub fn reset(&self) {
        if self.inner.epoch.issue().is_some() {
            self.inner.state.send_replace(MutationState::idle());
        }
    }

    pub fn dispose(&self) {
        self.inner.epoch.close();
    }

    #[must_use]
    pub fn state(&self) -> MutationState<T> {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MutationState<T>> {
        self.inner.state.subscribe()
    }
}
