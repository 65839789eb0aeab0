//! Alert banners. Error messages come from `AppError`'s display text, which
//! is already trimmed by the transport and never carries tokens.

use crate::app_lib::AppError;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => {
                "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
            }
            Self::Success => {
                "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
            }
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    view! { <div class=kind.class() role="alert">{message}</div> }
}

/// Error banner with a retry button. Used wherever a resource reports `error`.
#[component]
pub fn ErrorBanner<F>(error: AppError, on_retry: F) -> impl IntoView
where
    F: Fn() + Send + Sync + 'static,
{
    view! {
        <div class=format!("{} flex items-center justify-between gap-4", AlertKind::Error.class()) role="alert">
            <span>{error.to_string()}</span>
            <button
                type="button"
                class="rounded-md border border-red-300 px-3 py-1 text-xs font-medium hover:bg-red-100 dark:border-red-500 dark:hover:bg-red-900"
                on:click=move |_| on_retry()
            >
                "Retry"
            </button>
        </div>
    }
}
