use crate::components::AppShell;
use crate::features::auth::guards::RequireAuth;
use leptos::prelude::*;
use leptos_router::components::A;

/// Unknown paths still sit behind the general guard, so signed-out visitors
/// land on the login page instead.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <NotFoundContent />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn NotFoundContent() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
            <h1 class="text-7xl font-black text-gray-200 dark:text-gray-800 select-none">"404"</h1>
            <p class="mt-4 text-gray-500 dark:text-gray-400 max-w-sm">
                "This section is missing or not available for your role."
            </p>
            <div class="mt-6 flex gap-4">
                <A
                    href="/"
                    {..}
                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-amber-600 rounded-lg hover:bg-amber-700"
                >
                    "Go Home"
                </A>
                <button
                    type="button"
                    on:click=move |_| {
                        if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
                            let _ = history.back();
                        }
                    }
                    class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600"
                >
                    "Go Back"
                </button>
            </div>
        </div>
    }
}
