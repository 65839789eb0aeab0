//! Authenticated layout: sidebar, header with the signed-in user, and the
//! content container. Sign-out always clears the local session even when the
//! API call fails.

use crate::components::layout::Sidebar;
use crate::features::auth::{client, state::use_session};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let greeting = {
        let session = session.clone();
        move || {
            session
                .session()
                .map(|session| format!("{} · {}", session.user.name, session.role().label()))
                .unwrap_or_default()
        }
    };

    let on_sign_out = move |_| {
        let session = session.clone();
        spawn_local(async move {
            match session.api() {
                Ok(api) => client::logout(&api).await,
                Err(_) => session.store.logout(),
            }
        });
    };

    view! {
        <div class="min-h-screen flex bg-gray-50 dark:bg-gray-950">
            <Sidebar />
            <div class="flex-1 flex flex-col">
                <header class="flex items-center justify-between border-b border-gray-200 bg-white px-6 py-3 dark:border-gray-800 dark:bg-gray-900">
                    <A href="/" {..} class="font-semibold text-gray-900 dark:text-white">
                        "Smeta"
                    </A>
                    <div class="flex items-center gap-4 text-sm text-gray-600 dark:text-gray-300">
                        <span>{greeting}</span>
                        <button
                            type="button"
                            class="rounded-md px-3 py-1.5 hover:bg-gray-100 dark:hover:bg-gray-800"
                            on:click=on_sign_out
                        >
                            "Sign Out"
                        </button>
                    </div>
                </header>
                <main class="flex-1">
                    <div class="container mx-auto p-6">{children()}</div>
                </main>
            </div>
        </div>
    }
}
