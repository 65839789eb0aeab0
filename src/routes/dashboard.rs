use crate::components::{AppShell, ErrorBanner, Spinner};
use crate::features::auth::{
    client,
    guards::{RequireAuth, RoleGate},
    role::Role,
    state::use_session,
};
use crate::hooks::{ResourceOptions, bindings::use_async_resource};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <DashboardContent />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let session = use_session();
    let profile = use_async_resource(
        || (),
        move |()| {
            let api = session.api();
            async move { client::me(&api?).await }
        },
        ResourceOptions::default(),
    );

    view! {
        <section class="space-y-6">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Dashboard"</h1>
            {move || profile.loading().then(|| view! { <Spinner /> })}
            {move || {
                profile
                    .error()
                    .map(|error| view! { <ErrorBanner error=error on_retry=move || profile.refetch() /> })
            }}
            {move || {
                profile
                    .data()
                    .map(|user| {
                        view! {
                            <p class="text-gray-600 dark:text-gray-300">
                                {format!("Signed in as {} ({})", user.name, user.role.label())}
                            </p>
                        }
                    })
            }}
            <div class="grid gap-4 md:grid-cols-2">
                <DashboardCard title="Projects" target="/projects" />
                <RoleGate allowed=vec![Role::Direktor, Role::Boss, Role::Bugalteriya]>
                    <DashboardCard title="Finance" target="/finance" />
                </RoleGate>
                <RoleGate allowed=vec![Role::Direktor, Role::Boss, Role::Sklad, Role::Snabjeniya]>
                    <DashboardCard title="Warehouse" target="/warehouse" />
                </RoleGate>
            </div>
        </section>
    }
}

#[component]
fn DashboardCard(title: &'static str, target: &'static str) -> impl IntoView {
    view! {
        <A
            href=target
            {..}
            class="block rounded-lg border border-gray-200 bg-white p-5 hover:border-amber-400 dark:border-gray-800 dark:bg-gray-900"
        >
            <h2 class="font-medium text-gray-900 dark:text-white">{title}</h2>
        </A>
    }
}
