use crate::components::AppShell;
use crate::features::auth::{
    guards::{RequireAdmin, RoleGate},
    role::Role,
};
use leptos::prelude::*;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <AppShell>
                <AdminContent />
            </AppShell>
        </RequireAdmin>
    }
}

#[component]
fn AdminContent() -> impl IntoView {
    view! {
        <section class="space-y-4">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Platform Admin"</h1>
            <p class="text-gray-600 dark:text-gray-300">
                "Manage companies and their users. Changes apply to every organization."
            </p>
            <RoleGate allowed=vec![Role::SuperAdmin]>
                <p class="text-sm text-amber-700 dark:text-amber-300">
                    "Operator accounts are managed from the Operators section."
                </p>
            </RoleGate>
        </section>
    }
}
