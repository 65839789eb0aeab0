//! Project list with paging and an inline create form. The list refetches
//! when the page changes and after a successful create.

use crate::components::{Alert, AlertKind, AppShell, ErrorBanner, Spinner};
use crate::features::{
    auth::{guards::RequireAuth, state::use_session},
    projects::{
        client,
        types::{CreateProjectRequest, ProjectSummary},
    },
};
use crate::hooks::{
    ResourceOptions,
    bindings::{use_async_mutation, use_async_resource},
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <ProjectsContent />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn ProjectsContent() -> impl IntoView {
    let session = use_session();
    let (page, set_page) = signal(1_u32);

    let list_session = session.clone();
    let projects = use_async_resource(
        move || page.get(),
        move |page| {
            let api = list_session.api();
            async move { client::list_projects(&api?, page).await }
        },
        ResourceOptions::default(),
    );

    let create = use_async_mutation(move |request: CreateProjectRequest| {
        let api = session.api();
        async move { client::create_project(&api?, &request).await }
    });

    let (name, set_name) = signal(String::new());
    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let request = CreateProjectRequest {
            name: name.get_untracked(),
            address: None,
            budget: None,
        };
        spawn_local(async move {
            if create.mutate(request).await.is_ok() {
                set_name.set(String::new());
                projects.refetch();
            }
        });
    };

    view! {
        <section class="space-y-6">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Projects"</h1>

            <form class="flex gap-3" on:submit=on_submit>
                <input
                    type="text"
                    class="flex-1 rounded-lg border border-gray-300 bg-gray-50 p-2.5 text-sm dark:border-gray-600 dark:bg-gray-700 dark:text-white"
                    placeholder="New project name"
                    prop:value=move || name.get()
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
                <button
                    type="submit"
                    class="rounded-lg bg-amber-600 px-4 py-2 text-sm font-medium text-white hover:bg-amber-700 disabled:opacity-50"
                    disabled=move || create.loading()
                >
                    "Add"
                </button>
            </form>
            {move || {
                create
                    .error()
                    .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
            }}
            {move || {
                create
                    .data()
                    .map(|project| {
                        view! {
                            <Alert
                                kind=AlertKind::Success
                                message=format!("Project \"{}\" created.", project.name)
                            />
                        }
                    })
            }}

            {move || projects.loading().then(|| view! { <Spinner /> })}
            {move || {
                projects
                    .error()
                    .map(|error| view! { <ErrorBanner error=error on_retry=move || projects.refetch() /> })
            }}
            <ul class="divide-y divide-gray-200 rounded-lg border border-gray-200 bg-white dark:divide-gray-800 dark:border-gray-800 dark:bg-gray-900">
                <For each=move || projects.data().unwrap_or_default() key=|project| project.id let:project>
                    <ProjectRow project=project />
                </For>
            </ul>

            <div class="flex items-center gap-3 text-sm">
                <button
                    type="button"
                    class="rounded-md border px-3 py-1 disabled:opacity-50"
                    disabled=move || page.get() <= 1
                    on:click=move |_| set_page.update(|page| *page = page.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span>{move || format!("Page {}", page.get())}</span>
                <button
                    type="button"
                    class="rounded-md border px-3 py-1"
                    on:click=move |_| set_page.update(|page| *page += 1)
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}

#[component]
fn ProjectRow(project: ProjectSummary) -> impl IntoView {
    let details = [project.address.clone(), project.budget.map(|budget| format!("{budget:.0} UZS"))]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

    view! {
        <li class="px-4 py-3">
            <p class="font-medium text-gray-900 dark:text-white">{project.name}</p>
            <p class="text-xs text-gray-500 dark:text-gray-400">{details}</p>
        </li>
    }
}
