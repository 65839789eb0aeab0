mod admin;
mod dashboard;
mod login;
mod not_found;
mod projects;

pub(crate) use admin::AdminPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use projects::ProjectsPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=DashboardPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/projects") view=ProjectsPage />
            <Route path=path!("/admin") view=AdminPage />
        </Routes>
    }
}
