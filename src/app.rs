use crate::app_lib::config::AppConfig;
use crate::features::auth::state::SessionProvider;
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SessionProvider config=AppConfig::load()>
            <Router>
                <AppRoutes />
            </Router>
        </SessionProvider>
    }
}
