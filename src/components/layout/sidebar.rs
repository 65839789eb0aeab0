//! Side navigation. Admin-tier roles get the admin list, everyone else the
//! organization list; both are filtered through the role policy on every
//! session change.

use crate::app_lib::build_info;
use crate::features::auth::{
    nav::{NavItem, nav_for},
    state::use_session,
};
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

fn is_active(pathname: &str, target: &str) -> bool {
    if target == "/" || target == "/admin" {
        pathname == target
    } else {
        pathname == target || pathname.starts_with(&format!("{target}/"))
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_session().state;
    let items = move || state.with(|state| nav_for(state.role()));

    view! {
        <aside class="w-64 flex-shrink-0 hidden md:flex flex-col border-r border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 overflow-y-auto">
            <nav class="flex-1 px-4 py-6 space-y-1">
                <For each=items key=|item| item.target let:item>
                    <SidebarLink item=item />
                </For>
            </nav>
            <div class="p-4 border-t border-gray-100 dark:border-gray-800">
                <p class="text-[10px] text-gray-400 font-mono text-center uppercase tracking-tighter">
                    {build_info::version_label()}
                </p>
            </div>
        </aside>
    }
}

#[component]
fn SidebarLink(item: &'static NavItem) -> impl IntoView {
    let location = use_location();
    let class = move || {
        if is_active(&location.pathname.get(), item.target) {
            "group flex items-center px-2 py-2 text-sm font-medium rounded-md text-amber-700 bg-amber-50 dark:bg-amber-900 dark:text-amber-300"
        } else {
            "group flex items-center px-2 py-2 text-sm font-medium rounded-md text-gray-600 hover:bg-gray-50 hover:text-gray-900 dark:text-gray-300 dark:hover:bg-gray-800 dark:hover:text-white"
        }
    };

    view! {
        <A href=item.target {..} class=class>
            <span class="material-symbols-outlined mr-3 text-xl">{item.icon}</span>
            {item.title}
        </A>
    }
}
