use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, Spinner};
use crate::features::auth::{
    client,
    guards::LANDING_PATH,
    session::SessionState,
    state::use_session,
    types::LoginRequest,
};
use crate::hooks::bindings::use_async_mutation;
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let (phone, set_phone) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let login_session = session.clone();
    let login = use_async_mutation(move |request: LoginRequest| {
        let api = login_session.api();
        async move {
            let api = api?;
            let session = client::login(&api, &request).await?;
            api.session().login(session).map_err(AppError::from)
        }
    });

    // Covers both a fresh login and landing here with a restored session.
    let state = session.state;
    Effect::new(move |_| {
        if state.with(SessionState::is_authenticated) {
            navigate(LANDING_PATH, Default::default());
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let request = LoginRequest {
            phone: phone.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            if let Err(err) = login.mutate(request).await {
                tracing::debug!(error = %err, "login rejected");
            }
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-950">
            <form class="w-full max-w-sm space-y-5" on:submit=on_submit>
                <h1 class="text-xl font-semibold text-gray-900 dark:text-white">"Sign in to Smeta"</h1>
                <div>
                    <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="phone">
                        "Phone"
                    </label>
                    <input
                        id="phone"
                        type="tel"
                        class=INPUT_CLASS
                        autocomplete="tel"
                        placeholder="+998 90 123 45 67"
                        required
                        on:input=move |event| set_phone.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class="block mb-2 text-sm font-medium text-gray-900 dark:text-white" for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <button
                    type="submit"
                    class="w-full rounded-lg bg-amber-600 px-5 py-2.5 text-sm font-medium text-white hover:bg-amber-700 disabled:opacity-50"
                    disabled=move || login.loading()
                >
                    "Sign In"
                </button>
                {move || login.loading().then(|| view! { <Spinner /> })}
                {move || {
                    login
                        .error()
                        .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
                }}
            </form>
        </div>
    }
}
