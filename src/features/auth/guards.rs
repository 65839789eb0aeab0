//! Route guards. The decision is a pure function of the session state so it
//! can be tested without a router; the components below only translate a
//! decision into a redirect. These are UX gates; the API enforces access.

use crate::features::auth::{
    role::{Role, has_role},
    session::SessionState,
};

pub const LOGIN_PATH: &str = "/login";
/// Default page for any authenticated session.
pub const LANDING_PATH: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardTier {
    /// Any signed-in session.
    Authenticated,
    /// `SUPER_ADMIN` or `OPERATOR` only.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    /// Signed in, but the role cannot reach this area.
    RedirectToLanding,
}

impl GuardDecision {
    #[must_use]
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToLanding => Some(LANDING_PATH),
        }
    }

    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

#[must_use]
pub fn evaluate_guard(state: &SessionState, tier: GuardTier) -> GuardDecision {
    if !state.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    match tier {
        GuardTier::Authenticated => GuardDecision::Allow,
        GuardTier::Admin if state.role().is_some_and(Role::is_admin_tier) => GuardDecision::Allow,
        GuardTier::Admin => GuardDecision::RedirectToLanding,
    }
}

/// Panel-level gate: hides content without redirecting.
#[must_use]
pub fn can_view(state: &SessionState, allowed: &[Role]) -> bool {
    state.is_authenticated() && has_role(state.role(), allowed)
}

#[cfg(target_arch = "wasm32")]
pub use components::{RequireAdmin, RequireAuth, RoleGate};

#[cfg(target_arch = "wasm32")]
mod components {
    use super::{GuardDecision, GuardTier, can_view, evaluate_guard};
    use crate::features::auth::{role::Role, state::use_session};
    use leptos::prelude::*;
    use leptos_router::hooks::use_navigate;

    fn guard(tier: GuardTier) -> Signal<GuardDecision> {
        let state = use_session().state;
        let navigate = use_navigate();
        let decision = Signal::derive(move || state.with(|state| evaluate_guard(state, tier)));

        Effect::new(move |_| {
            if let Some(path) = decision.get().redirect_path() {
                tracing::debug!(?tier, path, "guard redirect");
                navigate(path, Default::default());
            }
        });

        decision
    }

    #[component]
    pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
        let decision = guard(GuardTier::Authenticated);
        view! {
            <Show when=move || decision.get().is_allowed()>
                {children()}
            </Show>
        }
    }

    #[component]
    pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
        let decision = guard(GuardTier::Admin);
        view! {
            <Show when=move || decision.get().is_allowed()>
                {children()}
            </Show>
        }
    }

    /// Renders `children` only for the listed roles. An empty list shows it to everyone.
    #[component]
    pub fn RoleGate(#[prop(into)] allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
        let state = use_session().state;
        let visible = move || state.with(|state| can_view(state, &allowed));
        view! { <Show when=visible>{children()}</Show> }
    }
}
