/// Short git revision stamped by `build.rs`, or `unknown` outside a checkout.
pub const GIT_SHA: &str = env!("SMETA_WEB_GIT_SHA");

/// Version label shown in the sidebar footer and logged at start.
#[must_use]
pub fn version_label() -> String {
    format!("v{} ({GIT_SHA})", env!("CARGO_PKG_VERSION"))
}
