//! Build-time configuration for the API endpoint and session storage with an
//! optional runtime override. The runtime config is read from
//! `window.SMETA_CONFIG` (if present) so static deployments can point at a
//! different backend without rebuilding. Configuration values are public; do
//! not store secrets here.

/// Default request timeout (milliseconds) applied by the transport.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default prefix for persisted session keys.
pub const DEFAULT_STORAGE_PREFIX: &str = "smeta";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_prefix: String,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        let build = RuntimeConfig {
            api_base_url: option_env!("SMETA_API_BASE_URL").and_then(normalize_runtime_value),
            storage_prefix: option_env!("SMETA_STORAGE_PREFIX").and_then(normalize_runtime_value),
            request_timeout_ms: option_env!("SMETA_REQUEST_TIMEOUT_MS").and_then(parse_timeout),
        };
        apply_runtime_overrides(&mut config, build);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    storage_prefix: Option<String>,
    request_timeout_ms: Option<u64>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.storage_prefix {
        config.storage_prefix = value;
    }
    if let Some(value) = runtime.request_timeout_ms {
        config.request_timeout_ms = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("SMETA_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        storage_prefix: read_runtime_value(&object, "storage_prefix"),
        request_timeout_ms: read_runtime_value(&object, "request_timeout_ms")
            .as_deref()
            .and_then(parse_timeout),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| format!("{number:.0}")))?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Zero disables nothing useful, so it is rejected like a malformed value.
fn parse_timeout(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|ms| *ms > 0)
}
