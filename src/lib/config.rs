//! Build-time configuration for the API host, OAuth client and login page with
//! an optional runtime override. The runtime config is read from
//! `window.KNOWLEDGE_WEB_CONFIG` (if present) so static deployments can change
//! endpoints without rebuilding. Configuration values are public; do not store
//! secrets here.

/// Public key used to encrypt passwords before they leave the browser.
const DEFAULT_LOGIN_PUBLIC_KEY: &str = include_str!("../../keys/login_public_key.pem");
/// Route opened after a successful login.
const DEFAULT_LANDING_PATH: &str = "/knowledge";
/// OAuth application registered for the hosted deployment.
const DEFAULT_GITHUB_CLIENT_ID: &str = "302129228f0d96055bee";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Host on which the GitHub sign-in button is offered. Empty disables it.
    pub app_domain: String,
    pub github_client_id: String,
    pub landing_path: String,
    pub login_public_key: String,
    pub locale: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let api_base_url = option_env!("KNOWLEDGE_WEB_API_BASE_URL").unwrap_or("");
        let app_domain = option_env!("KNOWLEDGE_WEB_APP_DOMAIN").unwrap_or("");
        let github_client_id =
            option_env!("KNOWLEDGE_WEB_GITHUB_CLIENT_ID").unwrap_or(DEFAULT_GITHUB_CLIENT_ID);
        let landing_path =
            option_env!("KNOWLEDGE_WEB_LANDING_PATH").unwrap_or(DEFAULT_LANDING_PATH);
        let locale = option_env!("KNOWLEDGE_WEB_LOCALE").and_then(normalize_runtime_value);
        let log_level = option_env!("KNOWLEDGE_WEB_LOG_LEVEL").unwrap_or("info");

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            app_domain: app_domain.to_string(),
            github_client_id: github_client_id.to_string(),
            landing_path: landing_path.to_string(),
            login_public_key: DEFAULT_LOGIN_PUBLIC_KEY.to_string(),
            locale,
            log_level: log_level.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    app_domain: Option<String>,
    github_client_id: Option<String>,
    landing_path: Option<String>,
    login_public_key: Option<String>,
    locale: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.app_domain {
        config.app_domain = value;
    }
    if let Some(value) = runtime.github_client_id {
        config.github_client_id = value;
    }
    if let Some(value) = runtime.landing_path {
        config.landing_path = value;
    }
    if let Some(value) = runtime.login_public_key {
        config.login_public_key = value;
    }
    if runtime.locale.is_some() {
        config.locale = runtime.locale;
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("KNOWLEDGE_WEB_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        app_domain: read_runtime_value(&object, "app_domain"),
        github_client_id: read_runtime_value(&object, "github_client_id"),
        landing_path: read_runtime_value(&object, "landing_path"),
        login_public_key: read_runtime_value(&object, "login_public_key"),
        locale: read_runtime_value(&object, "locale"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
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
