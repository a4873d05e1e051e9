//! Login and registration page of the knowledge base web client.
//!
//! The form state, validation, password encryption and submit flow compile on
//! every target and are tested natively; rendering and the browser-backed
//! collaborators are only built for `wasm32`.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

/// Installs logging and mounts the application on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    use crate::app_lib::{GIT_COMMIT_HASH, config::AppConfig, telemetry};

    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    if let Err(err) = telemetry::init(&config.log_level) {
        web_sys::console::error_1(&err.to_string().into());
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = GIT_COMMIT_HASH,
        "starting knowledge-web"
    );

    leptos::prelude::mount_to_body(app::App);
}
