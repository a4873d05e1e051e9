//! HTTP helpers for JSON APIs with consistent timeouts and error handling. The
//! auth client uses these helpers to avoid duplicating request setup and to
//! enforce a predictable timeout policy. The helpers never log request bodies;
//! login payloads carry encrypted passwords.

use super::errors::AppError;

/// Default request timeout (milliseconds) applied to all HTTP helpers.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// JSON body and the `Authorization` header of a successful response.
#[derive(Clone, Debug)]
pub struct JsonWithAuthorization<T> {
    pub body: T,
    pub authorization: Option<String>,
}

#[cfg(target_arch = "wasm32")]
pub use transport::post_json_with_authorization;

#[cfg(target_arch = "wasm32")]
mod transport {
    use super::{
        DEFAULT_TIMEOUT_MS, JsonWithAuthorization, build_url_with_base, classify_request_error,
        sanitize_body,
    };
    use crate::app_lib::{config::AppConfig, errors::AppError};
    use gloo_net::http::{Request, Response};
    use gloo_timers::callback::Timeout;
    use serde::{Serialize, de::DeserializeOwned};
    use serde_json::to_string;
    use web_sys::{AbortController, RequestCredentials};

    /// Posts JSON with cookies and parses a JSON response, returning the
    /// `Authorization` header the server sets on login.
    pub async fn post_json_with_authorization<B: Serialize, T: DeserializeOwned>(
        path: &str,
        body: &B,
    ) -> Result<JsonWithAuthorization<T>, AppError> {
        let url = build_url(path);
        let payload = to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        let response = send_with_timeout(move |signal| {
            Request::post(&url)
                .header("Content-Type", "application/json")
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .body(payload)
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        let authorization = response.headers().get("Authorization");
        let body = handle_json_response(response).await?;
        Ok(JsonWithAuthorization {
            body,
            authorization,
        })
    }

    /// Builds a URL from the configured API base URL and the provided path.
    fn build_url(path: &str) -> String {
        let config = AppConfig::load();
        build_url_with_base(&config.api_base_url, path)
    }

    /// Sends a request with an abort timeout to avoid hanging UI state.
    async fn send_with_timeout(
        build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
    ) -> Result<Response, AppError> {
        let controller = AbortController::new()
            .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

        let request = build_request(&signal)?;
        request
            .send()
            .await
            .map_err(|err| classify_request_error(&err.to_string()))
    }

    /// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
    async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Http {
                status,
                message: sanitize_body(&body),
            })
        }
    }
}

/// Builds a URL from an explicit base URL and the provided path.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport error text into `Timeout` or `Network`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn classify_request_error(message: &str) -> AppError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_ERROR_CHARS, build_url_with_base, classify_request_error, sanitize_body};
    use crate::app_lib::AppError;

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("https://api.example.com/", "/v1/user/login"),
            "https://api.example.com/v1/user/login"
        );
        assert_eq!(
            build_url_with_base("  ", "/v1/user/login"),
            "/v1/user/login"
        );
    }

    #[test]
    fn aborted_requests_are_timeouts() {
        assert!(matches!(
            classify_request_error("The operation was aborted."),
            AppError::Timeout(_)
        ));
        assert!(matches!(
            classify_request_error("Failed to fetch"),
            AppError::Network(_)
        ));
    }

    #[test]
    fn sanitize_body_truncates_and_defaults() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(&long).chars().count(), MAX_ERROR_CHARS);
    }
}
