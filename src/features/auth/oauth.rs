//! "Sign in with GitHub" link. The button is a plain full-page redirect to the
//! GitHub authorize endpoint; the callback is handled elsewhere.

use super::{mode::FormMode, navigation::Navigator};
use crate::app_lib::AppError;
use url::Url;

pub const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const GITHUB_SCOPE: &str = "user:email";

/// Builds the authorize URL for `client_id`.
pub fn authorize_url(client_id: &str) -> Result<Url, AppError> {
    let client_id = client_id.trim();
    if client_id.is_empty() {
        return Err(AppError::Config(
            "GitHub client ID is not configured.".to_string(),
        ));
    }
    Url::parse_with_params(
        GITHUB_AUTHORIZE_URL,
        &[("scope", GITHUB_SCOPE), ("client_id", client_id)],
    )
    .map_err(|err| AppError::Config(format!("Invalid authorize URL: {err}")))
}

/// The button is offered only in login mode on the configured domain.
pub fn offers_github_sign_in(mode: FormMode, host: Option<&str>, app_domain: &str) -> bool {
    let app_domain = app_domain.trim();
    mode == FormMode::Login && !app_domain.is_empty() && host == Some(app_domain)
}

/// Redirects the page to GitHub.
pub fn sign_in_with_github(navigator: &impl Navigator, client_id: &str) -> Result<(), AppError> {
    let url = authorize_url(client_id)?;
    tracing::info!("redirecting to GitHub sign-in");
    navigator.redirect(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{authorize_url, offers_github_sign_in, sign_in_with_github};
    use crate::features::auth::{mode::FormMode, navigation::Navigator};
    use std::cell::RefCell;
    use url::Url;

    #[derive(Default)]
    struct RecordingNavigator {
        redirects: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, _path: &str) {}

        fn redirect(&self, url: &Url) {
            self.redirects.borrow_mut().push(url.to_string());
        }

        fn host(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn authorize_url_carries_scope_and_client_id() {
        let url = authorize_url("302129228f0d96055bee").unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/login/oauth/authorize?scope=user%3Aemail&client_id=302129228f0d96055bee"
        );
    }

    #[test]
    fn blank_client_id_is_rejected() {
        assert!(authorize_url("  ").is_err());
    }

    #[test]
    fn offered_only_on_matching_host_in_login_mode() {
        let domain = "demo.example.com";
        assert!(offers_github_sign_in(FormMode::Login, Some(domain), domain));
        assert!(!offers_github_sign_in(FormMode::Register, Some(domain), domain));
        assert!(!offers_github_sign_in(FormMode::Login, Some("localhost:9222"), domain));
        assert!(!offers_github_sign_in(FormMode::Login, None, domain));
        assert!(!offers_github_sign_in(FormMode::Login, Some(""), ""));
    }

    #[test]
    fn sign_in_redirects_once() {
        let navigator = RecordingNavigator::default();
        sign_in_with_github(&navigator, "client").unwrap();
        let redirects = navigator.redirects.borrow();
        assert_eq!(redirects.len(), 1);
        assert!(redirects[0].starts_with("https://github.com/login/oauth/authorize?"));
    }
}
