//! Login page state and the submission flow.
//!
//! Flow Overview: `LoginForm::begin_submit` validates the fields, trims the
//! email and encrypts the password, producing a `Submission`. `AuthFlow`
//! dispatches it to exactly one endpoint (chosen by mode), persists the
//! last-used credentials and navigates after a successful login.
//! `LoginForm::complete` then applies the outcome: a successful registration
//! switches back to login mode and the busy flag is cleared.
//!
//! The encrypted password only ever goes to the network; the form and local
//! storage always hold the raw value.

use super::{
    client::AuthApi,
    crypto::PasswordTransform,
    form::{FormFields, ValidCredentials, ValidationErrors},
    mode::{Field, FormMode},
    navigation::Navigator,
    types::{LoginRequest, RegisterRequest},
};
use crate::app_lib::{
    AppError,
    storage::{KeyValueStore, PersistedCredentials},
};
use std::fmt;

/// When the last-used credentials are written back to storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistPolicy {
    /// After every call that returned a status code, including rejections.
    #[default]
    Always,
    /// Only after a successful login or registration.
    OnSuccess,
}

/// Why a submit did not reach the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// A submission is already in flight.
    Busy,
    Invalid(ValidationErrors),
    /// The password could not be encrypted.
    Transform(AppError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(formatter, "a submission is already in flight"),
            Self::Invalid(errors) => write!(formatter, "{errors}"),
            Self::Transform(err) => write!(formatter, "{err}"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Validated payload for one submit. Holds both password forms so the flow
/// can send one and persist the other.
#[derive(Clone, PartialEq, Eq)]
pub struct Submission {
    mode: FormMode,
    credentials: ValidCredentials,
    encrypted_password: String,
}

impl fmt::Debug for Submission {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Submission")
            .field("mode", &self.mode)
            .field("email", &self.credentials.email)
            .finish_non_exhaustive()
    }
}

impl Submission {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn email(&self) -> &str {
        &self.credentials.email
    }

    fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.credentials.email.clone(),
            password: self.encrypted_password.clone(),
        }
    }

    fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            nickname: self.credentials.nickname.clone().unwrap_or_default(),
            email: self.credentials.email.clone(),
            password: self.encrypted_password.clone(),
        }
    }

    fn persisted(&self) -> PersistedCredentials {
        PersistedCredentials {
            email: self.credentials.email.clone(),
            password: self.credentials.password.clone(),
        }
    }
}

/// Result of a dispatched submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Login accepted; the landing route was opened.
    LoggedIn,
    /// Registration accepted; the form switches back to login.
    Registered,
    /// The server answered with a non-zero code.
    Rejected {
        mode: FormMode,
        code: i64,
        message: String,
    },
    /// The request never produced a status code.
    Failed(AppError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::LoggedIn | Self::Registered)
    }
}

/// State behind the login page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    mode: FormMode,
    fields: FormFields,
    errors: ValidationErrors,
    in_flight: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills email and password from storage when both were saved.
    pub fn prefill(&mut self, store: &impl KeyValueStore) {
        if let Some(saved) = PersistedCredentials::load(store) {
            tracing::debug!("prefilling saved credentials");
            self.fields.email = saved.email;
            self.fields.password = saved.password;
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn visible_fields(&self) -> &'static [Field] {
        self.mode.visible_fields()
    }

    /// Field-level errors from the last rejected submit.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Flips between login and register.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.errors = ValidationErrors::default();
    }

    /// Validates and encrypts; on success marks the form busy until
    /// [`LoginForm::complete`] is called.
    pub fn begin_submit(
        &mut self,
        transform: &impl PasswordTransform,
    ) -> Result<Submission, SubmitError> {
        if self.in_flight {
            tracing::debug!("submit ignored while a request is in flight");
            return Err(SubmitError::Busy);
        }

        let credentials = match self.fields.validate(self.mode) {
            Ok(credentials) => credentials,
            Err(errors) => {
                tracing::warn!(mode = ?self.mode, %errors, "validation failed");
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = ValidationErrors::default();

        let encrypted_password = transform.transform(&credentials.password).map_err(|err| {
            tracing::error!(error = %err, "password encryption failed");
            SubmitError::Transform(err)
        })?;

        self.in_flight = true;
        Ok(Submission {
            mode: self.mode,
            credentials,
            encrypted_password,
        })
    }

    /// Applies a dispatched outcome and clears the busy flag.
    pub fn complete(&mut self, outcome: &SubmitOutcome) {
        self.in_flight = false;
        if matches!(outcome, SubmitOutcome::Registered) {
            self.mode = FormMode::Login;
        }
    }
}

/// Network, storage and navigation collaborators of the submit flow.
pub struct AuthFlow<A, S, N> {
    api: A,
    store: S,
    navigator: N,
    landing_path: String,
    persist_policy: PersistPolicy,
}

impl<A: AuthApi, S: KeyValueStore, N: Navigator> AuthFlow<A, S, N> {
    pub fn new(api: A, store: S, navigator: N, landing_path: impl Into<String>) -> Self {
        Self {
            api,
            store,
            navigator,
            landing_path: landing_path.into(),
            persist_policy: PersistPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_persist_policy(mut self, persist_policy: PersistPolicy) -> Self {
        self.persist_policy = persist_policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Sends the submission to the endpoint matching its mode.
    pub async fn dispatch(&self, submission: &Submission) -> SubmitOutcome {
        let response = match submission.mode {
            FormMode::Login => self.api.login(&submission.login_request()).await,
            FormMode::Register => self.api.register(&submission.register_request()).await,
        };

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(mode = ?submission.mode, error = %err, "auth request failed");
                return SubmitOutcome::Failed(err);
            }
        };

        let success = response.is_success();
        if success || self.persist_policy == PersistPolicy::Always {
            if let Err(err) = submission.persisted().save(&self.store) {
                tracing::warn!(error = %err, "failed to save credentials");
            }
        }

        match (submission.mode, success) {
            (FormMode::Login, true) => {
                tracing::info!("login succeeded");
                self.navigator.navigate(&self.landing_path);
                SubmitOutcome::LoggedIn
            }
            (FormMode::Register, true) => {
                tracing::info!("registration succeeded");
                SubmitOutcome::Registered
            }
            (mode, false) => {
                tracing::warn!(?mode, code = response.code, "auth request rejected");
                SubmitOutcome::Rejected {
                    mode,
                    code: response.code,
                    message: response.message,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoginForm, SubmitError, SubmitOutcome};
    use crate::{
        app_lib::{
            AppError,
            storage::{EMAIL_KEY, KeyValueStore, MemoryStore, PASSWORD_KEY},
        },
        features::auth::{crypto::PasswordTransform, form::FormFields, mode::{Field, FormMode}},
    };

    struct Reverse;

    impl PasswordTransform for Reverse {
        fn transform(&self, raw: &str) -> Result<String, AppError> {
            Ok(raw.chars().rev().collect())
        }
    }

    struct Broken;

    impl PasswordTransform for Broken {
        fn transform(&self, _raw: &str) -> Result<String, AppError> {
            Err(AppError::Crypto("no key".to_string()))
        }
    }

    fn filled(email: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::new();
        *form.fields_mut() = FormFields {
            email: email.to_string(),
            password: password.to_string(),
            ..FormFields::default()
        };
        form
    }

    #[test]
    fn prefill_needs_both_entries() {
        let store = MemoryStore::new();
        store.set(EMAIL_KEY, "a@b.com").unwrap();
        let mut form = LoginForm::new();
        form.prefill(&store);
        assert!(form.fields().email.is_empty());

        store.set(PASSWORD_KEY, "secret1").unwrap();
        form.prefill(&store);
        assert_eq!(form.fields().email, "a@b.com");
        assert_eq!(form.fields().password, "secret1");
        assert_eq!(form.mode(), FormMode::Login);
    }

    #[test]
    fn second_submit_while_in_flight_is_busy() {
        let mut form = filled("a@b.com", "secret1");
        let submission = form.begin_submit(&Reverse).unwrap();
        assert_eq!(submission.email(), "a@b.com");
        assert!(form.is_busy());
        assert_eq!(form.begin_submit(&Reverse), Err(SubmitError::Busy));

        form.complete(&SubmitOutcome::Failed(AppError::Network("down".to_string())));
        assert!(!form.is_busy());
        assert!(form.begin_submit(&Reverse).is_ok());
    }

    #[test]
    fn validation_failure_keeps_mode_and_records_errors() {
        let mut form = filled("a@b.com", "secret1");
        form.toggle_mode();
        let err = form.begin_submit(&Reverse).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(form.mode(), FormMode::Register);
        assert!(!form.is_busy());
        assert!(form.errors().for_field(Field::Nickname).is_some());
        assert_eq!(form.fields().password, "secret1");

        form.toggle_mode();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn transform_failure_does_not_mark_busy() {
        let mut form = filled("a@b.com", "secret1");
        let err = form.begin_submit(&Broken).unwrap_err();
        assert!(matches!(err, SubmitError::Transform(AppError::Crypto(_))));
        assert!(!form.is_busy());
    }

    #[test]
    fn registered_outcome_switches_to_login_once() {
        let mut form = LoginForm::new();
        form.toggle_mode();
        form.complete(&SubmitOutcome::Registered);
        assert_eq!(form.mode(), FormMode::Login);
        form.complete(&SubmitOutcome::Rejected {
            mode: FormMode::Login,
            code: 109,
            message: String::new(),
        });
        assert_eq!(form.mode(), FormMode::Login);
    }

    #[test]
    fn submission_debug_hides_passwords() {
        let mut form = filled("a@b.com", "secret1");
        let submission = form.begin_submit(&Reverse).unwrap();
        let rendered = format!("{submission:?}");
        assert!(!rendered.contains("secret1"));
        assert!(!rendered.contains("1terces"));
    }
}
