//! Live form values and the required-field rules applied before submitting.

use super::mode::{Field, FormMode};
use std::fmt;

/// Values currently in the form. The password is always the raw input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub email: String,
    pub password: String,
    pub nickname: String,
    /// Presentational only.
    pub remember: bool,
}

/// A required field that was left blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    /// Translation key of the message shown under the field.
    pub message_key: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Error attached to `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.0.iter().map(|error| format!("{:?}", error.field)).collect();
        write!(formatter, "missing required fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Credentials that passed validation. `email` is trimmed, `password` is raw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidCredentials {
    pub email: String,
    pub password: String,
    /// Present only in register mode.
    pub nickname: Option<String>,
}

impl FormFields {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Nickname => &self.nickname,
            Field::Password => &self.password,
            Field::Remember => "",
        }
    }

    /// Whether `field` counts as left blank. The password is taken raw, so
    /// only an empty one is blank; other fields are blank when whitespace-only.
    fn is_blank(&self, field: Field) -> bool {
        let value = self.value(field);
        match field {
            Field::Password => value.is_empty(),
            _ => value.trim().is_empty(),
        }
    }

    /// Checks the required fields of `mode`.
    pub fn validate(&self, mode: FormMode) -> Result<ValidCredentials, ValidationErrors> {
        let errors: Vec<FieldError> = mode
            .required_fields()
            .filter(|field| self.is_blank(*field))
            .map(|field| FieldError {
                field,
                message_key: field.placeholder_key(),
            })
            .collect();

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(ValidCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            nickname: (mode == FormMode::Register).then(|| self.nickname.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FormFields, ValidCredentials};
    use crate::features::auth::mode::{Field, FormMode};

    fn fields(email: &str, password: &str, nickname: &str) -> FormFields {
        FormFields {
            email: email.to_string(),
            password: password.to_string(),
            nickname: nickname.to_string(),
            remember: false,
        }
    }

    #[test]
    fn login_trims_email_and_keeps_raw_password() {
        let credentials = fields("a@b.com ", " secret1", "")
            .validate(FormMode::Login)
            .unwrap();
        assert_eq!(
            credentials,
            ValidCredentials {
                email: "a@b.com".to_string(),
                password: " secret1".to_string(),
                nickname: None,
            }
        );
    }

    #[test]
    fn space_only_password_is_sent_as_typed() {
        let credentials = fields("a@b.com", "   ", "")
            .validate(FormMode::Login)
            .unwrap();
        assert_eq!(credentials.password, "   ");
    }

    #[test]
    fn space_only_email_is_blank() {
        let errors = fields("  ", "pw", "").validate(FormMode::Login).unwrap_err();
        let reported: Vec<Field> = errors.iter().map(|error| error.field).collect();
        assert_eq!(reported, vec![Field::Email]);
    }

    #[test]
    fn login_ignores_nickname() {
        assert!(fields("a@b.com", "pw", "").validate(FormMode::Login).is_ok());
    }

    #[test]
    fn register_requires_nickname() {
        let errors = fields("a@b.com", "pw", "  ")
            .validate(FormMode::Register)
            .unwrap_err();
        let error = errors.for_field(Field::Nickname).unwrap();
        assert_eq!(error.message_key, "nicknamePlaceholder");
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn every_blank_field_is_reported() {
        let errors = fields("", "", "").validate(FormMode::Register).unwrap_err();
        let reported: Vec<Field> = errors.iter().map(|error| error.field).collect();
        assert_eq!(reported, vec![Field::Email, Field::Nickname, Field::Password]);
        assert_eq!(
            errors.to_string(),
            "missing required fields: Email, Nickname, Password"
        );
    }

    #[test]
    fn register_carries_nickname() {
        let credentials = fields("a@b.com", "pw", "ada")
            .validate(FormMode::Register)
            .unwrap();
        assert_eq!(credentials.nickname.as_deref(), Some("ada"));
    }
}
