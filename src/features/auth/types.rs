//! Request and response types for the login and register endpoints. Requests
//! carry the encrypted password, so they must never be logged.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Status code the API uses for success.
pub const SUCCESS_CODE: i64 = 0;

/// Envelope returned by every user endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl AuthResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthResponse, LoginRequest, RegisterRequest};
    use serde_json::json;

    #[test]
    fn envelope_tolerates_missing_message_and_data() {
        let response: AuthResponse = serde_json::from_value(json!({ "code": 0 })).unwrap();
        assert!(response.is_success());
        assert!(response.message.is_empty());
        assert!(response.data.is_null());
    }

    #[test]
    fn non_zero_code_is_failure() {
        let response: AuthResponse =
            serde_json::from_value(json!({ "code": 109, "message": "Email and password do not match!", "data": false }))
                .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message, "Email and password do not match!");
    }

    #[test]
    fn register_request_field_names() {
        let request = RegisterRequest {
            nickname: "ada".to_string(),
            email: "a@b.com".to_string(),
            password: "cipher".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "nickname": "ada", "email": "a@b.com", "password": "cipher" })
        );
        let login = LoginRequest {
            email: "a@b.com".to_string(),
            password: "cipher".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&login).unwrap(),
            json!({ "email": "a@b.com", "password": "cipher" })
        );
    }

    #[test]
    fn debug_output_redacts_password() {
        let login = LoginRequest {
            email: "a@b.com".to_string(),
            password: "cipher".to_string(),
        };
        let rendered = format!("{login:?}");
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("cipher"));
    }
}
