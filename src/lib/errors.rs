use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Encryption error: {0}")]
    Crypto(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn http_error_includes_status_and_message() {
        let err = AppError::Http {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (502): bad gateway");
    }

    #[test]
    fn crypto_error_is_prefixed() {
        let err = AppError::Crypto("key rejected".to_string());
        assert_eq!(err.to_string(), "Encryption error: key rejected");
    }
}
