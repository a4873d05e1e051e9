//! Password encryption applied before credentials leave the browser. The
//! server holds the private key; the client only ever sees the public half.
//! Neither the raw nor the encrypted password may be logged.

use crate::app_lib::{AppError, config::AppConfig};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::rngs::OsRng;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey, pkcs8::DecodePublicKey};

/// One-way transform from the typed password to the value sent on the wire.
pub trait PasswordTransform {
    fn transform(&self, raw: &str) -> Result<String, AppError>;
}

/// Encrypts `base64(password)` with RSA PKCS#1 v1.5 and returns the ciphertext
/// as standard base64.
#[derive(Clone, Debug)]
pub struct RsaPasswordTransform {
    key: RsaPublicKey,
}

impl RsaPasswordTransform {
    /// Parses an SPKI (`BEGIN PUBLIC KEY`) PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, AppError> {
        let key = RsaPublicKey::from_public_key_pem(pem.trim())
            .map_err(|err| AppError::Crypto(format!("Invalid login public key: {err}")))?;
        Ok(Self { key })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::from_pem(&config.login_public_key)
    }
}

impl PasswordTransform for RsaPasswordTransform {
    fn transform(&self, raw: &str) -> Result<String, AppError> {
        let encoded = STANDARD.encode(raw.as_bytes());
        let ciphertext = self
            .key
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, encoded.as_bytes())
            .map_err(|err| AppError::Crypto(format!("Unable to encrypt password: {err}")))?;
        Ok(STANDARD.encode(ciphertext))
    }
}

impl<T: PasswordTransform + ?Sized> PasswordTransform for std::rc::Rc<T> {
    fn transform(&self, raw: &str) -> Result<String, AppError> {
        (**self).transform(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{PasswordTransform, RsaPasswordTransform};
    use crate::app_lib::{AppError, config::AppConfig};
    use base64::{Engine, engine::general_purpose::STANDARD};
    use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, pkcs8::DecodePrivateKey};

    const TEST_PUBLIC_KEY_PEM: &str = include_str!("../../../tests/fixtures/test_public_key.pem");
    const TEST_PRIVATE_KEY_PEM: &str = include_str!("../../../tests/fixtures/test_private_key.pem");

    fn decrypt(ciphertext_b64: &str) -> String {
        let key = RsaPrivateKey::from_pkcs8_pem(TEST_PRIVATE_KEY_PEM).unwrap();
        let ciphertext = STANDARD.decode(ciphertext_b64).unwrap();
        let encoded = key.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap();
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[test]
    fn server_recovers_the_raw_password() {
        let transform = RsaPasswordTransform::from_pem(TEST_PUBLIC_KEY_PEM).unwrap();
        let sent = transform.transform("secret1").unwrap();
        assert_ne!(sent, "secret1");
        assert_eq!(decrypt(&sent), "secret1");
    }

    #[test]
    fn encryption_is_randomized() {
        let transform = RsaPasswordTransform::from_pem(TEST_PUBLIC_KEY_PEM).unwrap();
        let first = transform.transform("secret1").unwrap();
        let second = transform.transform("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn oversized_password_is_a_crypto_error() {
        let transform = RsaPasswordTransform::from_pem(TEST_PUBLIC_KEY_PEM).unwrap();
        let err = transform.transform(&"p".repeat(400)).unwrap_err();
        assert!(matches!(err, AppError::Crypto(_)));
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let err = RsaPasswordTransform::from_pem("not a key").unwrap_err();
        assert!(matches!(err, AppError::Crypto(_)));
    }

    #[test]
    fn bundled_key_parses() {
        assert!(RsaPasswordTransform::from_config(&AppConfig::load()).is_ok());
    }
}
