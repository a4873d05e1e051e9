//! Shared frontend utilities for API access, configuration, errors, storage,
//! translations and logging.
//!
//! ## Sign-in Flow
//!
//! 1. **Prefill:** On mount the login page reads the last-used `email` and
//!    `password` from local storage.
//! 2. **Submit:** The password is RSA-encrypted with the configured public key
//!    and POSTed to `/v1/user/login` or `/v1/user/register`.
//! 3. **Result:** The server answers with a `{ code, message }` envelope where
//!    `code == 0` means success. A successful login also returns an
//!    `Authorization` header that is kept in local storage.
//!
//! These utilities do not log credentials; callers must keep it that way.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;
pub mod i18n;
pub mod storage;
pub mod telemetry;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use errors::AppError;
