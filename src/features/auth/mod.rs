//! Login and registration feature: form state, validation, password
//! encryption, the submit flow and its injected collaborators (API client,
//! storage, navigation). Passwords, encrypted passwords and session tokens
//! must never be logged from anywhere in this module.
//!
//! Flow Overview: Mount prefills the last-used credentials. Submit validates,
//! encrypts and calls either login or register. Login success opens the
//! landing route; register success switches the form back to login.

pub mod client;
pub mod crypto;
pub mod flow;
pub mod form;
pub mod mode;
pub mod navigation;
pub mod oauth;
pub mod types;
