//! Client for the user login and register endpoints. The trait is the seam the
//! submission flow depends on; the HTTP implementation only exists in the
//! browser build.

use crate::{
    app_lib::AppError,
    features::auth::types::{AuthResponse, LoginRequest, RegisterRequest},
};

pub const LOGIN_PATH: &str = "/v1/user/login";
pub const REGISTER_PATH: &str = "/v1/user/register";

/// Network operations used by the login page. `Ok` means the server answered;
/// the envelope code tells success from rejection.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError>;
}

impl<A: AuthApi + ?Sized> AuthApi for std::rc::Rc<A> {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        (**self).login(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        (**self).register(request).await
    }
}

#[cfg(target_arch = "wasm32")]
pub use http::HttpAuthApi;

#[cfg(target_arch = "wasm32")]
mod http {
    use super::{AuthApi, LOGIN_PATH, REGISTER_PATH};
    use crate::{
        app_lib::{
            AppError,
            api::post_json_with_authorization,
            storage::{AUTHORIZATION_KEY, KeyValueStore},
        },
        features::auth::types::{AuthResponse, LoginRequest, RegisterRequest},
    };

    /// Browser client. A successful login keeps the `Authorization` header in
    /// `store` for the pages behind the landing route.
    pub struct HttpAuthApi<S> {
        store: S,
    }

    impl<S: KeyValueStore> HttpAuthApi<S> {
        pub fn new(store: S) -> Self {
            Self { store }
        }
    }

    impl<S: KeyValueStore> AuthApi for HttpAuthApi<S> {
        async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
            let response =
                post_json_with_authorization::<_, AuthResponse>(LOGIN_PATH, request).await?;
            if response.body.is_success() {
                if let Some(token) = response.authorization.as_deref() {
                    if let Err(err) = self.store.set(AUTHORIZATION_KEY, token) {
                        tracing::warn!(error = %err, "failed to keep session token");
                    }
                }
            }
            Ok(response.body)
        }

        async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
            let response =
                post_json_with_authorization::<_, AuthResponse>(REGISTER_PATH, request).await?;
            Ok(response.body)
        }
    }
}
