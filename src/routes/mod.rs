mod login;
mod not_found;

pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <Redirect path="/login" /> } />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
