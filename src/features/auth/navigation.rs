//! Navigation capability: in-app route changes, full-page redirects, and the
//! current host used to gate the GitHub sign-in button.

use url::Url;

pub trait Navigator {
    /// Client-side route change.
    fn navigate(&self, path: &str);
    /// Full-page redirect to an external URL.
    fn redirect(&self, url: &Url);
    /// `host[:port]` of the page, when known.
    fn host(&self) -> Option<String>;
}

impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }

    fn redirect(&self, url: &Url) {
        (**self).redirect(url);
    }

    fn host(&self) -> Option<String> {
        (**self).host()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Navigator;
    use std::rc::Rc;
    use url::Url;

    /// Routes through the Leptos router and redirects through `window.location`.
    #[derive(Clone)]
    pub struct BrowserNavigator {
        route: Rc<dyn Fn(&str)>,
    }

    impl BrowserNavigator {
        pub fn new(route: impl Fn(&str) + 'static) -> Self {
            Self {
                route: Rc::new(route),
            }
        }
    }

    impl Navigator for BrowserNavigator {
        fn navigate(&self, path: &str) {
            (self.route)(path);
        }

        fn redirect(&self, url: &Url) {
            let Some(window) = web_sys::window() else {
                tracing::error!("no window to redirect");
                return;
            };
            if window.location().set_href(url.as_str()).is_err() {
                tracing::error!(url = %url, "redirect failed");
            }
        }

        fn host(&self) -> Option<String> {
            web_sys::window()?.location().host().ok()
        }
    }
}
