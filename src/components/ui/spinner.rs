use leptos::prelude::*;

/// Small inline spinner sized to sit inside a button label.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <span
            class="inline-block h-4 w-4 animate-spin rounded-full border-2 border-white/40 border-t-white"
            role="status"
            aria-live="polite"
            aria-label="Loading"
        ></span>
    }
}
