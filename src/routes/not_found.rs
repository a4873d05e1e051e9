//! Minimal 404 page for unknown routes.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex min-h-[50vh] flex-col items-center justify-center px-4 text-center">
            <h1 class="select-none text-9xl font-black text-gray-100 dark:text-gray-800">"404"</h1>
            <p class="mt-4 text-gray-500 dark:text-gray-400">"Page not found"</p>
            <A
                href="/login"
                {..}
                class="mt-6 inline-flex items-center rounded-lg bg-blue-700 px-5 py-2.5 text-sm font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
            >
                "Sign in"
            </A>
        </div>
    }
}
