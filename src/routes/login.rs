//! Login / registration route. It wires the browser collaborators (local
//! storage, router, HTTP client) into the auth flow and renders the form for
//! the current mode. Encrypted passwords never reach the view; the inputs
//! always show the raw value.

use crate::{
    app_lib::{
        AppError,
        config::AppConfig,
        i18n::{LOGIN_NAMESPACE, Translator},
        storage::{BrowserStorage, KeyValueStore, MemoryStore},
    },
    components::{Alert, AlertKind, Button, ButtonVariant, Spinner},
    features::auth::{
        client::HttpAuthApi,
        crypto::RsaPasswordTransform,
        flow::{AuthFlow, LoginForm, SubmitError, SubmitOutcome, Submission},
        mode::{Field, FormMode},
        navigation::{BrowserNavigator, Navigator},
        oauth,
    },
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;
use std::rc::Rc;

type Store = Rc<dyn KeyValueStore>;
type BrowserFlow = AuthFlow<HttpAuthApi<Store>, Store, BrowserNavigator>;

const INPUT_CLASS: &str = "w-full rounded-lg border border-gray-300 bg-gray-50 p-3 text-sm text-gray-900 focus:border-blue-500 focus:ring-blue-500 dark:border-gray-600 dark:bg-gray-700 dark:text-white dark:placeholder-gray-400";
const LABEL_CLASS: &str = "mb-2 block text-sm font-medium text-gray-900 dark:text-white";
const FIELD_ERROR_CLASS: &str = "mt-1 text-sm text-red-600 dark:text-red-400";

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = AppConfig::load();
    let i18n = StoredValue::new(browser_translator(&config));
    let t = move |key: &str| i18n.with_value(|translator| translator.t(key));

    let store = open_store();
    let navigate = use_navigate();
    let navigator = BrowserNavigator::new(move |path| navigate(path, Default::default()));
    let host = navigator.host();
    let app_domain = config.app_domain.clone();
    let github_client_id = StoredValue::new(config.github_client_id.clone());

    let flow: Rc<BrowserFlow> = Rc::new(AuthFlow::new(
        HttpAuthApi::new(Rc::clone(&store)),
        Rc::clone(&store),
        navigator.clone(),
        config.landing_path.clone(),
    ));
    let flow = StoredValue::new_local(flow);
    let navigator = StoredValue::new_local(navigator);

    let transform = StoredValue::new(
        RsaPasswordTransform::from_config(&config)
            .inspect_err(|err| tracing::error!(error = %err, "login public key unusable"))
            .ok(),
    );

    let mut initial = LoginForm::new();
    initial.prefill(&store);
    let form = RwSignal::new(initial);
    let (notice, set_notice) = signal::<Option<(AlertKind, String)>>(None);

    let submit_action = Action::new_local(move |submission: &Submission| {
        let submission = submission.clone();
        let flow = flow.get_value();
        async move { flow.dispatch(&submission).await }
    });

    Effect::new(move |_| {
        if let Some(outcome) = submit_action.value().get() {
            form.update(|form| form.complete(&outcome));
            set_notice.set(notice_for(&outcome, &t));
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_notice.set(None);

        let attempt = transform.with_value(|transform| match transform {
            Some(transform) => form.try_update(|form| form.begin_submit(transform)),
            None => Some(Err(SubmitError::Transform(AppError::Crypto(
                "missing login public key".to_string(),
            )))),
        });

        match attempt {
            Some(Ok(submission)) => {
                submit_action.dispatch(submission);
            }
            Some(Err(SubmitError::Transform(_))) => {
                set_notice.set(Some((AlertKind::Error, t("encryptionFailed"))));
            }
            Some(Err(SubmitError::Busy | SubmitError::Invalid(_))) | None => {}
        }
    };

    let mode = move || form.with(LoginForm::mode);
    let busy = Signal::derive(move || form.with(LoginForm::is_busy));
    let field_error = move |field: Field| {
        form.with(|form| form.errors().for_field(field).map(|error| error.message_key))
            .map(|key| view! { <p class=FIELD_ERROR_CLASS>{t(key)}</p> })
    };

    view! {
        <div class="flex min-h-screen">
            <div class="flex w-full items-center justify-center px-6 py-10 lg:w-1/2">
                <div class="w-full max-w-md">
                    <div class="mb-8 space-y-2">
                        <h1 class="text-3xl font-semibold text-gray-900 dark:text-white">
                            {move || t(mode().title_key())}
                        </h1>
                        <p class="text-sm text-gray-500 dark:text-gray-400">
                            {move || t(mode().description_key())}
                        </p>
                    </div>

                    <form class="space-y-5" name="login_form" novalidate on:submit=on_submit>
                        <div>
                            <label class=LABEL_CLASS for="email">{t(Field::Email.label_key())}</label>
                            <input
                                id="email"
                                type="email"
                                class=INPUT_CLASS
                                autocomplete="email"
                                placeholder=t(Field::Email.placeholder_key())
                                prop:value=move || form.with(|form| form.fields().email.clone())
                                on:input=move |event| {
                                    form.update(|form| form.fields_mut().email = event_target_value(&event));
                                }
                            />
                            {move || field_error(Field::Email)}
                        </div>

                        {move || {
                            mode()
                                .shows(Field::Nickname)
                                .then(|| {
                                    view! {
                                        <div>
                                            <label class=LABEL_CLASS for="nickname">
                                                {t(Field::Nickname.label_key())}
                                            </label>
                                            <input
                                                id="nickname"
                                                type="text"
                                                class=INPUT_CLASS
                                                autocomplete="nickname"
                                                placeholder=t(Field::Nickname.placeholder_key())
                                                prop:value=move || form.with(|form| form.fields().nickname.clone())
                                                on:input=move |event| {
                                                    form.update(|form| {
                                                        form.fields_mut().nickname = event_target_value(&event);
                                                    });
                                                }
                                            />
                                            {move || field_error(Field::Nickname)}
                                        </div>
                                    }
                                })
                        }}

                        <div>
                            <label class=LABEL_CLASS for="password">{t(Field::Password.label_key())}</label>
                            <input
                                id="password"
                                type="password"
                                class=INPUT_CLASS
                                autocomplete=move || match mode() {
                                    FormMode::Login => "current-password",
                                    FormMode::Register => "new-password",
                                }
                                placeholder=t(Field::Password.placeholder_key())
                                prop:value=move || form.with(|form| form.fields().password.clone())
                                on:input=move |event| {
                                    form.update(|form| form.fields_mut().password = event_target_value(&event));
                                }
                            />
                            {move || field_error(Field::Password)}
                        </div>

                        {move || {
                            mode()
                                .shows(Field::Remember)
                                .then(|| {
                                    view! {
                                        <label class="flex items-center gap-2 text-sm text-gray-700 dark:text-gray-300">
                                            <input
                                                type="checkbox"
                                                class="h-4 w-4 rounded border-gray-300"
                                                prop:checked=move || form.with(|form| form.fields().remember)
                                                on:change=move |event| {
                                                    form.update(|form| {
                                                        form.fields_mut().remember = event_target_checked(&event);
                                                    });
                                                }
                                            />
                                            {t(Field::Remember.label_key())}
                                        </label>
                                    }
                                })
                        }}

                        <div class="text-sm text-gray-600 dark:text-gray-400">
                            {move || t(mode().switch_tip_key())}
                            <span on:click=move |_| form.update(LoginForm::toggle_mode)>
                                <Button variant=ButtonVariant::Link>
                                    {move || t(mode().switch_action_key())}
                                </Button>
                            </span>
                        </div>

                        <Button button_type="submit" disabled=busy>
                            {move || busy.get().then(|| view! { <Spinner /> })}
                            {move || t(mode().submit_key())}
                        </Button>

                        {move || {
                            oauth::offers_github_sign_in(mode(), host.as_deref(), &app_domain)
                                .then(|| {
                                    view! {
                                        <div
                                            class="mt-4"
                                            on:click=move |_| {
                                                let result = navigator.with_value(|navigator| {
                                                    github_client_id
                                                        .with_value(|client_id| oauth::sign_in_with_github(navigator, client_id))
                                                });
                                                if let Err(err) = result {
                                                    tracing::error!(error = %err, "GitHub sign-in unavailable");
                                                }
                                            }
                                        >
                                            <Button variant=ButtonVariant::Outline>
                                                <span class="material-symbols-outlined text-base">"code"</span>
                                                {t("githubSignIn")}
                                            </Button>
                                        </div>
                                    }
                                })
                        }}

                        {move || {
                            notice
                                .get()
                                .map(|(kind, message)| {
                                    view! {
                                        <div class="mt-4">
                                            <Alert kind=kind message=message />
                                        </div>
                                    }
                                })
                        }}
                    </form>
                </div>
            </div>
            <div class="hidden bg-gradient-to-br from-blue-700 to-indigo-900 lg:block lg:w-1/2"></div>
        </div>
    }
}

/// Maps an outcome to the banner shown under the form.
fn notice_for(outcome: &SubmitOutcome, t: &impl Fn(&str) -> String) -> Option<(AlertKind, String)> {
    match outcome {
        SubmitOutcome::LoggedIn => None,
        SubmitOutcome::Registered => Some((AlertKind::Success, t("registered"))),
        SubmitOutcome::Rejected { message, .. } if !message.trim().is_empty() => {
            Some((AlertKind::Error, message.clone()))
        }
        SubmitOutcome::Rejected { .. } => Some((AlertKind::Error, t("requestFailed"))),
        SubmitOutcome::Failed(err) => Some((AlertKind::Error, err.to_string())),
    }
}

/// Local storage, or an in-memory map when the browser refuses it.
fn open_store() -> Store {
    match BrowserStorage::local() {
        Some(storage) => Rc::new(storage),
        None => {
            tracing::warn!("local storage unavailable; credentials will not be remembered");
            Rc::new(MemoryStore::new())
        }
    }
}

fn browser_translator(config: &AppConfig) -> Translator {
    let browser_language = web_sys::window().and_then(|window| window.navigator().language());
    Translator::negotiate(
        config.locale.as_deref(),
        browser_language.as_deref(),
        LOGIN_NAMESPACE,
    )
    .unwrap_or_else(|err| {
        tracing::error!(error = %err, "translations unavailable; rendering keys");
        Translator::empty()
    })
}
