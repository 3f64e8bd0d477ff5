use crate::contact::submitter;
use crate::i18n::use_translations;
use emyux_shared::{
    run_submission, ContactSubmitter, Field, FormSession, TextProvider, Translator,
    AUTO_CLOSE_DELAY_MS, SUBMIT_TIMEOUT,
};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContactModalProps {
    /// Whatever opens the modal when clicked, usually a button.
    pub children: Children,
}

/// Contact form in a modal dialog. Each instance owns its own session.
#[function_component]
pub fn ContactModal(props: &ContactModalProps) -> Html {
    let t = use_translations("ContactModal");
    let session = use_mut_ref(FormSession::new);
    let auto_close = use_mut_ref(|| None::<Timeout>);
    let locale = t.locale();
    let submitter: Rc<Box<dyn ContactSubmitter>> =
        use_memo(move |_| submitter::from_config(locale), locale);
    let render = use_force_update();

    let on_open = {
        let session = session.clone();
        let render = render.clone();
        Callback::from(move |_: MouseEvent| {
            session.borrow_mut().open();
            render.force_update();
        })
    };

    let close = {
        let session = session.clone();
        let auto_close = auto_close.clone();
        let render = render.clone();
        Callback::from(move |_: ()| {
            // dropping the timer cancels it
            auto_close.borrow_mut().take();
            session.borrow_mut().close();
            render.force_update();
        })
    };
    let on_close = close.reform(|_: MouseEvent| ());
    let on_keydown = {
        let close = close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                close.emit(());
            }
        })
    };

    let set_field = {
        let session = session.clone();
        let render = render.clone();
        move |field: Field| {
            let session = session.clone();
            let render = render.clone();
            Callback::from(move |value: String| {
                session.borrow_mut().set_field(field, value);
                render.force_update();
            })
        }
    };

    let onsubmit = {
        let session = session.clone();
        let auto_close = auto_close.clone();
        let submitter = submitter.clone();
        let render = render.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let session = session.clone();
            let auto_close = auto_close.clone();
            let submitter = submitter.clone();
            let render = render.clone();
            spawn_local(async move {
                let token = {
                    let render = render.clone();
                    run_submission(
                        &session,
                        &**submitter,
                        SUBMIT_TIMEOUT,
                        |timeout| TimeoutFuture::new(timeout.as_millis() as u32),
                        move || render.force_update(),
                    )
                    .await
                };
                if let Some(token) = token {
                    let session = session.clone();
                    let timer = Timeout::new(AUTO_CLOSE_DELAY_MS, move || {
                        if session.borrow_mut().auto_close(token) {
                            render.force_update();
                        }
                    });
                    *auto_close.borrow_mut() = Some(timer);
                }
            });
        })
    };

    let state = session.borrow();
    let title = if state.submit_success() {
        t.text("success_title")
    } else {
        t.text("title")
    };

    html! {
        <>
            <div class="contact-trigger" onclick={on_open}>
                { for props.children.iter() }
            </div>
            {
                if state.is_open() {
                    html! {
                        <div class="modal-root" role="dialog" aria-modal="true" onkeydown={on_keydown}>
                            <div class="modal-backdrop" onclick={on_close.clone()}></div>
                            <div class="modal-panel">
                                <div class="modal-header">
                                    <h2 class="modal-title">{ title }</h2>
                                    <button
                                        type="button"
                                        class="modal-close"
                                        title={t.text("common.close")}
                                        onclick={on_close}
                                    >
                                        {"×"}
                                    </button>
                                </div>
                                {
                                    if state.submit_success() {
                                        success_view(&t)
                                    } else {
                                        form_view(&t, &state, &set_field, onsubmit)
                                    }
                                }
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

fn field_error(t: &Translator, state: &FormSession, field: Field) -> Html {
    match state.error_for(field) {
        Some(violation) => html! {
            <p class="field-error">{ t.text(violation.message_key()) }</p>
        },
        None => html! {},
    }
}

fn select_options(t: &Translator, key: &str, placeholder: &str, current: &str) -> Html {
    html! {
        <>
            <option value="" selected={current.is_empty()}>{ t.text(placeholder) }</option>
            { for t.entries(key).into_iter().map(|(value, label)| {
                let selected = value == current;
                html! { <option value={value} selected={selected}>{ label }</option> }
            }) }
        </>
    }
}

fn form_view(
    t: &Translator,
    state: &FormSession,
    set_field: &impl Fn(Field) -> Callback<String>,
    onsubmit: Callback<SubmitEvent>,
) -> Html {
    let on_name = set_field(Field::Name)
        .reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value());
    let on_email = set_field(Field::Email)
        .reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value());
    let on_project_type = set_field(Field::ProjectType)
        .reform(|e: Event| e.target_unchecked_into::<HtmlSelectElement>().value());
    let on_timeline = set_field(Field::Timeline)
        .reform(|e: Event| e.target_unchecked_into::<HtmlSelectElement>().value());
    let on_description = set_field(Field::Description)
        .reform(|e: InputEvent| e.target_unchecked_into::<HtmlTextAreaElement>().value());

    let remaining = state.remaining_characters();
    let counter_class = if remaining < 0 { "char-counter over" } else { "char-counter" };
    let submitting = state.is_submitting();

    html! {
        <form class="contact-form" {onsubmit} novalidate=true>
            <div class="form-row">
                <div class="form-field">
                    <label for="contact-name">{ t.text("labels.name") }</label>
                    <input
                        id="contact-name"
                        value={state.value(Field::Name).to_string()}
                        oninput={on_name}
                        placeholder={t.text("placeholders.name")}
                    />
                    { field_error(t, state, Field::Name) }
                </div>
                <div class="form-field">
                    <label for="contact-email">{ t.text("labels.email") }</label>
                    <input
                        id="contact-email"
                        type="email"
                        value={state.value(Field::Email).to_string()}
                        oninput={on_email}
                        placeholder={t.text("placeholders.email")}
                    />
                    { field_error(t, state, Field::Email) }
                </div>
            </div>
            <div class="form-row">
                <div class="form-field">
                    <label for="contact-project-type">{ t.text("labels.project_type") }</label>
                    <select id="contact-project-type" onchange={on_project_type}>
                        { select_options(t, "options.project_types", "placeholders.project_type", state.value(Field::ProjectType)) }
                    </select>
                    { field_error(t, state, Field::ProjectType) }
                </div>
                <div class="form-field">
                    <label for="contact-timeline">{ t.text("labels.timeline") }</label>
                    <select id="contact-timeline" onchange={on_timeline}>
                        { select_options(t, "options.timelines", "placeholders.timeline", state.value(Field::Timeline)) }
                    </select>
                    { field_error(t, state, Field::Timeline) }
                </div>
            </div>
            <div class="form-field">
                <div class="label-row">
                    <label for="contact-description">{ t.text("labels.description") }</label>
                    <span class={counter_class}>
                        { format!("{} {}", remaining, t.text("chars_left")) }
                    </span>
                </div>
                <textarea
                    id="contact-description"
                    rows="4"
                    value={state.value(Field::Description).to_string()}
                    oninput={on_description}
                    placeholder={t.text("placeholders.description")}
                />
                { field_error(t, state, Field::Description) }
            </div>
            {
                match state.submission_error() {
                    Some(error) => html! {
                        <p class="submit-error" role="alert">{ t.text(error.message_key()) }</p>
                    },
                    None => html! {},
                }
            }
            <button type="submit" class="submit-button" disabled={submitting}>
                { if submitting { t.text("submitting") } else { t.text("submit") } }
            </button>
        </form>
    }
}

fn success_view(t: &Translator) -> Html {
    html! {
        <div class="contact-success">
            <div class="success-icon">
                <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7" />
                </svg>
            </div>
            <h3>{ t.text("success_title") }</h3>
            <p>{ t.text("success_message") }</p>
        </div>
    }
}
