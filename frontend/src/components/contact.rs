//! 联系表单页

use folio_shared::validation::{ContactField, ContactForm, ValidationErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{Github, Mail};
use crate::config;
use crate::content::SOCIAL_LINKS;
use crate::web::timer::Timeout;

const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// 提交状态
#[derive(Debug, Clone, Default, PartialEq)]
struct SubmitStatus {
    /// 第几次提交，用于识别过期的成功提示重置
    submission: u64,
    loading: bool,
    success: bool,
    error: Option<String>,
}

impl SubmitStatus {
    fn started(&self) -> Self {
        Self {
            submission: self.submission + 1,
            loading: true,
            ..Default::default()
        }
    }

    fn succeeded(&self) -> Self {
        Self {
            submission: self.submission,
            success: true,
            ..Default::default()
        }
    }

    fn failed(&self, message: String) -> Self {
        Self {
            submission: self.submission,
            error: Some(message),
            ..Default::default()
        }
    }

    /// 只清除同一次提交的成功提示
    fn clear_success(&mut self, submission: u64) {
        if self.submission == submission {
            self.success = false;
        }
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let api = use_auth().api();
    let form = RwSignal::new(ContactForm::default());
    let errors = RwSignal::new(ValidationErrors::default());
    let status = RwSignal::new(SubmitStatus::default());
    // 新的成功提示替换旧定时器，旧定时器随之取消
    let reset_timer = StoredValue::new_local(Option::<Timeout>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let current = form.get_untracked();
        if let Err(invalid) = current.validate() {
            errors.set(invalid);
            return;
        }
        errors.set(ValidationErrors::default());
        status.update(|s| *s = s.started());
        let submission = status.with_untracked(|s| s.submission);

        let api = api.clone();
        spawn_local(async move {
            match api.submit_contact(&current).await {
                Ok(()) => {
                    log::info!("[Contact] message sent");
                    status.try_update(|s| *s = s.succeeded());
                    form.try_set(ContactForm::default());

                    let timer = Timeout::new(config::CONTACT_SUCCESS_RESET_MS, move || {
                        status.try_update(|s| s.clear_success(submission));
                    });
                    reset_timer.try_update_value(|slot| *slot = timer);
                }
                Err(err) => {
                    let message = err.message();
                    let message = if message.is_empty() {
                        SEND_FAILED_MESSAGE.to_string()
                    } else {
                        message
                    };
                    if let Some(field_errors) = err.field_errors() {
                        errors.try_set(ValidationErrors::from_server(field_errors));
                    }
                    status.try_update(|s| *s = s.failed(message));
                }
            }
        });
    };

    let loading = move || status.with(|s| s.loading);

    view! {
        <section class="py-16 text-center">
            <h1 class="text-4xl font-bold">"Get in Touch"</h1>
            <p class="text-base-content/70 mt-2">
                "Have a project in mind? Let's discuss how we can work together."
            </p>
        </section>

        <section class="container mx-auto px-4 pb-16 grid gap-8 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <form class="card-body space-y-2" on:submit=on_submit novalidate>
                    <Show when=move || status.with(|s| s.success)>
                        <div role="alert" class="alert alert-success">
                            <span>"Thank you for your message! I'll get back to you soon."</span>
                        </div>
                    </Show>
                    <Show when=move || status.with(|s| s.error.is_some())>
                        <div role="alert" class="alert alert-error">
                            <span>{move || status.with(|s| s.error.clone().unwrap_or_default())}</span>
                        </div>
                    </Show>

                    <ContactInput form=form errors=errors field=ContactField::Name label="Name"
                        input_type="text" placeholder="Your name" disabled=Signal::derive(loading) />
                    <ContactInput form=form errors=errors field=ContactField::Email label="Email"
                        input_type="email" placeholder="your.email@example.com" disabled=Signal::derive(loading) />
                    <ContactInput form=form errors=errors field=ContactField::Message label="Message"
                        input_type="textarea" placeholder="Tell me about your project..." disabled=Signal::derive(loading) />

                    <div class="form-control mt-4">
                        <button type="submit" class="btn btn-primary" disabled=loading>
                            {move || if loading() {
                                view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                            } else {
                                "Send Message".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

            <aside class="space-y-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Let's Connect"</h3>
                        <p class="text-base-content/70">
                            "I'm always interested in hearing about new projects, creative ideas, or opportunities to collaborate."
                        </p>
                        <div class="flex flex-col gap-2 mt-2">
                            <a href=SOCIAL_LINKS.email class="btn btn-ghost justify-start gap-2">
                                <Mail attr:class="h-4 w-4" /> "Email"
                            </a>
                            <a href=SOCIAL_LINKS.github target="_blank" rel="noopener noreferrer" class="btn btn-ghost justify-start gap-2">
                                <Github attr:class="h-4 w-4" /> "GitHub"
                            </a>
                            <a href=SOCIAL_LINKS.linkedin target="_blank" rel="noopener noreferrer" class="btn btn-ghost justify-start">
                                "LinkedIn"
                            </a>
                        </div>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Response Time"</h3>
                        <p class="text-base-content/70">
                            "I typically respond within 24-48 hours. For urgent inquiries, please mention it in your message."
                        </p>
                    </div>
                </div>
            </aside>
        </section>
    }
}

/// 单个表单字段：输入时清除该字段的错误
#[component]
fn ContactInput(
    form: RwSignal<ContactForm>,
    errors: RwSignal<ValidationErrors>,
    field: ContactField,
    label: &'static str,
    /// `textarea` 渲染多行输入
    input_type: &'static str,
    placeholder: &'static str,
    disabled: Signal<bool>,
) -> impl IntoView {
    let id = field.as_str();
    let value = move || form.with(|f| f.get(field).to_string());
    let error = move || errors.with(|e| e.get(field).map(str::to_string));
    let on_input = move |ev: leptos::ev::Event| {
        form.update(|f| f.set(field, event_target_value(&ev)));
        errors.update(|e| e.clear(field));
    };
    let input_class = move |base: &'static str| {
        if error().is_some() {
            format!("{base} input-error")
        } else {
            base.to_string()
        }
    };

    let control = if input_type == "textarea" {
        view! {
            <textarea id=id name=id rows="6" placeholder=placeholder
                class=move || input_class("textarea textarea-bordered w-full")
                prop:value=value on:input=on_input disabled=disabled></textarea>
        }
        .into_any()
    } else {
        view! {
            <input id=id name=id type=input_type placeholder=placeholder
                class=move || input_class("input input-bordered w-full")
                prop:value=value on:input=on_input disabled=disabled />
        }
        .into_any()
    };

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            {control}
            <Show when=move || error().is_some()>
                <span class="text-error text-sm mt-1">{move || error().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_reset_keeps_newer_notice() {
        let first = SubmitStatus::default().started().succeeded();
        let mut second = first.started().succeeded();
        assert!(second.success);

        // 第一次提交的定时器晚到
        second.clear_success(first.submission);
        assert!(second.success);

        second.clear_success(second.submission);
        assert!(!second.success);
    }

    #[test]
    fn test_new_submission_clears_previous_outcome() {
        let failed = SubmitStatus::default()
            .started()
            .failed("boom".into());
        let retry = failed.started();
        assert!(retry.loading);
        assert_eq!(retry.error, None);
        assert_eq!(retry.submission, failed.submission + 1);
    }
}
