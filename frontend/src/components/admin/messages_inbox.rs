//! 留言收件箱：列表（全部 / 未读）+ 详情面板

use folio_shared::date::format_local;
use folio_shared::protocol::{ApiRequest, ListMessagesRequest, MessageList};
use folio_shared::{ApiEnvelope, Message, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::common::{ErrorMessage, Loading};
use crate::components::icons::{Mail, RefreshCw, Trash};
use crate::fetch::{FetchOptions, use_fetch};
use crate::web::dialog;

const DELETE_CONFIRM: &str = "Delete this message?";
const REPLY_SUBJECT: &str = "Re: Portfolio Contact";

/// 浏览器当前时区偏移（`Date.getTimezoneOffset()`）
fn timezone_offset() -> i32 {
    js_sys::Date::new_0().get_timezone_offset() as i32
}

fn inbox_path(unread_only: bool) -> String {
    ListMessagesRequest { unread_only }.path()
}

fn reply_href(message: &Message) -> String {
    format!("mailto:{}?subject={}", message.email, REPLY_SUBJECT)
}

#[component]
pub fn MessagesInboxPage() -> impl IntoView {
    let auth = use_auth();
    let options = auth
        .token()
        .map(FetchOptions::authenticated)
        .unwrap_or_default();
    let (unread_only, set_unread_only) = signal(false);
    // 首个请求随句柄一起发出，首帧即为加载状态
    let inbox = use_fetch::<ApiEnvelope<MessageList>>(Some(inbox_path(false)), options);
    let (data, loading, error) = (inbox.data(), inbox.loading(), inbox.error());

    let selected = RwSignal::new(Option::<Message>::None);
    let (action_error, set_action_error) = signal(Option::<String>::None);

    // 筛选条件变化时重新加载
    Effect::new(move |prev: Option<bool>| {
        let unread = unread_only.get();
        if prev.is_some_and(|p| p != unread) {
            inbox.load(inbox_path(unread));
        }
        unread
    });

    let reload = move || inbox.load(inbox_path(unread_only.get_untracked()));

    let open_message = Callback::new(move |message: Message| {
        let (id, was_unread) = (message.id, !message.is_read);
        selected.set(Some(message));
        if !was_unread {
            return;
        }
        let Some(token) = auth.token() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match api.mark_message_read(&token, id).await {
                Ok(()) => {
                    selected.try_update(|s| {
                        if let Some(m) = s.as_mut().filter(|m| m.id == id) {
                            m.is_read = true;
                        }
                    });
                    reload();
                }
                Err(err) => {
                    set_action_error.try_set(Some(err.message()));
                }
            }
        });
    });

    let delete_message = move |id: RecordId| {
        if !dialog::confirm(DELETE_CONFIRM) {
            return;
        }
        let Some(token) = auth.token() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match api.delete_message(&token, id).await {
                Ok(()) => {
                    log::info!("[Messages] deleted #{id}");
                    selected.try_update(|s| {
                        if s.as_ref().is_some_and(|m| m.id == id) {
                            *s = None;
                        }
                    });
                    reload();
                }
                Err(err) => {
                    set_action_error.try_set(Some(err.message()));
                }
            }
        });
    };

    let list = move || {
        data.with(|d| {
            d.as_ref()
                .map(|d| d.data.messages.clone())
                .unwrap_or_default()
        })
    };
    let on_retry = Callback::new(move |_: ()| reload());
    let filter_class = move |unread: bool| {
        if unread_only.get() == unread {
            "join-item btn btn-sm btn-active"
        } else {
            "join-item btn btn-sm"
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-3xl font-bold">"Messages"</h1>
                <div class="flex items-center gap-2">
                    <div class="join">
                        <button class=move || filter_class(false) on:click=move |_| set_unread_only.set(false)>"All"</button>
                        <button class=move || filter_class(true) on:click=move |_| set_unread_only.set(true)>"Unread"</button>
                    </div>
                    <button class="btn btn-ghost btn-sm btn-square" aria-label="Refresh" on:click=move |_| reload()>
                        <RefreshCw attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>

            <Show when=move || action_error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || action_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid gap-6 lg:grid-cols-2">
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-0">
                        {move || {
                            if loading.get() && data.with(Option::is_none) {
                                view! { <Loading message="Loading messages..." /> }.into_any()
                            } else if let Some(message) = error.get() {
                                view! { <ErrorMessage message=message on_retry=on_retry /> }.into_any()
                            } else if list().is_empty() {
                                view! {
                                    <div class="text-center py-12 text-base-content/60">"No messages yet."</div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <ul class="divide-y divide-base-300">
                                        <For
                                            each=list
                                            key=|m| (m.id, m.is_read)
                                            children=move |message| view! {
                                                <MessageRow message=message selected=selected on_open=open_message />
                                            }
                                        />
                                    </ul>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        {move || match selected.get() {
                            None => view! {
                                <div class="flex flex-col items-center justify-center py-12 text-base-content/50 gap-2">
                                    <Mail attr:class="h-10 w-10" />
                                    <p>"Select a message to read"</p>
                                </div>
                            }
                            .into_any(),
                            Some(message) => {
                                let id = message.id;
                                let href = reply_href(&message);
                                let received = format_local(&message.created_at, timezone_offset());
                                view! {
                                    <div class="space-y-4">
                                        <div class="flex items-start justify-between gap-4">
                                            <div>
                                                <h2 class="card-title">{message.name}</h2>
                                                <a class="link link-primary text-sm" href=href.clone()>{message.email}</a>
                                                <p class="text-xs text-base-content/50 mt-1">{received}</p>
                                            </div>
                                            <button class="btn btn-ghost btn-sm btn-square text-error" aria-label="Delete"
                                                on:click=move |_| delete_message(id)>
                                                <Trash attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                        <p class="whitespace-pre-wrap">{message.message}</p>
                                        <div class="card-actions">
                                            <a class="btn btn-primary btn-sm gap-2" href=href>
                                                <Mail attr:class="h-4 w-4" /> "Reply"
                                            </a>
                                        </div>
                                    </div>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn MessageRow(
    message: Message,
    selected: RwSignal<Option<Message>>,
    on_open: Callback<Message>,
) -> impl IntoView {
    let id = message.id;
    let unread = !message.is_read;
    let preview = message.preview();
    let name = message.name.clone();
    let received = format_local(&message.created_at, timezone_offset());
    let is_selected = move || selected.with(|s| s.as_ref().is_some_and(|m| m.id == id));
    let row_class = move || {
        let mut class = String::from("p-4 cursor-pointer hover:bg-base-200");
        if is_selected() {
            class.push_str(" bg-base-200");
        }
        if unread {
            class.push_str(" font-semibold");
        }
        class
    };

    view! {
        <li class=row_class on:click=move |_| on_open.run(message.clone())>
            <div class="flex items-center justify-between gap-2">
                <span class="flex items-center gap-2">
                    <Show when=move || unread>
                        <span class="badge badge-primary badge-xs" aria-label="Unread"></span>
                    </Show>
                    {name}
                </span>
                <span class="text-xs text-base-content/50 font-normal">{received}</span>
            </div>
            <p class="text-sm text-base-content/70 font-normal truncate">{preview}</p>
        </li>
    }
}
