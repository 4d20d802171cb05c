//! 项目管理：列表 + 新建/编辑表单 + 删除
//!
//! 每次变更成功后整表重新拉取，不做本地修补。

mod form_state;

use folio_shared::protocol::{ApiRequest, ListProjectsRequest, ProjectList};
use folio_shared::{ApiEnvelope, Project, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub use form_state::ProjectFormState;

use crate::auth::use_auth;
use crate::components::common::{ErrorMessage, Loading};
use crate::components::icons::{Pencil, Plus, Trash};
use crate::fetch::{FetchOptions, use_fetch};
use crate::web::dialog;

const DELETE_CONFIRM: &str = "Are you sure you want to delete this project?";

#[component]
pub fn ProjectsManagerPage() -> impl IntoView {
    let auth = use_auth();
    let options = auth
        .token()
        .map(FetchOptions::authenticated)
        .unwrap_or_default();
    let projects = use_fetch::<ApiEnvelope<ProjectList>>(Some(ListProjectsRequest.path()), options);
    let (data, loading, error) = (projects.data(), projects.loading(), projects.error());

    let form = ProjectFormState::new();
    let (open, set_open) = signal(false);
    let (saving, set_saving) = signal(false);
    let (action_error, set_action_error) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let close_form = move || {
        set_open.set(false);
        form.reset();
    };

    let open_new = move |_| {
        form.reset();
        set_action_error.set(None);
        set_open.set(true);
    };

    let open_edit = Callback::new(move |project: Project| {
        form.load(&project);
        set_action_error.set(None);
        set_open.set(true);
    });

    let on_delete = Callback::new(move |id: RecordId| {
        if !dialog::confirm(DELETE_CONFIRM) {
            return;
        }
        let Some(token) = auth.token() else {
            return;
        };
        let api = auth.api();
        spawn_local(async move {
            match api.delete_project(&token, id).await {
                Ok(()) => {
                    log::info!("[Projects] deleted #{id}");
                    projects.refetch();
                }
                Err(err) => {
                    set_action_error.try_set(Some(err.message()));
                }
            }
        });
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.token() else {
            return;
        };
        let input = form.to_draft().to_input();
        let editing = form.editing.get_untracked();
        let api = auth.api();

        set_saving.set(true);
        set_action_error.set(None);
        spawn_local(async move {
            let result = match editing {
                Some(id) => api.update_project(&token, id, input).await,
                None => api.create_project(&token, input).await,
            };
            match result {
                Ok(()) => {
                    set_open.try_set(false);
                    form.reset();
                    projects.refetch();
                }
                Err(err) => {
                    set_action_error.try_set(Some(err.message()));
                }
            }
            set_saving.try_set(false);
        });
    };

    let list = move || {
        data.with(|d| {
            d.as_ref()
                .map(|d| d.data.projects.clone())
                .unwrap_or_default()
        })
    };
    let on_retry = Callback::new(move |_: ()| projects.refetch());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Manage Projects"</h1>
                <button class="btn btn-primary gap-2" on:click=open_new>
                    <Plus attr:class="h-4 w-4" /> "Add Project"
                </button>
            </div>

            <Show when=move || action_error.get().is_some() && !open.get()>
                <div role="alert" class="alert alert-error">
                    <span>{move || action_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || {
                if loading.get() && data.with(Option::is_none) {
                    view! { <Loading message="Loading projects..." /> }.into_any()
                } else if let Some(message) = error.get() {
                    view! { <ErrorMessage message=message on_retry=on_retry /> }.into_any()
                } else if list().is_empty() {
                    view! {
                        <div class="text-center py-12 text-base-content/60">
                            "No projects yet. Add your first project!"
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="grid gap-4">
                            <For
                                each=list
                                key=|p| p.id
                                children=move |project| view! {
                                    <ProjectRow project=project on_edit=open_edit on_delete=on_delete />
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}

            <dialog class="modal" node_ref=dialog_ref on:close=move |_| close_form()>
                <div class="modal-box max-w-2xl">
                    <h3 class="font-bold text-lg">
                        {move || if form.is_editing() { "Edit Project" } else { "New Project" }}
                    </h3>

                    <Show when=move || action_error.get().is_some()>
                        <div role="alert" class="alert alert-error mt-4 text-sm py-2">
                            <span>{move || action_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <form on:submit=on_submit class="space-y-4 mt-4">
                        <div class="form-control">
                            <label for="title" class="label"><span class="label-text">"Title"</span></label>
                            <input id="title" type="text" required class="input input-bordered w-full"
                                prop:value=form.title
                                on:input=move |ev| form.title.set(event_target_value(&ev)) />
                        </div>
                        <div class="form-control">
                            <label for="description" class="label"><span class="label-text">"Description"</span></label>
                            <textarea id="description" rows="4" required class="textarea textarea-bordered w-full"
                                prop:value=form.description
                                on:input=move |ev| form.description.set(event_target_value(&ev))></textarea>
                        </div>
                        <div class="form-control">
                            <label for="tech_stack" class="label"><span class="label-text">"Tech Stack"</span></label>
                            <input id="tech_stack" type="text" placeholder="Node.js, Express, PostgreSQL"
                                class="input input-bordered w-full"
                                prop:value=form.tech_stack
                                on:input=move |ev| form.tech_stack.set(event_target_value(&ev)) />
                            <label class="label">
                                <span class="label-text-alt text-base-content/50">"Comma separated"</span>
                            </label>
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label for="github_url" class="label"><span class="label-text">"GitHub URL"</span></label>
                                <input id="github_url" type="url" class="input input-bordered w-full"
                                    prop:value=form.github_url
                                    on:input=move |ev| form.github_url.set(event_target_value(&ev)) />
                            </div>
                            <div class="form-control">
                                <label for="live_url" class="label"><span class="label-text">"Live URL"</span></label>
                                <input id="live_url" type="url" class="input input-bordered w-full"
                                    prop:value=form.live_url
                                    on:input=move |ev| form.live_url.set(event_target_value(&ev)) />
                            </div>
                        </div>
                        <div class="grid grid-cols-2 gap-4 items-end">
                            <div class="form-control">
                                <label for="sort_order" class="label"><span class="label-text">"Sort Order"</span></label>
                                <input id="sort_order" type="number" class="input input-bordered w-full"
                                    prop:value=move || form.sort_order.get().to_string()
                                    on:input=move |ev| {
                                        if let Ok(val) = event_target_value(&ev).parse::<i32>() {
                                            form.sort_order.set(val);
                                        }
                                    } />
                            </div>
                            <label class="label cursor-pointer justify-start gap-3">
                                <input type="checkbox" class="checkbox checkbox-primary"
                                    prop:checked=form.featured
                                    on:change=move |ev| form.featured.set(event_target_checked(&ev)) />
                                <span class="label-text">"Featured"</span>
                            </label>
                        </div>

                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| close_form()>"Cancel"</button>
                            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                {move || match (saving.get(), form.is_editing()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any(),
                                    (false, true) => "Update".into_any(),
                                    (false, false) => "Create".into_any(),
                                }}
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}

#[component]
fn ProjectRow(
    project: Project,
    on_edit: Callback<Project>,
    on_delete: Callback<RecordId>,
) -> impl IntoView {
    let id = project.id;
    let stack = project.tech_stack.join(", ");
    let featured = project.featured;
    let title = project.title.clone();
    let description = project.description.clone();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body flex-row items-start justify-between gap-4">
                <div class="space-y-1">
                    <h3 class="card-title">
                        {title}
                        <Show when=move || featured>
                            <span class="badge badge-primary">"Featured"</span>
                        </Show>
                    </h3>
                    <p class="text-base-content/70">{description}</p>
                    <p class="text-sm text-base-content/50">{stack}</p>
                </div>
                <div class="flex gap-2">
                    <button class="btn btn-ghost btn-sm btn-square" aria-label="Edit"
                        on:click=move |_| on_edit.run(project.clone())>
                        <Pencil attr:class="h-4 w-4" />
                    </button>
                    <button class="btn btn-ghost btn-sm btn-square text-error" aria-label="Delete"
                        on:click=move |_| on_delete.run(id)>
                        <Trash attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}
