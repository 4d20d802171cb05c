use folio_shared::ApiEnvelope;
use folio_shared::protocol::{ProjectList, PublicProjectsRequest};
use leptos::prelude::*;

use crate::components::common::Loading;
use crate::components::project_card::ProjectCard;
use crate::content::projects_to_show;
use crate::fetch::{FetchOptions, use_fetch};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let projects = use_fetch::<ApiEnvelope<ProjectList>>(
        Some(PublicProjectsRequest::PATH.to_string()),
        FetchOptions::default(),
    );
    let (data, loading, error) = (projects.data(), projects.loading(), projects.error());

    // 只在首次加载（尚无数据）时显示加载状态
    let initial_loading = move || loading.get() && data.with(Option::is_none);
    let shown = move || data.with(|d| projects_to_show(d.as_ref().map(|d| d.data.projects.as_slice())));

    view! {
        <section class="py-16 text-center">
            <h1 class="text-4xl font-bold">"Projects"</h1>
            <p class="text-base-content/70 mt-2 max-w-2xl mx-auto">
                "Real-world applications built with clean architecture, layered design patterns, and production-grade code quality."
            </p>
        </section>

        <section class="container mx-auto px-4 pb-16">
            <Show
                when=move || !initial_loading()
                fallback=|| view! { <Loading message="Loading projects..." /> }
            >
                <Show when=move || error.with(Option::is_some)>
                    <div role="alert" class="alert alert-warning mb-6">
                        <span>"Showing cached projects. Backend connection unavailable."</span>
                    </div>
                </Show>

                <div class="grid gap-6 md:grid-cols-2">
                    <For
                        each=shown
                        key=|project| project.id
                        children=|project| view! { <ProjectCard project=project /> }
                    />
                </div>
            </Show>
        </section>

        <section class="py-16 bg-base-100">
            <div class="container mx-auto px-4 text-center max-w-4xl">
                <h2 class="text-3xl font-bold">"Building Philosophy"</h2>
                <p class="text-base-content/70 mt-4">
                    "Each project follows the same core principles: separation of concerns, proper error handling, and code that's meant to be read and maintained by other developers."
                </p>
                <div class="grid gap-6 md:grid-cols-3 mt-8">
                    <div>
                        <h3 class="font-semibold">"Layered Architecture"</h3>
                        <p class="text-sm text-base-content/70">"Routes, Controllers, Services, Data Layer"</p>
                    </div>
                    <div>
                        <h3 class="font-semibold">"Error Handling"</h3>
                        <p class="text-sm text-base-content/70">"Centralized, consistent error responses"</p>
                    </div>
                    <div>
                        <h3 class="font-semibold">"Clean Code"</h3>
                        <p class="text-sm text-base-content/70">"Readable, documented, maintainable"</p>
                    </div>
                </div>
            </div>
        </section>
    }
}
