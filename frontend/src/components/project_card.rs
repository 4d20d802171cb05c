use folio_shared::Project;
use leptos::prelude::*;

use crate::components::icons::{ExternalLink, Github};

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let Project {
        title,
        description,
        tech_stack,
        github_url,
        live_url,
        featured,
        ..
    } = project;

    let github_label = format!("View {} on GitHub", title);
    let live_label = format!("View live demo of {}", title);

    view! {
        <article class="card bg-base-100 shadow-xl h-full">
            <div class="card-body">
                <h3 class="card-title">
                    {title}
                    <Show when=move || featured>
                        <span class="badge badge-primary badge-sm">"Featured"</span>
                    </Show>
                </h3>
                <p class="text-base-content/70">{description}</p>

                <div class="flex flex-wrap gap-2 mt-2">
                    {tech_stack
                        .into_iter()
                        .map(|tech| view! { <span class="badge badge-outline">{tech}</span> })
                        .collect_view()}
                </div>

                <div class="card-actions justify-end mt-4">
                    {github_url.map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer"
                            class="btn btn-ghost btn-sm gap-2" aria-label=github_label>
                            <Github attr:class="h-4 w-4" /> "GitHub"
                        </a>
                    })}
                    {live_url.map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer"
                            class="btn btn-primary btn-sm gap-2" aria-label=live_label>
                            <ExternalLink attr:class="h-4 w-4" /> "Live Demo"
                        </a>
                    })}
                </div>
            </div>
        </article>
    }
}
