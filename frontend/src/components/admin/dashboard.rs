use folio_shared::protocol::{ApiRequest, DashboardStatsRequest};
use folio_shared::{ApiEnvelope, DashboardStats};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::common::{ErrorMessage, Loading};
use crate::components::icons::{Folder, Mail, Plus};
use crate::fetch::{FetchOptions, use_fetch};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let principal = auth.principal();
    let options = auth
        .token()
        .map(FetchOptions::authenticated)
        .unwrap_or_default();
    let stats = use_fetch::<ApiEnvelope<DashboardStats>>(Some(DashboardStatsRequest.path()), options);
    let (data, loading, error) = (stats.data(), stats.loading(), stats.error());

    let current = move || data.with(|d| d.as_ref().map(|d| d.data).unwrap_or_default());
    let on_retry = Callback::new(move |_: ()| stats.refetch());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70">
                    "Welcome back, " {move || principal.get().map(|a| a.username).unwrap_or_default()} "!"
                </p>
            </div>

            {move || {
                if loading.get() && data.with(Option::is_none) {
                    view! { <Loading message="Loading dashboard..." /> }.into_any()
                } else if let Some(message) = error.get() {
                    view! { <ErrorMessage message=message on_retry=on_retry /> }.into_any()
                } else {
                    view! {
                        <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
                            <div class="stat">
                                <div class="stat-figure text-primary"><Folder attr:class="h-8 w-8" /></div>
                                <div class="stat-title">"Total Projects"</div>
                                <div class="stat-value">{move || current().projects}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-secondary"><Mail attr:class="h-8 w-8" /></div>
                                <div class="stat-title">"Total Messages"</div>
                                <div class="stat-value">{move || current().messages}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-accent"><Mail attr:class="h-8 w-8" /></div>
                                <div class="stat-title">"Unread Messages"</div>
                                <div class="stat-value text-accent">{move || current().unread_messages}</div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"Quick Actions"</h2>
                    <div class="flex flex-wrap gap-3">
                        <Link to=AppRoute::AdminProjects class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add New Project"
                        </Link>
                        <Link to=AppRoute::AdminMessages class="btn btn-outline gap-2">
                            <Mail attr:class="h-4 w-4" /> "View Messages"
                        </Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
