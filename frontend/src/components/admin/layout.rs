//! 管理后台布局：侧边栏 + 内容区
//!
//! 认证守卫由路由服务完成，这里只负责展示。

use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::icons::{Folder, HomeIcon, LayoutGrid, LogOut, Mail};
use crate::web::route::AppRoute;
use crate::web::router::Link;

const NAV_CLASS: &str = "flex items-center gap-3";

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let principal = auth.principal();

    // 注销后路由服务会监听会话变化并自动重定向
    let on_logout = move |_| logout(&auth);

    view! {
        <div class="min-h-screen flex flex-col md:flex-row bg-base-200">
            <aside class="w-full md:w-64 bg-base-100 shadow-lg flex flex-col">
                <div class="p-6 border-b border-base-300">
                    <h2 class="text-xl font-bold">"Admin Panel"</h2>
                    <p class="text-sm text-base-content/70">
                        "Welcome, " {move || principal.get().map(|a| a.username).unwrap_or_default()}
                    </p>
                </div>

                <ul class="menu flex-1 p-4 gap-1">
                    <li>
                        <Link to=AppRoute::AdminDashboard class=NAV_CLASS active_class="active">
                            <LayoutGrid attr:class="h-5 w-5" /> "Dashboard"
                        </Link>
                    </li>
                    <li>
                        <Link to=AppRoute::AdminProjects class=NAV_CLASS active_class="active">
                            <Folder attr:class="h-5 w-5" /> "Projects"
                        </Link>
                    </li>
                    <li>
                        <Link to=AppRoute::AdminMessages class=NAV_CLASS active_class="active">
                            <Mail attr:class="h-5 w-5" /> "Messages"
                        </Link>
                    </li>
                </ul>

                <ul class="menu p-4 border-t border-base-300">
                    <li>
                        <Link to=AppRoute::Home class=NAV_CLASS>
                            <HomeIcon attr:class="h-5 w-5" /> "View Site"
                        </Link>
                    </li>
                    <li>
                        <button class="flex items-center gap-3 text-error" on:click=on_logout>
                            <LogOut attr:class="h-5 w-5" /> "Logout"
                        </button>
                    </li>
                </ul>
            </aside>

            <main class="flex-1 p-4 md:p-8">{children()}</main>
        </div>
    }
}
