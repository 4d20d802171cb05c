//! 作品集前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义与守卫判定
//! - `web::router`: 路由服务（History API）
//! - `auth`: 会话状态机与认证上下文
//! - `fetch`: 带加载 / 错误状态的请求工具
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod config;
mod content;
mod error;
mod fetch;
mod state;
mod components {
    pub mod about;
    pub mod common;
    pub mod contact;
    pub mod home;
    pub mod icons;
    pub mod layout;
    pub mod project_card;
    pub mod projects;

    pub mod admin {
        pub mod dashboard;
        pub mod layout;
        pub mod login;
        pub mod messages_inbox;
        pub mod projects_manager;
    }
}

use crate::api::PortfolioApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::about::AboutPage;
use crate::components::admin::dashboard::DashboardPage;
use crate::components::admin::layout::AdminLayout;
use crate::components::admin::login::LoginPage;
use crate::components::admin::messages_inbox::MessagesInboxPage;
use crate::components::admin::projects_manager::ProjectsManagerPage;
use crate::components::contact::ContactPage;
use crate::components::home::HomePage;
use crate::components::layout::PublicLayout;
use crate::components::projects::ProjectsPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    pub mod timer;

    pub use http::{FetchTransport, HttpClient, HttpError, HttpTransport};
    #[cfg(test)]
    pub use http::{HttpRequest, HttpResponse};
    pub use storage::{KeyValueStore, LocalStorage, TokenStore};

}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 公开页面包裹在 `PublicLayout` 中，后台页面包裹在 `AdminLayout` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <PublicLayout><HomePage /></PublicLayout> }.into_any(),
        AppRoute::About => view! { <PublicLayout><AboutPage /></PublicLayout> }.into_any(),
        AppRoute::Projects => view! { <PublicLayout><ProjectsPage /></PublicLayout> }.into_any(),
        AppRoute::Contact => view! { <PublicLayout><ContactPage /></PublicLayout> }.into_any(),
        AppRoute::AdminLogin => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminLayout><DashboardPage /></AdminLayout> }.into_any(),
        AppRoute::AdminProjects => {
            view! { <AdminLayout><ProjectsManagerPage /></AdminLayout> }.into_any()
        }
        AppRoute::AdminMessages => {
            view! { <AdminLayout><MessagesInboxPage /></AdminLayout> }.into_any()
        }
        AppRoute::NotFound => view! {
            <PublicLayout>
                <div class="flex items-center justify-center min-h-[60vh]">
                    <div class="text-center">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl mt-4">"Page not found"</p>
                        <Link to=AppRoute::Home class="btn btn-primary mt-6">"Go Home"</Link>
                    </div>
                </div>
            </PublicLayout>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new(PortfolioApi::from_config());
    provide_context(auth_ctx);

    // 2. 恢复持久化 token 并在后台校验
    init_auth(&auth_ctx);

    // 3. 校验阶段信号注入路由服务，守卫据此判定
    let verification = auth_ctx.verification_signal();

    view! {
        <Router verification=verification>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
