//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision};
use crate::auth::Verification;
use crate::components::common::Loading;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话校验阶段信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话校验阶段（注入的信号，实现解耦）
    verification: Signal<Verification>,
    /// 当前路由的守卫判定，只在判定结果变化时通知订阅者
    decision: Memo<GuardDecision>,
}

/// 由当前路由与校验阶段得到守卫判定
///
/// 会话的其他变化（如校验中 → 已认证）不改变公开页面的判定，出口不会重建页面。
fn guard_decision(
    current_route: ReadSignal<AppRoute>,
    verification: Signal<Verification>,
) -> Memo<GuardDecision> {
    Memo::new(move |_| current_route.get().guard(verification.get()))
}

/// 应用内导航的落点：守卫不允许时落到重定向目标，与当前路由相同时不导航
fn resolve_navigation(
    target: AppRoute,
    current: AppRoute,
    verification: Verification,
) -> Option<AppRoute> {
    let route = match target.guard(verification) {
        GuardDecision::Redirect(redirect) => {
            log::info!("[Router] {} is not available, redirecting to {}", target, redirect);
            redirect
        }
        // 校验中的受保护页面先显示加载状态，结论由 Effect 处理
        GuardDecision::Loading | GuardDecision::Render => target,
    };
    (route != current).then_some(route)
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `verification` - 会话校验阶段信号，由外部注入实现解耦
    fn new(verification: Signal<Verification>) -> Self {
        // 1. 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            verification,
            decision: guard_decision(current_route, verification),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由的守卫判定（响应式）
    pub fn decision(&self) -> Memo<GuardDecision> {
        self.decision
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载。
    /// 被守卫拦下的目标不会写入 History，只追加重定向后的路由。
    pub fn navigate_to_route(&self, target_route: AppRoute) {
        let current = self.current_route.get_untracked();
        let Some(route) =
            resolve_navigation(target_route, current, self.verification.get_untracked())
        else {
            return;
        };
        push_history_state(route.to_path());
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        // popstate 后的守卫判定交给会话 Effect 统一处理
        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            set_route.set(AppRoute::from_path(&path));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话或路由变化时重新执行守卫，必要时替换 History 重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let decision = self.decision;

        Effect::new(move |_| {
            if let GuardDecision::Redirect(redirect) = decision.get() {
                let route = current_route.get_untracked();
                log::info!("[Router] guard redirected {} to {}", route, redirect);
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(verification: Signal<Verification>) -> RouterService {
    let router = RouterService::new(verification);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话校验阶段信号
    verification: Signal<Verification>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(verification);

    children()
}

/// 路由出口组件
///
/// 根据当前路由与守卫判定渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let decision = router.decision();

    move || match decision.get() {
        GuardDecision::Loading => view! { <Loading full_screen=true /> }.into_any(),
        // 重定向由 Effect 完成，这一帧不渲染任何内容
        GuardDecision::Redirect(_) => ().into_any(),
        GuardDecision::Render => matcher(router.current_route().get()),
    }
}

/// 应用内链接
///
/// 普通点击走路由服务，带修饰键的点击交给浏览器（新标签页等）。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    /// 当前路由与目标一致时追加的样式
    #[prop(optional, into)]
    active_class: String,
    /// 点击后的额外回调（如关闭移动端菜单）
    #[prop(optional)]
    on_navigate: Option<Callback<()>>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let class = move || {
        if !active_class.is_empty() && router.current_route().get() == to {
            format!("{} {}", class, active_class)
        } else {
            class.clone()
        }
    };

    let on_click = move |ev: ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate_to_route(to);
        if let Some(callback) = on_navigate {
            callback.run(());
        }
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use leptos::reactive::effect::ImmediateEffect;

    use crate::api::PortfolioApi;
    use crate::auth::{AuthContext, SessionEvent};
    use crate::error::ApiError;

    #[test]
    fn test_public_page_is_not_rebuilt_while_session_settles() {
        let owner = Owner::new();
        owner.with(|| {
            let auth = AuthContext::new(PortfolioApi::from_config());
            let session = auth.session;
            let (route, _) = signal(AppRoute::Contact);
            let decision = guard_decision(route, auth.verification_signal());
            let runs = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&runs);
            let _outlet = ImmediateEffect::new(move || {
                decision.track();
                counter.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(runs.load(Ordering::SeqCst), 1);

            session.update(|s| {
                s.apply(SessionEvent::Restored(Some("tok".into())));
            });
            session.update(|s| {
                s.apply(SessionEvent::VerifyResolved {
                    token: "tok".into(),
                    outcome: Err(ApiError::Transport),
                });
            });

            assert_eq!(decision.get_untracked(), GuardDecision::Render);
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn test_protected_page_follows_verification() {
        let owner = Owner::new();
        owner.with(|| {
            let auth = AuthContext::new(PortfolioApi::from_config());
            let session = auth.session;
            let (route, _) = signal(AppRoute::AdminMessages);
            let decision = guard_decision(route, auth.verification_signal());
            let runs = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&runs);
            let _outlet = ImmediateEffect::new(move || {
                decision.track();
                counter.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(decision.get_untracked(), GuardDecision::Loading);

            session.update(|s| {
                s.apply(SessionEvent::Restored(Some("tok".into())));
            });
            // 仍在等待校验结果
            assert_eq!(runs.load(Ordering::SeqCst), 1);

            session.update(|s| {
                s.apply(SessionEvent::VerifyResolved {
                    token: "tok".into(),
                    outcome: Err(ApiError::Transport),
                });
            });
            assert_eq!(
                decision.get_untracked(),
                GuardDecision::Redirect(AppRoute::AdminLogin)
            );
            assert_eq!(runs.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn test_guarded_navigation_never_lands_on_protected_path() {
        let landed = resolve_navigation(
            AppRoute::AdminProjects,
            AppRoute::Home,
            Verification::Unauthenticated,
        );
        assert_eq!(landed, Some(AppRoute::AdminLogin));
    }

    #[test]
    fn test_navigation_to_current_route_is_skipped() {
        assert_eq!(
            resolve_navigation(AppRoute::About, AppRoute::About, Verification::Unauthenticated),
            None
        );
        assert_eq!(
            resolve_navigation(
                AppRoute::AdminLogin,
                AppRoute::Home,
                Verification::Authenticated
            ),
            Some(AppRoute::AdminDashboard)
        );
    }
}
