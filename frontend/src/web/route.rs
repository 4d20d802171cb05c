//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的属性以及守卫判定。

use std::fmt::Display;

use crate::auth::Verification;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    About,
    Projects,
    Contact,
    /// 管理后台登录页
    AdminLogin,
    /// 控制面板 (需要认证)
    AdminDashboard,
    AdminProjects,
    AdminMessages,
    /// 页面未找到
    NotFound,
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在校验中，只显示加载提示
    Loading,
    /// 以 replaceState 跳转到目标路由
    Redirect(AppRoute),
    Render,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举（忽略查询串、锚点与末尾斜杠）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Home,
            "/about" => Self::About,
            "/projects" => Self::Projects,
            "/contact" => Self::Contact,
            "/admin/login" => Self::AdminLogin,
            "/admin" | "/admin/dashboard" => Self::AdminDashboard,
            "/admin/projects" => Self::AdminProjects,
            "/admin/messages" => Self::AdminMessages,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Projects => "/projects",
            Self::Contact => "/contact",
            Self::AdminLogin => "/admin/login",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminProjects => "/admin/projects",
            Self::AdminMessages => "/admin/messages",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::AdminDashboard | Self::AdminProjects | Self::AdminMessages
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::AdminLogin)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::AdminLogin
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::AdminDashboard
    }

    /// 根据会话校验阶段决定如何处理该路由
    pub fn guard(&self, verification: Verification) -> GuardDecision {
        if self.requires_auth() {
            return match verification {
                Verification::Uninitialized | Verification::Verifying => GuardDecision::Loading,
                Verification::Unauthenticated => {
                    GuardDecision::Redirect(Self::auth_failure_redirect())
                }
                Verification::Authenticated => GuardDecision::Render,
            };
        }

        if self.should_redirect_when_authenticated()
            && verification == Verification::Authenticated
        {
            return GuardDecision::Redirect(Self::auth_success_redirect());
        }

        GuardDecision::Render
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
