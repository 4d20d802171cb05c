//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! - `session`: 纯状态机
//! - `SessionStore`: 执行状态机产生的副作用（持久化 token、校验请求）
//! - `AuthContext`: 通过 Context 注入到组件中的会话信号

mod session;

pub use session::{Session, SessionCommand, SessionEvent, Verification};

use std::collections::VecDeque;

use folio_shared::Admin;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PortfolioApi;
use crate::error::ApiError;
use crate::state::StateCell;
use crate::web::{FetchTransport, HttpTransport, KeyValueStore, LocalStorage, TokenStore};

/// 后端未给出原因时的登录失败提示
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// 会话驱动器
pub struct SessionStore<C, X = FetchTransport, S = LocalStorage> {
    cell: C,
    api: PortfolioApi<X>,
    tokens: TokenStore<S>,
}

impl<C, X, S> SessionStore<C, X, S>
where
    C: StateCell<Session>,
    X: HttpTransport,
    S: KeyValueStore,
{
    pub fn new(cell: C, api: PortfolioApi<X>, tokens: TokenStore<S>) -> Self {
        Self { cell, api, tokens }
    }

    /// 读取持久化 token 并在需要时完成校验
    pub async fn start(&self) {
        let token = self.tokens.load();
        self.dispatch(SessionEvent::Restored(token)).await;
    }

    /// 应用事件，并执行直到没有待处理的校验请求
    pub async fn dispatch(&self, event: SessionEvent) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            for token in self.run(event) {
                let outcome = self.api.me(&token).await;
                pending.push_back(SessionEvent::VerifyResolved { token, outcome });
            }
        }
    }

    /// 登录；失败不会改变会话，只返回可展示的错误消息
    pub async fn login(&self, username: &str, password: &str) -> Result<Admin, String> {
        match self.api.login(username, password).await {
            Ok(data) => {
                let admin = data.admin.clone();
                self.dispatch(SessionEvent::LoggedIn(data)).await;
                Ok(admin)
            }
            Err(err) => {
                log::warn!("[Auth] login failed: {}", err);
                Err(login_failure_message(&err))
            }
        }
    }

    pub fn logout(&self) {
        self.run(SessionEvent::TokenCleared);
    }

    /// 应用单个事件并执行持久化指令，返回需要校验的 token
    fn run(&self, event: SessionEvent) -> Vec<String> {
        let mut event = Some(event);
        let mut commands = Vec::new();
        self.cell.modify(&mut |session| {
            if let Some(event) = event.take() {
                commands = session.apply(event);
            }
        });

        let mut verify = Vec::new();
        for command in commands {
            match command {
                SessionCommand::Persist(token) => self.tokens.save(&token),
                SessionCommand::ClearPersisted => self.tokens.clear(),
                SessionCommand::Verify(token) => verify.push(token),
            }
        }
        verify
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Server { message, .. } => message.clone(),
        _ => LOGIN_FAILED_MESSAGE.to_string(),
    }
}

// =========================================================
// Leptos 上下文
// =========================================================

/// 认证上下文
///
/// 包含会话信号与 API 客户端，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    api: StoredValue<PortfolioApi>,
}

impl AuthContext {
    pub fn new(api: PortfolioApi) -> Self {
        Self {
            session: RwSignal::new(Session::default()),
            api: StoredValue::new(api),
        }
    }

    pub fn api(&self) -> PortfolioApi {
        self.api.get_value()
    }

    fn store(&self) -> SessionStore<RwSignal<Session>> {
        SessionStore::new(self.session, self.api(), TokenStore::local())
    }

    /// 获取校验阶段信号（用于路由守卫注入）
    ///
    /// 只在阶段变化时通知，token 或管理员信息的写入不会触发下游重新计算。
    pub fn verification_signal(&self) -> Signal<Verification> {
        let session = self.session;
        Memo::new(move |_| session.with(Session::verification)).into()
    }

    pub fn principal(&self) -> Signal<Option<Admin>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.principal().cloned()))
    }

    /// 当前 token（不建立响应式依赖）
    pub fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.token().map(str::to_string))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：读取持久化 token 并在后台校验
pub fn init_auth(ctx: &AuthContext) {
    let store = ctx.store();
    spawn_local(async move { store.start().await });
}

pub async fn login(ctx: &AuthContext, username: String, password: String) -> Result<Admin, String> {
    ctx.store().login(&username, &password).await
}

/// 注销并清除状态
///
/// 导航将由路由服务的会话监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.store().logout();
}
