//! 会话状态机
//!
//! 状态转换只由离散事件驱动，`apply` 返回需要由外部执行的副作用指令
//! （持久化、校验请求）。本模块不做任何 I/O。

use folio_shared::Admin;
use folio_shared::protocol::LoginData;

use crate::error::ApiError;

/// 校验阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verification {
    /// 尚未读取持久化 token
    #[default]
    Uninitialized,
    /// 正在用 token 请求当前管理员
    Verifying,
    Authenticated,
    Unauthenticated,
}

/// 客户端会话
///
/// 不变式：`principal` 非空当且仅当处于 `Authenticated`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    principal: Option<Admin>,
    verification: Verification,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 启动时读取到的持久化 token
    Restored(Option<String>),
    /// 登录成功，响应中已包含管理员信息
    LoggedIn(LoginData),
    /// 注销
    TokenCleared,
    /// 校验结果，带有被校验的 token
    VerifyResolved {
        token: String,
        outcome: Result<Admin, ApiError>,
    },
}

/// 状态转换产生的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Verify(String),
    Persist(String),
    ClearPersisted,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn principal(&self) -> Option<&Admin> {
        self.principal.as_ref()
    }

    pub fn verification(&self) -> Verification {
        self.verification
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionCommand> {
        match event {
            SessionEvent::Restored(token) => {
                if self.verification != Verification::Uninitialized {
                    log::warn!("[Session] restore ignored in {:?}", self.verification);
                    return Vec::new();
                }
                match token.filter(|t| !t.is_empty()) {
                    Some(token) => self.verify(token),
                    None => {
                        log::debug!("[Session] no persisted token");
                        self.reset();
                        Vec::new()
                    }
                }
            }

            SessionEvent::LoggedIn(LoginData { token, admin }) => {
                log::info!("[Session] logged in as {}", admin.username);
                self.token = Some(token.clone());
                self.principal = Some(admin);
                self.verification = Verification::Authenticated;
                vec![SessionCommand::Persist(token)]
            }

            SessionEvent::TokenCleared => {
                if self.token.is_some() {
                    log::info!("[Session] logged out");
                }
                self.reset();
                vec![SessionCommand::ClearPersisted]
            }

            SessionEvent::VerifyResolved { token, outcome } => {
                if self.verification != Verification::Verifying
                    || self.token.as_deref() != Some(token.as_str())
                {
                    log::debug!("[Session] ignored verification result for a stale token");
                    return Vec::new();
                }
                match outcome {
                    Ok(admin) => {
                        log::info!("[Session] token verified for {}", admin.username);
                        self.principal = Some(admin);
                        self.verification = Verification::Authenticated;
                        Vec::new()
                    }
                    Err(err) => {
                        log::warn!("[Session] token verification failed: {}", err);
                        self.reset();
                        vec![SessionCommand::ClearPersisted]
                    }
                }
            }
        }
    }

    fn verify(&mut self, token: String) -> Vec<SessionCommand> {
        log::debug!("[Session] verifying token");
        self.token = Some(token.clone());
        self.principal = None;
        self.verification = Verification::Verifying;
        vec![SessionCommand::Verify(token)]
    }

    fn reset(&mut self) {
        self.token = None;
        self.principal = None;
        self.verification = Verification::Unauthenticated;
    }
}

#[cfg(test)]
impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// 尚未得出校验结论
    pub fn is_loading(&self) -> bool {
        matches!(
            self.verification,
            Verification::Uninitialized | Verification::Verifying
        )
    }
}
