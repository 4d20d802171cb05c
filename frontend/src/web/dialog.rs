//! 浏览器原生对话框

/// 弹出 `window.confirm`，无法获取 window 时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
