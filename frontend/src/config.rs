//! 运行配置
//!
//! 后端地址在编译期通过环境变量 `FOLIO_API_BASE_URL` 覆盖，缺省指向本地开发服务器。

/// 后端 API 根地址
pub const API_BASE_URL: &str = match option_env!("FOLIO_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

/// 单次请求超时（毫秒）
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// 持久化 bearer token 使用的 LocalStorage 键
pub const TOKEN_STORAGE_KEY: &str = "adminToken";

/// 联系表单成功提示的显示时长（毫秒）
pub const CONTACT_SUCCESS_RESET_MS: u32 = 5_000;

/// 日志级别：调试构建输出 debug，发布构建只输出 info 及以上
pub fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}
