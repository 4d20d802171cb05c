//! 请求错误类型
//!
//! 所有传输层与服务端错误在 HTTP 边界统一归一化为 [`ApiError`]，
//! 下游只接触这一种形态：`{status, message, errors}`。

use folio_shared::FieldError;
use serde_json::Value;
use thiserror::Error;

use crate::web::HttpError;

pub const TRANSPORT_MESSAGE: &str =
    "Unable to connect to the server. Please check your internet connection.";
pub const DEFAULT_SERVER_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 请求已发出但没有收到响应（网络故障或超时），status 为 0
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport,

    /// 服务端返回了错误状态码
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        errors: Option<Vec<FieldError>>,
    },

    /// 其他失败，原样向上传递
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// 由错误响应构造，尽量读取服务端给出的 `message` 与 `errors`
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SERVER_MESSAGE)
            .to_string();

        let errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value::<Vec<FieldError>>(v.clone()).ok());

        ApiError::Server {
            status,
            message,
            errors,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ApiError::Server {
                errors: Some(errors),
                ..
            } => Some(errors),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::NetworkError(_) => ApiError::Transport,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}
