//! HTTP 请求封装模块
//!
//! - `HttpTransport`: 传输抽象，浏览器端由 `web_sys::fetch` 实现，测试中由 Mock 替换
//! - `HttpClient`: 固定根地址的客户端，请求前挂载认证头（pre-hook），
//!   响应后把失败归一化为 [`ApiError`]（post-hook）

use async_trait::async_trait;
use folio_shared::protocol::{ApiRequest, HttpMethod};
use folio_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

use super::timer::Timeout;
use crate::config;
use crate::error::ApiError;

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 请求已发出但没有响应（网络错误、超时被中止）
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 响应读取失败
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

/// 待发送的请求
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置请求体
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 原始响应
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

/// 基于 `window.fetch` 的传输实现，超时后通过 `AbortController` 中止请求
#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(config::REQUEST_TIMEOUT_MS)
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let controller = AbortController::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 AbortController 失败: {:?}", e)))?;

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_signal(Some(&controller.signal()));

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        // 计时器在本函数返回时随 drop 清除
        let _timeout = Timeout::new(self.timeout_ms, move || controller.abort());

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
        })?;
        let status = response.status();

        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let body = text
            .as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 客户端: 根地址 + 拦截钩子
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> HttpClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 请求钩子：统一的内容类型，以及可选的 bearer 认证头
    fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        bearer: Option<&str>,
        body: Option<String>,
    ) -> HttpRequest {
        let mut req = HttpRequest::new(self.url(path), method)
            .header("Content-Type", "application/json");

        if let Some(token) = bearer {
            req = req.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"));
        }
        if let Some(body) = body {
            req = req.body(body);
        }
        req
    }

    /// 发送请求并执行响应钩子，非 2xx 响应被归一化为 `ApiError::Server`
    pub async fn send_raw(
        &self,
        method: HttpMethod,
        path: &str,
        bearer: Option<&str>,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let req = self.prepare(method, path, bearer, body);
        log::debug!("[Http] {} {}", method.as_str(), req.url);

        match self.transport.send(req).await {
            Ok(resp) if resp.ok() => Ok(resp),
            Ok(resp) => {
                match resp.status {
                    404 => log::error!("[Http] Resource not found: {}", path),
                    500 => log::error!("[Http] Server error: {}", path),
                    status => log::warn!("[Http] {} responded {}", path, status),
                }
                Err(ApiError::from_response(resp.status, &resp.body))
            }
            Err(err) => {
                log::warn!("[Http] {} failed: {}", path, err);
                Err(ApiError::from(err))
            }
        }
    }

    /// 发送请求并把响应体解码为 `D`
    pub async fn fetch_json<D: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        bearer: Option<&str>,
        body: Option<String>,
    ) -> Result<D, ApiError> {
        let resp = self.send_raw(method, path, bearer, body).await?;
        decode_body(&resp.body)
    }

    /// 发送一个类型化的端点请求
    pub async fn request<R: ApiRequest>(
        &self,
        req: &R,
        bearer: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        if R::AUTHENTICATED && bearer.is_none() {
            log::warn!("[Http] {} requires a bearer token but none was given", req.path());
        }

        let body = req
            .body()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Unexpected(format!("请求体序列化失败: {}", e)))?;

        self.fetch_json(R::METHOD, &req.path(), bearer, body).await
    }
}

/// 解码成功响应；空响应体（如 204）按 `null` 处理
fn decode_body<D: DeserializeOwned>(body: &str) -> Result<D, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Unexpected(format!("响应解析失败: {}", e)))
}

// =========================================================
// 测试工具: MockTransport
// =========================================================
