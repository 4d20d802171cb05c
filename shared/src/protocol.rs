//! 后端 REST 接口定义
//!
//! 每个端点对应一个请求类型，通过 [`ApiRequest`] 描述方法、路径、请求体与响应类型。

use crate::validation::ContactForm;
use crate::{Admin, ApiEnvelope, DashboardStats, Message, Project, ProjectInput, RecordId};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The JSON body type (use `()` together with `body() -> None` when there is none).
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the endpoint needs a bearer token.
    const AUTHENTICATED: bool;

    /// The URL path, relative to the API base address.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// 无内容的 JSON 对象 `{}`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmptyBody {}

// =========================================================
// Payloads
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub admin: Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeData {
    pub admin: Admin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<Message>,
}

// =========================================================
// Auth
// =========================================================

/// Exchange credentials for a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = ApiEnvelope<LoginData>;
    type Body = Self;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Who am I (token verification)
#[derive(Debug, Clone, Copy)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = ApiEnvelope<MeData>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

// =========================================================
// Public
// =========================================================

/// Public project list
#[derive(Debug, Clone, Copy)]
pub struct PublicProjectsRequest;

impl PublicProjectsRequest {
    pub const PATH: &'static str = "/api/projects";
}

impl ApiRequest for PublicProjectsRequest {
    type Response = ApiEnvelope<ProjectList>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

/// Contact form submission
impl ApiRequest for ContactForm {
    type Response = IgnoredAny;
    type Body = Self;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/contact".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

// =========================================================
// Admin
// =========================================================

/// Dashboard counters
#[derive(Debug, Clone, Copy)]
pub struct DashboardStatsRequest;

impl ApiRequest for DashboardStatsRequest {
    type Response = ApiEnvelope<DashboardStats>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        "/admin/dashboard/stats".to_string()
    }
}

/// All projects (admin view)
#[derive(Debug, Clone, Copy)]
pub struct ListProjectsRequest;

impl ApiRequest for ListProjectsRequest {
    type Response = ApiEnvelope<ProjectList>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        "/admin/projects".to_string()
    }
}

/// Create a project
#[derive(Debug, Clone)]
pub struct CreateProjectRequest(pub ProjectInput);

impl ApiRequest for CreateProjectRequest {
    type Response = IgnoredAny;
    type Body = ProjectInput;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        "/admin/projects".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.0)
    }
}

/// Update a project
#[derive(Debug, Clone)]
pub struct UpdateProjectRequest {
    pub id: RecordId,
    pub input: ProjectInput,
}

impl ApiRequest for UpdateProjectRequest {
    type Response = IgnoredAny;
    type Body = ProjectInput;
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("/admin/projects/{}", self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.input)
    }
}

/// Delete a project
#[derive(Debug, Clone, Copy)]
pub struct DeleteProjectRequest {
    pub id: RecordId,
}

impl ApiRequest for DeleteProjectRequest {
    type Response = IgnoredAny;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("/admin/projects/{}", self.id)
    }
}

/// Inbox listing, optionally unread only
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMessagesRequest {
    pub unread_only: bool,
}

impl ApiRequest for ListMessagesRequest {
    type Response = ApiEnvelope<MessageList>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        if self.unread_only {
            "/admin/messages?unread=true".to_string()
        } else {
            "/admin/messages".to_string()
        }
    }
}

/// Mark a message as read
#[derive(Debug, Clone, Copy)]
pub struct MarkMessageReadRequest {
    pub id: RecordId,
    body: EmptyBody,
}

impl MarkMessageReadRequest {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            body: EmptyBody {},
        }
    }
}

impl ApiRequest for MarkMessageReadRequest {
    type Response = IgnoredAny;
    type Body = EmptyBody;
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("/admin/messages/{}/read", self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.body)
    }
}

/// Delete a message
#[derive(Debug, Clone, Copy)]
pub struct DeleteMessageRequest {
    pub id: RecordId,
}

impl ApiRequest for DeleteMessageRequest {
    type Response = IgnoredAny;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("/admin/messages/{}", self.id)
    }
}
