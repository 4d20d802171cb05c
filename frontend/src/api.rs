use folio_shared::protocol::{
    ApiRequest, CreateProjectRequest, DeleteMessageRequest, DeleteProjectRequest, LoginData,
    LoginRequest, MarkMessageReadRequest, MeRequest, UpdateProjectRequest,
};
use folio_shared::validation::ContactForm;
use folio_shared::{Admin, ProjectInput, RecordId};

use crate::config;
use crate::error::ApiError;
use crate::web::{FetchTransport, HttpClient, HttpTransport};

/// 作品集后端的类型化客户端
///
/// 认证与写操作各对应一个后端端点；需要认证的端点显式接收 bearer token。
/// 列表类读取由视图通过 `use_fetch` 完成。
#[derive(Debug, Clone)]
pub struct PortfolioApi<T = FetchTransport> {
    client: HttpClient<T>,
}

impl PortfolioApi<FetchTransport> {
    /// 使用配置中的根地址与超时创建浏览器客户端
    pub fn from_config() -> Self {
        Self::new(HttpClient::new(
            config::API_BASE_URL,
            FetchTransport::default(),
        ))
    }
}

impl<T: HttpTransport> PortfolioApi<T> {
    pub fn new(client: HttpClient<T>) -> Self {
        Self { client }
    }

    async fn call<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> Result<R::Response, ApiError> {
        self.client.request(req, token).await
    }

    // --- Auth ---

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        Ok(self.call(&req, None).await?.data)
    }

    /// 校验 token 并返回对应的管理员
    pub async fn me(&self, token: &str) -> Result<Admin, ApiError> {
        Ok(self.call(&MeRequest, Some(token)).await?.data.admin)
    }

    // --- Public ---

    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        self.call(form, None).await.map(|_| ())
    }

    // --- Admin ---

    pub async fn create_project(&self, token: &str, input: ProjectInput) -> Result<(), ApiError> {
        self.call(&CreateProjectRequest(input), Some(token))
            .await
            .map(|_| ())
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: RecordId,
        input: ProjectInput,
    ) -> Result<(), ApiError> {
        self.call(&UpdateProjectRequest { id, input }, Some(token))
            .await
            .map(|_| ())
    }

    pub async fn delete_project(&self, token: &str, id: RecordId) -> Result<(), ApiError> {
        self.call(&DeleteProjectRequest { id }, Some(token))
            .await
            .map(|_| ())
    }

    pub async fn mark_message_read(&self, token: &str, id: RecordId) -> Result<(), ApiError> {
        self.call(&MarkMessageReadRequest::new(id), Some(token))
            .await
            .map(|_| ())
    }

    pub async fn delete_message(&self, token: &str, id: RecordId) -> Result<(), ApiError> {
        self.call(&DeleteMessageRequest { id }, Some(token))
            .await
            .map(|_| ())
    }
}

// =========================================================
// 测试工具: FakeBackend
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::web::{HttpError, HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use folio_shared::protocol::{
        DashboardStatsRequest, HttpMethod, ListMessagesRequest, ListProjectsRequest,
        PublicProjectsRequest,
    };
    use folio_shared::{ApiEnvelope, DashboardStats, Message, Project, tech_stack};
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    pub const BASE: &str = "http://backend.test";
    pub const VALID_TOKEN: &str = "token-123";

    /// 读取端点，用于在变更后核对后端状态
    impl<T: HttpTransport> PortfolioApi<T> {
        pub fn client(&self) -> &HttpClient<T> {
            &self.client
        }

        pub async fn public_projects(&self) -> Result<Vec<Project>, ApiError> {
            Ok(self.call(&PublicProjectsRequest, None).await?.data.projects)
        }

        pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ApiError> {
            Ok(self.call(&DashboardStatsRequest, Some(token)).await?.data)
        }

        pub async fn list_projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
            Ok(self.call(&ListProjectsRequest, Some(token)).await?.data.projects)
        }

        pub async fn list_messages(
            &self,
            token: &str,
            unread_only: bool,
        ) -> Result<Vec<Message>, ApiError> {
            Ok(self
                .call(&ListMessagesRequest { unread_only }, Some(token))
                .await?
                .data
                .messages)
        }
    }

    /// 内存中的后端，实现登录、项目与留言端点
    pub struct FakeBackend {
        pub projects: RefCell<Vec<Project>>,
        pub messages: RefCell<Vec<Message>>,
        pub contacts: RefCell<Vec<ContactForm>>,
        pub requests: RefCell<Vec<HttpRequest>>,
        next_id: Cell<RecordId>,
        pub offline: Cell<bool>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            let created_at = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
            Self {
                projects: RefCell::new(vec![
                    Project {
                        id: 1,
                        title: "ThinkExam".into(),
                        description: "Exam management".into(),
                        tech_stack: vec!["PHP".into(), "Laravel".into()],
                        github_url: None,
                        live_url: None,
                        featured: true,
                        sort_order: 0,
                    },
                    Project {
                        id: 2,
                        title: "Chattreix".into(),
                        description: "Realtime chat".into(),
                        tech_stack: vec!["Node.js".into()],
                        github_url: None,
                        live_url: None,
                        featured: false,
                        sort_order: 1,
                    },
                ]),
                messages: RefCell::new(vec![
                    Message {
                        id: 10,
                        name: "Ada".into(),
                        email: "ada@example.com".into(),
                        message: "Hello, I have a project".into(),
                        is_read: false,
                        created_at,
                    },
                    Message {
                        id: 11,
                        name: "Linus".into(),
                        email: "linus@example.com".into(),
                        message: "Already read this one".into(),
                        is_read: true,
                        created_at,
                    },
                ]),
                contacts: RefCell::new(Vec::new()),
                requests: RefCell::new(Vec::new()),
                next_id: Cell::new(100),
                offline: Cell::new(false),
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        fn authorized(req: &HttpRequest) -> bool {
            req.header_value("Authorization") == Some(format!("Bearer {VALID_TOKEN}").as_str())
        }

        fn route(&self, req: &HttpRequest) -> (u16, serde_json::Value) {
            let path = req.url.trim_start_matches(BASE);
            let segments: Vec<&str> = path.split('?').next().unwrap_or("").split('/').collect();
            let body: serde_json::Value = req
                .body
                .as_deref()
                .and_then(|b| serde_json::from_str(b).ok())
                .unwrap_or(serde_json::Value::Null);

            match (req.method, path) {
                (HttpMethod::Post, "/auth/login") => {
                    if body["username"] == "admin" && body["password"] == "secret" {
                        return (
                            200,
                            json!({"success": true, "data": {"token": VALID_TOKEN, "admin": {"id": 1, "username": "admin"}}}),
                        );
                    }
                    return (401, json!({"success": false, "message": "Invalid credentials"}));
                }
                (HttpMethod::Get, "/api/projects") => {
                    let envelope = ApiEnvelope::new(json!({"projects": *self.projects.borrow()}));
                    return (200, serde_json::to_value(envelope).unwrap());
                }
                (HttpMethod::Post, "/api/contact") => {
                    let form: ContactForm = serde_json::from_value(body).unwrap();
                    self.contacts.borrow_mut().push(form);
                    return (201, json!({"success": true, "message": "Message sent"}));
                }
                _ => {}
            }

            if !Self::authorized(req) {
                return (401, json!({"success": false, "message": "Invalid or expired token"}));
            }

            match (req.method, segments.as_slice()) {
                (HttpMethod::Get, ["", "auth", "me"]) => {
                    (200, json!({"data": {"admin": {"id": 1, "username": "admin"}}}))
                }
                (HttpMethod::Get, ["", "admin", "dashboard", "stats"]) => {
                    let messages = self.messages.borrow();
                    let unread = messages.iter().filter(|m| !m.is_read).count();
                    (
                        200,
                        json!({"data": {"projects": self.projects.borrow().len(), "messages": messages.len(), "unreadMessages": unread}}),
                    )
                }
                (HttpMethod::Get, ["", "admin", "projects"]) => (
                    200,
                    json!({"data": {"projects": *self.projects.borrow()}}),
                ),
                (HttpMethod::Post, ["", "admin", "projects"]) => {
                    let input: ProjectInput = serde_json::from_value(body).unwrap();
                    let id = self.next_id.get();
                    self.next_id.set(id + 1);
                    self.projects.borrow_mut().push(Project {
                        id,
                        title: input.title,
                        description: input.description,
                        tech_stack: tech_stack::split(&input.tech_stack),
                        github_url: input.github_url,
                        live_url: input.live_url,
                        featured: input.featured,
                        sort_order: input.sort_order,
                    });
                    (201, json!({"success": true}))
                }
                (HttpMethod::Put, ["", "admin", "projects", id]) => {
                    let input: ProjectInput = serde_json::from_value(body).unwrap();
                    let id: RecordId = id.parse().unwrap();
                    let mut projects = self.projects.borrow_mut();
                    match projects.iter_mut().find(|p| p.id == id) {
                        Some(project) => {
                            project.title = input.title;
                            project.description = input.description;
                            project.tech_stack = tech_stack::split(&input.tech_stack);
                            project.featured = input.featured;
                            project.sort_order = input.sort_order;
                            (200, json!({"success": true}))
                        }
                        None => (404, json!({"message": "Project not found"})),
                    }
                }
                (HttpMethod::Delete, ["", "admin", "projects", id]) => {
                    let id: RecordId = id.parse().unwrap();
                    self.projects.borrow_mut().retain(|p| p.id != id);
                    (200, json!({"success": true}))
                }
                (HttpMethod::Get, ["", "admin", "messages"]) => {
                    let unread_only = path.ends_with("?unread=true");
                    let messages: Vec<Message> = self
                        .messages
                        .borrow()
                        .iter()
                        .filter(|m| !unread_only || !m.is_read)
                        .cloned()
                        .collect();
                    (200, json!({"data": {"messages": messages}}))
                }
                (HttpMethod::Put, ["", "admin", "messages", id, "read"]) => {
                    let id: RecordId = id.parse().unwrap();
                    for message in self.messages.borrow_mut().iter_mut() {
                        if message.id == id {
                            message.is_read = true;
                        }
                    }
                    (200, json!({"success": true}))
                }
                (HttpMethod::Delete, ["", "admin", "messages", id]) => {
                    let id: RecordId = id.parse().unwrap();
                    self.messages.borrow_mut().retain(|m| m.id != id);
                    (200, json!({"success": true}))
                }
                _ => (404, json!({"message": "Route not found"})),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for FakeBackend {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.borrow_mut().push(req.clone());
            if self.offline.get() {
                return Err(HttpError::NetworkError("Failed to fetch".into()));
            }
            let (status, body) = self.route(&req);
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            })
        }
    }

    pub fn fake_api() -> PortfolioApi<FakeBackend> {
        PortfolioApi::new(HttpClient::new(BASE, FakeBackend::new()))
    }

    #[tokio::test]
    async fn test_login_returns_token_and_admin() {
        let api = fake_api();
        let data = api.login("admin", "secret").await.unwrap();
        assert_eq!(data.token, VALID_TOKEN);
        assert_eq!(data.admin.username, "admin");
    }

    #[tokio::test]
    async fn test_login_failure_carries_server_message() {
        let api = fake_api();
        let err = api.login("admin", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_admin_endpoints_reject_bad_token() {
        let api = fake_api();
        let err = api.list_projects("expired").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_deleted_project_is_gone_after_refetch() {
        let api = fake_api();
        api.delete_project(VALID_TOKEN, 1).await.unwrap();

        let projects = api.list_projects(VALID_TOKEN).await.unwrap();
        assert!(projects.iter().all(|p| p.id != 1));
        assert_eq!(projects.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_then_refetch() {
        let api = fake_api();
        api.mark_message_read(VALID_TOKEN, 10).await.unwrap();

        let all = api.list_messages(VALID_TOKEN, false).await.unwrap();
        let message = all.iter().find(|m| m.id == 10).unwrap();
        assert!(message.is_read);

        let unread = api.list_messages(VALID_TOKEN, true).await.unwrap();
        assert!(unread.iter().all(|m| m.id != 10));
    }

    #[tokio::test]
    async fn test_create_and_update_project() {
        let api = fake_api();
        let input = ProjectInput {
            title: "Folio".into(),
            description: "This site".into(),
            tech_stack: "Rust, Leptos".into(),
            github_url: None,
            live_url: None,
            featured: false,
            sort_order: 5,
        };
        api.create_project(VALID_TOKEN, input.clone()).await.unwrap();

        let projects = api.list_projects(VALID_TOKEN).await.unwrap();
        let created = projects.iter().find(|p| p.title == "Folio").unwrap();
        assert_eq!(created.tech_stack, vec!["Rust", "Leptos"]);

        let mut changed = input;
        changed.featured = true;
        api.update_project(VALID_TOKEN, created.id, changed).await.unwrap();

        let projects = api.list_projects(VALID_TOKEN).await.unwrap();
        assert!(projects.iter().find(|p| p.title == "Folio").unwrap().featured);
    }

    #[tokio::test]
    async fn test_dashboard_stats_and_delete_message() {
        let api = fake_api();
        let stats = api.dashboard_stats(VALID_TOKEN).await.unwrap();
        assert_eq!(stats.projects, 2);
        assert_eq!(stats.messages, 2);
        assert_eq!(stats.unread_messages, 1);

        api.delete_message(VALID_TOKEN, 11).await.unwrap();
        let stats = api.dashboard_stats(VALID_TOKEN).await.unwrap();
        assert_eq!(stats.messages, 1);
    }

    #[tokio::test]
    async fn test_contact_submission_is_public() {
        let api = fake_api();
        let form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Let's work together".into(),
        };
        api.submit_contact(&form).await.unwrap();

        let backend = api.client().transport();
        assert_eq!(backend.contacts.borrow().len(), 1);
        let req = backend.requests.borrow().last().cloned().unwrap();
        assert_eq!(req.header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_offline_backend_is_transport_error() {
        let api = fake_api();
        api.client().transport().offline.set(true);
        let err = api.public_projects().await.unwrap_err();
        assert_eq!(err, ApiError::Transport);
    }
}
