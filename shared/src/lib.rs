use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod tech_stack;
pub mod validation;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 后端记录主键
pub type RecordId = i64;

// =========================================================
// 响应包装 (Envelope)
// =========================================================

/// 后端所有成功响应的统一外层结构：`{ success, message, data }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: Some(true),
            message: None,
            data,
        }
    }
}

/// 服务端返回的字段级校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已认证的管理员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: RecordId,
    pub username: String,
}

/// 作品集项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// 有序技术栈；后端可能返回数组，也可能返回逗号拼接的字符串
    #[serde(default, deserialize_with = "tech_stack::deserialize")]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// 创建 / 更新项目时提交的字段
///
/// 技术栈在写入时以逗号拼接的字符串提交。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
}

/// 项目编辑缓冲区
///
/// 表单打开期间持有的本地草稿：编辑时由选中的记录初始化，取消或保存成功后清空。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    /// 用户输入的逗号分隔文本
    pub tech_stack: String,
    pub github_url: String,
    pub live_url: String,
    pub featured: bool,
    pub sort_order: i32,
}

impl ProjectDraft {
    /// 由已有记录生成草稿
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tech_stack: tech_stack::join(&project.tech_stack),
            github_url: project.github_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            featured: project.featured,
            sort_order: project.sort_order,
        }
    }

    /// 转换为提交给后端的请求体
    pub fn to_input(&self) -> ProjectInput {
        ProjectInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tech_stack: tech_stack::join(&tech_stack::split(&self.tech_stack)),
            github_url: non_blank(&self.github_url),
            live_url: non_blank(&self.live_url),
            featured: self.featured,
            sort_order: self.sort_order,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 联系表单留言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// 列表中的摘要（前 60 个字符）
    pub fn preview(&self) -> String {
        const PREVIEW_CHARS: usize = 60;
        let mut preview: String = self.message.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

/// 控制面板统计数据
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub projects: u64,
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub unread_messages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: 7,
            title: "Chattreix".into(),
            description: "Real-time chat".into(),
            tech_stack: vec!["Node.js".into(), "Express".into(), "React".into()],
            github_url: Some("https://github.com/example/chattreix".into()),
            live_url: None,
            featured: true,
            sort_order: 2,
        }
    }

    #[test]
    fn test_project_deserializes_camel_case_with_array_stack() {
        let json = r#"{
            "id": 1,
            "title": "ThinkExam",
            "description": "Exam management",
            "techStack": ["PHP", "Laravel"],
            "githubUrl": "https://github.com/example/thinkexam",
            "liveUrl": null,
            "featured": true,
            "sortOrder": 3
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tech_stack, vec!["PHP", "Laravel"]);
        assert_eq!(project.sort_order, 3);
        assert!(project.live_url.is_none());
    }

    #[test]
    fn test_project_deserializes_comma_joined_stack() {
        let json = r#"{"id": 2, "title": "t", "description": "d", "techStack": "Rust, Leptos ,WASM"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tech_stack, vec!["Rust", "Leptos", "WASM"]);
        assert!(!project.featured);
        assert_eq!(project.sort_order, 0);
    }

    #[test]
    fn test_draft_from_project_and_back() {
        let project = sample_project();
        let draft = ProjectDraft::from_project(&project);
        assert_eq!(draft.tech_stack, "Node.js, Express, React");
        assert_eq!(draft.live_url, "");

        let input = draft.to_input();
        assert_eq!(input.tech_stack, "Node.js, Express, React");
        assert_eq!(input.live_url, None);
        assert_eq!(input.github_url.as_deref(), Some("https://github.com/example/chattreix"));
        assert!(input.featured);
    }

    #[test]
    fn test_project_input_serializes_camel_case() {
        let input = ProjectDraft {
            title: "Folio".into(),
            description: "Site".into(),
            tech_stack: "Rust,,Leptos".into(),
            ..Default::default()
        }
        .to_input();
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["techStack"], "Rust, Leptos");
        assert_eq!(value["sortOrder"], 0);
        assert!(value["githubUrl"].is_null());
    }

    #[test]
    fn test_message_deserializes_and_previews() {
        let json = r#"{
            "id": 5,
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello there, I would like to talk about a project that needs a backend.",
            "isRead": false,
            "createdAt": "2024-01-05T15:04:00.000Z"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(!message.is_read);
        let preview = message.preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 63);
    }

    #[test]
    fn test_envelope_without_success_flag() {
        let json = r#"{"data": {"projects": 3, "messages": 10, "unreadMessages": 4}}"#;
        let envelope: ApiEnvelope<DashboardStats> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.success, None);
        assert_eq!(envelope.data.unread_messages, 4);
    }
}
