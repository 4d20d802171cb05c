//! 联系表单校验
//!
//! 客户端校验在提交前进行，失败时不会触达网络层。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::FieldError;

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// 联系表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    /// 将服务端字段名映射为表单字段
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(ContactField::Name),
            "email" => Some(ContactField::Email),
            "message" => Some(ContactField::Message),
            _ => None,
        }
    }
}

/// 联系表单内容（同时作为 `POST /api/contact` 的请求体）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// 校验全部字段，返回每个字段的第一条错误
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = ValidationErrors {
            name: check_min_chars(&self.name, "Name", NAME_MIN_CHARS),
            email: check_email(&self.email),
            message: check_min_chars(&self.message, "Message", MESSAGE_MIN_CHARS),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

fn check_min_chars(value: &str, label: &str, min: usize) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else if value.chars().count() < min {
        Some(format!("{label} must be at least {min} characters"))
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_RE.is_match(value) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

/// 按字段组织的校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Message => self.message.as_deref(),
        }
    }

    /// 用户重新输入时清除该字段的错误
    pub fn clear(&mut self, field: ContactField) {
        *self.slot(field) = None;
    }

    /// 合并服务端返回的字段错误，未知字段被忽略
    pub fn from_server(errors: &[FieldError]) -> Self {
        let mut merged = Self::default();
        for error in errors {
            if let Some(field) = ContactField::from_name(&error.field) {
                *merged.slot(field) = Some(error.message.clone());
            }
        }
        merged
    }

    fn slot(&mut self, field: ContactField) -> &mut Option<String> {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }
}
