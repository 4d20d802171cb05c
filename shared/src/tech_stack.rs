//! 技术栈编解码
//!
//! 写入时以逗号拼接，展示时按逗号拆分。

use serde::{Deserialize, Deserializer};

const SEPARATOR: &str = ", ";

/// 按逗号拆分，去掉空白和空项
pub fn split(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 以逗号拼接（保持顺序）
pub fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStack {
    List(Vec<String>),
    Joined(String),
}

/// 兼容数组与逗号字符串两种形态的反序列化函数
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawStack>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawStack::Joined(joined)) => split(&joined),
        Some(RawStack::List(items)) => items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(split(" React , Node.js,,MySQL "), vec!["React", "Node.js", "MySQL"]);
        assert!(split("  ").is_empty());
    }

    #[test]
    fn test_join_preserves_order() {
        assert_eq!(join(&["C++", "Rust", " Go "]), "C++, Rust, Go");
        assert_eq!(join::<&str>(&[]), "");
    }

    #[test]
    fn test_split_of_join_is_identity_for_clean_items() {
        let items = vec!["PHP".to_string(), "Laravel".to_string(), "REST API".to_string()];
        assert_eq!(split(&join(&items)), items);
    }
}
