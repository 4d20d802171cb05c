//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，
//! 并通过 `KeyValueStore` 抽象让会话逻辑可以在测试中替换存储。

use crate::config;

/// 抽象键值存储接口
pub trait KeyValueStore {
    /// 获取存储的字符串值，键不存在或出错时返回 `None`
    fn get(&self, key: &str) -> Option<String>;
    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除存储的键值对，返回操作是否成功
    fn delete(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 持久化的 bearer token，固定保存在一个键下
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    store: S,
    key: &'static str,
}

impl TokenStore<LocalStorage> {
    pub fn local() -> Self {
        Self::new(LocalStorage)
    }
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: config::TOKEN_STORAGE_KEY,
        }
    }

    /// 读取持久化 token；空字符串视为不存在
    pub fn load(&self) -> Option<String> {
        self.store.get(self.key).filter(|t| !t.is_empty())
    }

    pub fn save(&self, token: &str) {
        if !self.store.set(self.key, token) {
            log::warn!("[Storage] failed to persist token");
        }
    }

    pub fn clear(&self) {
        if !self.store.delete(self.key) {
            log::warn!("[Storage] failed to remove persisted token");
        }
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存键值存储；克隆体共享同一份数据，便于在测试中观察
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        pub map: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(key: &str, value: &str) -> Self {
            let storage = Self::new();
            storage.set(key, value);
            storage
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.map
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key);
            true
        }
    }

    #[test]
    fn test_token_store_round_trip() {
        let storage = MemoryStorage::new();
        let tokens = TokenStore::new(storage.clone());

        assert_eq!(tokens.load(), None);
        tokens.save("abc");
        assert_eq!(tokens.load(), Some("abc".to_string()));
        assert_eq!(storage.get(config::TOKEN_STORAGE_KEY), Some("abc".to_string()));

        tokens.clear();
        assert_eq!(tokens.load(), None);
        assert!(storage.map.borrow().is_empty());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let tokens = TokenStore::new(MemoryStorage::with(config::TOKEN_STORAGE_KEY, ""));
        assert_eq!(tokens.load(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let tokens = TokenStore::new(MemoryStorage::new());
        tokens.clear();
        tokens.clear();
        assert_eq!(tokens.load(), None);
    }
}
