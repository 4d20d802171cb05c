//! 项目表单状态
//!
//! 把表单字段整合为一组 `RwSignal`，负责：
//! - 编辑时由选中记录填充
//! - 取消或保存成功后清空
//! - 转换为 [`ProjectDraft`]

use folio_shared::{Project, ProjectDraft, RecordId};
use leptos::prelude::*;

/// 表单状态结构体
///
/// `RwSignal` 实现了 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct ProjectFormState {
    /// 正在编辑的记录；`None` 表示新建
    pub editing: RwSignal<Option<RecordId>>,
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub tech_stack: RwSignal<String>,
    pub github_url: RwSignal<String>,
    pub live_url: RwSignal<String>,
    pub featured: RwSignal<bool>,
    pub sort_order: RwSignal<i32>,
}

impl ProjectFormState {
    pub fn new() -> Self {
        let draft = ProjectDraft::default();
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(draft.title),
            description: RwSignal::new(draft.description),
            tech_stack: RwSignal::new(draft.tech_stack),
            github_url: RwSignal::new(draft.github_url),
            live_url: RwSignal::new(draft.live_url),
            featured: RwSignal::new(draft.featured),
            sort_order: RwSignal::new(draft.sort_order),
        }
    }

    /// 清空草稿并回到新建模式
    pub fn reset(&self) {
        self.editing.set(None);
        self.fill(&ProjectDraft::default());
    }

    /// 以选中的记录填充草稿
    pub fn load(&self, project: &Project) {
        self.editing.set(Some(project.id));
        self.fill(&ProjectDraft::from_project(project));
    }

    pub fn is_editing(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            tech_stack: self.tech_stack.get_untracked(),
            github_url: self.github_url.get_untracked(),
            live_url: self.live_url.get_untracked(),
            featured: self.featured.get_untracked(),
            sort_order: self.sort_order.get_untracked(),
        }
    }

    fn fill(&self, draft: &ProjectDraft) {
        self.title.set(draft.title.clone());
        self.description.set(draft.description.clone());
        self.tech_stack.set(draft.tech_stack.clone());
        self.github_url.set(draft.github_url.clone());
        self.live_url.set(draft.live_url.clone());
        self.featured.set(draft.featured);
        self.sort_order.set(draft.sort_order);
    }
}

impl Default for ProjectFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: 3,
            title: "ThinkExam".into(),
            description: "Online exams".into(),
            tech_stack: vec!["Node.js".into(), "PostgreSQL".into()],
            github_url: Some("https://github.com/x/thinkexam".into()),
            live_url: None,
            featured: true,
            sort_order: 2,
        }
    }

    #[test]
    fn test_load_seeds_draft_from_record() {
        let owner = Owner::new();
        owner.with(|| {
            let form = ProjectFormState::new();
            form.load(&sample());

            assert!(form.is_editing());
            let draft = form.to_draft();
            assert_eq!(draft.title, "ThinkExam");
            assert_eq!(draft.tech_stack, "Node.js, PostgreSQL");
            assert_eq!(draft.live_url, "");
            assert!(draft.featured);
            assert_eq!(draft.sort_order, 2);
        });
    }

    #[test]
    fn test_reset_clears_draft_and_edit_target() {
        let owner = Owner::new();
        owner.with(|| {
            let form = ProjectFormState::new();
            form.load(&sample());
            form.reset();

            assert!(!form.is_editing());
            assert_eq!(form.to_draft(), ProjectDraft::default());
        });
    }
}
