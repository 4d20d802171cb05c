//! 站点静态内容

use folio_shared::Project;

use crate::web::route::AppRoute;

pub struct Owner {
    pub name: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub summary: &'static str,
}

pub const OWNER: Owner = Owner {
    name: "Vasu Gupta",
    title: "Software Engineer",
    tagline: "Building robust backend systems and full-stack applications",
    summary: "Software Engineer with strong fundamentals in systems, backend architecture, and full-stack development. Focused on clean code, layered architecture, and production-grade systems.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Language,
    Backend,
    Frontend,
    Database,
    Architecture,
    Tools,
}

impl SkillCategory {
    /// 徽章配色（daisyUI）
    pub fn badge_class(&self) -> &'static str {
        match self {
            SkillCategory::Language => "badge-primary",
            SkillCategory::Backend => "badge-secondary",
            SkillCategory::Frontend => "badge-accent",
            SkillCategory::Database => "badge-info",
            SkillCategory::Architecture => "badge-success",
            SkillCategory::Tools => "badge-neutral",
        }
    }
}

pub struct Skill {
    pub name: &'static str,
    pub category: SkillCategory,
}

const fn skill(name: &'static str, category: SkillCategory) -> Skill {
    Skill { name, category }
}

pub const SKILLS: &[Skill] = &[
    skill("C++", SkillCategory::Language),
    skill("JavaScript", SkillCategory::Language),
    skill("Node.js", SkillCategory::Backend),
    skill("React", SkillCategory::Frontend),
    skill("PHP", SkillCategory::Language),
    skill("Laravel", SkillCategory::Backend),
    skill("MySQL", SkillCategory::Database),
    skill("Express", SkillCategory::Backend),
    skill("Prisma", SkillCategory::Database),
    skill("REST APIs", SkillCategory::Architecture),
    skill("Git", SkillCategory::Tools),
    skill("Docker", SkillCategory::Tools),
];

/// About 页按方向归类的技术栈
pub const TECH_FOCUS: &[(&str, &str)] = &[
    ("Languages", "C++, JavaScript, PHP"),
    ("Backend", "Node.js, Express, Laravel"),
    ("Frontend", "React, Modern ES6+"),
    ("Database", "MySQL, Prisma ORM"),
];

pub struct SocialLinks {
    pub github: &'static str,
    pub linkedin: &'static str,
    pub email: &'static str,
}

pub const SOCIAL_LINKS: SocialLinks = SocialLinks {
    github: "https://github.com/vasu-gupta-s-dev",
    linkedin: "https://linkedin.com/in/vasugupta",
    email: "mailto:vasugupta@example.com",
};

pub const NAV_LINKS: &[(AppRoute, &str)] = &[
    (AppRoute::Home, "Home"),
    (AppRoute::About, "About"),
    (AppRoute::Projects, "Projects"),
    (AppRoute::Contact, "Contact"),
];

/// 后端不可用或没有项目时展示的项目
pub fn fallback_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "ThinkExam".to_string(),
            description: "A comprehensive exam management system with role-based access control, exam creation and management workflows, and evaluation features. Built with emphasis on correctness, data integrity, and performance. This backend-heavy, database-driven application handles complex business logic for educational institutions.".to_string(),
            tech_stack: ["PHP", "Laravel", "MySQL", "JavaScript", "REST API"]
                .map(String::from)
                .to_vec(),
            github_url: Some("https://github.com/vasu-gupta-s-dev/thinkexam".to_string()),
            live_url: None,
            featured: true,
            sort_order: 0,
        },
        Project {
            id: 2,
            title: "Chattreix".to_string(),
            description: "A real-time chat application designed with a backend-first architecture. Features include real-time messaging, user presence, and message persistence. Built with focus on scalability and efficient system communication patterns.".to_string(),
            tech_stack: ["Node.js", "Express", "MySQL", "React", "WebSocket"]
                .map(String::from)
                .to_vec(),
            github_url: Some("https://github.com/vasu-gupta-s-dev/chattreix".to_string()),
            live_url: None,
            featured: true,
            sort_order: 1,
        },
    ]
}

/// 选择要展示的项目：有数据时用后端数据，否则回退到内置列表
pub fn projects_to_show(fetched: Option<&[Project]>) -> Vec<Project> {
    match fetched {
        Some(projects) if !projects.is_empty() => projects.to_vec(),
        _ => fallback_projects(),
    }
}
