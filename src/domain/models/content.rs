use serde::Serialize;

/// Catalog entry for a guide; only files listed here are published.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuideMeta {
    pub slug: &'static str,
    pub title: &'static str,
    pub filename: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
}

pub const GUIDES: &[GuideMeta] = &[
    GuideMeta {
        slug: "linux",
        title: "Linux",
        filename: "LINUX_COMPLETE_GUIDE.md",
        icon: "🐧",
        description: "Master Linux administration, commands, scripting, and system management.",
        topics: &["File system", "Commands", "Scripting", "Networking", "Security"],
    },
    GuideMeta {
        slug: "docker",
        title: "Docker",
        filename: "DOCKER_COMPLETE_GUIDE.md",
        icon: "🐳",
        description: "Learn containerization from basics to production-ready deployments.",
        topics: &["Containers", "Images", "Networking", "Compose", "Production"],
    },
    GuideMeta {
        slug: "git",
        title: "Git",
        filename: "GIT_COMPLETE_GUIDE.md",
        icon: "📦",
        description: "Version control mastery for team collaboration and code management.",
        topics: &["Workflows", "Branching", "Merging", "Rebasing", "Advanced"],
    },
    GuideMeta {
        slug: "kubernetes",
        title: "Kubernetes",
        filename: "KUBERNETES_COMPLETE_GUIDE.md",
        icon: "☸️",
        description: "Container orchestration at scale with Kubernetes.",
        topics: &["Architecture", "Workloads", "Networking", "Storage", "Security"],
    },
    GuideMeta {
        slug: "terraform",
        title: "Terraform",
        filename: "TERRAFORM_COMPLETE_GUIDE.md",
        icon: "🏗️",
        description: "Infrastructure as Code for cloud-native environments.",
        topics: &["HCL", "State", "Modules", "Workspaces", "Best Practices"],
    },
    GuideMeta {
        slug: "ansible",
        title: "Ansible",
        filename: "ANSIBLE_COMPLETE_GUIDE.md",
        icon: "⚙️",
        description: "Configuration management and automation at scale.",
        topics: &["Playbooks", "Modules", "Roles", "Vault", "Inventory"],
    },
    GuideMeta {
        slug: "argocd",
        title: "ArgoCD",
        filename: "ARGOCD_COMPLETE_GUIDE.md",
        icon: "🚀",
        description: "GitOps continuous delivery for Kubernetes.",
        topics: &["GitOps", "Applications", "Sync Strategies", "ApplicationSets"],
    },
    GuideMeta {
        slug: "circleci",
        title: "CircleCI",
        filename: "CIRCLECI_COMPLETE_GUIDE.md",
        icon: "🔄",
        description: "Build powerful CI/CD pipelines with CircleCI.",
        topics: &["Pipelines", "Jobs", "Orbs", "Workflows", "Caching"],
    },
    GuideMeta {
        slug: "argo_workflows",
        title: "Argo Workflows",
        filename: "ARGO_WORKFLOWS_COMPLETE_GUIDE.md",
        icon: "🔀",
        description: "Kubernetes-native workflow engine for complex pipelines.",
        topics: &["Workflows", "DAGs", "Templates", "Artifacts"],
    },
];

pub fn guide_meta(slug: &str) -> Option<&'static GuideMeta> {
    GUIDES.iter().find(|g| g.slug == slug)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Level {
    /// Directory name under `projects/`.
    pub key: &'static str,
    pub name: &'static str,
    pub number: u8,
    /// Value accepted by the `?level=` filter on the projects index.
    pub filter: &'static str,
    pub icon: &'static str,
}

pub const LEVELS: &[Level] = &[
    Level { key: "01-beginner", name: "Beginner", number: 1, filter: "beginner", icon: "🌱" },
    Level { key: "02-intermediate", name: "Intermediate", number: 2, filter: "intermediate", icon: "📈" },
    Level { key: "03-advanced", name: "Advanced", number: 3, filter: "advanced", icon: "🚀" },
    Level { key: "04-platform-engineering", name: "Platform Engineering", number: 4, filter: "platform", icon: "⭐" },
];

pub fn level_by_key(key: &str) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.key == key)
}

pub fn level_by_filter(filter: &str) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.filter == filter)
}

#[derive(Debug, Clone, Serialize)]
pub struct Guide {
    pub slug: String,
    pub title: String,
    pub filename: String,
    pub icon: String,
    pub description: String,
    pub content: String,
    pub line_count: usize,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub level: String,
    pub level_key: String,
    pub level_number: u8,
    pub path: String,
    pub content: String,
    pub objective: Option<String>,
    pub skills: Vec<String>,
    pub deliverable: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectGroup {
    pub level: Level,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapStage {
    pub number: u8,
    pub name: &'static str,
    pub skills: &'static [&'static str],
    pub duration: &'static str,
}

pub const ROADMAP: &[RoadmapStage] = &[
    RoadmapStage { number: 1, name: "Linux Foundations", skills: &["File system", "CLI", "Scripting"], duration: "1-2 weeks" },
    RoadmapStage { number: 2, name: "Containerization", skills: &["Docker", "Images", "Volumes"], duration: "2 weeks" },
    RoadmapStage { number: 3, name: "CI/CD Introduction", skills: &["GitHub Actions", "Testing", "Automation"], duration: "2 weeks" },
    RoadmapStage { number: 4, name: "Kubernetes Basics", skills: &["Pods", "Services", "Deployments"], duration: "3 weeks" },
    RoadmapStage { number: 5, name: "Infrastructure as Code", skills: &["Terraform", "Ansible", "State"], duration: "3 weeks" },
    RoadmapStage { number: 6, name: "Monitoring & Observability", skills: &["Prometheus", "Grafana", "Logging"], duration: "2 weeks" },
    RoadmapStage { number: 7, name: "GitOps & CD", skills: &["ArgoCD", "Flux", "Progressive Delivery"], duration: "3 weeks" },
    RoadmapStage { number: 8, name: "Service Mesh & Security", skills: &["Istio", "Vault", "OPA"], duration: "3 weeks" },
    RoadmapStage { number: 9, name: "Advanced Infrastructure", skills: &["Multi-cluster", "Crossplane", "DR"], duration: "4 weeks" },
    RoadmapStage { number: 10, name: "Platform Engineering", skills: &["Backstage", "Operators", "Golden Paths"], duration: "8-12 weeks" },
];

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub level: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub const MILESTONES: &[Milestone] = &[
    Milestone { level: 3, title: "DevOps Fundamentals Complete", description: "Ready for infrastructure work" },
    Milestone { level: 6, title: "Infrastructure Mastery", description: "Ready for advanced operations" },
    Milestone { level: 9, title: "Advanced Operations Complete", description: "Ready for platform engineering" },
    Milestone { level: 10, title: "Platform Engineer!", description: "Full stack mastery achieved" },
];

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

/// Sidebar navigation shared by every page of the site.
pub fn navigation() -> Vec<NavSection> {
    let item = |title: &str, href: String| NavItem { title: title.to_string(), href };

    let mut guides = vec![item("All Guides", "/guides".to_string())];
    guides.extend(GUIDES.iter().map(|g| item(g.title, format!("/guides/{}", g.slug))));

    let mut projects = vec![item("All Projects", "/projects".to_string())];
    projects.extend(LEVELS.iter().map(|l| item(l.name, format!("/projects?level={}", l.filter))));

    vec![
        NavSection {
            title: "Getting Started".to_string(),
            items: vec![item("Overview", "/".to_string()), item("Roadmap", "/roadmap".to_string())],
        },
        NavSection { title: "Guides".to_string(), items: guides },
        NavSection { title: "Projects".to_string(), items: projects },
    ]
}
