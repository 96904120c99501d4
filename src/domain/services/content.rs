use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::content::{
    guide_meta, level_by_key, Guide, GuideMeta, Level, Project, ProjectGroup, GUIDES, LEVELS,
};
use crate::domain::services::markdown::first_title;

static OBJECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Objective\s*\|\s*(.+)\s*\|").expect("objective pattern"));
static SKILLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"Skills\s*\|\s*(.+)\s*\|").expect("skills pattern"));
static DELIVERABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Deliverable\s*\|\s*(.+)\s*\|").expect("deliverable pattern"));

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Page not found")]
    NotFound,
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Read-only view over the guides and project write-ups on disk.
///
/// Layout under `root`:
/// `docs/guides/<TOPIC>_COMPLETE_GUIDE.md` and `projects/<level>/<slug>/README.md`.
#[derive(Clone, Debug)]
pub struct ContentLibrary {
    root: PathBuf,
}

/// Every dynamic route the site can serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticParams {
    pub guides: Vec<String>,
    pub projects: Vec<(String, String)>,
}

impl ContentLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn guides_dir(&self) -> PathBuf {
        self.root.join("docs").join("guides")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Published guides in catalog order. A missing guides directory yields an empty list.
    pub fn guides(&self) -> Result<Vec<Guide>, ContentError> {
        let dir = self.guides_dir();
        if !dir.is_dir() {
            warn!("Guides directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let mut guides = Vec::new();
        for meta in GUIDES {
            let path = dir.join(meta.filename);
            if path.is_file() {
                guides.push(self.load_guide(meta, &path)?);
            } else {
                debug!("Guide file {} not present, skipping", path.display());
            }
        }
        Ok(guides)
    }

    pub fn guide(&self, slug: &str) -> Result<Guide, ContentError> {
        let meta = guide_meta(slug).ok_or(ContentError::NotFound)?;
        let path = self.guides_dir().join(meta.filename);
        if !path.is_file() {
            return Err(ContentError::NotFound);
        }
        self.load_guide(meta, &path)
    }

    fn load_guide(&self, meta: &GuideMeta, path: &Path) -> Result<Guide, ContentError> {
        let content = read(path)?;
        Ok(Guide {
            slug: meta.slug.to_string(),
            title: meta.title.to_string(),
            filename: meta.filename.to_string(),
            icon: meta.icon.to_string(),
            description: meta.description.to_string(),
            line_count: content.split('\n').count(),
            topics: meta.topics.iter().map(|t| t.to_string()).collect(),
            content,
        })
    }

    /// All projects ordered by level, then slug.
    pub fn projects(&self) -> Result<Vec<Project>, ContentError> {
        let dir = self.projects_dir();
        if !dir.is_dir() {
            warn!("Projects directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for level in LEVELS {
            let level_dir = dir.join(level.key);
            if !level_dir.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&level_dir).map_err(|source| ContentError::Io { path: level_dir.clone(), source })?;
            let mut slugs: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().join("README.md").is_file())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .collect();
            slugs.sort();

            for slug in slugs {
                let readme = level_dir.join(&slug).join("README.md");
                projects.push(parse_project(level, &slug, read(&readme)?));
            }
        }
        Ok(projects)
    }

    pub fn project(&self, level_key: &str, slug: &str) -> Result<Project, ContentError> {
        let level = level_by_key(level_key).ok_or(ContentError::NotFound)?;
        if !is_safe_segment(slug) {
            return Err(ContentError::NotFound);
        }
        let readme = self.projects_dir().join(level.key).join(slug).join("README.md");
        if !readme.is_file() {
            return Err(ContentError::NotFound);
        }
        Ok(parse_project(level, slug, read(&readme)?))
    }

    /// Projects grouped under every level, including levels with no projects yet.
    pub fn projects_by_level(&self) -> Result<Vec<ProjectGroup>, ContentError> {
        let projects = self.projects()?;
        Ok(LEVELS
            .iter()
            .map(|level| ProjectGroup {
                level: *level,
                projects: projects.iter().filter(|p| p.level_key == level.key).cloned().collect(),
            })
            .collect())
    }

    pub fn static_params(&self) -> Result<StaticParams, ContentError> {
        Ok(StaticParams {
            guides: self.guides()?.into_iter().map(|g| g.slug).collect(),
            projects: self.projects()?.into_iter().map(|p| (p.level_key, p.slug)).collect(),
        })
    }
}

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io { path: path.to_path_buf(), source })
}

/// A single path component: no separators, no `.`/`..`.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

fn capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Pulls title and the `| Objective | ... |`, `| Skills | ... |`, `| Deliverable | ... |` rows out of a README.
pub fn parse_project(level: &Level, slug: &str, content: String) -> Project {
    let title = first_title(&content).unwrap_or_else(|| slug.to_string());
    let skills = capture(&SKILLS, &content)
        .map(|s| s.split(',').map(|skill| skill.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    Project {
        slug: slug.to_string(),
        title,
        level: level.name.to_string(),
        level_key: level.key.to_string(),
        level_number: level.number,
        path: format!("{}/{}", level.key, slug),
        objective: capture(&OBJECTIVE, &content),
        skills,
        deliverable: capture(&DELIVERABLE, &content).unwrap_or_default(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::content::level_by_key;

    const README: &str = "# 🐳 Containerize a Web App\n\n| Field | Value |\n|---|---|\n| Objective | Ship a container |\n| Skills | Docker, Compose ,  Networking |\n| Deliverable | A running stack |\n\n## Steps\n";

    #[test]
    fn parses_readme_metadata() {
        let level = level_by_key("01-beginner").unwrap();
        let project = parse_project(level, "web-app", README.to_string());
        assert_eq!(project.title, "Containerize a Web App");
        assert_eq!(project.skills, vec!["Docker", "Compose", "Networking"]);
        assert_eq!(project.deliverable, "A running stack");
        assert_eq!(project.objective.as_deref(), Some("Ship a container"));
        assert_eq!(project.path, "01-beginner/web-app");
        assert_eq!(project.level, "Beginner");
    }

    #[test]
    fn title_falls_back_to_slug() {
        let level = level_by_key("03-advanced").unwrap();
        let project = parse_project(level, "multi-cluster-dr", "no heading here".to_string());
        assert_eq!(project.title, "multi-cluster-dr");
        assert!(project.skills.is_empty());
        assert_eq!(project.deliverable, "");
    }

    #[test]
    fn rejects_path_traversal_segments() {
        assert!(is_safe_segment("web-app"));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("../secrets"));
        assert!(!is_safe_segment(""));
    }
}
