use tera::{Context, Tera};

use crate::domain::models::content::{level_by_filter, level_by_key, navigation, LEVELS, MILESTONES, ROADMAP};
use crate::domain::services::content::ContentError;
use crate::domain::services::markdown::{extract_toc, render_html, strip_title, TOC_LIMIT};
use crate::site::state::SiteState;

pub fn load_site_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/site/base.html")),
        ("home.html", include_str!("../../templates/site/home.html")),
        ("guides.html", include_str!("../../templates/site/guides.html")),
        ("guide.html", include_str!("../../templates/site/guide.html")),
        ("projects.html", include_str!("../../templates/site/projects.html")),
        ("project.html", include_str!("../../templates/site/project.html")),
        ("roadmap.html", include_str!("../../templates/site/roadmap.html")),
        ("not_found.html", include_str!("../../templates/site/not_found.html")),
    ])?;
    Ok(tera)
}

fn page_context(current: &str) -> Context {
    let mut context = Context::new();
    context.insert("nav", &navigation());
    context.insert("current", current);
    context
}

fn render(state: &SiteState, template: &str, context: &Context) -> Result<String, ContentError> {
    Ok(state.templates.render(template, context)?)
}

pub fn home(state: &SiteState) -> Result<String, ContentError> {
    let guides = state.library.guides()?;
    let groups = state.library.projects_by_level()?;
    let project_total: usize = groups.iter().map(|g| g.projects.len()).sum();

    let mut context = page_context("/");
    context.insert("guides", &guides);
    context.insert("groups", &groups);
    context.insert("project_total", &project_total);
    render(state, "home.html", &context)
}

pub fn guides(state: &SiteState) -> Result<String, ContentError> {
    let mut context = page_context("/guides");
    context.insert("guides", &state.library.guides()?);
    render(state, "guides.html", &context)
}

pub fn guide(state: &SiteState, slug: &str) -> Result<String, ContentError> {
    let guide = state.library.guide(slug)?;

    let mut context = page_context(&format!("/guides/{}", guide.slug));
    context.insert("toc", &extract_toc(strip_title(&guide.content), TOC_LIMIT));
    context.insert("body", &render_html(strip_title(&guide.content)));
    context.insert("guide", &guide);
    render(state, "guide.html", &context)
}

/// Project index, optionally narrowed to one level via its filter name (`beginner`, `platform`, ...).
pub fn projects(state: &SiteState, level_filter: Option<&str>) -> Result<String, ContentError> {
    let mut groups = state.library.projects_by_level()?;
    let current = match level_filter {
        Some(filter) => {
            let level = level_by_filter(filter).ok_or(ContentError::NotFound)?;
            groups.retain(|g| g.level.key == level.key);
            format!("/projects?level={}", level.filter)
        }
        None => "/projects".to_string(),
    };

    let mut context = page_context(&current);
    context.insert("levels", LEVELS);
    context.insert("groups", &groups);
    render(state, "projects.html", &context)
}

pub fn project(state: &SiteState, level_key: &str, slug: &str) -> Result<String, ContentError> {
    let level = level_by_key(level_key).ok_or(ContentError::NotFound)?;
    let project = state.library.project(level.key, slug)?;

    let mut context = page_context(&format!("/projects?level={}", level.filter));
    context.insert("body", &render_html(strip_title(&project.content)));
    context.insert("level", level);
    context.insert("project", &project);
    render(state, "project.html", &context)
}

pub fn roadmap(state: &SiteState) -> Result<String, ContentError> {
    let mut context = page_context("/roadmap");
    context.insert("stages", ROADMAP);
    context.insert("milestones", MILESTONES);
    render(state, "roadmap.html", &context)
}

pub fn not_found(state: &SiteState, message: &str) -> Result<String, ContentError> {
    let mut context = page_context("");
    context.insert("message", message);
    render(state, "not_found.html", &context)
}
