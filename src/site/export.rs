use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::services::content::ContentError;
use crate::site::pages;
use crate::site::state::SiteState;

/// Renders every page the site can serve into `out_dir`, one `index.html` per route.
///
/// Returns the list of files written.
pub fn export_site(state: &SiteState, out_dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let params = state.library.static_params()?;
    let mut written = Vec::new();

    write_page(out_dir, "", pages::home(state)?, &mut written)?;
    write_page(out_dir, "guides", pages::guides(state)?, &mut written)?;
    write_page(out_dir, "projects", pages::projects(state, None)?, &mut written)?;
    write_page(out_dir, "roadmap", pages::roadmap(state)?, &mut written)?;

    for slug in &params.guides {
        write_page(out_dir, &format!("guides/{}", slug), pages::guide(state, slug)?, &mut written)?;
    }
    for (level, slug) in &params.projects {
        write_page(out_dir, &format!("projects/{}/{}", level, slug), pages::project(state, level, slug)?, &mut written)?;
    }

    write_file(&out_dir.join("404.html"), &pages::not_found(state, "The page you are looking for does not exist.")?)?;
    written.push(out_dir.join("404.html"));

    info!("Exported {} pages to {}", written.len(), out_dir.display());
    Ok(written)
}

fn write_page(out_dir: &Path, route: &str, html: String, written: &mut Vec<PathBuf>) -> Result<(), ContentError> {
    let path = out_dir.join(route).join("index.html");
    write_file(&path, &html)?;
    written.push(path);
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ContentError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ContentError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, contents).map_err(|source| ContentError::Io { path: path.to_path_buf(), source })
}
