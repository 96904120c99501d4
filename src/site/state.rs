use std::path::PathBuf;
use std::sync::Arc;
use tera::Tera;

use crate::domain::services::content::{ContentError, ContentLibrary};
use crate::site::pages::load_site_templates;

#[derive(Clone)]
pub struct SiteState {
    pub library: ContentLibrary,
    pub templates: Arc<Tera>,
}

impl SiteState {
    pub fn new(docs_root: impl Into<PathBuf>) -> Result<Self, ContentError> {
        Ok(Self {
            library: ContentLibrary::new(docs_root),
            templates: Arc::new(load_site_templates()?),
        })
    }
}
