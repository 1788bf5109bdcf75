//! Template store abstraction

use crate::app::models::Template;
use crate::{Error, Result};

/// Get, list and upsert access to templates keyed by id
pub trait TemplateStore {
    /// Template with the given id
    ///
    /// # Errors
    ///
    /// [`Error::TemplateNotFound`] when no template has that id.
    fn get(&self, id: &str) -> Result<Template>;

    /// Every stored template, ordered by id
    fn list(&self) -> Result<Vec<Template>>;

    /// Insert or replace a template, returning it as stored
    ///
    /// The id is trimmed and must be non-empty; an empty type becomes `csv`.
    fn upsert(&mut self, template: Template) -> Result<Template>;

    /// Whether a template with the given id exists
    fn contains(&self, id: &str) -> Result<bool> {
        match self.get(id) {
            Ok(_) => Ok(true),
            Err(Error::TemplateNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Normalize a template for storage, rejecting an empty id
pub(crate) fn prepare_for_upsert(template: Template) -> Result<Template> {
    let template = template.normalized();
    if template.id.is_empty() {
        return Err(Error::template_store("template id is required"));
    }
    Ok(template)
}
