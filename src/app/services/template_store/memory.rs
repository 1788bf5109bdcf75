//! In-memory template store

use std::collections::BTreeMap;

use super::store::{TemplateStore, prepare_for_upsert};
use crate::app::models::Template;
use crate::{Error, Result};

/// Template store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: BTreeMap<String, Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get(&self, id: &str) -> Result<Template> {
        self.templates
            .get(id.trim())
            .cloned()
            .ok_or_else(|| Error::template_not_found(id))
    }

    fn list(&self) -> Result<Vec<Template>> {
        Ok(self.templates.values().cloned().collect())
    }

    fn upsert(&mut self, template: Template) -> Result<Template> {
        let template = prepare_for_upsert(template)?;
        self.templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }
}
