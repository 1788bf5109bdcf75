//! JSON file template store
//!
//! The whole store is one JSON object mapping template id to template. Every
//! upsert rewrites the file through a temporary sibling that is renamed into
//! place, so readers never observe a partially written store.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use super::store::{TemplateStore, prepare_for_upsert};
use crate::app::models::Template;
use crate::{Error, Result};

/// Template store persisted to a single JSON document
#[derive(Debug, Clone)]
pub struct JsonFileTemplateStore {
    path: PathBuf,
    templates: BTreeMap<String, Template>,
}

impl JsonFileTemplateStore {
    /// Open a store, creating parent directories; a missing or empty file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create store directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let templates = if path.exists() {
            load_templates(&path)?
        } else {
            BTreeMap::new()
        };

        debug!(
            "Opened template store {} ({} templates)",
            path.display(),
            templates.len()
        );

        Ok(Self { path, templates })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current contents atomically
    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.templates)
            .map_err(|e| Error::serialization("Failed to serialize template store", e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| Error::io("Failed to create temporary store file", e))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| Error::io("Failed to write temporary store file", e))?;
        temp.persist(&self.path).map_err(|e| {
            Error::io(
                format!("Failed to replace store file: {}", self.path.display()),
                e.error,
            )
        })?;

        Ok(())
    }
}

fn load_templates(path: &Path) -> Result<BTreeMap<String, Template>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read store file: {}", path.display()), e))?;

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        Error::serialization(format!("Invalid store file: {}", path.display()), e)
    })
}

impl TemplateStore for JsonFileTemplateStore {
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
        let previous = self
            .templates
            .insert(template.id.clone(), template.clone());

        if let Err(e) = self.persist() {
            // Keep memory consistent with what is on disk
            match previous {
                Some(old) => self.templates.insert(template.id.clone(), old),
                None => self.templates.remove(&template.id),
            };
            return Err(e);
        }

        Ok(template)
    }
}
