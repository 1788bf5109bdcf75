//! Seeding a store from a directory of template documents

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::store::TemplateStore;
use crate::app::models::Template;
use crate::constants::TEMPLATE_FILE_EXTENSION;
use crate::{Error, Result};

/// Outcome of a seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    /// Templates added to the store
    pub inserted: usize,
    /// Templates whose id already existed
    pub skipped: usize,
}

impl SeedStats {
    pub fn summary(&self) -> String {
        format!(
            "Seeded {} templates ({} already present)",
            self.inserted, self.skipped
        )
    }
}

/// Insert every `*.json` template directly inside `dir` whose id is not yet stored
///
/// Existing templates are never overwritten. A document that fails to parse
/// aborts seeding with an error naming the file.
pub fn seed_from_dir<S>(store: &mut S, dir: &Path) -> Result<SeedStats>
where
    S: TemplateStore + ?Sized,
{
    if !dir.is_dir() {
        return Err(Error::template_store(format!(
            "Template directory not found: {}",
            dir.display()
        )));
    }

    let mut stats = SeedStats::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking template directory {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_template_file(path) {
            continue;
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read template: {}", path.display()), e))?;
        let template: Template = serde_json::from_str(&content)
            .map_err(|e| Error::serialization(format!("template {}", path.display()), e))?;

        if store.contains(template.id.trim())? {
            debug!("Template '{}' already stored, skipping {}", template.id, path.display());
            stats.skipped += 1;
            continue;
        }

        let stored = store.upsert(template)?;
        debug!("Seeded template '{}' from {}", stored.id, path.display());
        stats.inserted += 1;
    }

    info!("{}", stats.summary());
    Ok(stats)
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_FILE_EXTENSION))
}
