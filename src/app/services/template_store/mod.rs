//! Template persistence
//!
//! Templates are keyed by id and stored as JSON. The importer only ever
//! reads a template by id; authoring happens through [`TemplateStore::upsert`]
//! or by seeding a store from a directory of template documents.
//!
//! - [`store`] - The [`TemplateStore`] trait
//! - [`memory`] - Id-ordered in-memory store
//! - [`json_file`] - Single-document JSON file store with atomic rewrites
//! - [`seed`] - Directory seeding that never overwrites existing ids

pub mod json_file;
pub mod memory;
pub mod seed;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use json_file::JsonFileTemplateStore;
pub use memory::InMemoryTemplateStore;
pub use seed::{SeedStats, seed_from_dir};
pub use store::TemplateStore;
