//! search — case-insensitive lookup over originals and translations.
//!
//! Works only through `Catalog::iter`/`get`; nothing is copied out.

use crate::catalog::{Catalog, Entry};

/// Lowercased needle, so a scan folds the query once.
struct Needle(String);

impl Needle {
    fn new(query: &str) -> Self {
        Needle(query.to_lowercase())
    }

    fn matches(&self, e: &Entry) -> bool {
        self.0.is_empty()
            || e.original.to_lowercase().contains(&self.0)
            || e.translated.to_lowercase().contains(&self.0)
    }
}

/// First match strictly after `after` (or from index 0 when `None`).
pub fn find_next(catalog: &Catalog, query: &str, after: Option<u32>) -> Option<u32> {
    let needle = Needle::new(query);
    let start = match after {
        Some(i) => (i as usize).saturating_add(1),
        None => 0,
    };
    catalog
        .entries()
        .iter()
        .skip(start)
        .find(|e| needle.matches(e))
        .map(|e| e.index)
}

/// Last match strictly before `before` (or from the last entry when `None`).
pub fn find_prev(catalog: &Catalog, query: &str, before: Option<u32>) -> Option<u32> {
    let needle = Needle::new(query);
    let end = match before {
        Some(i) => (i as usize).min(catalog.entries().len()),
        None => catalog.entries().len(),
    };
    catalog.entries()[..end]
        .iter()
        .rev()
        .find(|e| needle.matches(e))
        .map(|e| e.index)
}

pub fn find_all(catalog: &Catalog, query: &str) -> Vec<u32> {
    let needle = Needle::new(query);
    catalog
        .iter()
        .filter(|e| needle.matches(e))
        .map(|e| e.index)
        .collect()
}
