//! Cross-references between documented types.
//!
//! The registry is built once from every scanned unit and then only read.
//! Resolution is token-wise: `Array[Player]` links `Player` and leaves
//! `Array` and the brackets alone.

use crate::model::ScannedUnit;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").unwrap());

/// Declared type name → page reference relative to the output root.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    pages: BTreeMap<String, String>,
}

impl TypeRegistry {
    /// Build the registry from units already sorted by path. When two units
    /// declare the same type the first one keeps it.
    pub fn build<'a, I>(units: I, ext: &str) -> Self
    where
        I: IntoIterator<Item = &'a ScannedUnit>,
    {
        let mut pages = BTreeMap::new();
        for unit in units {
            if let Some(ref name) = unit.declared_type {
                pages
                    .entry(name.clone())
                    .or_insert_with(|| page_path(unit, ext));
            }
        }
        TypeRegistry { pages }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        TypeRegistry {
            pages: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Detail page location for a unit: `classes/<path without extension>.<ext>`.
pub fn page_path(unit: &ScannedUnit, ext: &str) -> String {
    format!("classes/{}.{}", unit.stem_path(), ext)
}

/// Relative prefix leading from `page` back to the output root
/// ("classes/core/player.md" → "../../").
pub fn base_for(page: &str) -> String {
    "../".repeat(page.matches('/').count())
}

/// Link known type names in `text`, with references relative to the output
/// root.
pub fn resolve(text: &str, registry: &TypeRegistry) -> String {
    resolve_from(text, registry, "")
}

/// Like [`resolve`], but prefixes each reference with `base` so the link
/// works from a page below the output root.
pub fn resolve_from(text: &str, registry: &TypeRegistry, base: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    RE_IDENT
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            match registry.get(token) {
                Some(page) => format!("[{}]({}{})", token, base, page),
                None => token.to_string(),
            }
        })
        .into_owned()
}
