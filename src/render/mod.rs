//! Renderer module — trait-based format dispatch.
//!
//! [`render_all`] is the only entry point the binary needs: it orders the
//! units, builds the type registry and anchors, and asks the selected
//! [`Renderer`] for the overview, one page per unit and the index.

pub mod json;
pub mod markdown;

use crate::anchor;
use crate::model::ScannedUnit;
use crate::xref::{self, TypeRegistry};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

/// Trait for rendering the scanned set into a specific output format.
pub trait Renderer {
    /// Combined document listing every unit.
    fn overview(&self, site: &Site) -> Result<String>;
    /// Detail document for one unit.
    fn page(&self, site: &Site, unit: &UnitView) -> Result<String>;
    /// Units grouped by top-level module.
    fn index(&self, site: &Site) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}

/// Everything a renderer needs, computed once per run.
pub struct Site<'a> {
    /// Sorted by path
    pub units: Vec<UnitView<'a>>,
    pub registry: TypeRegistry,
    /// Overview document path, relative to the output root
    pub overview_path: String,
    /// Index document path, relative to the output root
    pub index_path: String,
}

/// A unit together with its page location and member anchors.
pub struct UnitView<'a> {
    pub unit: &'a ScannedUnit,
    /// Detail page path, relative to the output root
    pub page: String,
    /// Parallel to `unit.members`
    pub anchors: Vec<String>,
}

impl<'a> Site<'a> {
    pub fn new(units: &'a [ScannedUnit], ext: &str) -> Self {
        let mut sorted: Vec<&ScannedUnit> = units.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        let registry = TypeRegistry::build(sorted.iter().copied(), ext);
        let units = sorted
            .into_iter()
            .map(|unit| UnitView {
                unit,
                page: xref::page_path(unit, ext),
                anchors: anchor::allocate(unit.members.iter().map(|m| m.name.as_str())),
            })
            .collect();

        Site {
            units,
            registry,
            overview_path: format!("generated.{}", ext),
            index_path: format!("index.{}", ext),
        }
    }

    /// Units grouped by first path segment; groups and members both sorted.
    pub fn modules(&self) -> BTreeMap<&str, Vec<&UnitView<'a>>> {
        let mut modules: BTreeMap<&str, Vec<&UnitView<'a>>> = BTreeMap::new();
        for view in &self.units {
            modules.entry(view.unit.module()).or_default().push(view);
        }
        modules
    }
}

/// One rendered document, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDoc {
    pub path: String,
    pub contents: String,
}

/// Render the overview, every unit page and the index.
///
/// Pure: the same units always produce the same documents, whatever order
/// they were scanned in.
pub fn render_all(renderer: &dyn Renderer, units: &[ScannedUnit]) -> Result<Vec<RenderedDoc>> {
    let site = Site::new(units, renderer.file_extension());
    let mut docs = Vec::with_capacity(site.units.len() + 2);

    docs.push(RenderedDoc {
        path: site.overview_path.clone(),
        contents: renderer.overview(&site)?,
    });
    for view in &site.units {
        docs.push(RenderedDoc {
            path: view.page.clone(),
            contents: renderer.page(&site, view)?,
        });
    }
    docs.push(RenderedDoc {
        path: site.index_path.clone(),
        contents: renderer.index(&site)?,
    });

    Ok(docs)
}
