//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the same three documents as the markdown renderer. Every type
//! is emitted twice: raw as written, and as `linked_type` with documented type
//! names turned into markdown links relative to the document. The overview
//! also carries the type registry, and every member carries its anchor.

use crate::render::{Renderer, Site, UnitView};
use crate::xref::{self, TypeRegistry};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

pub struct JsonRenderer;

#[derive(Serialize)]
struct OverviewJson<'a> {
    types: &'a TypeRegistry,
    units: Vec<UnitJson<'a>>,
}

#[derive(Serialize)]
struct UnitJson<'a> {
    path: &'a str,
    page: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    declared_type: Option<&'a str>,
    #[serde(skip_serializing_if = "is_blank")]
    type_doc: &'a str,
    members: Vec<MemberJson<'a>>,
}

#[derive(Serialize)]
struct MemberJson<'a> {
    name: &'a str,
    anchor: &'a str,
    signature: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    declared_return_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declared_return_link: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    summary: &'a str,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    params: IndexMap<&'a str, TypedJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    returns: Option<TypedJson<'a>>,
}

/// A `@param` or `@return` entry.
#[derive(Serialize)]
struct TypedJson<'a> {
    #[serde(rename = "type")]
    ty: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linked_type: Option<String>,
    desc: &'a str,
}

#[derive(Serialize)]
struct IndexEntryJson<'a> {
    name: &'a str,
    page: &'a str,
}

impl Renderer for JsonRenderer {
    fn overview(&self, site: &Site) -> Result<String> {
        let overview = OverviewJson {
            types: &site.registry,
            units: site
                .units
                .iter()
                .map(|view| unit_json(view, &site.registry, ""))
                .collect(),
        };
        to_json(&overview, &site.overview_path)
    }

    fn page(&self, site: &Site, view: &UnitView) -> Result<String> {
        let base = xref::base_for(&view.page);
        to_json(&unit_json(view, &site.registry, &base), &view.page)
    }

    fn index(&self, site: &Site) -> Result<String> {
        let modules: BTreeMap<&str, Vec<IndexEntryJson>> = site
            .modules()
            .into_iter()
            .map(|(module, views)| {
                let entries = views
                    .into_iter()
                    .map(|view| IndexEntryJson {
                        name: view.unit.display_name(),
                        page: &view.page,
                    })
                    .collect();
                (module, entries)
            })
            .collect();
        to_json(&modules, &site.index_path)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// `base` is the relative prefix from the document back to the output root.
fn unit_json<'a>(view: &'a UnitView, registry: &TypeRegistry, base: &str) -> UnitJson<'a> {
    let unit = view.unit;
    let link = |ty: &str| xref::resolve_from(ty, registry, base);
    let typed = |ty: &'a Option<String>, desc: &'a str| TypedJson {
        ty: ty.as_deref(),
        linked_type: ty.as_deref().map(link),
        desc,
    };
    UnitJson {
        path: &unit.path,
        page: &view.page,
        declared_type: unit.declared_type.as_deref(),
        type_doc: &unit.type_doc,
        members: unit
            .members
            .iter()
            .zip(&view.anchors)
            .map(|(member, anchor)| MemberJson {
                name: &member.name,
                anchor,
                signature: &member.signature,
                declared_return_type: member.declared_return_type.as_deref(),
                declared_return_link: member.declared_return_type.as_deref().map(link),
                summary: &member.annotation.summary,
                params: member
                    .annotation
                    .params
                    .iter()
                    .map(|(name, param)| (name.as_str(), typed(&param.ty, &param.desc)))
                    .collect(),
                returns: member
                    .annotation
                    .returns
                    .as_ref()
                    .map(|ret| typed(&ret.ty, &ret.desc)),
            })
            .collect(),
    }
}

fn is_blank(text: &&str) -> bool {
    text.is_empty()
}

fn to_json<T: Serialize>(value: &T, path: &str) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path))?;
    out.push('\n');
    Ok(out)
}
