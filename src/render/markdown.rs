//! GitHub-flavored markdown renderer.
//!
//! Layout: `generated.md` at the root lists every file with a short entry per
//! function, `classes/<path>.md` holds the full documentation, and `index.md`
//! groups the pages by top-level directory.

use crate::anchor;
use crate::model::*;
use crate::render::{Renderer, Site, UnitView};
use crate::xref;
use anyhow::Result;

pub struct MarkdownRenderer;

/// Turns raw type text into its linked form for the page being rendered.
type Linker<'a> = dyn Fn(&str) -> String + 'a;

impl Renderer for MarkdownRenderer {
    fn overview(&self, site: &Site) -> Result<String> {
        let mut lines: Vec<String> = vec![
            "# Generated API Reference\n".to_string(),
            "This file is generated by `gddoc`. Run it when code changes to refresh API docs.\n"
                .to_string(),
        ];

        let link = |ty: &str| xref::resolve(ty, &site.registry);
        for view in &site.units {
            let unit = view.unit;
            lines.push(format!("## [{}]({})\n", unit.path, view.page));
            push_type_header(&mut lines, unit);

            if unit.members.is_empty() {
                continue;
            }
            lines.push("### Functions\n".to_string());
            for (member, id) in unit.members.iter().zip(&view.anchors) {
                lines.push(format!(
                    "<a name=\"{}\"></a>",
                    anchor::global(unit.stem_path(), id)
                ));
                lines.push(format!(
                    "- [`{}{}`]({}#{})",
                    member.name, member.signature, view.page, id
                ));
                render_member_summary(&mut lines, member, &link);
            }
            lines.push(String::new());
        }

        Ok(finish(lines))
    }

    fn page(&self, site: &Site, view: &UnitView) -> Result<String> {
        let unit = view.unit;
        let base = xref::base_for(&view.page);
        let link = |ty: &str| xref::resolve_from(ty, &site.registry, &base);
        let mut lines: Vec<String> = vec![format!("# {}\n", unit.path)];
        push_type_header(&mut lines, unit);

        if !unit.members.is_empty() {
            lines.push("### Functions\n".to_string());
            for (member, anchor) in unit.members.iter().zip(&view.anchors) {
                render_member(&mut lines, member, anchor, &link);
            }
        }

        Ok(finish(lines))
    }

    fn index(&self, site: &Site) -> Result<String> {
        let mut lines: Vec<String> = vec![
            "# API Index\n".to_string(),
            "This index links to the per-file API pages in `classes/` generated by `gddoc`.\n"
                .to_string(),
        ];

        for (module, views) in site.modules() {
            lines.push(format!("## {}\n", module));
            for view in views {
                lines.push(format!("- [{}]({})", view.unit.display_name(), view.page));
            }
            lines.push(String::new());
        }

        Ok(finish(lines))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// `*Class*` line and type doc, both optional.
fn push_type_header(lines: &mut Vec<String>, unit: &ScannedUnit) {
    if let Some(ref name) = unit.declared_type {
        lines.push(format!("*Class*: `{}`\n", name));
    }
    if !unit.type_doc.is_empty() {
        lines.push(format!("{}\n", unit.type_doc));
    }
}

/// Nested list entry under a function link in the overview.
fn render_member_summary(lines: &mut Vec<String>, member: &MemberRecord, link: &Linker) {
    let ann = &member.annotation;

    if let Some(ref ret) = member.declared_return_type {
        lines.push(format!("  - Returns: {}", type_text(ret, link)));
    }
    for line in ann.summary.lines() {
        lines.push(format!("  - {}", line));
    }
    if !ann.params.is_empty() {
        lines.push("  - Params:".to_string());
        for (name, param) in &ann.params {
            lines.push(format!("    - {}", param_text(name, param, link, 6)));
        }
    }
    if let Some(ref ret) = ann.returns {
        if let Some(text) = return_text(ret, link, 4) {
            lines.push(format!("  - Return: {}", text));
        }
    }
}

/// Full documentation block for one member on its detail page.
fn render_member(lines: &mut Vec<String>, member: &MemberRecord, anchor: &str, link: &Linker) {
    let ann = &member.annotation;

    lines.push(format!("<a name=\"{}\"></a>", anchor));
    lines.push(format!("#### `{}{}`\n", member.name, member.signature));

    if !ann.summary.is_empty() {
        lines.push(format!("{}\n", ann.summary));
    }

    let mut returns: Vec<String> = Vec::new();
    if let Some(ref ret) = member.declared_return_type {
        returns.push(format!("- **Signature return**: {}", type_text(ret, link)));
    }
    if let Some(ref ret) = ann.returns {
        if let Some(text) = return_text(ret, link, 2) {
            returns.push(format!("- **Return**: {}", text));
        }
    }
    if !returns.is_empty() {
        lines.extend(returns);
        lines.push(String::new());
    }

    if !ann.params.is_empty() {
        lines.push("**Params**:\n".to_string());
        for (name, param) in &ann.params {
            lines.push(format!("- {}", param_text(name, param, link, 2)));
        }
        lines.push(String::new());
    }
}

/// Type in code style, or as links when it names documented types.
fn type_text(ty: &str, link: &Linker) -> String {
    let resolved = link(ty);
    if resolved == ty {
        format!("`{}`", ty)
    } else {
        resolved
    }
}

fn param_text(name: &str, param: &ParamDoc, link: &Linker, indent: usize) -> String {
    let mut out = format!("`{}`", name);
    if let Some(ref ty) = param.ty {
        out.push_str(&format!(" ({})", type_text(ty, link)));
    }
    if !param.desc.is_empty() {
        out.push_str(": ");
        out.push_str(&indent_continuation(&param.desc, indent));
    }
    out
}

/// `None` when the return carries neither a type nor a description.
fn return_text(ret: &ReturnDoc, link: &Linker, indent: usize) -> Option<String> {
    let desc = indent_continuation(&ret.desc, indent);
    match (&ret.ty, desc.is_empty()) {
        (Some(ty), true) => Some(type_text(ty, link)),
        (Some(ty), false) => Some(format!("{} - {}", type_text(ty, link), desc)),
        (None, false) => Some(desc),
        (None, true) => None,
    }
}

/// Indent additional lines so they stay inside their list item. Blank lines
/// stay empty.
fn indent_continuation(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| match (i, line.is_empty()) {
            (0, _) | (_, true) => line.to_string(),
            _ => format!("{}{}", pad, line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join lines, ending the document with exactly one newline.
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}
