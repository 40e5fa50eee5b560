//! Data model for scanned sources — format-agnostic.

use indexmap::IndexMap;

/// Everything extracted from a single source file.
#[derive(Debug, Default, Clone)]
pub struct ScannedUnit {
    /// Path relative to the scanned root, always `/`-separated
    pub path: String,
    /// `class_name` declared by the file, if any
    pub declared_type: Option<String>,
    /// Comment block above the `class_name` line
    pub type_doc: String,
    /// Functions in source order
    pub members: Vec<MemberRecord>,
}

/// A single documented function.
#[derive(Debug, Default, Clone)]
pub struct MemberRecord {
    pub name: String,
    /// Raw parameter list including parentheses, echoed verbatim
    pub signature: String,
    /// `-> T` from the signature itself
    pub declared_return_type: Option<String>,
    pub annotation: ParsedAnnotation,
}

/// Structured form of a comment block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedAnnotation {
    pub summary: String,
    /// Keyed by parameter name, in order of first `@param`
    pub params: IndexMap<String, ParamDoc>,
    pub returns: Option<ReturnDoc>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub ty: Option<String>,
    pub desc: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReturnDoc {
    pub ty: Option<String>,
    pub desc: String,
}

impl ScannedUnit {
    /// Unit path without its file extension: "core/player.gd" → "core/player".
    pub fn stem_path(&self) -> &str {
        let file_start = self.path.rfind('/').map_or(0, |i| i + 1);
        match self.path[file_start..].rfind('.') {
            Some(dot) if dot > 0 => &self.path[..file_start + dot],
            _ => &self.path,
        }
    }

    /// First path segment, used to group units in the index.
    pub fn module(&self) -> &str {
        self.path.split('/').next().unwrap_or(&self.path)
    }

    /// Name shown for the unit in listings.
    pub fn display_name(&self) -> &str {
        self.declared_type.as_deref().unwrap_or(&self.path)
    }
}
