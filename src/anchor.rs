//! Anchor allocation for member entries.
//!
//! Anchors only depend on the member names of one unit, in order, so each
//! page can be rendered on its own and links from other pages still match.

use std::collections::HashMap;

/// Assign `fn-<name>` anchors, suffixing repeats with `-1`, `-2`, ...
pub fn allocate<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            let base = format!("fn-{}", name);
            let count = seen.entry(base.clone()).or_insert(0);
            let anchor = if *count == 0 {
                base
            } else {
                format!("{}-{}", base, count)
            };
            *count += 1;
            anchor
        })
        .collect()
}

/// Overview-wide anchor for a member: `g-<unit stem>-<anchor>` with `/` and
/// `.` in the stem turned into `_`.
pub fn global(stem_path: &str, anchor: &str) -> String {
    let safe: String = stem_path
        .chars()
        .map(|c| if c == '/' || c == '.' { '_' } else { c })
        .collect();
    format!("g-{}-{}", safe, anchor)
}
