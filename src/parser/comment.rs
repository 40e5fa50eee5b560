//! Comment block extraction — walks upward from a declaration line.

/// Collect the `#` comment block directly above `index` in `lines`.
///
/// One blank line between the comments and the declaration (or inside the
/// block) is tolerated; a second consecutive blank line or any code line ends
/// the block. Returns an empty string when nothing is found.
pub fn extract(lines: &[&str], index: usize) -> String {
    let mut collected: Vec<&str> = Vec::new();
    let mut blank_run = 0;

    for line in lines[..index.min(lines.len())].iter().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                break;
            }
            continue;
        }
        match comment_content(trimmed) {
            Some(text) => {
                blank_run = 0;
                collected.push(text);
            }
            None => break,
        }
    }
    collected.reverse();

    // Drop leading/trailing blank comment lines
    let start = collected
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(collected.len());
    let end = collected
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);

    collected[start..end].join("\n")
}

/// Strip the comment marker (a run of `#`, so `##` doc comments count) and
/// one following space. `None` for non-comment lines.
fn comment_content(trimmed: &str) -> Option<&str> {
    if !trimmed.starts_with('#') {
        return None;
    }
    let rest = trimmed.trim_start_matches('#');
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
