//! `@param` / `@return` annotation parser — line classification plus a
//! "current parameter" cursor.
//!
//! Continuation lines attach to the most recently opened `@param`; any other
//! annotation closes it. Parsing is total: anything unrecognized ends up in
//! the summary or is dropped, never rejected.

use crate::model::*;

/// What a single doc line means.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Param {
        ty: Option<&'a str>,
        name: &'a str,
        desc: &'a str,
    },
    /// `None` when a return spelling carried nothing usable (`@returns int`)
    Return(Option<ReturnDoc>),
    Unknown,
    Text(&'a str),
}

#[derive(Default)]
struct ParserState {
    summary: Vec<String>,
    params: indexmap::IndexMap<String, ParamDoc>,
    returns: Option<ReturnDoc>,
    current_param: Option<String>,
}

/// Parse raw doc text into a [`ParsedAnnotation`].
pub fn parse(doc: &str) -> ParsedAnnotation {
    let mut s = ParserState::default();

    for raw in doc.lines() {
        process_line(&mut s, classify(raw.trim()));
    }

    ParsedAnnotation {
        summary: s
            .summary
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        params: s.params,
        returns: s.returns,
    }
}

fn process_line(s: &mut ParserState, line: Line<'_>) {
    match line {
        Line::Param { ty, name, desc } => {
            let entry = ParamDoc {
                ty: ty.map(str::to_string),
                desc: desc.to_string(),
            };
            // IndexMap::insert keeps the slot of the first occurrence
            s.params.insert(name.to_string(), entry);
            // A nameless entry cannot take continuation lines
            s.current_param = (!name.is_empty()).then(|| name.to_string());
        }
        Line::Return(ret) => {
            if ret.is_some() {
                s.returns = ret;
            }
            s.current_param = None;
        }
        Line::Unknown => {
            s.current_param = None;
        }
        Line::Text(text) => {
            let target = s
                .current_param
                .as_ref()
                .and_then(|name| s.params.get_mut(name));
            match target {
                Some(param) => concat_str(&mut param.desc, text),
                None => s.summary.push(text.to_string()),
            }
        }
    }
}

/// Classify a trimmed doc line.
fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = keyword_rest(line, "@param") {
        let (first, rest) = next_token(rest);
        let (second, rest) = next_token(rest);
        return match (first, second) {
            (Some(ty), Some(name)) => Line::Param {
                ty: Some(ty),
                name,
                desc: rest,
            },
            (Some(name), None) => Line::Param {
                ty: None,
                name,
                desc: "",
            },
            _ => Line::Param {
                ty: None,
                name: "",
                desc: "",
            },
        };
    }

    if line.starts_with("@return")
        || starts_with_ignore_case(line, "returns:")
        || starts_with_ignore_case(line, "return:")
    {
        if let Some(rest) = keyword_rest(line, "@return") {
            let (ty, desc) = next_token(rest);
            return Line::Return(Some(ReturnDoc {
                ty: ty.map(str::to_string),
                desc: desc.to_string(),
            }));
        }
        // Colon spelling: description only
        let ret = line.split_once(':').map(|(_, desc)| ReturnDoc {
            ty: None,
            desc: desc.trim().to_string(),
        });
        return Line::Return(ret);
    }

    if line.starts_with('@') {
        return Line::Unknown;
    }

    Line::Text(line)
}

/// Remainder after `keyword` when the keyword stands alone (followed by
/// whitespace or end of line). `@paramfoo` does not match `@param`.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Split off the next whitespace-delimited token; the remainder is returned
/// verbatim apart from leading whitespace.
fn next_token(text: &str) -> (Option<&str>, &str) {
    let text = text.trim_start();
    if text.is_empty() {
        return (None, text);
    }
    match text.find(char::is_whitespace) {
        Some(end) => (Some(&text[..end]), text[end..].trim_start()),
        None => (Some(text), ""),
    }
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Concatenate strings with newline separator.
fn concat_str(dest: &mut String, text: &str) {
    if !dest.is_empty() {
        dest.push('\n');
    }
    dest.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(ty: Option<&str>, desc: &str) -> ParamDoc {
        ParamDoc {
            ty: ty.map(str::to_string),
            desc: desc.to_string(),
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), ParsedAnnotation::default());
    }

    #[test]
    fn plain_text_is_summary() {
        let doc = parse("Spawns the player.\n\nUses the default scene.");
        assert_eq!(doc.summary, "Spawns the player.\nUses the default scene.");
        assert!(doc.params.is_empty());
        assert!(doc.returns.is_none());
    }

    #[test]
    fn typed_param_with_continuation() {
        let doc = parse("@param int count of items\nmore detail");
        assert_eq!(doc.params["count"], param(Some("int"), "of items\nmore detail"));
        assert_eq!(doc.summary, "");
    }

    #[test]
    fn single_token_param_is_untyped() {
        let doc = parse("@param target");
        assert_eq!(doc.params["target"], param(None, ""));
    }

    #[test]
    fn two_tokens_are_type_then_name() {
        // Positional heuristic: the first word is always read as the type
        let doc = parse("@param target the node");
        assert_eq!(doc.params["the"], param(Some("target"), "node"));
    }

    #[test]
    fn continuation_on_untyped_param() {
        let doc = parse("@param target\nthe node to follow");
        assert_eq!(doc.params["target"], param(None, "the node to follow"));
    }

    #[test]
    fn bare_param_gets_empty_name() {
        let doc = parse("@param");
        assert_eq!(doc.params[""], param(None, ""));
    }

    #[test]
    fn description_spacing_is_verbatim() {
        let doc = parse("@param float   speed   units  per second");
        assert_eq!(doc.params["speed"], param(Some("float"), "units  per second"));
    }

    #[test]
    fn params_keep_first_appearance_order() {
        let doc = parse("@param int b\n@param int a\n@param String b replaced");
        let names: Vec<&str> = doc.params.keys().map(String::as_str).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(doc.params["b"], param(Some("String"), "replaced"));
    }

    #[test]
    fn typed_return() {
        let doc = parse("@return bool true when hit");
        assert_eq!(
            doc.returns,
            Some(ReturnDoc {
                ty: Some("bool".to_string()),
                desc: "true when hit".to_string(),
            })
        );
    }

    #[test]
    fn returns_colon_spelling_has_no_type() {
        let doc = parse("Returns: nothing happens if already dead");
        assert_eq!(
            doc.returns,
            Some(ReturnDoc {
                ty: None,
                desc: "nothing happens if already dead".to_string(),
            })
        );
        assert_eq!(doc.summary, "");
    }

    #[test]
    fn return_colon_is_case_insensitive() {
        let doc = parse("RETURN: the id");
        assert_eq!(doc.returns.unwrap().desc, "the id");
    }

    #[test]
    fn last_return_wins() {
        let doc = parse("@return int first\n@return float second one");
        assert_eq!(
            doc.returns,
            Some(ReturnDoc {
                ty: Some("float".to_string()),
                desc: "second one".to_string(),
            })
        );
    }

    #[test]
    fn colon_return_replaces_typed_return() {
        let doc = parse("@return int first\nReturns: plain");
        assert_eq!(
            doc.returns,
            Some(ReturnDoc {
                ty: None,
                desc: "plain".to_string(),
            })
        );
    }

    #[test]
    fn return_closes_param() {
        let doc = parse("@param int n count\n@return int total\ntrailing summary");
        assert_eq!(doc.params["n"].desc, "count");
        assert_eq!(doc.returns.unwrap().desc, "total");
        assert_eq!(doc.summary, "trailing summary");
    }

    #[test]
    fn unknown_annotation_closes_param() {
        let doc = parse("@param int n count\n@deprecated\nnot part of n");
        assert_eq!(doc.params["n"].desc, "count");
        assert_eq!(doc.summary, "not part of n");
    }

    #[test]
    fn glued_keyword_is_unknown() {
        let doc = parse("@paramfoo bar\n@returnsx");
        assert!(doc.params.is_empty());
        assert!(doc.returns.is_none());
        assert_eq!(doc.summary, "");
    }

    #[test]
    fn returns_without_colon_records_nothing() {
        let doc = parse("@return int kept\n@returns int");
        assert_eq!(doc.returns.unwrap().ty.as_deref(), Some("int"));
    }

    #[test]
    fn blank_line_is_kept_inside_param_description() {
        let doc = parse("@param int n count\n\nmore");
        assert_eq!(doc.params["n"].desc, "count\n\nmore");
    }

    #[test]
    fn blank_line_before_param_text_is_skipped() {
        let doc = parse("@param int n\n\nthe count");
        assert_eq!(doc.params["n"].desc, "the count");
    }

    #[test]
    fn extracted_block_keeps_blank_comment_line() {
        let lines: Vec<&str> = "# @param int n count\n#\n# more\nfunc f(n):".lines().collect();
        let doc = parse(&crate::parser::comment::extract(&lines, 3));
        assert_eq!(doc.params["n"].desc, "count\n\nmore");
    }

    #[test]
    fn text_after_bare_param_is_summary() {
        let doc = parse("@param\nstray text");
        assert_eq!(doc.params[""], param(None, ""));
        assert_eq!(doc.summary, "stray text");
    }

    #[test]
    fn summary_before_and_after_annotations() {
        let doc = parse("Deals damage.\n@param int amount hp\n@deprecated\nUse hit() instead.");
        assert_eq!(doc.summary, "Deals damage.\nUse hit() instead.");
    }

    #[test]
    fn classify_text() {
        assert_eq!(classify("hello"), Line::Text("hello"));
        assert_eq!(classify("@tool"), Line::Unknown);
    }
}
