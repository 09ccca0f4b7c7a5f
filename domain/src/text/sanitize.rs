//! Citation marker removal.
//!
//! The assistant backend decorates file-search answers with source
//! annotations such as `【4:0†lecture-notes.pdf】` or `[3†source]`. They mean
//! nothing to a student, so they are stripped before display and logging.

use regex::Regex;
use std::sync::LazyLock;

/// `【...】` markers, with the horizontal whitespace that leads into them.
static FULLWIDTH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*【[^【】]*】").expect("valid regex"));

/// `[n†source]` style references on a single line.
static DAGGER_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[[^\[\]\n]*†[^\[\]\n]*\]").expect("valid regex"));

/// Unbalanced leftovers of the fullwidth brackets.
static STRAY_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[【】]").expect("valid regex"));

/// Remove citation markers and collapse redundant whitespace.
///
/// Total and idempotent: `sanitize(&sanitize(x)) == sanitize(x)`. Text without
/// markers only has its whitespace normalized.
pub fn sanitize(text: &str) -> String {
    let mut current = text.to_string();
    // Removing an inner marker can expose an outer one, so run to a fixpoint.
    loop {
        let next = strip_markers(&current);
        if next == current {
            break;
        }
        current = next;
    }
    let current = STRAY_BRACKET.replace_all(&current, "");
    collapse_whitespace(&current)
}

fn strip_markers(text: &str) -> String {
    let text = FULLWIDTH_MARKER.replace_all(text, "");
    DAGGER_REFERENCE.replace_all(&text, "").into_owned()
}

/// Collapse whitespace runs inside each line, drop trailing whitespace, keep
/// at most one blank line in a row and trim the whole text.
///
/// Leading indentation is kept so markdown lists and code stay intact.
fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in text.lines() {
        let indent_len = line.len() - line.trim_start().len();
        let (indent, body) = line.split_at(indent_len);
        let body = body.split_whitespace().collect::<Vec<_>>().join(" ");

        if body.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }

        previous_blank = false;
        lines.push(format!("{indent}{body}"));
    }

    lines.join("\n").trim().to_string()
}
