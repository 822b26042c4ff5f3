use super::{Placeholder, PlaceholderKind};
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

static TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(mcp\.([^)]+)\)").expect("text placeholder pattern is valid")
});

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""\$\(mcp\.([^)]+)\)\(number\)""#)
        .expect("numeric placeholder pattern is valid")
});

/// Extracts every placeholder in `body`, de-duplicated by (path, kind).
///
/// Both grammars run over the unmodified body. A text-shaped match that sits
/// inside a numeric occurrence belongs to that numeric placeholder and is not
/// reported as `Text`. The returned set iterates in path order.
pub fn scan(body: &str) -> BTreeSet<Placeholder> {
    let mut found = BTreeSet::new();
    let mut numeric_spans: Vec<Range<usize>> = Vec::new();

    for caps in NUMBER_PATTERN.captures_iter(body) {
        if let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) {
            numeric_spans.push(whole.range());
            found.insert(Placeholder::new(path.as_str(), PlaceholderKind::Number));
        }
    }

    for caps in TEXT_PATTERN.captures_iter(body) {
        if let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) {
            let inside_numeric = numeric_spans
                .iter()
                .any(|span| span.start <= whole.start() && whole.end() <= span.end);
            if !inside_numeric {
                found.insert(Placeholder::new(path.as_str(), PlaceholderKind::Text));
            }
        }
    }

    log::trace!("Scanned {} placeholder(s)", found.len());
    found
}
