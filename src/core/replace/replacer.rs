use std::borrow::Cow;

use super::pattern::CompiledPattern;
use super::segment::segment;

/// Where a pattern is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole string is text (titles).
    PlainText,
    /// Only text between `<...>` tags is searched (bodies).
    MarkupText,
}

/// Rewritten text plus the number of occurrences replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceResult {
    pub output: String,
    pub occurrences: usize,
}

impl ReplaceResult {
    fn unchanged(input: &str) -> Self {
        Self {
            output: input.to_string(),
            occurrences: 0,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.occurrences > 0
    }
}

/// Replace every occurrence of `pattern` in `input` with the literal `replacement`.
///
/// `replacement` is never expanded: `$1` or `$&` are inserted as written.
/// With zero occurrences the output is byte-for-byte the input.
pub fn replace(
    input: &str,
    pattern: &CompiledPattern,
    replacement: &str,
    scope: Scope,
) -> ReplaceResult {
    if input.is_empty() {
        return ReplaceResult::unchanged(input);
    }

    match scope {
        Scope::PlainText => {
            let (output, occurrences) = replace_text(input, pattern, replacement);
            if occurrences == 0 {
                return ReplaceResult::unchanged(input);
            }
            ReplaceResult {
                output: output.into_owned(),
                occurrences,
            }
        }
        Scope::MarkupText => replace_markup(input, pattern, replacement),
    }
}

fn replace_markup(input: &str, pattern: &CompiledPattern, replacement: &str) -> ReplaceResult {
    let mut output = String::with_capacity(input.len());
    let mut occurrences = 0;

    for seg in segment(input) {
        if seg.is_tag() {
            output.push_str(seg.content);
            continue;
        }
        let (text, count) = replace_text(seg.content, pattern, replacement);
        occurrences += count;
        output.push_str(&text);
    }

    if occurrences == 0 {
        return ReplaceResult::unchanged(input);
    }

    ReplaceResult {
        output,
        occurrences,
    }
}

fn replace_text<'t>(
    text: &'t str,
    pattern: &CompiledPattern,
    replacement: &str,
) -> (Cow<'t, str>, usize) {
    let mut output = String::new();
    let mut last = 0;
    let mut count = 0;

    for found in pattern.regex().find_iter(text) {
        if count == 0 {
            output.reserve(text.len());
        }
        output.push_str(&text[last..found.start()]);
        output.push_str(replacement);
        last = found.end();
        count += 1;
    }

    if count == 0 {
        return (Cow::Borrowed(text), 0);
    }

    output.push_str(&text[last..]);
    (Cow::Owned(output), count)
}
