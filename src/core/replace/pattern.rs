use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Matching toggles, applied uniformly to every field of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceOptions {
    pub case_sensitive: bool,
    pub whole_words: bool,
}

impl ReplaceOptions {
    pub fn new(case_sensitive: bool, whole_words: bool) -> Self {
        Self {
            case_sensitive,
            whole_words,
        }
    }
}

/// A search string compiled into a literal matcher.
///
/// Every regex metacharacter in the search text is escaped, so `a.b` only ever
/// matches the three characters `a.b`. Matches are found left to right and
/// never overlap.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Compile `search` with the given options.
    ///
    /// Whole-word mode anchors both ends with `\b`, which sits between a word
    /// character (Unicode letters, digits, `_`) and anything else or a string
    /// edge. An empty search is rejected rather than compiled into a pattern
    /// that would match between every character.
    pub fn build(search: &str, options: ReplaceOptions) -> Result<Self> {
        if search.is_empty() {
            return Err(Error::validation_invalid_query(
                "Search text must not be empty",
            ));
        }

        let escaped = regex::escape(search);
        let source = if options.whole_words {
            format!(r"\b{}\b", escaped)
        } else {
            escaped
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| Error::internal_unexpected(format!("compile search pattern: {}", e)))?;

        Ok(Self { regex })
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}
