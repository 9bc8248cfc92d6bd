//! Title and body replacement as one operation.
//!
//! The title is plain text; the body is markup. Both are searched with the
//! same compiled pattern, so options apply uniformly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::replace::{replace, CompiledPattern, ReplaceOptions, ReplaceResult, Scope};

const PRESERVED_NOTE: &str = "Image URLs and HTML attributes are preserved.";

/// What to look for and what to put in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub search: String,
    #[serde(default)]
    pub replacement: String,
}

impl Query {
    pub fn new(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replacement: replacement.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.is_empty() {
            return Err(Error::validation_empty_search());
        }
        Ok(())
    }
}

/// Rewritten title and body with per-field counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReplacement {
    pub new_title: String,
    pub new_body: String,
    pub title_occurrences: usize,
    pub body_occurrences: usize,
    pub total_occurrences: usize,
}

impl DocumentReplacement {
    /// Callers write the title back only when this is true.
    pub fn title_modified(&self) -> bool {
        self.title_occurrences > 0
    }

    /// Callers write the body back only when this is true.
    pub fn body_modified(&self) -> bool {
        self.body_occurrences > 0
    }

    pub fn is_empty(&self) -> bool {
        self.total_occurrences == 0
    }

    pub fn summary(&self) -> Summary {
        Summary::for_count(self.total_occurrences)
    }
}

/// Replace `query.search` in a plain-text title and a markup body.
///
/// Fails with `validation.empty_search` before scanning anything if the
/// search text is empty. Inputs are never mutated; on success both strings
/// are returned whole.
pub fn replace_in_document(
    title: &str,
    body: &str,
    query: &Query,
    options: ReplaceOptions,
) -> Result<DocumentReplacement> {
    query.validate()?;

    let pattern = CompiledPattern::build(&query.search, options)?;

    let ReplaceResult {
        output: new_title,
        occurrences: title_occurrences,
    } = replace(title, &pattern, &query.replacement, Scope::PlainText);
    let ReplaceResult {
        output: new_body,
        occurrences: body_occurrences,
    } = replace(body, &pattern, &query.replacement, Scope::MarkupText);

    Ok(DocumentReplacement {
        new_title,
        new_body,
        title_occurrences,
        body_occurrences,
        total_occurrences: title_occurrences + body_occurrences,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Success,
    Info,
}

/// User-facing notice for the outcome of a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub kind: SummaryKind,
    pub message: String,
}

impl Summary {
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self {
                kind: SummaryKind::Info,
                message: "No matches found.".to_string(),
            };
        }

        let noun = if count == 1 { "occurrence" } else { "occurrences" };
        Self {
            kind: SummaryKind::Success,
            message: format!(
                "Successfully replaced {} {}. {}",
                count, noun, PRESERVED_NOTE
            ),
        }
    }
}
