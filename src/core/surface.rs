//! Editing surfaces that supply a title and body and accept them back.
//!
//! The replacement core only sees strings. A surface is where those strings
//! live: a structured JSON document, separate form-field files, or plain
//! in-memory values. Surfaces are interchangeable behind [`DocumentSurface`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::document::{replace_in_document, DocumentReplacement, Query, Summary};
use crate::error::{Error, Result};
use crate::replace::ReplaceOptions;
use crate::utils::io;

/// Get/set access to a document's title and body.
///
/// Either field may be absent; absent fields are searched as empty text and
/// never written.
pub trait DocumentSurface {
    fn label(&self) -> &'static str;
    fn title(&self) -> Result<Option<String>>;
    fn body(&self) -> Result<Option<String>>;
    fn set_title(&mut self, title: String) -> Result<()>;
    fn set_body(&mut self, body: String) -> Result<()>;

    /// Persist staged edits.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemory {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl InMemory {
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        Self { title, body }
    }
}

impl DocumentSurface for InMemory {
    fn label(&self) -> &'static str {
        "inline"
    }

    fn title(&self) -> Result<Option<String>> {
        Ok(self.title.clone())
    }

    fn body(&self) -> Result<Option<String>> {
        Ok(self.body.clone())
    }

    fn set_title(&mut self, title: String) -> Result<()> {
        self.title = Some(title);
        Ok(())
    }

    fn set_body(&mut self, body: String) -> Result<()> {
        self.body = Some(body);
        Ok(())
    }
}

// ============================================================================
// Structured content model
// ============================================================================

const TITLE_KEY: &str = "title";
const CONTENT_KEY: &str = "content";

/// A JSON document holding `title` and `content` alongside any other keys.
///
/// Fields may be plain strings or objects with a `raw` string (the shape
/// editing APIs return for `context=edit`). Writes keep the original shape
/// and every other key.
#[derive(Debug, Clone)]
pub struct ContentModel {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl ContentModel {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = read_surface_file(path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            Error::validation_invalid_json(e, Some(format!("parse {}", path.display())))
        })?;

        let Value::Object(fields) = value else {
            return Err(Error::validation_invalid_argument(
                "document",
                format!("{} must contain a JSON object", path.display()),
                None,
                None,
            ));
        };

        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn field(&self, key: &str) -> Result<Option<String>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Object(obj)) => match obj.get("raw") {
                Some(Value::String(s)) => Ok(Some(s.clone())),
                _ => Err(self.field_error(key)),
            },
            Some(_) => Err(self.field_error(key)),
        }
    }

    fn set_field(&mut self, key: &str, text: String) {
        match self.fields.get_mut(key) {
            Some(Value::Object(obj)) => {
                obj.insert("raw".to_string(), Value::String(text));
            }
            _ => {
                self.fields.insert(key.to_string(), Value::String(text));
            }
        }
    }

    fn field_error(&self, key: &str) -> Error {
        Error::document_field_missing(self.path.display().to_string(), key)
    }
}

impl DocumentSurface for ContentModel {
    fn label(&self) -> &'static str {
        "content_model"
    }

    fn title(&self) -> Result<Option<String>> {
        self.field(TITLE_KEY)
    }

    fn body(&self) -> Result<Option<String>> {
        self.field(CONTENT_KEY)
    }

    fn set_title(&mut self, title: String) -> Result<()> {
        self.set_field(TITLE_KEY, title);
        Ok(())
    }

    fn set_body(&mut self, body: String) -> Result<()> {
        self.set_field(CONTENT_KEY, body);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(self.fields.clone()))
            .map_err(|e| {
                Error::internal_json(e.to_string(), Some("serialize document".to_string()))
            })?;
        io::write_file_atomic(
            &self.path,
            &format!("{}\n", content),
            &format!("write {}", self.path.display()),
        )
    }
}

// ============================================================================
// Plain form fields
// ============================================================================

/// One file per field, as displayed in a plain editing form.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    title_path: Option<PathBuf>,
    body_path: Option<PathBuf>,
    staged_title: Option<String>,
    staged_body: Option<String>,
}

impl FormFields {
    pub fn new(title_path: Option<PathBuf>, body_path: Option<PathBuf>) -> Self {
        Self {
            title_path,
            body_path,
            staged_title: None,
            staged_body: None,
        }
    }
}

impl DocumentSurface for FormFields {
    fn label(&self) -> &'static str {
        "form_fields"
    }

    fn title(&self) -> Result<Option<String>> {
        self.title_path
            .as_deref()
            .map(read_surface_file)
            .transpose()
    }

    fn body(&self) -> Result<Option<String>> {
        self.body_path
            .as_deref()
            .map(read_surface_file)
            .transpose()
    }

    fn set_title(&mut self, title: String) -> Result<()> {
        if self.title_path.is_none() {
            return Err(Error::validation_missing_argument(vec![
                "title-file".to_string()
            ]));
        }
        self.staged_title = Some(title);
        Ok(())
    }

    fn set_body(&mut self, body: String) -> Result<()> {
        if self.body_path.is_none() {
            return Err(Error::validation_missing_argument(vec![
                "body-file".to_string()
            ]));
        }
        self.staged_body = Some(body);
        Ok(())
    }

    /// Both staged fields land together: if either temp file cannot be
    /// written, neither field file changes.
    fn commit(&mut self) -> Result<()> {
        let title = self.staged_title.take();
        let body = self.staged_body.take();

        let files: Vec<(&Path, &str)> = [
            (self.title_path.as_deref(), title.as_deref()),
            (self.body_path.as_deref(), body.as_deref()),
        ]
        .into_iter()
        .filter_map(|(path, text)| Some((path?, text?)))
        .collect();

        if files.is_empty() {
            return Ok(());
        }
        io::write_files_atomic(&files, "write form fields")
    }
}

fn read_surface_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::document_not_found(path.display().to_string()));
    }
    io::read_file(path, &format!("read {}", path.display()))
}

// ============================================================================
// Apply
// ============================================================================

/// Result of running a query against a surface.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceOutcome {
    pub surface: &'static str,
    #[serde(flatten)]
    pub replacement: DocumentReplacement,
    pub title_written: bool,
    pub body_written: bool,
    pub dry_run: bool,
    pub summary: Summary,
}

/// Run `query` over a surface's title and body.
///
/// With `write` set, only fields with at least one occurrence are written
/// back, then the surface is committed once. Without it nothing is written.
pub fn apply_to_surface(
    surface: &mut dyn DocumentSurface,
    query: &Query,
    options: ReplaceOptions,
    write: bool,
) -> Result<SurfaceOutcome> {
    query.validate()?;

    let title = surface.title()?;
    let body = surface.body()?;

    let replacement = replace_in_document(
        title.as_deref().unwrap_or(""),
        body.as_deref().unwrap_or(""),
        query,
        options,
    )?;

    let title_written = write && title.is_some() && replacement.title_modified();
    let body_written = write && body.is_some() && replacement.body_modified();

    if title_written {
        surface.set_title(replacement.new_title.clone())?;
    }
    if body_written {
        surface.set_body(replacement.new_body.clone())?;
    }
    if title_written || body_written {
        surface.commit()?;
        crate::log_status!(
            "replace",
            "Wrote {} occurrence(s) to {}",
            replacement.total_occurrences,
            surface.label()
        );
    }

    let summary = replacement.summary();

    Ok(SurfaceOutcome {
        surface: surface.label(),
        replacement,
        title_written,
        body_written,
        dry_run: !write,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn query(search: &str, replacement: &str) -> Query {
        Query::new(search, replacement)
    }

    #[test]
    fn in_memory_writes_only_modified_fields() {
        let mut surface = InMemory::new(Some("Keep".to_string()), Some("<p>old</p>".to_string()));
        let outcome =
            apply_to_surface(&mut surface, &query("old", "new"), ReplaceOptions::default(), true)
                .unwrap();

        assert!(!outcome.title_written);
        assert!(outcome.body_written);
        assert_eq!(surface.body.as_deref(), Some("<p>new</p>"));
        assert_eq!(surface.title.as_deref(), Some("Keep"));
    }

    #[test]
    fn dry_run_leaves_surface_untouched() {
        let mut surface = InMemory::new(Some("old".to_string()), None);
        let outcome =
            apply_to_surface(&mut surface, &query("old", "new"), ReplaceOptions::default(), false)
                .unwrap();

        assert!(outcome.dry_run);
        assert_eq!(outcome.replacement.total_occurrences, 1);
        assert_eq!(outcome.replacement.new_title, "new");
        assert_eq!(surface.title.as_deref(), Some("old"));
    }

    #[test]
    fn empty_search_writes_nothing() {
        let mut surface = InMemory::new(Some("t".to_string()), Some("b".to_string()));
        let err = apply_to_surface(&mut surface, &query("", "x"), ReplaceOptions::default(), true)
            .unwrap_err();

        assert_eq!(err.code.as_str(), "validation.empty_search");
        assert_eq!(surface, InMemory::new(Some("t".to_string()), Some("b".to_string())));
    }

    #[test]
    fn content_model_preserves_other_keys_and_shapes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.json");
        fs::write(
            &path,
            r#"{"id": 42, "title": {"raw": "Cat post", "rendered": "Cat post"}, "content": "<img src=\"cat.jpg\"> cat"}"#,
        )
        .unwrap();

        let mut surface = ContentModel::open(&path).unwrap();
        let outcome =
            apply_to_surface(&mut surface, &query("cat", "dog"), ReplaceOptions::default(), true)
                .unwrap();
        assert_eq!(outcome.replacement.total_occurrences, 2);

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["id"], 42);
        assert_eq!(saved["title"]["raw"], "dog post");
        assert_eq!(saved["title"]["rendered"], "Cat post");
        assert_eq!(saved["content"], "<img src=\"cat.jpg\"> dog");
    }

    #[test]
    fn content_model_without_matches_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.json");
        let original = r#"{"title":"A","content":"<p>B</p>"}"#;
        fs::write(&path, original).unwrap();

        let mut surface = ContentModel::open(&path).unwrap();
        let outcome =
            apply_to_surface(&mut surface, &query("zzz", "y"), ReplaceOptions::default(), true)
                .unwrap();

        assert!(!outcome.title_written && !outcome.body_written);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn content_model_rejects_non_string_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.json");
        fs::write(&path, r#"{"title": 7}"#).unwrap();

        let surface = ContentModel::open(&path).unwrap();
        let err = surface.title().unwrap_err();
        assert_eq!(err.code.as_str(), "document.field_missing");
    }

    #[test]
    fn content_model_rejects_non_object_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = ContentModel::open(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn missing_document_is_not_found() {
        let err = ContentModel::open(Path::new("/nonexistent/post.json")).unwrap_err();
        assert_eq!(err.code.as_str(), "document.not_found");
    }

    #[test]
    fn form_fields_handle_a_missing_title_field() {
        let dir = TempDir::new().unwrap();
        let body = dir.path().join("body.html");
        fs::write(&body, "<a href=\"/tea\">tea</a> time").unwrap();

        let mut surface = FormFields::new(None, Some(body.clone()));
        let outcome =
            apply_to_surface(&mut surface, &query("tea", "coffee"), ReplaceOptions::default(), true)
                .unwrap();

        assert_eq!(outcome.surface, "form_fields");
        assert!(outcome.body_written);
        assert!(!outcome.title_written);
        assert_eq!(
            fs::read_to_string(&body).unwrap(),
            "<a href=\"/tea\">coffee</a> time"
        );
    }

    #[test]
    fn form_fields_commit_is_all_or_nothing() {
        let dir = TempDir::new().unwrap();
        let title = dir.path().join("title.txt");
        fs::write(&title, "Linux notes").unwrap();
        let body = dir.path().join("gone").join("body.html");

        let mut surface = FormFields::new(Some(title.clone()), Some(body));
        surface.set_title("BSD notes".to_string()).unwrap();
        surface.set_body("<p>BSD</p>".to_string()).unwrap();

        let err = surface.commit().unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(fs::read_to_string(&title).unwrap(), "Linux notes");
        assert!(!dir.path().join("title.txt.tmp").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unwritable_body_keeps_the_title_on_disk() {
        let dir = TempDir::new().unwrap();
        let title = dir.path().join("title.txt");
        fs::write(&title, "Linux notes").unwrap();

        let mut surface = FormFields::new(Some(title.clone()), Some(PathBuf::from("/proc/version")));
        let result = apply_to_surface(&mut surface, &query("Linux", "BSD"), ReplaceOptions::default(), true);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&title).unwrap(), "Linux notes");
        assert!(!dir.path().join("title.txt.tmp").exists());
    }

    #[test]
    fn form_fields_refuse_to_stage_unbacked_fields() {
        let mut surface = FormFields::new(None, None);
        let err = surface.set_title("x".to_string()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
    }
}
