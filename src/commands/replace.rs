use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use markswap::defaults::{self, Defaults};
use markswap::{
    apply_to_surface, ContentModel, DocumentSurface, FormFields, InMemory, Query, ReplaceOptions,
    SurfaceOutcome,
};

use super::{read_text_arg, CmdResult};

#[derive(Args)]
pub struct ReplaceArgs {
    /// Text to search for (matched literally)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Replacement text (empty deletes matches)
    #[arg(short, long, default_value = "")]
    replace: String,

    /// Match case exactly (default from markswap.json, else false)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    case_sensitive: Option<bool>,

    /// Match whole words only (default from markswap.json, else false)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    whole_words: Option<bool>,

    /// Apply changes (default is dry-run preview)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    write: Option<bool>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON document with `title` and `content` keys
    #[arg(long, conflicts_with_all = ["title_file", "body_file", "title", "body"])]
    document: Option<PathBuf>,

    /// File holding the title field
    #[arg(long, conflicts_with_all = ["title", "body"])]
    title_file: Option<PathBuf>,

    /// File holding the body (markup) field
    #[arg(long, conflicts_with_all = ["title", "body"])]
    body_file: Option<PathBuf>,

    /// Inline title (`-` reads stdin, `@path` reads a file)
    #[arg(long)]
    title: Option<String>,

    /// Inline body markup (`-` reads stdin, `@path` reads a file)
    #[arg(long)]
    body: Option<String>,
}

#[derive(Serialize)]
pub struct ReplaceOutput {
    command: &'static str,
    search: String,
    replacement: String,
    options: ReplaceOptions,
    #[serde(flatten)]
    outcome: SurfaceOutcome,
}

pub fn run(args: ReplaceArgs) -> CmdResult<ReplaceOutput> {
    run_with_defaults(args, defaults::load_defaults())
}

/// Flags given on the command line win over `file_defaults`.
fn run_with_defaults(args: ReplaceArgs, file_defaults: Defaults) -> CmdResult<ReplaceOutput> {
    let options = ReplaceOptions::new(
        args.case_sensitive
            .unwrap_or(file_defaults.options.case_sensitive),
        args.whole_words.unwrap_or(file_defaults.options.whole_words),
    );
    let write = args.write.unwrap_or(file_defaults.write);

    let query = Query::new(args.search, args.replace);
    query.validate()?;

    let mut surface = open_surface(args.source)?;
    let outcome = apply_to_surface(surface.as_mut(), &query, options, write)?;

    Ok((
        ReplaceOutput {
            command: "replace",
            search: query.search,
            replacement: query.replacement,
            options,
            outcome,
        },
        0,
    ))
}

fn open_surface(source: SourceArgs) -> markswap::Result<Box<dyn DocumentSurface>> {
    if let Some(path) = source.document {
        return Ok(Box::new(ContentModel::open(&path)?));
    }

    if source.title_file.is_some() || source.body_file.is_some() {
        return Ok(Box::new(FormFields::new(source.title_file, source.body_file)));
    }

    if source.title.is_none() && source.body.is_none() {
        return Err(markswap::Error::validation_missing_argument(vec![
            "document".to_string(),
            "title-file".to_string(),
            "body-file".to_string(),
            "title".to_string(),
            "body".to_string(),
        ])
        .with_hint("Pass --document, --title-file/--body-file, or --title/--body"));
    }

    let title = source
        .title
        .map(|t| read_text_arg("title", &t))
        .transpose()?;
    let body = source
        .body
        .map(|b| read_text_arg("body", &b))
        .transpose()?;

    Ok(Box::new(InMemory::new(title, body)))
}
