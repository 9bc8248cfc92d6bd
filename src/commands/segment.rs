use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use markswap::replace::{segment, SegmentKind};

use super::{read_text_arg, CmdResult};

#[derive(Args)]
pub struct SegmentArgs {
    /// Markup file to segment
    #[arg(long, conflicts_with = "markup")]
    file: Option<PathBuf>,

    /// Inline markup (`-` reads stdin)
    #[arg(long)]
    markup: Option<String>,
}

#[derive(Serialize)]
pub struct SegmentOutput {
    command: &'static str,
    total: usize,
    tags: usize,
    texts: usize,
    segments: Vec<SegmentEntry>,
}

#[derive(Serialize)]
pub struct SegmentEntry {
    kind: SegmentKind,
    offset: usize,
    content: String,
}

pub fn run(args: SegmentArgs) -> CmdResult<SegmentOutput> {
    let markup = match (args.file, args.markup) {
        (Some(path), _) => read_text_arg("file", &format!("@{}", path.display()))?,
        (None, Some(markup)) => read_text_arg("markup", &markup)?,
        (None, None) => {
            return Err(markswap::Error::validation_missing_argument(vec![
                "file".to_string(),
                "markup".to_string(),
            ]))
        }
    };

    let mut offset = 0;
    let mut segments = Vec::new();
    for seg in segment(&markup) {
        segments.push(SegmentEntry {
            kind: seg.kind,
            offset,
            content: seg.content.to_string(),
        });
        offset += seg.content.len();
    }

    let tags = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Tag)
        .count();

    Ok((
        SegmentOutput {
            command: "segment",
            total: segments.len(),
            tags,
            texts: segments.len() - tags,
            segments,
        },
        0,
    ))
}
