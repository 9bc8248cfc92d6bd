//! Lexical segmentation of markup into tag and text runs.
//!
//! Any `<...>` token without a `>` inside is a tag. This is not an HTML parser:
//! nesting is not validated and `<script>`/`<style>` bodies are ordinary text.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Tag,
    Text,
}

/// A maximal run of the input, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub content: &'a str,
}

impl<'a> Segment<'a> {
    pub fn tag(content: &'a str) -> Self {
        Self {
            kind: SegmentKind::Tag,
            content,
        }
    }

    pub fn text(content: &'a str) -> Self {
        Self {
            kind: SegmentKind::Text,
            content,
        }
    }

    pub fn is_tag(&self) -> bool {
        self.kind == SegmentKind::Tag
    }
}

/// Split `markup` into ordered tag and text segments.
///
/// Segments partition the input with no gaps or overlaps, so
/// `join_segments(&segment(m)) == m` for every `m`. Empty text runs are not
/// emitted; empty input yields no segments.
pub fn segment(markup: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for tag in TAG_PATTERN.find_iter(markup) {
        if tag.start() > cursor {
            segments.push(Segment::text(&markup[cursor..tag.start()]));
        }
        segments.push(Segment::tag(tag.as_str()));
        cursor = tag.end();
    }

    if cursor < markup.len() {
        segments.push(Segment::text(&markup[cursor..]));
    }

    segments
}

/// Concatenate segment contents in order.
pub fn join_segments(segments: &[Segment<'_>]) -> String {
    let len = segments.iter().map(|s| s.content.len()).sum();
    let mut out = String::with_capacity(len);
    for seg in segments {
        out.push_str(seg.content);
    }
    out
}
