//! Line-level diff between original and proposed file content.

use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Added,
    Removed,
    Unchanged,
}

/// One run of consecutive lines sharing a diff tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Compute line-level diff segments between `before` and `after`.
///
/// Identical inputs produce a single `Unchanged` segment (or none when both
/// are empty), never a spurious remove/add pair.
pub fn diff_lines(before: &str, after: &str) -> Vec<DiffSegment> {
    let diff = TextDiff::from_lines(before, after);
    let mut segments: Vec<DiffSegment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Equal => SegmentKind::Unchanged,
        };
        let value = change.value();
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(value),
            _ => segments.push(DiffSegment {
                kind,
                text: value.to_string(),
            }),
        }
    }
    segments
}

/// True when the diff contains any added or removed segment.
pub fn has_changes(segments: &[DiffSegment]) -> bool {
    segments
        .iter()
        .any(|s| matches!(s.kind, SegmentKind::Added | SegmentKind::Removed))
}
