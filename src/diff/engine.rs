/*!
 * Minimal edit scripts via longest-common-subsequence alignment.
 *
 * Subtitle entries are short (a handful of lines, tens of tokens), so the
 * classic O(n*m) DP table is cheap per entry pair.
 */

use serde::Serialize;

use super::tokenize::{Token, join_tokens};

/// Classification of a span within an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTag {
    /// Present in both sequences
    Kept,
    /// Present only in the original
    Deleted,
    /// Present only in the corrected version
    Inserted,
}

/// A contiguous run of same-tagged text in an edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSpan {
    /// Span classification
    pub tag: DiffTag,
    /// Span text, with adjacent tokens re-joined
    pub text: String,
}

impl DiffSpan {
    /// Create a span
    pub fn new(tag: DiffTag, text: impl Into<String>) -> Self {
        DiffSpan {
            tag,
            text: text.into(),
        }
    }
}

/// Ordered (tag, element) operations before span merging
enum EditOp<'a, T> {
    Kept(&'a T),
    Deleted(&'a T),
    Inserted(&'a T),
}

/// LCS backtrack producing one op per element of either sequence
fn edit_ops<'a, T: PartialEq>(a: &'a [T], b: &'a [T]) -> Vec<EditOp<'a, T>> {
    let n = a.len();
    let m = b.len();

    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(EditOp::Kept(&a[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(EditOp::Deleted(&a[i]));
            i += 1;
        } else {
            ops.push(EditOp::Inserted(&b[j]));
            j += 1;
        }
    }
    while i < n {
        ops.push(EditOp::Deleted(&a[i]));
        i += 1;
    }
    while j < m {
        ops.push(EditOp::Inserted(&b[j]));
        j += 1;
    }

    ops
}

/// Compute a token-level edit script, merging adjacent same-tag tokens
/// into spans with display spacing restored.
pub fn token_edit_script(original: &[Token], corrected: &[Token]) -> Vec<DiffSpan> {
    let ops = edit_ops(original, corrected);

    let mut spans: Vec<DiffSpan> = Vec::new();
    let mut run: Vec<Token> = Vec::new();
    let mut run_tag: Option<DiffTag> = None;

    let mut flush = |spans: &mut Vec<DiffSpan>, run: &mut Vec<Token>, tag: Option<DiffTag>| {
        if let Some(tag) = tag {
            if !run.is_empty() {
                spans.push(DiffSpan::new(tag, join_tokens(run)));
                run.clear();
            }
        }
    };

    for op in ops {
        let (tag, token) = match op {
            EditOp::Kept(t) => (DiffTag::Kept, t),
            EditOp::Deleted(t) => (DiffTag::Deleted, t),
            EditOp::Inserted(t) => (DiffTag::Inserted, t),
        };
        if run_tag != Some(tag) {
            flush(&mut spans, &mut run, run_tag);
            run_tag = Some(tag);
        }
        run.push(token.clone());
    }
    flush(&mut spans, &mut run, run_tag);

    spans
}

/// Compute a line-level edit script; granularity is the whole line.
pub fn line_edit_script(original: &[String], corrected: &[String]) -> Vec<DiffSpan> {
    let ops = edit_ops(original, corrected);

    let mut spans: Vec<DiffSpan> = Vec::new();
    for op in ops {
        let (tag, line) = match op {
            EditOp::Kept(l) => (DiffTag::Kept, l),
            EditOp::Deleted(l) => (DiffTag::Deleted, l),
            EditOp::Inserted(l) => (DiffTag::Inserted, l),
        };
        match spans.last_mut() {
            Some(span) if span.tag == tag => {
                span.text.push('\n');
                span.text.push_str(line);
            }
            _ => spans.push(DiffSpan::new(tag, line.clone())),
        }
    }

    spans
}
