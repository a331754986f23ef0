/*!
 * Structural validation between an original and a corrected parse.
 *
 * Checks, each independently reportable:
 * - Entry-count equality
 * - Pairwise index equality at every position
 * - Exact timestamp-string equality (character-identical, not numeric)
 * - Whole timestamp-line preservation (catches spacing-only drift)
 *
 * All violations are collected rather than failing fast, so a single run
 * reports everything. Per-entry line-count deltas are recorded as
 * informational output, never as failures: a split or merge that happens
 * to preserve entry count and indices is not detectable here and must be
 * caught by the diff/review step.
 */

use log::debug;
use serde::Serialize;

use crate::subtitle_processor::SubtitleFile;

/// Which timestamp of the pair diverged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampField {
    Start,
    End,
}

impl std::fmt::Display for TimestampField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampField::Start => write!(f, "start"),
            TimestampField::End => write!(f, "end"),
        }
    }
}

/// A single structural violation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The two files hold a different number of entries
    EntryCountMismatch {
        original: usize,
        corrected: usize,
    },
    /// Index differs at a position (0-based position, both declared indices)
    IndexMismatch {
        position: usize,
        original: usize,
        corrected: usize,
    },
    /// A timestamp string changed; compared as raw text, since any
    /// reformatting is itself an error to catch
    TimestampMismatch {
        position: usize,
        index: usize,
        field: TimestampField,
        original: String,
        corrected: String,
    },
    /// Timestamps match but the timestamp line's formatting changed
    TimestampLineFormatChanged {
        position: usize,
        index: usize,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::EntryCountMismatch { original, corrected } => {
                write!(
                    f,
                    "Entry count mismatch: original={}, corrected={}",
                    original, corrected
                )
            }
            Violation::IndexMismatch {
                position,
                original,
                corrected,
            } => {
                write!(
                    f,
                    "Entry {}: Index mismatch (orig={}, corr={})",
                    position + 1,
                    original,
                    corrected
                )
            }
            Violation::TimestampMismatch {
                index,
                field,
                original,
                corrected,
                ..
            } => {
                write!(
                    f,
                    "Entry {}: {} time changed from '{}' to '{}'",
                    index, field, original, corrected
                )
            }
            Violation::TimestampLineFormatChanged { index, .. } => {
                write!(f, "Entry {}: Timestamp line formatting changed", index)
            }
        }
    }
}

/// Informational per-entry line-count delta (not a failure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineCountDelta {
    /// 0-based position in the file
    pub position: usize,
    /// Declared index of the original entry
    pub index: usize,
    /// Line count in the original entry
    pub original_lines: usize,
    /// Line count in the corrected entry
    pub corrected_lines: usize,
}

/// Result of a structural validation run
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether all structural checks passed
    pub pass: bool,
    /// Every violation found, in file order
    pub violations: Vec<Violation>,
    /// Entries whose line count changed; advisory, never a failure
    pub line_count_deltas: Vec<LineCountDelta>,
}

impl ValidationReport {
    fn from_violations(violations: Vec<Violation>, line_count_deltas: Vec<LineCountDelta>) -> Self {
        ValidationReport {
            pass: violations.is_empty(),
            violations,
            line_count_deltas,
        }
    }
}

/// Validator asserting that a correction preserved file structure
pub struct StructuralValidator;

impl StructuralValidator {
    /// Compare two parsed files and collect every structural violation.
    ///
    /// Never fails as a crash: the report always covers the whole input.
    /// On an entry-count mismatch, per-position checks are confined to the
    /// shorter length. Indices are not required to form a contiguous 1..N
    /// sequence, only to match pairwise; this is a before/after diff, not
    /// an absolute schema check.
    pub fn validate(original: &SubtitleFile, corrected: &SubtitleFile) -> ValidationReport {
        let mut violations = Vec::new();
        let mut line_count_deltas = Vec::new();

        if original.len() != corrected.len() {
            violations.push(Violation::EntryCountMismatch {
                original: original.len(),
                corrected: corrected.len(),
            });
        }

        let compared = original.len().min(corrected.len());
        debug!("Comparing {} entry pairs", compared);

        for (position, (orig, corr)) in original
            .entries
            .iter()
            .zip(corrected.entries.iter())
            .enumerate()
        {
            if orig.index != corr.index {
                violations.push(Violation::IndexMismatch {
                    position,
                    original: orig.index,
                    corrected: corr.index,
                });
            }

            if orig.start_time != corr.start_time {
                violations.push(Violation::TimestampMismatch {
                    position,
                    index: orig.index,
                    field: TimestampField::Start,
                    original: orig.start_time.clone(),
                    corrected: corr.start_time.clone(),
                });
            }

            if orig.end_time != corr.end_time {
                violations.push(Violation::TimestampMismatch {
                    position,
                    index: orig.index,
                    field: TimestampField::End,
                    original: orig.end_time.clone(),
                    corrected: corr.end_time.clone(),
                });
            }

            // Only reportable when both timestamps are unchanged, otherwise
            // the mismatch above already covers the line
            if orig.start_time == corr.start_time
                && orig.end_time == corr.end_time
                && orig.raw_timestamp_line != corr.raw_timestamp_line
            {
                violations.push(Violation::TimestampLineFormatChanged {
                    position,
                    index: orig.index,
                });
            }

            if orig.lines.len() != corr.lines.len() {
                line_count_deltas.push(LineCountDelta {
                    position,
                    index: orig.index,
                    original_lines: orig.lines.len(),
                    corrected_lines: corr.lines.len(),
                });
            }
        }

        ValidationReport::from_violations(violations, line_count_deltas)
    }
}
