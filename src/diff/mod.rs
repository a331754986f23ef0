/*!
 * Word-level and line-level diffing between two parsed subtitle files.
 *
 * Entries are matched strictly by position in the ordered sequence, not by
 * content similarity: the structural validator has already confirmed
 * positional correspondence, and no fuzzy realignment is attempted after a
 * merge or split.
 *
 * Submodules:
 * - `tokenize`: script-aware tokenizer (CJK glyph tokens, latin word tokens)
 * - `engine`: LCS edit scripts over tokens and lines
 * - `terminal`: marker/ANSI rendering for the console
 * - `html`: self-contained HTML report
 */

pub mod engine;
pub mod html;
pub mod terminal;
pub mod tokenize;

pub use engine::{DiffSpan, DiffTag};
pub use tokenize::{TokenGranularity, Tokenizer};

use crate::subtitle_processor::{SubtitleEntry, SubtitleFile};

/// Diff of one positionally-matched entry pair
#[derive(Debug)]
pub struct EntryDiff<'a> {
    /// Original entry
    pub original: &'a SubtitleEntry,
    /// Corrected entry
    pub corrected: &'a SubtitleEntry,
    /// Whether the joined text differs at all
    pub changed: bool,
    /// Token-level edit script; empty when unchanged
    pub word_spans: Vec<DiffSpan>,
    /// Line-level edit script; empty when unchanged
    pub line_spans: Vec<DiffSpan>,
}

/// Diff of two whole files, holding read-only references into both
#[derive(Debug)]
pub struct FileDiff<'a> {
    /// Per-pair diffs, in file order
    pub entries: Vec<EntryDiff<'a>>,
}

impl<'a> FileDiff<'a> {
    /// Compare two files pairwise.
    ///
    /// Pairs beyond the shorter length are ignored; the validator reports
    /// the count mismatch separately.
    pub fn compute(
        original: &'a SubtitleFile,
        corrected: &'a SubtitleFile,
        tokenizer: Tokenizer,
    ) -> Self {
        let entries = original
            .entries
            .iter()
            .zip(corrected.entries.iter())
            .map(|(orig, corr)| Self::diff_pair(orig, corr, tokenizer))
            .collect();

        FileDiff { entries }
    }

    fn diff_pair(
        original: &'a SubtitleEntry,
        corrected: &'a SubtitleEntry,
        tokenizer: Tokenizer,
    ) -> EntryDiff<'a> {
        let orig_text = original.text();
        let corr_text = corrected.text();

        if orig_text == corr_text {
            return EntryDiff {
                original,
                corrected,
                changed: false,
                word_spans: Vec::new(),
                line_spans: Vec::new(),
            };
        }

        let word_spans = engine::token_edit_script(
            &tokenizer.tokenize(&orig_text),
            &tokenizer.tokenize(&corr_text),
        );
        let line_spans = engine::line_edit_script(&original.lines, &corrected.lines);

        EntryDiff {
            original,
            corrected,
            changed: true,
            word_spans,
            line_spans,
        }
    }

    /// Total number of compared pairs
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of pairs whose text changed
    pub fn changed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.changed).count()
    }

    /// Number of pairs whose text is identical
    pub fn unchanged_count(&self) -> usize {
        self.total() - self.changed_count()
    }
}
