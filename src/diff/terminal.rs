/*!
 * Terminal rendering of entry diffs.
 *
 * Word mode wraps deleted spans `[-text-]` and inserted spans `{+text+}`,
 * optionally ANSI-colored. Simple mode prints original lines then
 * corrected lines with `-`/`+` prefixes, a coarser fallback when token
 * highlighting hurts readability on heavily restructured sentences.
 */

use std::fmt::Write;

use super::engine::{DiffSpan, DiffTag};
use super::{EntryDiff, FileDiff};

const ANSI_RED: &str = "\x1B[31m";
const ANSI_GREEN: &str = "\x1B[32m";
const ANSI_RESET: &str = "\x1B[0m";

/// Rendering options for terminal output
#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    /// Include unchanged entries as well
    pub show_all: bool,
    /// Line mode instead of token highlighting
    pub simple: bool,
    /// Emit ANSI colors
    pub color: bool,
    /// Max entries to print; 0 means unlimited
    pub limit: usize,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        TerminalOptions {
            show_all: false,
            simple: false,
            color: true,
            limit: 50,
        }
    }
}

/// Render a file diff for the console
pub fn render(diff: &FileDiff, options: &TerminalOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Found {} text changes:\n", diff.changed_count());

    let selected: Vec<&EntryDiff> = diff
        .entries
        .iter()
        .filter(|e| e.changed || options.show_all)
        .collect();

    let shown = if options.limit == 0 {
        selected.len()
    } else {
        selected.len().min(options.limit)
    };

    for entry in &selected[..shown] {
        let _ = writeln!(
            out,
            "[{}] {}",
            entry.original.index,
            entry.original.timestamp_range()
        );

        if !entry.changed {
            let _ = writeln!(out, "  (unchanged) {}", entry.original.text());
        } else if options.simple {
            for line in &entry.original.lines {
                let _ = writeln!(out, "  - {}", paint(line, ANSI_RED, options.color));
            }
            for line in &entry.corrected.lines {
                let _ = writeln!(out, "  + {}", paint(line, ANSI_GREEN, options.color));
            }
        } else {
            let _ = writeln!(out, "  {}", render_word_spans(&entry.word_spans, options.color));
        }
        let _ = writeln!(out);
    }

    if selected.len() > shown {
        let _ = writeln!(out, "... and {} more changes", selected.len() - shown);
    }

    out
}

/// Render one token-level edit script as a single marked-up line
pub fn render_word_spans(spans: &[DiffSpan], color: bool) -> String {
    let mut out = String::new();
    let mut first = true;

    for span in spans {
        if !first {
            out.push(' ');
        }
        first = false;

        match span.tag {
            DiffTag::Kept => out.push_str(&span.text),
            DiffTag::Deleted => {
                out.push_str(&paint(&format!("[-{}-]", span.text), ANSI_RED, color));
            }
            DiffTag::Inserted => {
                out.push_str(&paint(&format!("{{+{}+}}", span.text), ANSI_GREEN, color));
            }
        }
    }

    out
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}
