/*!
 * Self-contained HTML diff report.
 *
 * Unlike the terminal view, the report always includes every entry,
 * changed or not, with three columns per entry (original, corrected,
 * inline diff). All styling is inline so the file opens from any
 * filesystem path with no external assets.
 */

use std::fmt::Write;

use super::engine::{DiffSpan, DiffTag};
use super::FileDiff;

const STYLE: &str = r#"
  body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2em auto; max-width: 70em; color: #222; }
  h1 { font-size: 1.4em; }
  .summary { background: #f4f6f8; border: 1px solid #d0d7de; border-radius: 6px; padding: 0.8em 1.2em; margin-bottom: 1.5em; }
  .summary span { margin-right: 2em; }
  .toc { margin-bottom: 1.5em; }
  .toc a { margin-right: 0.8em; text-decoration: none; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #d0d7de; padding: 0.5em 0.8em; vertical-align: top; text-align: left; }
  th { background: #f4f6f8; }
  tr.changed td.meta { background: #fff8e5; }
  td.meta { white-space: nowrap; color: #555; font-size: 0.85em; }
  del { color: #b31d28; background: #ffeef0; text-decoration: line-through; }
  ins { color: #22863a; background: #e6ffed; text-decoration: none; }
  .footer { margin-top: 2em; color: #888; font-size: 0.8em; }
"#;

/// Render the full HTML report as a single self-contained document
pub fn render(diff: &FileDiff) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>Subtitle correction diff</title>");
    let _ = writeln!(out, "<style>{}</style>", STYLE);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<h1>Subtitle correction diff</h1>");

    let _ = writeln!(
        out,
        "<div class=\"summary\"><span>Total: {}</span><span>Changed: {}</span><span>Unchanged: {}</span></div>",
        diff.total(),
        diff.changed_count(),
        diff.unchanged_count()
    );

    let changed: Vec<usize> = diff
        .entries
        .iter()
        .filter(|e| e.changed)
        .map(|e| e.original.index)
        .collect();
    if !changed.is_empty() {
        let _ = write!(out, "<div class=\"toc\">Changed entries: ");
        for index in &changed {
            let _ = write!(out, "<a href=\"#entry-{0}\">#{0}</a>", index);
        }
        let _ = writeln!(out, "</div>");
    }

    let _ = writeln!(out, "<table>");
    let _ = writeln!(
        out,
        "<tr><th>Entry</th><th>Original</th><th>Corrected</th><th>Diff</th></tr>"
    );

    for entry in &diff.entries {
        let row_class = if entry.changed { "changed" } else { "unchanged" };
        let _ = writeln!(
            out,
            "<tr class=\"{}\" id=\"entry-{}\">",
            row_class, entry.original.index
        );
        let _ = writeln!(
            out,
            "<td class=\"meta\">#{}<br>{}</td>",
            entry.original.index,
            escape(&entry.original.timestamp_range())
        );
        let _ = writeln!(out, "<td>{}</td>", escape_multiline(&entry.original.text()));
        let _ = writeln!(out, "<td>{}</td>", escape_multiline(&entry.corrected.text()));
        if entry.changed {
            let _ = writeln!(out, "<td>{}</td>", render_spans(&entry.word_spans));
        } else {
            let _ = writeln!(out, "<td>{}</td>", escape_multiline(&entry.original.text()));
        }
        let _ = writeln!(out, "</tr>");
    }

    let _ = writeln!(out, "</table>");
    let _ = writeln!(
        out,
        "<div class=\"footer\">Generated by subcheck on {}</div>",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");

    out
}

/// Render a token-level edit script as inline del/ins markup
fn render_spans(spans: &[DiffSpan]) -> String {
    let mut out = String::new();
    let mut first = true;

    for span in spans {
        if !first {
            out.push(' ');
        }
        first = false;

        match span.tag {
            DiffTag::Kept => out.push_str(&escape(&span.text)),
            DiffTag::Deleted => {
                let _ = write!(out, "<del>{}</del>", escape(&span.text));
            }
            DiffTag::Inserted => {
                let _ = write!(out, "<ins>{}</ins>", escape(&span.text));
            }
        }
    }

    out
}

/// Escape user text for HTML contexts
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_multiline(text: &str) -> String {
    text.lines()
        .map(escape)
        .collect::<Vec<_>>()
        .join("<br>")
}
