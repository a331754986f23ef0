/*!
 * Tests for tokenization, edit scripts, and diff rendering
 */

use subcheck::diff::engine::DiffTag;
use subcheck::diff::terminal::{self, TerminalOptions};
use subcheck::diff::{FileDiff, TokenGranularity, Tokenizer, html};
use subcheck::subtitle_processor::SubtitleFile;

use crate::common;

fn parse(content: &str) -> SubtitleFile {
    SubtitleFile {
        source_file: "test.srt".into(),
        entries: SubtitleFile::parse(content).unwrap(),
    }
}

/// The canonical CJK correction case: one latin token swapped inside a CJK run
#[test]
fn test_word_diff_withCjkSurroundedSwap_shouldIsolateLatinTokens() {
    let original = parse(&common::CJK_SRT);
    let corrected = parse(&common::CJK_SRT_CORRECTED);

    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());
    let first = &diff.entries[0];
    assert!(first.changed);

    let deleted: Vec<&str> = first
        .word_spans
        .iter()
        .filter(|s| s.tag == DiffTag::Deleted)
        .map(|s| s.text.as_str())
        .collect();
    let inserted: Vec<&str> = first
        .word_spans
        .iter()
        .filter(|s| s.tag == DiffTag::Inserted)
        .map(|s| s.text.as_str())
        .collect();

    assert_eq!(deleted, vec!["Luncheon"]);
    assert_eq!(inserted, vec!["LangChain"]);
}

/// Words granularity keeps CJK runs whole
#[test]
fn test_word_diff_withWordsGranularity_shouldTreatCjkRunAsOneToken() {
    let original = parse("1\n00:00:01,000 --> 00:00:02,000\n今天学习 Luncheon\n");
    let corrected = parse("1\n00:00:01,000 --> 00:00:02,000\n今天学习 LangChain\n");

    let tokenizer = Tokenizer::new(TokenGranularity::Words);
    let diff = FileDiff::compute(&original, &corrected, tokenizer);
    let spans = &diff.entries[0].word_spans;

    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].tag, DiffTag::Kept);
    assert_eq!(spans[0].text, "今天学习");
}

/// Terminal render hides unchanged entries unless asked for all
#[test]
fn test_terminal_render_withDefaultOptions_shouldSuppressUnchanged() {
    let original = parse(&common::SAMPLE_SRT);
    let corrected = parse(&common::SAMPLE_SRT_CORRECTED);
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let options = TerminalOptions {
        color: false,
        ..TerminalOptions::default()
    };
    let rendered = terminal::render(&diff, &options);

    assert!(rendered.contains("Found 1 text changes"));
    assert!(rendered.contains("[2] 00:00:05,000 --> 00:00:09,000"));
    assert!(rendered.contains("[-multiple-]"));
    assert!(rendered.contains("{+several+}"));
    assert!(!rendered.contains("[1]"));
    assert!(!rendered.contains("[3]"));
}

/// Terminal render includes everything with show_all
#[test]
fn test_terminal_render_withShowAll_shouldIncludeUnchanged() {
    let original = parse(&common::SAMPLE_SRT);
    let corrected = parse(&common::SAMPLE_SRT_CORRECTED);
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let options = TerminalOptions {
        show_all: true,
        color: false,
        ..TerminalOptions::default()
    };
    let rendered = terminal::render(&diff, &options);

    assert!(rendered.contains("[1]"));
    assert!(rendered.contains("(unchanged) This is a test subtitle."));
    assert!(rendered.contains("[3]"));
}

/// Simple mode prints whole lines with -/+ prefixes, no token markers
#[test]
fn test_terminal_render_withSimpleMode_shouldPrintWholeLines() {
    let original = parse(&common::SAMPLE_SRT);
    let corrected = parse(&common::SAMPLE_SRT_CORRECTED);
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let options = TerminalOptions {
        simple: true,
        color: false,
        ..TerminalOptions::default()
    };
    let rendered = terminal::render(&diff, &options);

    assert!(rendered.contains("  - It contains multiple entries."));
    assert!(rendered.contains("  + It contains several entries."));
    assert!(!rendered.contains("[-"));
}

/// Limit caps the output and reports the overflow
#[test]
fn test_terminal_render_withLimit_shouldReportOverflow() {
    let original = parse("1\n00:00:01,000 --> 00:00:02,000\naa\n\n2\n00:00:03,000 --> 00:00:04,000\nbb\n");
    let corrected = parse("1\n00:00:01,000 --> 00:00:02,000\nAA\n\n2\n00:00:03,000 --> 00:00:04,000\nBB\n");
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let options = TerminalOptions {
        color: false,
        limit: 1,
        ..TerminalOptions::default()
    };
    let rendered = terminal::render(&diff, &options);

    assert!(rendered.contains("[1]"));
    assert!(!rendered.contains("[2]"));
    assert!(rendered.contains("... and 1 more changes"));
}

/// HTML report includes every entry, changed or not, with a consistent summary
#[test]
fn test_html_render_withMixedEntries_shouldListAllEntries() {
    let original = parse(&common::SAMPLE_SRT);
    let corrected = parse(&common::SAMPLE_SRT_CORRECTED);
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let report = html::render(&diff);

    assert_eq!(report.matches("<tr class=").count(), 3);
    assert_eq!(report.matches("class=\"changed\"").count(), 1);
    assert!(report.contains("Total: 3"));
    assert!(report.contains("Changed: 1"));
    assert!(report.contains("Unchanged: 2"));
    assert!(report.contains("<!DOCTYPE html>"));
    assert!(report.contains("</html>"));
}

/// HTML output escapes markup found in subtitle text
#[test]
fn test_html_render_withMarkupInText_shouldEscapeIt() {
    let original = parse("1\n00:00:01,000 --> 00:00:02,000\n<i>hello</i> & more\n");
    let corrected = parse("1\n00:00:01,000 --> 00:00:02,000\n<i>hullo</i> & more\n");
    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    let report = html::render(&diff);
    assert!(report.contains("&lt;i&gt;"));
    assert!(report.contains("&amp;"));
    assert!(!report.contains("<i>hello</i>"));
}
