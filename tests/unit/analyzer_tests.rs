/*!
 * Tests for the heuristic analyzer
 */

use anyhow::Result;
use subcheck::analyzer::Analyzer;
use subcheck::subtitle_processor::SubtitleFile;

use crate::common;

fn parse(content: &str) -> SubtitleFile {
    SubtitleFile {
        source_file: "test.srt".into(),
        entries: SubtitleFile::parse(content).unwrap(),
    }
}

/// The static table flags the Lantern -> LangChain mis-transcription
#[test]
fn test_analyze_withLanternPhrase_shouldReportPatternIssue() {
    let file = parse("1\n00:00:01,000 --> 00:00:02,000\n正常内容\n\n2\n00:00:03,000 --> 00:00:04,000\n用了Lantern\n");
    let issues = Analyzer::new(vec![]).analyze(&file);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].index, 2);
    assert_eq!(issues[0].timestamp, "00:00:03,000 --> 00:00:04,000");
    let finding = &issues[0].findings[0];
    assert_eq!(finding.pattern, "[Ll]antern");
    assert_eq!(finding.suggestions, vec!["LangChain"]);
}

/// Chinese homophone pairs from the static table are detected
#[test]
fn test_analyze_withHomophoneErrors_shouldReportEachEntry() {
    let file = parse(&common::CJK_SRT);
    let issues = Analyzer::new(vec![]).analyze(&file);

    // Entry 1 carries Luncheon, entry 2 carries 绘画
    assert_eq!(issues.len(), 2);
    assert!(issues[0].findings.iter().any(|f| f.pattern == "[Ll]uncheon"));
    assert!(issues[1]
        .findings
        .iter()
        .any(|f| f.suggestions.contains(&"会话".to_string())));
}

/// Context-dependent patterns surface multiple candidate suggestions
#[test]
fn test_analyze_withContextDependentPattern_shouldOfferAlternatives() {
    let file = parse("1\n00:00:01,000 --> 00:00:02,000\n发送详细给服务端\n");
    let issues = Analyzer::new(vec![]).analyze(&file);

    assert_eq!(issues.len(), 1);
    let finding = issues[0]
        .findings
        .iter()
        .find(|f| f.pattern == "详细")
        .expect("详细 should be flagged");
    assert!(finding.suggestions.len() > 1);
}

/// A corrected file with none of the known patterns reports nothing
#[test]
fn test_analyze_withCleanFile_shouldReportNothing() {
    let file = parse(&common::CJK_SRT_CORRECTED);
    let issues = Analyzer::new(vec![]).analyze(&file);
    assert!(issues.is_empty());
}

/// User-term near misses are flagged; the exact term is not
#[test]
fn test_analyze_withUserTerms_shouldFlagSurfaceMatches() {
    let file = parse(
        "1\n00:00:01,000 --> 00:00:02,000\nOpenAI works fine\n\n2\n00:00:03,000 --> 00:00:04,000\nOpenEI is close\n",
    );
    let issues = Analyzer::new(vec!["OpenAI".to_string()]).analyze(&file);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].index, 2);
    assert_eq!(issues[0].findings[0].pattern, "OpenEI");
    assert_eq!(issues[0].findings[0].suggestions, vec!["OpenAI"]);
}

/// A correctly spelled term with trailing punctuation and nearby stopwords
/// is not a misrecognition of itself
#[test]
fn test_analyze_withPunctuatedCorrectTermAndStopwords_shouldReportNothing() {
    let file = parse(
        "1\n00:00:01,000 --> 00:00:02,000\nWe use LangChain, as expected in a demo\n",
    );
    let issues = Analyzer::new(vec!["LangChain".to_string()]).analyze(&file);
    assert!(issues.is_empty());
}

/// Punctuation is stripped before matching, so a punctuated near miss is
/// still flagged, reported without the punctuation
#[test]
fn test_analyze_withPunctuatedNearMiss_shouldFlagStrippedToken() {
    let file = parse("1\n00:00:01,000 --> 00:00:02,000\nWe use Langchain, of course\n");
    let issues = Analyzer::new(vec!["LangChain".to_string()]).analyze(&file);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].findings[0].pattern, "Langchain");
    assert_eq!(issues[0].findings[0].suggestions, vec!["LangChain"]);
}

/// Split-token fragments of a term are still close surface matches
#[test]
fn test_analyze_withSplitTermFragment_shouldStillFlag() {
    let file = parse("1\n00:00:01,000 --> 00:00:02,000\nthe Chain docs\n");
    let issues = Analyzer::new(vec!["LangChain".to_string()]).analyze(&file);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].findings[0].pattern, "Chain");
}

/// Issues serialize for --json consumers
#[test]
fn test_analyze_serialization_withIssues_shouldEmitJson() -> Result<()> {
    let file = parse("1\n00:00:01,000 --> 00:00:02,000\n用了Lantern\n");
    let issues = Analyzer::new(vec![]).analyze(&file);

    let json = serde_json::to_value(&issues)?;
    assert_eq!(json[0]["index"], 1);
    assert_eq!(json[0]["findings"][0]["pattern"], "[Ll]antern");
    Ok(())
}

/// The analyzer never mutates its input
#[test]
fn test_analyze_withAnyInput_shouldLeaveFileUntouched() {
    let file = parse(&common::CJK_SRT);
    let before: Vec<String> = file.entries.iter().map(|e| e.text()).collect();

    let _ = Analyzer::new(vec!["LangChain".to_string()]).analyze(&file);

    let after: Vec<String> = file.entries.iter().map(|e| e.text()).collect();
    assert_eq!(before, after);
}
