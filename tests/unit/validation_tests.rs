/*!
 * Tests for structural validation of corrected files
 */

use anyhow::Result;
use subcheck::subtitle_processor::SubtitleFile;
use subcheck::validation::{StructuralValidator, Violation};

use crate::common;

/// Test that pure text corrections pass validation
#[test]
fn test_validate_withTextOnlyCorrection_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = common::create_test_file(temp_dir.path(), "orig.srt", common::SAMPLE_SRT)?;
    let corrected =
        common::create_test_file(temp_dir.path(), "corr.srt", common::SAMPLE_SRT_CORRECTED)?;

    let report = StructuralValidator::validate(
        &SubtitleFile::load(&original)?,
        &SubtitleFile::load(&corrected)?,
    );

    assert!(report.pass);
    assert!(report.violations.is_empty());
    Ok(())
}

/// Test every violation is collected rather than failing fast
#[test]
fn test_validate_withMultipleViolations_shouldCollectAll() {
    let original = SubtitleFile {
        source_file: "orig.srt".into(),
        entries: SubtitleFile::parse(
            "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n",
        )
        .unwrap(),
    };
    let corrected = SubtitleFile {
        source_file: "corr.srt".into(),
        entries: SubtitleFile::parse(
            "1\n00:00:01,000 --> 00:00:02,500\nA\n\n3\n00:00:03,000 --> 00:00:04,000\nB\n",
        )
        .unwrap(),
    };

    let report = StructuralValidator::validate(&original, &corrected);
    assert!(!report.pass);
    assert_eq!(report.violations.len(), 2);
    assert!(report
        .violations
        .iter()
        .any(|v| matches!(v, Violation::TimestampMismatch { position: 0, .. })));
    assert!(report
        .violations
        .iter()
        .any(|v| matches!(v, Violation::IndexMismatch { position: 1, .. })));
}

/// Test violation display matches the report wording reviewers rely on
#[test]
fn test_violation_display_withIndexMismatch_shouldNamePositionAndValues() {
    let violation = Violation::IndexMismatch {
        position: 4,
        original: 5,
        corrected: 6,
    };
    assert_eq!(violation.to_string(), "Entry 5: Index mismatch (orig=5, corr=6)");
}

/// Test the report serializes to tagged JSON for machine consumers
#[test]
fn test_report_serialization_withViolations_shouldTagKinds() {
    let original = SubtitleFile {
        source_file: "orig.srt".into(),
        entries: SubtitleFile::parse("1\n00:00:01,000 --> 00:00:02,000\nA\n").unwrap(),
    };
    let corrected = SubtitleFile {
        source_file: "corr.srt".into(),
        entries: vec![],
    };

    let report = StructuralValidator::validate(&original, &corrected);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["pass"], false);
    assert_eq!(json["violations"][0]["kind"], "entry_count_mismatch");
    assert_eq!(json["violations"][0]["original"], 1);
    assert_eq!(json["violations"][0]["corrected"], 0);
}
