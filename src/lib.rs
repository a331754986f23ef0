/*!
 * # subcheck - Subtitle correction validation and diff tool
 *
 * A Rust library and CLI for checking AI/human corrections to SRT subtitle
 * files. Correction itself happens elsewhere; this tool verifies that a
 * corrected file preserved the original's structure and visualizes what
 * changed.
 *
 * ## Features
 *
 * - Strict SRT parsing with byte-exact timestamp preservation
 * - Structural validation (entry count, index sequence, timestamp strings)
 * - Word-level diffs with CJK-aware tokenization, rendered for the
 *   terminal or as a self-contained HTML report
 * - Heuristic scanning for known speech-recognition error patterns
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: SRT parsing and serialization
 * - `validation`: structural validation of corrected files
 * - `diff`: tokenization, LCS edit scripts, terminal/HTML rendering
 * - `analyzer`: heuristic error-pattern analysis
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analyzer;
pub mod diff;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod validation;

// Re-export main types for easier usage
pub use analyzer::{Analyzer, CandidateIssue};
pub use diff::{FileDiff, TokenGranularity, Tokenizer};
pub use errors::{AppError, ParseError};
pub use subtitle_processor::{SubtitleEntry, SubtitleFile};
pub use validation::{StructuralValidator, ValidationReport, Violation};
