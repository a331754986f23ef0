// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::analyzer::Analyzer;
use crate::diff::terminal::TerminalOptions;
use crate::diff::{FileDiff, Tokenizer, html, terminal};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleFile;
use crate::validation::StructuralValidator;

mod analyzer;
mod diff;
mod errors;
mod file_utils;
mod subtitle_processor;
mod validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate that a corrected file preserved the original's structure
    Validate {
        /// Original SRT file
        original: PathBuf,

        /// Corrected SRT file
        corrected: PathBuf,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show text differences between original and corrected files
    Diff(DiffArgs),

    /// Analyze a file for likely speech-recognition errors
    Analyze {
        /// Input SRT file
        input: PathBuf,

        /// Comma-separated list of expected terms (e.g. "LangChain,OpenAI")
        #[arg(long)]
        terms: Option<String>,

        /// Emit candidate issues as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions for subcheck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// Original SRT file
    original: PathBuf,

    /// Corrected SRT file
    corrected: PathBuf,

    /// Include unchanged entries in the output
    #[arg(long)]
    all: bool,

    /// Write a self-contained HTML report to this path instead of printing
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Line-level output without word highlighting
    #[arg(long)]
    simple: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Max entries to print (0 = unlimited)
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

/// subcheck - subtitle correction checker
///
/// Validates and visualizes corrections to SRT subtitle files. An external
/// workflow writes the corrected file; subcheck verifies that structure
/// (entry count, indices, exact timestamps) survived and shows what changed.
#[derive(Parser, Debug)]
#[command(name = "subcheck")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle correction validation and diff tool")]
#[command(long_about = "subcheck validates corrected SRT subtitle files against their originals,
renders word-level diffs, and scans for common speech-recognition errors.

EXAMPLES:
    subcheck validate original.srt original-corrected.srt
    subcheck diff original.srt original-corrected.srt
    subcheck diff original.srt original-corrected.srt --html report.html
    subcheck diff original.srt original-corrected.srt --simple --no-color
    subcheck analyze input.srt --terms \"LangChain,OpenAI,Agent\"
    subcheck completions bash > subcheck.bash

EXIT CODES:
    validate  0 if structurally valid, 1 otherwise
    diff      0 on success, non-zero on read/parse failure
    analyze   0 unless the input is unreadable or unparsable")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    let cli = CommandLineOptions::parse();

    let level = cli
        .log_level
        .clone()
        .map(LevelFilter::from)
        .unwrap_or(LevelFilter::Info);
    if let Err(e) = CustomLogger::init(level) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<ExitCode> {
    match cli.command {
        Commands::Validate {
            original,
            corrected,
            json,
        } => run_validate(&original, &corrected, json),
        Commands::Diff(args) => run_diff(&args),
        Commands::Analyze { input, terms, json } => run_analyze(&input, terms.as_deref(), json),
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcheck", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_validate(original: &PathBuf, corrected: &PathBuf, json: bool) -> Result<ExitCode> {
    let original_file = SubtitleFile::load(original)?;
    let corrected_file = SubtitleFile::load(corrected)?;

    let report = StructuralValidator::validate(&original_file, &corrected_file);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
        return Ok(if report.pass {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("Validating: {}", corrected.display());
    println!("Against:    {}\n", original.display());

    if report.pass {
        println!("✅ Validation PASSED");
        println!("   - Entry counts match");
        println!("   - All timestamps preserved");
        println!("   - All indices preserved");
    } else {
        println!("❌ Validation FAILED");
        println!("   Found {} issue(s):\n", report.violations.len());
        for violation in report.violations.iter().take(20) {
            println!("   - {}", violation);
        }
        if report.violations.len() > 20 {
            println!("   ... and {} more issues", report.violations.len() - 20);
        }
    }

    // Advisory only: a line-count change is legal but worth a reviewer's eye
    for delta in &report.line_count_deltas {
        info!(
            "Entry {}: line count changed {} -> {}",
            delta.index, delta.original_lines, delta.corrected_lines
        );
    }

    Ok(if report.pass {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_diff(args: &DiffArgs) -> Result<ExitCode> {
    let original = SubtitleFile::load(&args.original)?;
    let corrected = SubtitleFile::load(&args.corrected)?;

    if original.len() != corrected.len() {
        warn!(
            "Entry counts differ (original={}, corrected={}); comparing the first {} entries only",
            original.len(),
            corrected.len(),
            original.len().min(corrected.len())
        );
    }

    let diff = FileDiff::compute(&original, &corrected, Tokenizer::default());

    if let Some(html_path) = &args.html {
        let report = html::render(&diff);
        FileManager::write_to_file(html_path, &report)?;
        info!(
            "HTML report written to {:?} ({} entries, {} changed)",
            html_path,
            diff.total(),
            diff.changed_count()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let options = TerminalOptions {
        show_all: args.all,
        simple: args.simple,
        color: !args.no_color,
        limit: args.limit,
    };
    print!("{}", terminal::render(&diff, &options));

    Ok(ExitCode::SUCCESS)
}

fn run_analyze(input: &PathBuf, terms: Option<&str>, json: bool) -> Result<ExitCode> {
    let file = SubtitleFile::load(input)?;

    let user_terms: Vec<String> = terms
        .map(|t| {
            t.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let issues = Analyzer::new(user_terms).analyze(&file);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&issues).context("Failed to serialize issues")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} entries with potential issues:\n", issues.len());

    for item in issues.iter().take(30) {
        println!("[{}] {}", item.index, item.timestamp);
        println!("  Text: {}", truncate_chars(&item.text, 60));
        for finding in &item.findings {
            println!(
                "    → '{}' might be '{}' ({})",
                finding.pattern,
                finding.suggestions.join("' or '"),
                finding.description
            );
        }
        println!();
    }

    if issues.len() > 30 {
        println!("... and {} more entries with potential issues", issues.len() - 30);
    }

    Ok(ExitCode::SUCCESS)
}

/// Char-safe truncation with an ellipsis marker for display
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
