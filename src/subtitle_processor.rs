use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, ParseError};
use crate::file_utils::FileManager;

// @module: Subtitle parsing and serialization

// @const: SRT timestamp-range regex, capturing both raw timestamp strings
static TIMESTAMP_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})$").unwrap()
});

/// A single subtitle entry: one indexed, timestamped block of text.
///
/// Timestamps are kept as the raw strings read from the file so that
/// byte-for-byte preservation can be checked; any reformatting (dropped
/// zero-padding, changed separators) is itself an error to catch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    /// Sequence number declared on the block's first line
    pub index: usize,

    /// Start timestamp, raw `HH:MM:SS,mmm` string
    pub start_time: String,

    /// End timestamp, raw `HH:MM:SS,mmm` string
    pub end_time: String,

    /// The entire timestamp line exactly as read, spacing included
    pub raw_timestamp_line: String,

    /// Text lines of the entry; line breaks are semantically meaningful
    pub lines: Vec<String>,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry with a canonical timestamp line
    pub fn new(index: usize, start_time: &str, end_time: &str, lines: Vec<String>) -> Self {
        SubtitleEntry {
            index,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            raw_timestamp_line: format!("{} --> {}", start_time, end_time),
            lines,
        }
    }

    /// Joined entry text, with the original line breaks restored
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The `start --> end` range as shown in reports
    pub fn timestamp_range(&self) -> String {
        format!("{} --> {}", self.start_time, self.end_time)
    }

    /// Parse an SRT timestamp to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        // Parse HH:MM:SS,mmm format
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{}", self.raw_timestamp_line)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Ordered collection of subtitle entries parsed from one file
#[derive(Debug)]
pub struct SubtitleFile {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries, in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleFile {
    /// Read and parse an SRT file.
    ///
    /// I/O failures map to [`AppError::Io`]; grammar violations map to
    /// [`AppError::MalformedInput`] naming the file and the first offending
    /// block. A partially parsed file is never returned, since positional
    /// matching against a shifted sequence would mislead every downstream
    /// check.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;

        let entries = Self::parse(&content).map_err(|source| AppError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Parsed {} entries from {:?}", entries.len(), path);

        Ok(SubtitleFile {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT content into subtitle entries.
    ///
    /// Pure function: the same input always yields the same entries. Blocks
    /// are delimited by blank-line runs; leading and trailing blank lines
    /// are tolerated. Each block must carry an integer index line followed
    /// by a `HH:MM:SS,mmm --> HH:MM:SS,mmm` line; text lines are optional
    /// (a well-formed header with no text is accepted rather than rejected,
    /// real-world files do contain such entries).
    pub fn parse(content: &str) -> Result<Vec<SubtitleEntry>, ParseError> {
        let mut entries = Vec::new();

        for (block_num, block) in split_blocks(content).into_iter().enumerate() {
            let block_num = block_num + 1;
            entries.push(Self::parse_block(block_num, &block)?);
        }

        Ok(entries)
    }

    fn parse_block(block_num: usize, block: &[String]) -> Result<SubtitleEntry, ParseError> {
        if block.len() < 2 {
            return Err(ParseError::TruncatedBlock {
                block: block_num,
                snippet: block.join("\n"),
            });
        }

        let index: usize =
            block[0]
                .trim()
                .parse()
                .map_err(|_| ParseError::MissingIndex {
                    block: block_num,
                    snippet: block[0].clone(),
                })?;

        let raw_timestamp_line = block[1].trim().to_string();
        let caps = TIMESTAMP_RANGE_REGEX.captures(&raw_timestamp_line).ok_or_else(|| {
            ParseError::InvalidTimestampLine {
                block: block_num,
                index,
                snippet: raw_timestamp_line.clone(),
            }
        })?;

        let start_time = caps[1].to_string();
        let end_time = caps[2].to_string();
        let lines: Vec<String> = block[2..].to_vec();

        if lines.is_empty() {
            warn!("Entry {} has no text lines", index);
        }

        Ok(SubtitleEntry {
            index,
            start_time,
            end_time,
            raw_timestamp_line,
            lines,
        })
    }

    /// Number of entries in the file
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the collection back out as SRT text
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_string())
    }

    /// Count entries whose time range overlaps the next entry's start.
    ///
    /// Informational only; overlapping timing is a content concern, not a
    /// structural one, and unparsable timestamps never occur here because
    /// the grammar was already enforced.
    pub fn overlapping_entries(&self) -> usize {
        let mut overlap_count = 0;
        for pair in self.entries.windows(2) {
            let end = SubtitleEntry::parse_timestamp(&pair[0].end_time);
            let next_start = SubtitleEntry::parse_timestamp(&pair[1].start_time);
            if let (Ok(end_ms), Ok(start_ms)) = (end, next_start) {
                if end_ms > start_ms {
                    overlap_count += 1;
                }
            }
        }
        overlap_count
    }
}

impl fmt::Display for SubtitleFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Split raw content into blocks on blank-line runs, normalizing CRLF
fn split_blocks(content: &str) -> Vec<Vec<String>> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    // str::lines already strips the trailing '\r' of CRLF input
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
