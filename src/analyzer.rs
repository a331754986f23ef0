/*!
 * Heuristic analysis of subtitle text for likely speech-recognition errors.
 *
 * Matches raw entry text against a static table of known problematic
 * tokens and phrases (homophone pairs, mis-transliterated proper nouns)
 * and, when user-supplied terms are given, flags tokens that are a close
 * surface match to a term without being equal to it. Advisory only: the
 * input is never mutated, and context-dependent patterns surface multiple
 * candidate suggestions for a human reviewer rather than an auto-applied
 * fix.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::diff::tokenize::{TokenKind, Tokenizer};
use crate::subtitle_processor::SubtitleFile;

/// One known error pattern and its candidate corrections
struct ErrorPattern {
    /// Compiled pattern matched against raw entry text
    regex: Regex,
    /// Pattern source, reported back to the reviewer
    raw: &'static str,
    /// Candidate corrections; more than one when context-dependent
    suggestions: &'static [&'static str],
    /// Short human-readable note on what the term means
    description: &'static str,
    /// A match immediately followed by this suffix is not an error
    /// (regex crate has no lookahead, so the guard is applied manually)
    reject_suffix: Option<&'static str>,
}

impl ErrorPattern {
    fn matches(&self, text: &str) -> bool {
        for m in self.regex.find_iter(text) {
            match self.reject_suffix {
                Some(suffix) if text[m.end()..].starts_with(suffix) => continue,
                _ => return true,
            }
        }
        false
    }
}

macro_rules! pattern {
    ($raw:literal => [$($sugg:literal),+], $desc:literal) => {
        ErrorPattern {
            regex: Regex::new($raw).unwrap(),
            raw: $raw,
            suggestions: &[$($sugg),+],
            description: $desc,
            reject_suffix: None,
        }
    };
    ($raw:literal => [$($sugg:literal),+], $desc:literal, not_before $suffix:literal) => {
        ErrorPattern {
            regex: Regex::new($raw).unwrap(),
            raw: $raw,
            suggestions: &[$($sugg),+],
            description: $desc,
            reject_suffix: Some($suffix),
        }
    };
}

// Known speech recognition error patterns; loaded once, immutable after.
static ERROR_PATTERNS: Lazy<Vec<ErrorPattern>> = Lazy::new(|| {
    vec![
        // Chinese phonetic errors
        pattern!("绘画" => ["会话"], "session/conversation context"),
        pattern!("源数据" => ["元数据"], "metadata"),
        pattern!("本科" => ["本课"], "this lesson"),
        pattern!("事例" => ["示例"], "example"),
        pattern!("中间键" => ["中间件"], "middleware"),
        pattern!("详细" => ["消息", "详细"], "message (context-dependent)"),
        // LangChain ecosystem
        pattern!("[Ll]uncheon" => ["langchain"], "LangChain package"),
        pattern!("蓝[犬卷]" => ["LangChain"], "LangChain framework"),
        pattern!("[Ll]antern" => ["LangChain"], "LangChain framework"),
        pattern!(r"land\s*GRAPH" => ["langgraph"], "LangGraph package"),
        pattern!(r"LAN\s*GRAPH" => ["langgraph"], "LangGraph package"),
        // OpenAI
        pattern!(r"open\s*EI" => ["OpenAI"], "OpenAI"),
        pattern!(r"open\s*Email" => ["OpenAI"], "OpenAI"),
        // Memory components
        pattern!(r"[Aa]\s*memory\s*[Ss]erver" => ["MemorySaver"], "Memory component"),
        pattern!("amneserver" => ["MemorySaver"], "Memory component"),
        pattern!(r"check\s*point" => ["checkpointer"], "Checkpointer component", not_before "er"),
        pattern!("Sharepoint" => ["checkpointer"], "Checkpointer component"),
        // Code terms
        pattern!(r"wrong\s*time" => ["runtime"], "runtime"),
        pattern!("confict" => ["config"], "configuration"),
    ]
});

/// One reported finding inside an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What matched (pattern source or the offending token)
    pub pattern: String,
    /// Candidate corrections, never auto-applied
    pub suggestions: Vec<String>,
    /// Why this is suspicious
    pub description: String,
}

/// All findings for one subtitle entry
#[derive(Debug, Clone, Serialize)]
pub struct CandidateIssue {
    /// Declared index of the entry
    pub index: usize,
    /// The entry's timestamp range, for locating it while reviewing
    pub timestamp: String,
    /// The entry's joined text
    pub text: String,
    /// Findings, in table order then term order
    pub findings: Vec<Finding>,
}

/// Analyzer over the static pattern table plus optional user terms
pub struct Analyzer {
    user_terms: Vec<String>,
}

impl Analyzer {
    /// Create an analyzer; `user_terms` are expected correct spellings
    /// (e.g. product names) used to catch near-miss transcriptions
    pub fn new(user_terms: Vec<String>) -> Self {
        Analyzer { user_terms }
    }

    /// Scan every entry and collect candidate issues, in file order.
    ///
    /// Bounded by entries x pattern-table size; the file is not modified.
    pub fn analyze(&self, file: &SubtitleFile) -> Vec<CandidateIssue> {
        let tokenizer = Tokenizer::default();
        let mut issues = Vec::new();

        for entry in &file.entries {
            let text = entry.text();
            let mut findings = Vec::new();

            for pattern in ERROR_PATTERNS.iter() {
                if pattern.matches(&text) {
                    findings.push(Finding {
                        pattern: pattern.raw.to_string(),
                        suggestions: pattern.suggestions.iter().map(|s| s.to_string()).collect(),
                        description: pattern.description.to_string(),
                    });
                }
            }

            // Spoken "underscore" in code contexts usually means a literal '_'
            if text.to_lowercase().contains("underscore") {
                findings.push(Finding {
                    pattern: "underscore".to_string(),
                    suggestions: vec!["_".to_string()],
                    description: "Likely a variable name with underscore".to_string(),
                });
            }

            findings.extend(self.match_user_terms(&tokenizer, &text));

            if !findings.is_empty() {
                issues.push(CandidateIssue {
                    index: entry.index,
                    timestamp: entry.timestamp_range(),
                    text,
                    findings,
                });
            }
        }

        debug!("Analyzer flagged {} of {} entries", issues.len(), file.len());
        issues
    }

    /// Flag latin tokens that nearly match a supplied term without being
    /// exactly equal to it: a probable misrecognition of that term.
    fn match_user_terms(&self, tokenizer: &Tokenizer, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        if self.user_terms.is_empty() {
            return findings;
        }

        let tokens = tokenizer.tokenize(text);
        for token in tokens.iter().filter(|t| t.kind == TokenKind::Word) {
            // Trailing punctuation stays inside word tokens; a correctly
            // spelled term followed by a comma is not a misrecognition
            let word = token.text.trim_matches(|c: char| c.is_ascii_punctuation());
            if word.is_empty() {
                continue;
            }
            for term in &self.user_terms {
                if is_near_miss(word, term) {
                    findings.push(Finding {
                        pattern: word.to_string(),
                        suggestions: vec![term.clone()],
                        description: format!("Close match to expected term '{}'", term),
                    });
                }
            }
        }

        findings
    }
}

/// Surface closeness between a transcribed token and an expected term.
///
/// Equal strings are not a miss. Close means: equal ignoring case, one
/// containing the other (for terms of 4+ chars and tokens of 3+ chars,
/// so stopwords like "in" or "a" never match a longer term), or within
/// a small length-scaled edit distance.
fn is_near_miss(token: &str, term: &str) -> bool {
    if token == term {
        return false;
    }

    let token_lower = token.to_lowercase();
    let term_lower = term.to_lowercase();

    if token_lower == term_lower {
        return true;
    }

    if term_lower.len() >= 4
        && token_lower.chars().count() >= 3
        && (token_lower.contains(&term_lower) || term_lower.contains(&token_lower))
    {
        return true;
    }

    let max_distance = if term_lower.chars().count() <= 4 { 1 } else { 2 };
    levenshtein(&token_lower, &term_lower) <= max_distance
}

/// Classic two-row Levenshtein distance over chars
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
