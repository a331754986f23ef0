/*!
 * Script-aware tokenization for word-level diffs.
 *
 * Subtitle text for spoken Chinese content mixes CJK runs with latin
 * identifiers ("LangChain", "checkpointer"). A whitespace-only split would
 * treat a whole CJK sentence as one token and drown any real change, so
 * the default granularity emits one token per CJK glyph and whole tokens
 * for latin/number runs. The granularity is configuration on the
 * tokenizer, not inline script sniffing at call sites.
 */

/// How text is cut into diffable tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenGranularity {
    /// Single-character tokens for CJK runs, whole words for latin runs
    #[default]
    Mixed,
    /// Whitespace-delimited words only, regardless of script
    Words,
}

/// What kind of text a token holds; drives spacing when spans are re-joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A single CJK glyph (or a CJK run under `Words` granularity)
    Cjk,
    /// A latin/number/punctuation run delimited by whitespace
    Word,
}

/// One diffable unit of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's text
    pub text: String,
    /// Script classification of the token
    pub kind: TokenKind,
}

impl Token {
    fn new(text: String, kind: TokenKind) -> Self {
        Token { text, kind }
    }
}

/// Configurable text tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    /// Selected granularity
    pub granularity: TokenGranularity,
}

impl Tokenizer {
    /// Create a tokenizer with the given granularity
    pub fn new(granularity: TokenGranularity) -> Self {
        Tokenizer { granularity }
    }

    /// Cut text into tokens; whitespace always delimits and is dropped
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();
        let mut buffer_kind = TokenKind::Word;

        let flush = |tokens: &mut Vec<Token>, buffer: &mut String, kind: TokenKind| {
            if !buffer.is_empty() {
                tokens.push(Token::new(std::mem::take(buffer), kind));
            }
        };

        for c in text.chars() {
            if c.is_whitespace() {
                flush(&mut tokens, &mut buffer, buffer_kind);
                continue;
            }

            if is_cjk(c) && self.granularity == TokenGranularity::Mixed {
                flush(&mut tokens, &mut buffer, buffer_kind);
                tokens.push(Token::new(c.to_string(), TokenKind::Cjk));
                continue;
            }

            if buffer.is_empty() {
                buffer_kind = if is_cjk(c) { TokenKind::Cjk } else { TokenKind::Word };
            }
            buffer.push(c);
        }

        flush(&mut tokens, &mut buffer, buffer_kind);
        tokens
    }
}

/// Join tokens back into display text.
///
/// A space is restored between adjacent word tokens; CJK glyphs join
/// directly. Display reconstruction only, not a byte-exact round trip.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_kind: Option<TokenKind> = None;

    for token in tokens {
        if prev_kind == Some(TokenKind::Word) && token.kind == TokenKind::Word {
            out.push(' ');
        }
        out.push_str(&token.text);
        prev_kind = Some(token.kind);
    }

    out
}

/// Whether a character belongs to a CJK script
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF        // CJK Unified Ideographs
        | 0x3400..=0x4DBF      // CJK Extension A
        | 0x3040..=0x309F      // Hiragana
        | 0x30A0..=0x30FF      // Katakana
        | 0xAC00..=0xD7AF      // Hangul syllables
        | 0x3000..=0x303F      // CJK symbols and punctuation
        | 0xFF00..=0xFFEF      // Fullwidth forms
    )
}
