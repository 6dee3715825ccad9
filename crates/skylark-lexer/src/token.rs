//! Token definitions.

use std::fmt;
use std::sync::Arc;

/// A span in the normalized source, as a range of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this span in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token produced by the tokenizer.
///
/// Tokens are immutable once emitted. Position fields locate the token in
/// the normalized source: `line` is 1-based, `col` is 0-based, and `span`
/// holds absolute character offsets usable to slice the original text back
/// out (for source maps and comment-preserving output).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token, carrying its decoded value.
    pub kind: TokenKind,
    /// The character-offset span in the normalized source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 0-based column of the first character.
    pub col: u32,
    /// True if a line terminator occurred between this token and the
    /// previous non-comment token, including inside skipped comments.
    pub newline_before: bool,
    /// Comment tokens collected since the previous emitted non-comment
    /// token. Always empty on comment tokens themselves.
    pub comments_before: Vec<Token>,
    /// Diagnostic label of the input this token came from.
    pub source_name: Arc<str>,
}

impl Token {
    /// True for the given punctuation character.
    pub fn is_punc(&self, ch: char) -> bool {
        matches!(&self.kind, TokenKind::Punc(p) if *p == ch)
    }

    /// True for the given operator text.
    pub fn is_operator(&self, op: &str) -> bool {
        matches!(&self.kind, TokenKind::Operator(o) if o == op)
    }

    /// True for the given keyword.
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Keyword(w) if w == word)
    }
}

/// The kinds of token, each carrying its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier name (including reserved words that are not keywords,
    /// and keywords appearing after `.`).
    Name(String),
    /// Keyword.
    Keyword(String),
    /// Value-literal keyword: `true`, `false`, `null`.
    Atom(String),
    /// Operator, by its source text. Word operators such as `typeof` and
    /// `instanceof` appear here, not under `Keyword`.
    Operator(String),
    /// Single punctuation character from `[]{}(),;:` or `.`.
    Punc(char),
    /// String literal, with escapes decoded.
    Str(String),
    /// Numeric literal, converted to its floating-point value.
    Num(f64),
    /// Regular expression literal as an undecoded pattern plus flags.
    RegExp {
        /// The pattern text between the delimiting slashes, backslash
        /// escapes preserved.
        pattern: String,
        /// The trailing flags, unvalidated.
        flags: String,
    },
    /// `//` comment, body only.
    LineComment(String),
    /// `/* */` comment, body only.
    BlockComment(String),
    /// End of input. Emitted exactly once per source.
    Eof,
}

impl TokenKind {
    /// Returns true if this is a comment token.
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment(_) | TokenKind::BlockComment(_))
    }

    /// Returns true if this is the end-of-input token.
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    /// A short category label for diagnostics and dumps.
    pub fn description(&self) -> &'static str {
        match self {
            TokenKind::Name(_) => "name",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Atom(_) => "atom",
            TokenKind::Operator(_) => "operator",
            TokenKind::Punc(_) => "punc",
            TokenKind::Str(_) => "string",
            TokenKind::Num(_) => "num",
            TokenKind::RegExp { .. } => "regexp",
            TokenKind::LineComment(_) => "comment1",
            TokenKind::BlockComment(_) => "comment2",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(s)
            | TokenKind::Keyword(s)
            | TokenKind::Atom(s)
            | TokenKind::Operator(s)
            | TokenKind::Str(s)
            | TokenKind::LineComment(s)
            | TokenKind::BlockComment(s) => f.write_str(s),
            TokenKind::Punc(ch) => write!(f, "{ch}"),
            TokenKind::Num(n) => write!(f, "{n}"),
            TokenKind::RegExp { pattern, flags } => write!(f, "/{pattern}/{flags}"),
            TokenKind::Eof => f.write_str("<eof>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(5, 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(Span::new(5, 5).is_empty());
    }

    #[test]
    fn kind_predicates() {
        assert!(TokenKind::LineComment("x".into()).is_comment());
        assert!(TokenKind::BlockComment("x".into()).is_comment());
        assert!(!TokenKind::Name("x".into()).is_comment());
        assert!(TokenKind::Eof.is_eof());
        assert!(!TokenKind::Punc('.').is_eof());
    }

    #[test]
    fn descriptions() {
        assert_eq!(TokenKind::Num(1.0).description(), "num");
        assert_eq!(TokenKind::LineComment(String::new()).description(), "comment1");
        assert_eq!(TokenKind::BlockComment(String::new()).description(), "comment2");
    }

    #[test]
    fn display_regexp() {
        let kind = TokenKind::RegExp {
            pattern: "a\\/b".into(),
            flags: "g".into(),
        };
        assert_eq!(kind.to_string(), "/a\\/b/g");
    }

    #[test]
    fn token_matchers() {
        let token = Token {
            kind: TokenKind::Punc('.'),
            span: Span::new(0, 1),
            line: 1,
            col: 0,
            newline_before: false,
            comments_before: Vec::new(),
            source_name: Arc::from("test.js"),
        };
        assert!(token.is_punc('.'));
        assert!(!token.is_punc(','));
        assert!(!token.is_operator("."));
    }
}
