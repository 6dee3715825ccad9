//! Typed lexical errors.

use std::sync::Arc;
use thiserror::Error;

/// Result type for tokenizer operations.
pub type Result<T> = std::result::Result<T, LexError>;

/// A fatal lexical error, positioned at the start of the token that was
/// being scanned when the failure occurred.
///
/// `line` is 1-based, `col` is 0-based, `pos` is the absolute character
/// offset into the normalized source. There is no recovery: a tokenizer
/// that has returned a `LexError` cannot make further progress.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source_name}: {kind} (line: {line}, col: {col}, pos: {pos})")]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Diagnostic label of the input (file path or buffer name).
    pub source_name: Arc<str>,
    /// 1-based line of the failure.
    pub line: u32,
    /// 0-based column of the failure.
    pub col: u32,
    /// Absolute character offset of the failure.
    pub pos: usize,
}

/// The specific failure detected by a scanner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    /// Input ran out where a scanner demanded another character and no more
    /// specific context applies.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A string literal reached end of input before its closing quote.
    #[error("unterminated string constant")]
    UnterminatedString,

    /// A regular expression literal reached end of input before its
    /// closing `/`.
    #[error("unterminated regular expression")]
    UnterminatedRegExp,

    /// A block comment reached end of input before `*/`.
    #[error("unterminated multiline comment")]
    UnterminatedComment,

    /// The accumulated numeric text matches no numeric grammar.
    #[error("invalid numeric literal `{0}`")]
    InvalidNumber(String),

    /// A `\xNN`/`\uNNNN` escape was malformed or decoded to a character
    /// invalid where it appeared.
    #[error("{0}")]
    InvalidUnicodeEscape(String),

    /// No scanner applies to the lookahead character.
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}
