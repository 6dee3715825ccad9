//! The source cursor: normalized text plus position bookkeeping.

use crate::error::{LexError, LexErrorKind, Result};
use std::sync::Arc;

/// Owns the normalized source text and the read position within it.
///
/// Normalization happens once at construction: a single leading byte-order
/// mark is stripped, and every line terminator sequence (CRLF, lone CR,
/// LINE SEPARATOR, PARAGRAPH SEPARATOR) is rewritten to one `\n`, so all
/// downstream line counting only ever observes `\n`. Offsets are character
/// indices into the normalized text.
pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
    newline_before: bool,
    source_name: Arc<str>,
}

impl Cursor {
    pub(crate) fn new(source: &str, source_name: Arc<str>) -> Self {
        Self {
            chars: normalize(source),
            pos: 0,
            line: 1,
            col: 0,
            newline_before: false,
            source_name,
        }
    }

    /// The next character, without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consumes one character, advancing line/column bookkeeping. A `\n`
    /// marks the newline accumulator read by the token emitter.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.bump(ch, false);
        Some(ch)
    }

    /// Like [`advance`](Self::advance), but failing with `UnexpectedEof`
    /// when the input is exhausted.
    pub(crate) fn must_advance(&mut self) -> Result<char> {
        self.advance().ok_or_else(|| self.eof_error())
    }

    /// `must_advance` for use inside a string body: a consumed `\n` still
    /// counts a line but does not mark the newline accumulator, so a
    /// backslash line continuation does not fabricate a token break.
    pub(crate) fn must_advance_in_string(&mut self) -> Result<char> {
        match self.peek() {
            Some(ch) => {
                self.bump(ch, true);
                Ok(ch)
            }
            None => Err(self.eof_error()),
        }
    }

    /// Whether the upcoming text matches `literal`, without consuming.
    pub(crate) fn looking_at(&self, literal: &str) -> bool {
        let mut i = self.pos;
        for ch in literal.chars() {
            if self.chars.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Offset of the next occurrence of `literal` at or after the current
    /// position, if any.
    pub(crate) fn find(&self, literal: &str) -> Option<usize> {
        let pattern: Vec<char> = literal.chars().collect();
        if pattern.is_empty() {
            return Some(self.pos);
        }
        if self.pos + pattern.len() > self.chars.len() {
            return None;
        }
        (self.pos..=self.chars.len() - pattern.len())
            .find(|&i| self.chars[i..i + pattern.len()] == pattern[..])
    }

    /// [`find`](Self::find), failing with `UnexpectedEof` when absent.
    pub(crate) fn must_find(&self, literal: &str) -> Result<usize> {
        self.find(literal).ok_or_else(|| self.eof_error())
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn col(&self) -> u32 {
        self.col
    }

    /// True if a line terminator was consumed since the last
    /// [`reset_newline`](Self::reset_newline).
    pub(crate) fn saw_newline(&self) -> bool {
        self.newline_before
    }

    pub(crate) fn reset_newline(&mut self) {
        self.newline_before = false;
    }

    fn bump(&mut self, ch: char, in_string: bool) {
        self.pos += 1;
        if ch == '\n' {
            if !in_string {
                self.newline_before = true;
            }
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }

    fn eof_error(&self) -> LexError {
        LexError {
            kind: LexErrorKind::UnexpectedEof,
            source_name: Arc::clone(&self.source_name),
            line: self.line,
            col: self.col,
            pos: self.pos,
        }
    }
}

fn normalize(source: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(source.len());
    let mut iter = source.chars().peekable();
    if iter.peek() == Some(&'\u{FEFF}') {
        iter.next();
    }
    while let Some(ch) = iter.next() {
        match ch {
            '\r' => {
                if iter.peek() == Some(&'\n') {
                    iter.next();
                }
                out.push('\n');
            }
            '\u{2028}' | '\u{2029}' => out.push('\n'),
            _ => out.push(ch),
        }
    }
    out
}
