//! The tokenizer that produces tokens from JavaScript source text.

use crate::chars;
use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind, Result};
use crate::token::{Span, Token, TokenKind};
use std::sync::Arc;

/// A tokenizer over one source unit.
///
/// Created once per source, driven token by token via
/// [`next_token`](Self::next_token) until it yields [`TokenKind::Eof`] or
/// fails. Two pieces of lexical context are carried between calls and
/// recomputed on every non-comment emission: whether a following `/` starts
/// a regular expression literal, and whether the previous token was the `.`
/// punctuation (which forces the next word to lex as a plain name).
pub struct Tokenizer {
    cursor: Cursor,
    source_name: Arc<str>,
    regex_allowed: bool,
    prev_was_dot: bool,
    comments_before: Vec<Token>,
    tok_line: u32,
    tok_col: u32,
    tok_pos: usize,
    done: bool,
}

impl Tokenizer {
    /// Creates a tokenizer for `source`, labeled `source_name` in
    /// diagnostics and emitted tokens.
    pub fn new(source: &str, source_name: &str) -> Self {
        let source_name: Arc<str> = Arc::from(source_name);
        Self {
            cursor: Cursor::new(source, Arc::clone(&source_name)),
            source_name,
            regex_allowed: false,
            prev_was_dot: false,
            comments_before: Vec::new(),
            tok_line: 1,
            tok_col: 0,
            tok_pos: 0,
            done: false,
        }
    }

    /// Returns the next token.
    ///
    /// With `force_regexp` the call re-lexes an already-consumed `/…`
    /// prefix as a regular expression literal instead of dispatching: the
    /// argument is the operator text after the initial `/`. A parser uses
    /// this when grammar context proves a division operator was mis-lexed.
    ///
    /// Comments are never returned; they accumulate and ride along as
    /// `comments_before` on the next real token. After the end-of-input
    /// token has been returned, further calls keep returning it.
    pub fn next_token(&mut self, force_regexp: Option<&str>) -> Result<Token> {
        if let Some(prefix) = force_regexp {
            return self.read_regexp(prefix);
        }
        self.skip_whitespace();
        self.start_token();
        let Some(ch) = self.cursor.peek() else {
            return Ok(self.token(TokenKind::Eof, false));
        };
        match ch {
            '"' | '\'' => self.read_string(),
            '.' => self.handle_dot(),
            '/' => self.handle_slash(),
            _ if chars::is_digit(ch) => self.read_num(None),
            _ if chars::is_punc_char(ch) => {
                let punc = self.cursor.must_advance()?;
                Ok(self.token(TokenKind::Punc(punc), false))
            }
            _ if chars::is_operator_char(ch) => self.read_operator(None),
            _ if ch == '\\' || chars::is_identifier_start(ch) => self.read_word(),
            _ => Err(self.error_at_start(LexErrorKind::UnexpectedChar(ch))),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.cursor.peek() {
            if ch == '\n' || chars::is_whitespace(ch) {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    fn start_token(&mut self) {
        self.tok_line = self.cursor.line();
        self.tok_col = self.cursor.col();
        self.tok_pos = self.cursor.pos();
    }

    /// Assembles a token from the current scan and, for non-comment tokens,
    /// updates the carried lexical context. Comment emission leaves the
    /// context and the newline accumulator untouched: both belong to the
    /// last non-comment token.
    fn token(&mut self, kind: TokenKind, is_comment: bool) -> Token {
        let mut newline_before = self.cursor.saw_newline();
        let mut comments_before = Vec::new();
        if !is_comment {
            self.regex_allowed = match &kind {
                TokenKind::Operator(op) => !chars::is_unary_postfix(op),
                TokenKind::Keyword(word) => chars::is_keyword_before_expression(word),
                TokenKind::Punc(punc) => chars::is_punc_before_expression(*punc),
                _ => false,
            };
            self.prev_was_dot = matches!(&kind, TokenKind::Punc('.'));
            comments_before = std::mem::take(&mut self.comments_before);
            for comment in &comments_before {
                newline_before = newline_before || comment.newline_before;
            }
            self.cursor.reset_newline();
        }
        Token {
            kind,
            span: Span::new(self.tok_pos, self.cursor.pos()),
            line: self.tok_line,
            col: self.tok_col,
            newline_before,
            comments_before,
            source_name: Arc::clone(&self.source_name),
        }
    }

    fn error_at_start(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            source_name: Arc::clone(&self.source_name),
            line: self.tok_line,
            col: self.tok_col,
            pos: self.tok_pos,
        }
    }

    /// Rewrites a bare end-of-input failure into the scan-specific kind,
    /// positioned at the start of the current token.
    fn eof_to(&self, err: LexError, kind: LexErrorKind) -> LexError {
        if err.kind == LexErrorKind::UnexpectedEof {
            self.error_at_start(kind)
        } else {
            err
        }
    }

    fn handle_dot(&mut self) -> Result<Token> {
        self.cursor.advance();
        match self.cursor.peek() {
            Some(ch) if chars::is_digit(ch) => self.read_num(Some('.')),
            _ => Ok(self.token(TokenKind::Punc('.'), false)),
        }
    }

    fn handle_slash(&mut self) -> Result<Token> {
        if self.cursor.looking_at("//") {
            self.cursor.advance();
            self.cursor.advance();
            return self.skip_line_comment();
        }
        if self.cursor.looking_at("/*") {
            self.cursor.advance();
            self.cursor.advance();
            return self.skip_block_comment();
        }
        self.cursor.advance();
        if self.regex_allowed {
            self.read_regexp("")
        } else {
            self.read_operator(Some("/"))
        }
    }

    /// Reads a maximal run of characters compatible with some numeric
    /// grammar, then validates against exactly one of the three fixed
    /// patterns (hex, legacy octal, decimal with optional exponent). A
    /// leading-dot literal like `.5` arrives with the dot pre-seeded.
    fn read_num(&mut self, prefix: Option<char>) -> Result<Token> {
        let mut has_x = false;
        let mut has_e = false;
        let mut after_e = false;
        let mut has_dot = prefix == Some('.');
        let mut num = String::new();
        if let Some(prefix) = prefix {
            num.push(prefix);
        }
        while let Some(ch) = self.cursor.peek() {
            let take = match ch {
                'x' | 'X' => {
                    if has_x {
                        false
                    } else {
                        has_x = true;
                        true
                    }
                }
                'e' | 'E' => {
                    if has_x {
                        true // a hex digit
                    } else if has_e {
                        false
                    } else {
                        has_e = true;
                        after_e = true;
                        true
                    }
                }
                '+' | '-' => after_e,
                '.' => {
                    after_e = false;
                    if !has_dot && !has_x && !has_e {
                        has_dot = true;
                        true
                    } else {
                        false
                    }
                }
                _ => {
                    after_e = false;
                    chars::is_alphanumeric(ch)
                }
            };
            if !take {
                break;
            }
            num.push(ch);
            self.cursor.advance();
        }
        match parse_js_number(&num) {
            Some(value) => Ok(self.token(TokenKind::Num(value), false)),
            None => Err(self.error_at_start(LexErrorKind::InvalidNumber(num))),
        }
    }

    fn read_string(&mut self) -> Result<Token> {
        self.read_string_body()
            .map_err(|err| self.eof_to(err, LexErrorKind::UnterminatedString))
    }

    fn read_string_body(&mut self) -> Result<Token> {
        let quote = self.cursor.must_advance()?;
        let mut value = String::new();
        loop {
            let ch = self.cursor.must_advance()?;
            if ch == '\\' {
                if let Some(decoded) = self.read_octal_escape()? {
                    value.push(decoded);
                } else if let Some(decoded) = self.read_escaped_char(true)? {
                    value.push(decoded);
                }
            } else if ch == quote {
                break;
            } else {
                value.push(ch);
            }
        }
        Ok(self.token(TokenKind::Str(value), false))
    }

    /// Legacy octal escape after a backslash: up to 3 octal digits when the
    /// first is `0`–`3`, up to 2 when it is `4`–`7` (the code point must fit
    /// in a byte). Returns `None` when no octal digit follows.
    fn read_octal_escape(&mut self) -> Result<Option<char>> {
        let mut first: Option<char> = None;
        let mut len = 0usize;
        let mut code = 0u32;
        while let Some(ch) = self.cursor.peek() {
            if !ch.is_digit(8) {
                break;
            }
            match first {
                None => first = Some(ch),
                Some(f) if f <= '3' && len <= 2 => {}
                Some(f) if f >= '4' && len <= 1 => {}
                Some(_) => break,
            }
            code = code * 8 + (ch as u32 - '0' as u32);
            len += 1;
            self.cursor.advance();
        }
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(char::from(code as u8)))
    }

    /// Decodes the character after a backslash. Returns `None` for a line
    /// terminator, which a backslash elides. `in_string` keeps an elided
    /// line terminator from marking `newline_before`.
    fn read_escaped_char(&mut self, in_string: bool) -> Result<Option<char>> {
        let ch = if in_string {
            self.cursor.must_advance_in_string()?
        } else {
            self.cursor.must_advance()?
        };
        Ok(match ch {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'b' => Some('\u{0008}'),
            'v' => Some('\u{000B}'),
            'f' => Some('\u{000C}'),
            '0' => Some('\0'),
            'x' => Some(self.hex_char(2)?),
            'u' => Some(self.hex_char(4)?),
            '\n' => None,
            other => Some(other),
        })
    }

    fn hex_char(&mut self, digits: u32) -> Result<char> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            let ch = self.cursor.must_advance()?;
            let digit = ch.to_digit(16).ok_or_else(|| {
                self.error_at_start(LexErrorKind::InvalidUnicodeEscape(format!(
                    "invalid hex character `{ch}` in escape sequence"
                )))
            })?;
            code = (code << 4) | digit;
        }
        char::from_u32(code).ok_or_else(|| {
            self.error_at_start(LexErrorKind::InvalidUnicodeEscape(format!(
                "\\u{code:04X} is not a valid character"
            )))
        })
    }

    fn skip_line_comment(&mut self) -> Result<Token> {
        let mut text = String::new();
        while let Some(ch) = self.cursor.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.cursor.advance();
        }
        let comment = self.token(TokenKind::LineComment(text), true);
        self.comments_before.push(comment);
        self.next_token(None)
    }

    fn skip_block_comment(&mut self) -> Result<Token> {
        let end = self
            .cursor
            .must_find("*/")
            .map_err(|err| self.eof_to(err, LexErrorKind::UnterminatedComment))?;
        let mut text = String::with_capacity(end - self.cursor.pos());
        while self.cursor.pos() < end {
            if let Some(ch) = self.cursor.advance() {
                text.push(ch);
            }
        }
        self.cursor.advance();
        self.cursor.advance();
        let comment = self.token(TokenKind::BlockComment(text), true);
        self.comments_before.push(comment);
        self.next_token(None)
    }

    /// Reads a maximal run of identifier characters, decoding `\uNNNN`
    /// escapes. An escaped word that spells a keyword is re-encoded with
    /// its first character as a zero-padded hex escape so it stays
    /// syntactically distinct from the bare keyword.
    fn read_name(&mut self) -> Result<String> {
        let mut name = String::new();
        let mut escaped = false;
        while let Some(ch) = self.cursor.peek() {
            if ch == '\\' {
                escaped = true;
                self.cursor.advance();
                if self.cursor.peek() != Some('u') {
                    return Err(self.error_at_start(LexErrorKind::InvalidUnicodeEscape(
                        "expecting unicode escape sequence \\uXXXX".into(),
                    )));
                }
                self.cursor.advance();
                let decoded = self.hex_char(4)?;
                if !chars::is_identifier_char(decoded) {
                    return Err(self.error_at_start(LexErrorKind::InvalidUnicodeEscape(format!(
                        "escaped code point U+{:04X} is not valid in an identifier",
                        decoded as u32
                    ))));
                }
                name.push(decoded);
            } else if chars::is_identifier_char(ch) {
                name.push(ch);
                self.cursor.advance();
            } else {
                break;
            }
        }
        if escaped && chars::is_keyword(&name) {
            let mut rest = name.chars();
            if let Some(first) = rest.next() {
                name = format!("\\u{:04X}{}", first as u32, rest.as_str());
            }
        }
        Ok(name)
    }

    fn read_word(&mut self) -> Result<Token> {
        let word = self.read_name()?;
        if self.prev_was_dot {
            return Ok(self.token(TokenKind::Name(word), false));
        }
        let kind = if chars::is_atom_keyword(&word) {
            TokenKind::Atom(word)
        } else if !chars::is_keyword(&word) {
            TokenKind::Name(word)
        } else if chars::is_operator(&word) {
            TokenKind::Operator(word)
        } else {
            TokenKind::Keyword(word)
        };
        Ok(self.token(kind, false))
    }

    fn read_regexp(&mut self, prefix: &str) -> Result<Token> {
        self.read_regexp_body(prefix)
            .map_err(|err| self.eof_to(err, LexErrorKind::UnterminatedRegExp))
    }

    /// Copies the pattern verbatim, tracking character-class state so an
    /// unescaped `/` inside `[…]` does not terminate the literal. A
    /// backslash escapes exactly the next character, including `/` and `]`.
    fn read_regexp_body(&mut self, prefix: &str) -> Result<Token> {
        let mut pattern = String::from(prefix);
        let mut escaped = false;
        let mut in_class = false;
        loop {
            let ch = self.cursor.must_advance()?;
            if escaped {
                pattern.push('\\');
                pattern.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '[' {
                in_class = true;
                pattern.push(ch);
            } else if ch == ']' && in_class {
                in_class = false;
                pattern.push(ch);
            } else if ch == '/' && !in_class {
                break;
            } else {
                pattern.push(ch);
            }
        }
        let flags = self.read_name()?;
        Ok(self.token(TokenKind::RegExp { pattern, flags }, false))
    }

    /// Greedy longest-match operator scan: keep extending by one character
    /// while the extended text is still a valid operator.
    fn read_operator(&mut self, prefix: Option<&str>) -> Result<Token> {
        let mut op = match prefix {
            Some(prefix) => prefix.to_string(),
            None => self.cursor.must_advance()?.to_string(),
        };
        while let Some(ch) = self.cursor.peek() {
            let mut bigger = op.clone();
            bigger.push(ch);
            if !chars::is_operator(&bigger) {
                break;
            }
            self.cursor.advance();
            op = bigger;
        }
        Ok(self.token(TokenKind::Operator(op), false))
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    /// Yields tokens up to (not including) end-of-input. A lexical error is
    /// yielded once, after which the iterator is exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token(None) {
            Ok(token) if token.kind.is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Converts accumulated numeric text to its value, provided it matches
/// exactly one of the three numeric grammars.
fn parse_js_number(text: &str) -> Option<f64> {
    if is_hex_literal(text) {
        return Some(fold_digits(&text[2..], 16));
    }
    if is_octal_literal(text) {
        return Some(fold_digits(&text[1..], 8));
    }
    if is_decimal_literal(text) {
        return text.parse::<f64>().ok();
    }
    None
}

fn is_hex_literal(text: &str) -> bool {
    (text.starts_with("0x") || text.starts_with("0X"))
        && text.len() > 2
        && text[2..].chars().all(|ch| ch.is_ascii_hexdigit())
}

fn is_octal_literal(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('0') && text[1..].chars().all(|ch| ch.is_digit(8))
}

/// Decimal grammar: digits, optional dot, digits, then an optional
/// exponent of `e`/`E`, optional sign, and at least one digit.
fn is_decimal_literal(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
    }
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i == chars.len() {
        return true;
    }
    if chars[i] != 'e' && chars[i] != 'E' {
        return false;
    }
    i += 1;
    if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
        i += 1;
    }
    let exponent = &chars[i..];
    !exponent.is_empty() && exponent.iter().all(|ch| ch.is_ascii_digit())
}

/// `parseInt`-style digit fold into a double.
fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(radix))
        .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64)
}
