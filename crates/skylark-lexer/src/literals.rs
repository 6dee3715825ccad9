//! Literal scanning documentation.
//!
//! This module documents the literal scanning logic in `scanner.rs`.
//! The tokenizer handles numeric, string, and regular expression literals.
//!
//! ## Numeric Literals
//!
//! The scanner reads a maximal run of characters compatible with *some*
//! numeric grammar, then validates the accumulated text against exactly one
//! of three patterns and converts it:
//!
//! | Pattern | Example | Value |
//! |---------|---------|-------|
//! | hex: `0x`/`0X` + hex digits | `0x1F` | 31 |
//! | legacy octal: `0` + octal digits | `0755` | 493 |
//! | decimal with optional fraction/exponent | `1.5e-3` | 0.0015 |
//!
//! ```text
//! 42      -> 42
//! 3.14    -> 3.14
//! .5      -> 0.5     (leading dot pre-seeded by the driver)
//! 5.      -> 5
//! 1e10    -> 1e10
//! 08      -> 8       (9s force the decimal grammar)
//! 0x      -> error: invalid numeric literal
//! ```
//!
//! Method: `read_num`
//!
//! ## String Literals
//!
//! Delimited by a matching `'` or `"`. Every character is copied verbatim
//! except `\`, which introduces one of:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\n` `\r` `\t` `\b` `\v` `\f` `\0` | control characters |
//! | `\xNN` | two-hex-digit code point |
//! | `\uNNNN` | four-hex-digit code point |
//! | `\` + octal digits | legacy octal escape (see below) |
//! | `\` + line terminator | elided (line continuation) |
//! | `\` + anything else | that character itself |
//!
//! Legacy octal escapes read up to 3 digits when the first is `0`–`3` and
//! up to 2 when it is `4`–`7`, so the decoded code point fits in a byte.
//!
//! Methods: `read_string`, `read_octal_escape`, `read_escaped_char`
//!
//! ## Regular Expression Literals
//!
//! ```text
//! /pattern/flags
//! /[a-z]+/gi
//! ```
//!
//! Only entered when the carried context allows an expression at this
//! point (or when the caller forces a re-lex). The body is copied
//! verbatim: a backslash escapes exactly the next character, and an
//! unescaped `/` inside a `[…]` class does not terminate the literal.
//! Flags are whatever identifier characters follow the closing `/`; flag
//! validity is the regex engine's concern, not the scanner's.
//!
//! Method: `read_regexp`
//!
//! ## Identifiers and Keywords
//!
//! - Start: `A-Z`, `a-z`, `_`, `$`, Unicode letters
//! - Continue: start characters + digits, ZWNJ/ZWJ, combining marks,
//!   connector punctuation
//! - `\uNNNN` escapes are allowed anywhere in a word provided the decoded
//!   character is itself identifier-valid
//! - an escaped word that spells a keyword is re-encoded with its first
//!   character as a `\uNNNN` hex escape, so it cannot collide with the
//!   bare keyword
//! - after the `.` punctuation every word is a plain name, which is what
//!   makes `obj.if` legal
//!
//! Method: `read_word`

// This module serves as documentation. The actual implementation is in scanner.rs.
