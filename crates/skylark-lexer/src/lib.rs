// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # skylark-lexer
//!
//! A tokenizer for JavaScript source text: it converts raw source into a
//! position-annotated stream of tokens for a parser to consume.
//!
//! ## Structure
//!
//! - `scanner.rs` - the `Tokenizer` driver and per-kind scan routines
//! - `token.rs` - `Token`, `TokenKind`, and `Span` definitions
//! - `cursor.rs` - normalized source text and position bookkeeping
//! - `chars.rs` / `unicode.rs` - character classifiers and keyword tables
//! - `error.rs` - `LexError`
//!
//! ## Documentation Submodules
//!
//! - `literals` - number, string, regexp, and identifier literals
//! - `operators` - longest-match operator scanning and `/` disambiguation
//!
//! ## Usage
//!
//! ```rust
//! use skylark_lexer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new("return /ab/g;", "example.js");
//!
//! loop {
//!     let token = tokenizer.next_token(None).expect("lex error");
//!     if token.kind.is_eof() {
//!         break;
//!     }
//!     println!("{}: {}", token.kind.description(), token.kind);
//! }
//! ```
//!
//! Comments are never returned as tokens: they accumulate and ride along
//! on the next real token as `comments_before`, with any contained line
//! terminator folded into that token's `newline_before` flag (the
//! automatic-semicolon-insertion hint).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod chars;
mod cursor;
mod error;
mod scanner;
mod token;
mod unicode;

// Documentation and test submodules
pub mod literals;
pub mod operators;

pub use chars::{is_identifier_name, is_valid_identifier};
pub use error::{LexError, LexErrorKind, Result};
pub use scanner::Tokenizer;
pub use token::{Span, Token, TokenKind};

/// Tokenizes a whole source unit.
///
/// Returns every non-comment token in order, ending with the
/// end-of-input token, or the first lexical error.
pub fn tokenize(source: &str, source_name: &str) -> Result<Vec<Token>> {
    let mut tokenizer = Tokenizer::new(source, source_name);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token(None)?;
        let done = token.kind.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
