// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Skylark - a JavaScript token-stream inspector.
//!
//! Tokenizes a file or inline source and prints the token stream as a
//! colored table or as JSON. With no input it starts an interactive
//! lexing REPL.

mod repl;

use clap::Parser;
use owo_colors::OwoColorize;
use skylark_lexer::{LexError, Token, TokenKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skylark",
    about = "JavaScript token-stream inspector",
    version,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// JavaScript file to tokenize
    script: Option<PathBuf>,

    /// Tokenize source from the command line
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Emit the token stream as a JSON array
    #[arg(long)]
    json: bool,

    /// Also print attached comment tokens
    #[arg(long)]
    comments: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("skylark=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("skylark=warn")
            .init();
    }

    if let Some(code) = &cli.eval {
        return dump(code, "<eval>", &cli);
    }

    if let Some(path) = &cli.script {
        let source = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        let name = path.display().to_string();
        return dump(&source, &name, &cli);
    }

    repl::Repl::new()?.run()?;
    Ok(())
}

fn dump(source: &str, name: &str, cli: &Cli) -> anyhow::Result<()> {
    tracing::debug!(bytes = source.len(), source = name, "tokenizing");

    match skylark_lexer::tokenize(source, name) {
        Ok(tokens) => {
            tracing::debug!(count = tokens.len(), "tokenized");
            if cli.json {
                let stream: Vec<_> = tokens.iter().map(token_json).collect();
                println!("{}", serde_json::to_string_pretty(&stream)?);
            } else {
                for token in &tokens {
                    if cli.comments {
                        for comment in &token.comments_before {
                            print_token(comment);
                        }
                    }
                    if !token.kind.is_eof() {
                        print_token(token);
                    }
                }
            }
            Ok(())
        }
        Err(err) => {
            print_lex_error(&err);
            std::process::exit(1);
        }
    }
}

/// Print one token as `line:col kind value`.
fn print_token(token: &Token) {
    let position = format!("{}:{}", token.line, token.col);
    let kind = token.kind.description();
    let value = token.kind.to_string();

    let colored = match &token.kind {
        TokenKind::Keyword(_) | TokenKind::Atom(_) => value.magenta().bold().to_string(),
        TokenKind::Name(_) => value,
        TokenKind::Str(_) | TokenKind::RegExp { .. } => value.green().to_string(),
        TokenKind::Num(_) => value.yellow().to_string(),
        TokenKind::Operator(_) => value.cyan().to_string(),
        TokenKind::Punc(_) => value.yellow().to_string(),
        TokenKind::LineComment(_) | TokenKind::BlockComment(_) => value.dimmed().to_string(),
        TokenKind::Eof => value.dimmed().to_string(),
    };

    println!("{:>8}  {:10} {}", position.dimmed(), kind, colored);
}

fn token_json(token: &Token) -> serde_json::Value {
    let value = match &token.kind {
        TokenKind::Num(n) => serde_json::json!(n),
        TokenKind::RegExp { pattern, flags } => {
            serde_json::json!({ "pattern": pattern, "flags": flags })
        }
        TokenKind::Eof => serde_json::Value::Null,
        other => serde_json::json!(other.to_string()),
    };
    serde_json::json!({
        "kind": token.kind.description(),
        "value": value,
        "line": token.line,
        "col": token.col,
        "pos": token.span.start,
        "endpos": token.span.end,
        "newline_before": token.newline_before,
        "comments_before": token
            .comments_before
            .iter()
            .map(token_json)
            .collect::<Vec<_>>(),
    })
}

fn print_lex_error(error: &LexError) {
    eprintln!("{}: {}", "SyntaxError".red().bold(), error);
}
