// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive lexing REPL: each line is tokenized and printed as a table.

use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};
use skylark_lexer::{LexErrorKind, TokenKind};
use std::borrow::Cow;
use std::path::PathBuf;

/// REPL configuration constants
const HISTORY_FILE: &str = ".skylark_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// Words offered for completion: the keyword-ish vocabulary of the lexer.
const COMPLETIONS: &[&str] = &[
    "break",
    "case",
    "catch",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "switch",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    ".help",
    ".exit",
    ".clear",
    ".version",
];

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            ".help" | ".h" | ".?" => Some(ReplCommand::Help),
            ".exit" | ".quit" | ".q" => Some(ReplCommand::Exit),
            ".clear" | ".cls" => Some(ReplCommand::Clear),
            ".version" | ".v" => Some(ReplCommand::Version),
            _ => None,
        }
    }

    /// All available commands for the help listing
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
        ]
    }
}

/// Helper for rustyline: completion and hints from the keyword list,
/// highlighting and continuation detection from the lexer itself.
#[derive(Default)]
struct SkylarkHelper;

impl Completer for SkylarkHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = COMPLETIONS
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.to_string(),
                replacement: kw[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for SkylarkHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let start = line
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..];
        if word.len() < 2 {
            return None;
        }

        COMPLETIONS
            .iter()
            .find(|kw| kw.starts_with(word) && kw.len() > word.len())
            .map(|kw| (&kw[word.len()..]).dimmed().to_string())
    }
}

impl Highlighter for SkylarkHelper {
    /// Re-lexes the line and colors it span by span. A line that does not
    /// lex is shown uncolored.
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let Ok(tokens) = skylark_lexer::tokenize(line, "<repl>") else {
            return Cow::Borrowed(line);
        };

        let chars: Vec<char> = line.chars().collect();
        let mut result = String::with_capacity(line.len() * 2);
        let mut cursor = 0;
        for token in tokens
            .iter()
            .flat_map(|t| t.comments_before.iter().chain(std::iter::once(t)))
        {
            if token.kind.is_eof() || token.span.start < cursor {
                continue;
            }
            result.extend(&chars[cursor..token.span.start]);
            let text: String = chars[token.span.start..token.span.end].iter().collect();
            result.push_str(&colorize(&token.kind, &text));
            cursor = token.span.end;
        }
        result.extend(&chars[cursor..]);
        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn colorize(kind: &TokenKind, text: &str) -> String {
    match kind {
        TokenKind::Keyword(_) | TokenKind::Atom(_) => text.magenta().bold().to_string(),
        TokenKind::Str(_) | TokenKind::RegExp { .. } => text.green().to_string(),
        TokenKind::Num(_) => text.yellow().to_string(),
        TokenKind::Operator(_) => text.cyan().to_string(),
        TokenKind::Punc(_) => text.yellow().to_string(),
        TokenKind::LineComment(_) | TokenKind::BlockComment(_) => text.dimmed().to_string(),
        TokenKind::Name(_) | TokenKind::Eof => text.to_string(),
    }
}

impl Validator for SkylarkHelper {
    /// An input that fails with an unterminated construct wants more
    /// lines; anything else (valid or not) is submitted as-is.
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        match skylark_lexer::tokenize(ctx.input(), "<repl>") {
            Err(err)
                if matches!(
                    err.kind,
                    LexErrorKind::UnterminatedComment | LexErrorKind::UnexpectedEof
                ) =>
            {
                Ok(ValidationResult::Incomplete)
            }
            _ => Ok(ValidationResult::Valid(None)),
        }
    }
}

impl Helper for SkylarkHelper {}

/// The interactive lexing REPL
pub struct Repl {
    editor: Editor<SkylarkHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(SkylarkHelper));

        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skylark")
            .join(HISTORY_FILE);

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let _ = editor.load_history(&history_path);

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "skylark>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some(cmd) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    lex_and_print(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_path);
        Ok(())
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!(
            "  {} {} {}",
            "Skylark".white().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!("  {}", "JavaScript token-stream inspector".dimmed());
        println!();
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand) -> CommandResult {
        match cmd {
            ReplCommand::Help => {
                println!();
                println!("{}", "REPL Commands:".white().bold());
                println!();
                for (cmd, desc) in ReplCommand::all_commands() {
                    println!("  {:16} {}", cmd.cyan(), desc.dimmed());
                }
                println!();
                CommandResult::Continue
            }
            ReplCommand::Exit => CommandResult::Exit,
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[H");
                CommandResult::Continue
            }
            ReplCommand::Version => {
                println!("{} {}", "skylark".bright_cyan().bold(), env!("CARGO_PKG_VERSION").yellow());
                CommandResult::Continue
            }
        }
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

fn lex_and_print(line: &str) {
    match skylark_lexer::tokenize(line, "<repl>") {
        Ok(tokens) => {
            for token in &tokens {
                for comment in &token.comments_before {
                    print_row(comment);
                }
                if !token.kind.is_eof() {
                    print_row(token);
                }
            }
        }
        Err(err) => {
            eprintln!("{}: {}", "SyntaxError".red().bold(), err);
            // underline the offending position
            let caret = " ".repeat(err.col as usize);
            eprintln!("  {line}");
            eprintln!("  {caret}{}", "^".red().bold());
        }
    }
}

fn print_row(token: &skylark_lexer::Token) {
    let position = format!("{}:{}", token.line, token.col);
    println!(
        "{:>6}  {:10} {}",
        position.dimmed(),
        token.kind.description(),
        colorize(&token.kind, &token.kind.to_string())
    );
}
