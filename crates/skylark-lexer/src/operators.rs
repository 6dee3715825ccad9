//! Operator scanning documentation.
//!
//! This module documents the operator scanning logic in `scanner.rs`.
//!
//! ## Longest Match
//!
//! Operators are scanned greedily: starting from one operator character,
//! the scanner keeps extending by one more character while the extended
//! text is still a member of the fixed operator set, then emits the
//! longest valid match.
//!
//! ```text
//! // For input ">>>="
//! read_operator():
//!   start with ">"
//!   ">>"   is an operator -> extend
//!   ">>>"  is an operator -> extend
//!   ">>>=" is an operator -> extend
//!   end of input          -> emit ">>>="
//! ```
//!
//! The operator set also contains the word operators `in`, `instanceof`,
//! `typeof`, `new`, `void`, and `delete`; those arrive through the word
//! scanner but are emitted as operator tokens.
//!
//! ## Slash Disambiguation
//!
//! The `/` character can start:
//! - a line comment: `// …`
//! - a block comment: `/* … */`
//! - a regular expression literal: `/pattern/flags`
//! - the division operators `/` and `/=`
//!
//! Comments are detected by direct lookahead. The regexp-vs-division
//! choice is made by the carried context: a regexp is possible exactly
//! when the previous non-comment token cannot end an expression. That is
//! the case after most operators (but not the postfix `++`/`--`), after
//! the expression-preceding keywords (`return`, `new`, `delete`, `throw`,
//! `else`, `case`), and after the punctuation `[ { ( , . ; :`.
//!
//! Method: `handle_slash`

// This module serves as documentation. The actual implementation is in scanner.rs.

#[cfg(test)]
mod tests {
    use crate::{Token, TokenKind, Tokenizer};

    fn scan_all(src: &str) -> Vec<Token> {
        Tokenizer::new(src, "test.js")
            .collect::<crate::Result<Vec<_>>>()
            .expect("lex failure")
    }

    fn scan_single(src: &str) -> TokenKind {
        let mut tokenizer = Tokenizer::new(src, "test.js");
        tokenizer.next_token(None).expect("lex failure").kind
    }

    #[test]
    fn test_single_char_operators() {
        for op in ["+", "-", "*", "%", "<", ">", "=", "!", "&", "|", "^", "~", "?"] {
            assert!(
                matches!(scan_single(op), TokenKind::Operator(text) if text == op),
                "operator {op}"
            );
        }
    }

    #[test]
    fn test_compound_operators() {
        for op in [
            "++", "--", "<<", ">>", ">>>", "<=", ">=", "==", "===", "!=", "!==", "+=", "-=",
            "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&", "||",
        ] {
            assert!(
                matches!(scan_single(op), TokenKind::Operator(text) if text == op),
                "operator {op}"
            );
        }
    }

    #[test]
    fn test_longest_match_wins() {
        let tokens = scan_all("a >>> b");
        assert!(tokens[1].is_operator(">>>"));
        let tokens = scan_all("a == = b");
        assert!(tokens[1].is_operator("=="));
        assert!(tokens[2].is_operator("="));
    }

    #[test]
    fn test_adjacent_operators_split_greedily() {
        // `===` then `=`: four equals signs
        let tokens = scan_all("a ==== b");
        assert!(tokens[1].is_operator("==="));
        assert!(tokens[2].is_operator("="));
    }

    #[test]
    fn test_word_operators() {
        assert!(matches!(scan_single("typeof"), TokenKind::Operator(op) if op == "typeof"));
        assert!(matches!(scan_single("void"), TokenKind::Operator(op) if op == "void"));
        assert!(matches!(scan_single("delete"), TokenKind::Operator(op) if op == "delete"));
        assert!(matches!(scan_single("new"), TokenKind::Operator(op) if op == "new"));
    }

    #[test]
    fn test_division_after_name() {
        let tokens = scan_all("a / b");
        assert!(tokens[1].is_operator("/"));
    }

    #[test]
    fn test_division_assign_after_name() {
        let tokens = scan_all("a /= b");
        assert!(tokens[1].is_operator("/="));
    }

    #[test]
    fn test_regexp_after_operator() {
        let tokens = scan_all("a = /b/");
        assert!(matches!(&tokens[2].kind, TokenKind::RegExp { .. }));
    }

    #[test]
    fn test_regexp_after_keyword_before_expression() {
        let tokens = scan_all("return /x/g");
        assert!(matches!(&tokens[1].kind, TokenKind::RegExp { .. }));
        let tokens = scan_all("case /x/:");
        assert!(matches!(&tokens[1].kind, TokenKind::RegExp { .. }));
    }

    #[test]
    fn test_no_regexp_after_postfix_increment() {
        let tokens = scan_all("i++ / j");
        assert!(tokens[2].is_operator("/"));
    }

    #[test]
    fn test_no_regexp_after_closing_paren() {
        let tokens = scan_all("(a) / b");
        assert!(tokens[3].is_operator("/"));
    }
}
