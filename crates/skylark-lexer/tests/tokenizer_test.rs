//! End-to-end tokenizer tests over realistic source snippets.

use skylark_lexer::{LexErrorKind, Token, TokenKind, Tokenizer, tokenize};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source, "test.js").expect("lex failure")
}

fn kinds(source: &str) -> Vec<String> {
    lex(source)
        .iter()
        .map(|t| t.kind.description().to_string())
        .collect()
}

#[test]
fn statement_token_stream() {
    let tokens = lex("var answer = 40 + 2;");
    assert!(tokens[0].is_keyword("var"));
    assert!(matches!(&tokens[1].kind, TokenKind::Name(n) if n == "answer"));
    assert!(tokens[2].is_operator("="));
    assert!(matches!(tokens[3].kind, TokenKind::Num(n) if n == 40.0));
    assert!(tokens[4].is_operator("+"));
    assert!(matches!(tokens[5].kind, TokenKind::Num(n) if n == 2.0));
    assert!(tokens[6].is_punc(';'));
    assert!(tokens[7].kind.is_eof());
}

#[test]
fn numeric_values_match_reference() {
    let tokens = lex("42 3.14 .5 1e10 1.5e-3 0x1F 0755");
    let expected = [42.0, 3.14, 0.5, 1e10, 1.5e-3, 31.0, 493.0];
    for (token, value) in tokens.iter().zip(expected) {
        assert!(
            matches!(token.kind, TokenKind::Num(n) if n == value),
            "expected {value}, got {:?}",
            token.kind
        );
    }
}

#[test]
fn string_values_are_decoded() {
    let tokens = lex(r#"'a\nb' "tab\there" '\\' '\"' '\x41\u0042\103'"#);
    let expected = ["a\nb", "tab\there", "\\", "\"", "ABC"];
    for (token, value) in tokens.iter().zip(expected) {
        assert!(
            matches!(&token.kind, TokenKind::Str(s) if s == value),
            "expected {value:?}, got {:?}",
            token.kind
        );
    }
}

#[test]
fn newline_before_with_block_comment_between() {
    let tokens = lex("a\n/* x */b");
    let b = &tokens[1];
    assert!(matches!(&b.kind, TokenKind::Name(n) if n == "b"));
    assert!(b.newline_before);
}

#[test]
fn newline_inside_comment_still_counts() {
    let tokens = lex("a/*\n*/b");
    let b = &tokens[1];
    assert!(b.newline_before);
    // but the comment is invisible to the caller
    assert_eq!(kinds("a/*\n*/b"), ["name", "name", "eof"]);
}

#[test]
fn no_newline_no_flag() {
    let tokens = lex("a /* x */ b");
    assert!(!tokens[1].newline_before);
}

#[test]
fn division_vs_regexp() {
    let tokens = lex("a / b");
    assert!(tokens[1].is_operator("/"));

    let tokens = lex("return /x/g");
    assert!(matches!(
        &tokens[1].kind,
        TokenKind::RegExp { pattern, flags } if pattern == "x" && flags == "g"
    ));
}

#[test]
fn regexp_with_escaped_slash() {
    let tokens = lex("throw /a\\/b/");
    assert!(matches!(
        &tokens[1].kind,
        TokenKind::RegExp { pattern, flags } if pattern == "a\\/b" && flags.is_empty()
    ));
    // and the literal really ended at the second slash
    assert!(tokens[2].kind.is_eof());
}

#[test]
fn property_named_like_keyword() {
    let tokens = lex("obj.if");
    assert!(matches!(&tokens[0].kind, TokenKind::Name(n) if n == "obj"));
    assert!(tokens[1].is_punc('.'));
    assert!(matches!(&tokens[2].kind, TokenKind::Name(n) if n == "if"));
}

#[test]
fn unterminated_string_points_at_the_quote() {
    let err = tokenize("'abc", "test.js").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!((err.line, err.col, err.pos), (1, 0, 0));
    assert_eq!(
        err.to_string(),
        "test.js: unterminated string constant (line: 1, col: 0, pos: 0)"
    );
}

#[test]
fn unterminated_comment_is_detected() {
    let err = tokenize("/* abc", "test.js").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    assert_eq!(err.pos, 0);
}

#[test]
fn unterminated_regexp_is_detected() {
    let err = tokenize("return /never", "test.js").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedRegExp);
    assert_eq!(err.pos, 7);
}

#[test]
fn spans_reconstruct_the_source() {
    let source = "var x = 1; // one\nvar y = /re/g; /* two\nlines */ x /= y.z;\n";
    let chars: Vec<char> = source.chars().collect();

    // collect every lexed segment: real tokens plus their attached comments
    let mut segments: Vec<(usize, usize)> = Vec::new();
    for token in lex(source) {
        for comment in &token.comments_before {
            segments.push((comment.span.start, comment.span.end));
        }
        if !token.kind.is_eof() {
            segments.push((token.span.start, token.span.end));
        }
    }
    segments.sort();

    // segments are disjoint, in order, and everything between them is
    // whitespace, so concatenating spans + gaps reproduces the source
    let mut rebuilt = String::new();
    let mut cursor = 0;
    for (start, end) in segments {
        assert!(cursor <= start, "overlapping spans");
        let gap: String = chars[cursor..start].iter().collect();
        assert!(
            gap.chars().all(|ch| ch == '\n' || ch == ' '),
            "non-whitespace between tokens: {gap:?}"
        );
        rebuilt.push_str(&gap);
        rebuilt.extend(&chars[start..end]);
        cursor = end;
    }
    rebuilt.extend(&chars[cursor..]);
    assert_eq!(rebuilt, source);
}

#[test]
fn offsets_are_monotone() {
    let tokens = lex("a + b /* c */ . d\n/x/ 'y'");
    for pair in tokens.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
}

#[test]
fn comments_attach_to_the_following_token() {
    let tokens = lex("// header\nfunction f() {}");
    let function = &tokens[0];
    assert!(function.is_keyword("function"));
    assert_eq!(function.comments_before.len(), 1);
    assert!(matches!(
        &function.comments_before[0].kind,
        TokenKind::LineComment(text) if text == " header"
    ));
    // later tokens do not see the comment again
    assert!(tokens[1].comments_before.is_empty());
}

#[test]
fn crlf_and_unicode_terminators_count_lines() {
    let tokens = lex("a\r\nb\u{2028}c");
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert!(tokens[1].newline_before);
    assert_eq!(tokens[2].line, 3);
    assert!(tokens[2].newline_before);
}

#[test]
fn leading_bom_is_invisible() {
    let tokens = lex("\u{FEFF}x");
    assert_eq!(tokens[0].span.start, 0);
    assert!(matches!(&tokens[0].kind, TokenKind::Name(n) if n == "x"));
}

#[test]
fn forced_regexp_relex() {
    let mut tokenizer = Tokenizer::new("x /i.test(s)/", "test.js");
    let x = tokenizer.next_token(None).unwrap();
    assert!(matches!(&x.kind, TokenKind::Name(n) if n == "x"));
    // lexed as division first
    let slash = tokenizer.next_token(None).unwrap();
    assert!(slash.is_operator("/"));
    // the parser decides it wanted a regexp and re-lexes the rest
    let regexp = tokenizer.next_token(Some("")).unwrap();
    assert!(matches!(
        &regexp.kind,
        TokenKind::RegExp { pattern, .. } if pattern == "i.test(s)"
    ));
}

#[test]
fn eof_token_carries_trailing_comments() {
    let tokens = lex("a // trailing\n// more");
    let eof = tokens.last().unwrap();
    assert!(eof.kind.is_eof());
    assert_eq!(eof.comments_before.len(), 2);
}

#[test]
fn snippet_with_everything() {
    let source = "function add(a, b) {\n  // sum\n  return a + b;\n}\nvar re = /[a-z]+/gi;\nobj.new = '\\u0041';\n";
    assert_eq!(
        kinds(source),
        [
            "keyword", "name", "punc", "name", "punc", "name", "punc", "punc", // function add(a, b) {
            "keyword", "name", "operator", "name", "punc", // return a + b;
            "punc",    // }
            "keyword", "name", "operator", "regexp", "punc", // var re = /[a-z]+/gi;
            "name", "punc", "name", "operator", "string", "punc", // obj.new = 'A';
            "eof",
        ]
    );
}
