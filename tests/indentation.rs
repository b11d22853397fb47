use sn_lang::{
    lexer::{Lexer, TokenKind},
    parser::Parser,
};

#[test]
fn inconsistent_indentation_aborts_the_compilation() {
    // The first block indents by 2 spaces, the next one by 3.
    let source = "fn main():void =>\n  var x:int = 1\nfn other():void =>\n   var y:int = 2\n";
    let tokens = Lexer::new(source, "bad.sn").lex();

    let errors = Parser::new(tokens, "bad.sn")
        .parse()
        .expect_err("inconsistent indentation must not parse");

    assert!(errors
        .iter()
        .any(|error| error.message.contains("Inconsistent indentation")));
}

#[test]
fn file_ending_two_levels_deep_emits_two_dedents() {
    let source = "fn main():void =>\n    if true =>\n        return";
    let tokens = Lexer::new(source, "deep.sn").lex();

    let tail: Vec<TokenKind> = tokens.iter().rev().take(3).map(|t| t.kind).collect();
    assert_eq!(
        vec![TokenKind::Eof, TokenKind::Dedent, TokenKind::Dedent],
        tail
    );
}

#[test]
fn a_file_without_a_trailing_newline_still_parses() {
    let source = "fn main():void =>\n    if true =>\n        return";
    let tokens = Lexer::new(source, "deep.sn").lex();

    assert!(Parser::new(tokens, "deep.sn").parse().is_ok());
}

#[test]
fn indents_and_dedents_balance_for_well_formed_sources() {
    let source = "fn main():void =>\n    if true =>\n        return\n    while false =>\n        return\n";
    let tokens = Lexer::new(source, "balanced.sn").lex();

    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();
    assert_eq!(indents, dedents);
}
