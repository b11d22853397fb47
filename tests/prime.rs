use sn_lang::{compiler::Compiler, lexer::Lexer, parser::Parser, typechecker::Typechecker};

const SOURCE: &str = r#"fn is_prime(num:int):bool =>
    if num < 2 =>
        return false
    var i:int = 2
    while i * i <= num =>
        if num % i == 0 =>
            return false
        i++
    return true

fn main():void =>
    print(is_prime(7))
"#;

fn compile(source: &str) -> String {
    let tokens = Lexer::new(source, "prime.sn").lex();
    let ast = Parser::new(tokens, "prime.sn")
        .parse()
        .expect("is_prime should parse");
    let typed = Typechecker::from_ast(ast)
        .check()
        .expect("is_prime should type check");
    Compiler::from_ast(typed)
        .compile_assembly()
        .expect("is_prime should compile")
}

#[test]
fn while_loop_emits_one_start_and_one_end_label() {
    let assembly = compile(SOURCE);

    let starts: Vec<&str> = assembly
        .lines()
        .filter(|line| line.starts_with(".L_while_start_") && line.ends_with(':'))
        .collect();
    let ends: Vec<&str> = assembly
        .lines()
        .filter(|line| line.starts_with(".L_while_end_") && line.ends_with(':'))
        .collect();

    assert_eq!(1, starts.len());
    assert_eq!(1, ends.len());
}

#[test]
fn loop_back_edge_targets_the_start_label() {
    let assembly = compile(SOURCE);
    assert!(assembly.contains("jmp .L_while_start_"));
}

#[test]
fn boolean_print_selects_true_or_false_string() {
    let assembly = compile(SOURCE);

    assert!(assembly.contains("[rel true_str]"));
    assert!(assembly.contains("[rel false_str]"));
    assert!(assembly.contains("[rel fmt_string]"));
    assert!(assembly.contains("true_str: db \"true\", 0"));
    assert!(assembly.contains("false_str: db \"false\", 0"));
}
