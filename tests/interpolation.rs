use sn_lang::{compiler::Compiler, lexer::Lexer, parser::Parser, typechecker::Typechecker};

const SOURCE: &str = r#"fn main():void =>
    var i:int = 42
    var d:double = 3.14
    var c:char = 'z'
    var b:bool = false
    var s:str = "tail"
    print($"i={i} d={d} c={c} b={b} s={s}")
"#;

fn compile(source: &str) -> String {
    let tokens = Lexer::new(source, "interp.sn").lex();
    let ast = Parser::new(tokens, "interp.sn")
        .parse()
        .expect("interpolation should parse");
    let typed = Typechecker::from_ast(ast)
        .check()
        .expect("interpolation should type check");
    Compiler::from_ast(typed)
        .compile_assembly()
        .expect("interpolation should compile")
}

#[test]
fn each_embedded_expression_prints_with_its_own_format() {
    let assembly = compile(SOURCE);

    assert!(assembly.contains("[rel fmt_long]"));
    assert!(assembly.contains("[rel fmt_double]"));
    assert!(assembly.contains("[rel fmt_char]"));
    assert!(assembly.contains("[rel fmt_string]"));
    // The bool goes through the true/false selector.
    assert!(assembly.contains("[rel true_str]"));
    assert!(assembly.contains("[rel false_str]"));
}

#[test]
fn doubles_travel_through_xmm0_with_vector_count_one() {
    let assembly = compile(SOURCE);

    let movq = assembly.find("movq xmm0, rax").expect("double print uses movq");
    assert!(assembly[movq..].contains("mov rax, 1"));
}

#[test]
fn fragments_and_values_interleave_into_ten_printf_calls() {
    let assembly = compile(SOURCE);

    assert_eq!(10, assembly.matches("call printf wrt ..plt").count());
}

#[test]
fn fragments_are_interned_as_string_literals() {
    let assembly = compile(SOURCE);

    let data = assembly.find("section .data").unwrap();
    assert!(assembly[data..].contains("\"i=\""));
    assert!(assembly[data..].contains("\" s=\""));
}
