use sn_lang::{compiler::Compiler, lexer::Lexer, parser::Parser, typechecker::Typechecker};

const SOURCE: &str = r#"fn repeat_string(text:str, count:int):str =>
    var result:str = ""
    for var i:int = 0; i < count; i++ =>
        result = result + text
    return result

fn main():void =>
    print(repeat_string("hello ", 3))
"#;

fn compile(source: &str) -> String {
    let tokens = Lexer::new(source, "repeat.sn").lex();
    let ast = Parser::new(tokens, "repeat.sn")
        .parse()
        .expect("repeat_string should parse");
    let typed = Typechecker::from_ast(ast)
        .check()
        .expect("repeat_string should type check");
    Compiler::from_ast(typed)
        .compile_assembly()
        .expect("repeat_string should compile")
}

#[test]
fn for_loop_emits_start_and_end_labels() {
    let assembly = compile(SOURCE);

    assert!(assembly.contains(".L_for_start_0:"));
    assert!(assembly.contains(".L_for_end_0:"));
    assert!(assembly.contains("jmp .L_for_start_0"));
}

#[test]
fn concatenation_runs_once_per_iteration() {
    let assembly = compile(SOURCE);

    let start = assembly.find(".L_for_start_0:").unwrap();
    let end = assembly.find(".L_for_end_0:").unwrap();
    let body = &assembly[start..end];

    assert_eq!(2, body.matches("call strlen wrt ..plt").count());
    assert_eq!(1, body.matches("call malloc wrt ..plt").count());
    assert_eq!(1, body.matches("call strcpy wrt ..plt").count());
    assert_eq!(1, body.matches("call strcat wrt ..plt").count());
}

#[test]
fn string_literals_land_in_the_data_section() {
    let assembly = compile(SOURCE);

    let data = assembly.find("section .data").unwrap();
    assert!(assembly[data..].contains("\"hello \""));
}
