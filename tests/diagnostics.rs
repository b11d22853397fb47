use sn_lang::{
    compiler::Compiler, lexer::Lexer, parser::Parser, typechecker::Typechecker,
};

#[test]
fn an_error_on_one_line_does_not_suppress_later_diagnostics() {
    // A lexical error on line 2 and an unrelated parse error on line 4.
    let source = "fn main():void =>\n    var x:int = @\n    var y:int = 1\n    var z:\n";
    let tokens = Lexer::new(source, "errors.sn").lex();
    let errors = Parser::new(tokens, "errors.sn")
        .parse()
        .expect_err("both problems should be diagnosed");

    assert!(errors.iter().any(|e| e.message.contains("Unexpected character")));
    assert!(errors.iter().any(|e| e.message.contains("Expected a type")));
}

#[test]
fn type_errors_accumulate_across_functions() {
    let source = "fn f():int => return \"x\"\nfn g():str => return 1\n";
    let tokens = Lexer::new(source, "errors.sn").lex();
    let ast = Parser::new(tokens, "errors.sn").parse().expect("parses");
    let errors = Typechecker::from_ast(ast)
        .check()
        .expect_err("both functions are ill-typed");

    assert_eq!(2, errors.len());
}

#[test]
fn more_than_six_parameters_is_unsupported() {
    let source = "fn wide(a:int, b:int, c:int, d:int, e:int, f:int, g:int):int => return a\nfn main():void =>\n    var x:int = wide(1, 2, 3, 4, 5, 6, 7)\n";
    let tokens = Lexer::new(source, "wide.sn").lex();
    let ast = Parser::new(tokens, "wide.sn").parse().expect("parses");
    let typed = Typechecker::from_ast(ast).check().expect("type checks");
    let error = Compiler::from_ast(typed)
        .compile_assembly()
        .expect_err("seven parameters cannot be compiled");

    assert!(error.message.contains("More than 6"));
}

#[test]
fn calling_a_non_function_is_rejected() {
    let source = "fn main():void =>\n    var x:int = 1\n    x(2)\n";
    let tokens = Lexer::new(source, "call.sn").lex();
    let ast = Parser::new(tokens, "call.sn").parse().expect("parses");
    let errors = Typechecker::from_ast(ast).check().expect_err("x is not callable");

    assert!(errors[0].message.contains("invalid function"));
}

#[test]
fn undefined_function_calls_are_rejected() {
    let source = "fn main():void =>\n    missing()\n";
    let tokens = Lexer::new(source, "call.sn").lex();
    let ast = Parser::new(tokens, "call.sn").parse().expect("parses");
    let errors = Typechecker::from_ast(ast)
        .check()
        .expect_err("missing is undefined");

    assert!(errors[0].message.contains("undefined function 'missing'"));
}

#[test]
fn imports_are_accepted_and_ignored() {
    let source = "import math\nfn main():void => return\n";
    let tokens = Lexer::new(source, "import.sn").lex();
    let ast = Parser::new(tokens, "import.sn").parse().expect("parses");
    let typed = Typechecker::from_ast(ast).check().expect("type checks");
    let assembly = Compiler::from_ast(typed)
        .compile_assembly()
        .expect("compiles");

    assert!(assembly.contains("main:"));
    assert!(!assembly.contains("math"));
}
