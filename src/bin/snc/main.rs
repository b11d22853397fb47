//! # snc
//!
//! The compiler binary for Sn. It combines lexer, parser, type checker
//! and code generator into a single application: a source file goes in,
//! a System-V x86-64 assembly file comes out, and with `-v` the result is
//! assembled, linked against the C runtime and executed.
mod cli;

use cli::Cli;

use std::{error::Error, fs, path::PathBuf};

use log::{error, info};
use sn_lang::{
    compiler::{assemble_nasm, link_executable, run_executable, Compiler},
    lexer::Lexer,
    parser::Parser,
    typechecker::Typechecker,
};

fn main() {
    let args = Cli::init();

    let level = if args.debug {
        log::Level::Debug
    } else {
        log::Level::Error
    };
    simple_logger::init_with_level(level).unwrap();

    if let Err(error) = run(&args) {
        error!("{error}");
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(&args.file)?;
    let file_name = args.file.to_string_lossy().to_string();

    let tokens = Lexer::new(&source, &file_name).lex();

    let ast = match Parser::new(tokens, &file_name).parse() {
        Ok(ast) => ast,
        Err(errors) => {
            for parse_error in &errors {
                error!("{parse_error}");
            }
            return Err(format!("Aborting after {} parse error(s)", errors.len()).into());
        }
    };

    if args.dump_parsed {
        info!("Parsed AST:\n{}", serde_json::to_string_pretty(&ast)?);
    }

    let typed = match Typechecker::from_ast(ast).check() {
        Ok(typed) => typed,
        Err(errors) => {
            for type_error in &errors {
                error!("{type_error}");
            }
            return Err(format!("Aborting after {} type error(s)", errors.len()).into());
        }
    };

    if args.dump_typed {
        info!("Typed AST:\n{}", serde_json::to_string_pretty(&typed)?);
    }

    let assembly = Compiler::from_ast(typed).compile_assembly()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension("o"));
    fs::write(&output, &assembly)?;
    info!("Wrote '{}'", output.display());

    if args.run {
        let object = output.with_extension("elf.o");
        let executable = PathBuf::from("a.out");

        assemble_nasm(&output, &object)?;
        link_executable(&object, &executable)?;

        let status = run_executable(&executable)?;
        if status != 0 {
            return Err(format!("Program exited with status {status}").into());
        }
    }

    Ok(())
}
