//! Code generator for Sn.
//!
//! Turns a type-correct AST into System-V AMD64 assembly in NASM syntax.
//! The emitted text is PIC-safe (`[rel …]` loads, `wrt ..plt` calls) and
//! links against the C runtime for `printf`, `malloc`, `strlen`,
//! `strcpy` and `strcat`.
//!
//! The register discipline is a fixed accumulator scheme: every
//! expression leaves its integer or pointer result in `rax`. Binary
//! operators sequence the left operand through a 16-byte stack spill so a
//! nested right operand cannot clobber it, then compute with the left
//! value in `rbx` and the right value in `rcx`. Because the prologue
//! reserves a 16-byte-rounded frame and every transient spill is 16 bytes
//! wide, `rsp` is 16-byte aligned at each call site and no dynamic
//! realignment is needed.
mod frame;
mod strings;

pub use self::frame::*;
pub use self::strings::*;

use std::{
    error::Error,
    fmt::Display,
    path::Path,
    process::Command,
};

use Instruction::*;
use InstructionOperand::*;
use Reg::*;

use log::{debug, error, info};

use crate::{
    asm::{Instruction, InstructionOperand, Reg},
    lexer::Literal,
    parser::ast::{
        Ast, BinaryExpression, BinaryOperator, Block, CallExpression, Expression, ForLoop,
        FunctionDeclaration, IfStatement, InterpolatedString, InterpolationPart, Position,
        Statement, StepExpression, UnaryOperator, VariableDeclaration, WhileLoop,
    },
    typechecker::{TypeInfo, VariableType},
};

const ARG_REGISTERS: [Reg; 6] = [Rdi, Rsi, Rdx, Rcx, R8, R9];

const EXTERNS: [&str; 5] = ["printf", "malloc", "strlen", "strcpy", "strcat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub position: Position,
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} ({}:{}:{})", self.message, file, line, col)
    }
}

impl Error for CompileError {}

type CResult<T> = Result<T, CompileError>;

/// Compiler for a single type-checked module.
pub struct Compiler {
    ast: Ast<TypeInfo>,
    strings: StringTable,
    label_counter: usize,
}

impl Compiler {
    pub fn from_ast(ast: Ast<TypeInfo>) -> Self {
        Self {
            ast,
            strings: StringTable::new(),
            label_counter: 0,
        }
    }

    /// Generate the complete assembly file: `.text` header, function
    /// bodies, the `.data` section collected along the way, and the
    /// GNU-stack marker.
    pub fn compile_assembly(mut self) -> CResult<String> {
        info!("Generating code for '{}'...", self.ast.file());

        let mut functions = vec![];
        for node in self.ast.nodes() {
            match node {
                Statement::Function(function) => {
                    functions.push(self.compile_function(&function)?);
                }
                other => {
                    // Module-scope declarations and calls are admitted by
                    // the grammar but have no storage at runtime.
                    debug!("No code generated for top-level statement at {:?}", statement_position(&other));
                }
            }
        }

        let mut output = String::new();

        output.push_str("section .text\n");
        output.push_str("global main\n");
        for external in EXTERNS {
            output.push_str(&format!("extern {external}\n"));
        }

        for function in &functions {
            output.push('\n');
            for instruction in function {
                output.push_str(&format!("{instruction}\n"));
            }
        }

        output.push_str("\nsection .data\n");
        for line in self.strings.to_data_lines() {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str("fmt_int: db \"%d\", 0\n");
        output.push_str("fmt_long: db \"%ld\", 0\n");
        output.push_str("fmt_double: db \"%.5f\", 0\n");
        output.push_str("fmt_char: db \"%c\", 0\n");
        output.push_str("fmt_string: db \"%s\", 0\n");
        output.push_str("fmt_newline: db 10, 0\n");
        output.push_str("true_str: db \"true\", 0\n");
        output.push_str("false_str: db \"false\", 0\n");

        output.push_str("\nsection .note.GNU-stack noalloc noexec nowrite progbits\n");

        Ok(output)
    }

    fn next_label(&mut self) -> usize {
        let label = self.label_counter;
        self.label_counter += 1;
        label
    }

    fn compile_function(
        &mut self,
        function: &FunctionDeclaration<TypeInfo>,
    ) -> CResult<Vec<Instruction>> {
        if function.params.len() > ARG_REGISTERS.len() {
            return Err(CompileError {
                message: "More than 6 function parameters are not supported".to_string(),
                position: function.position.clone(),
            });
        }

        let mut frame = FrameBuilder::new();
        let mut body = vec![];

        // Spill the incoming argument registers to their home slots in
        // declaration order.
        for (index, param) in function.params.iter().enumerate() {
            let ty = VariableType::from(&param.type_name);
            let offset = frame.add(&param.name, ty, SymbolKind::Parameter);
            let register = ARG_REGISTERS[index];
            body.push(Comment(format!("{} = {register}", param.name)));
            body.push(Mov(Memory(format!("rbp-{offset}")), Register(register)));
        }

        for statement in &function.body.statements {
            self.compile_statement(statement, &mut frame, &mut body, &function.name)?;
        }

        // The prologue is assembled last, once the frame layout is known.
        let mut instructions = vec![
            Label(function.name.clone()),
            Push(Rbp),
            Mov(Register(Rbp), Register(Rsp)),
            Sub(Register(Rsp), Immediate(frame.frame_size() as i64)),
        ];
        instructions.append(&mut body);

        instructions.push(Label(format!("{}_return", function.name)));
        if function.name == "main" {
            instructions.push(Xor(Register(Rax), Register(Rax)));
        }
        instructions.push(Mov(Register(Rsp), Register(Rbp)));
        instructions.push(Pop(Rbp));
        instructions.push(Ret);

        Ok(instructions)
    }

    fn compile_statement(
        &mut self,
        statement: &Statement<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
        function: &str,
    ) -> CResult<()> {
        match statement {
            Statement::Expression(expression) => {
                self.compile_expression(expression, frame, out)?;
            }
            Statement::VariableDeclaration(declaration) => {
                self.compile_variable_declaration(declaration, frame, out)?;
            }
            Statement::Return(ret) => {
                match &ret.value {
                    Some(value) => self.compile_expression(value, frame, out)?,
                    None => out.push(Xor(Register(Rax), Register(Rax))),
                }
                out.push(Jmp(format!("{function}_return")));
            }
            Statement::Block(block) => {
                self.compile_block(block, frame, out, function)?;
            }
            Statement::If(if_statement) => {
                self.compile_if(if_statement, frame, out, function)?;
            }
            Statement::While(while_loop) => {
                self.compile_while(while_loop, frame, out, function)?;
            }
            Statement::For(for_loop) => {
                self.compile_for(for_loop, frame, out, function)?;
            }
            Statement::Import(import) => {
                debug!("Ignoring import of '{}'", import.module);
            }
            Statement::Function(function) => {
                return Err(CompileError {
                    message: "Functions may only be declared at the top level".to_string(),
                    position: function.position.clone(),
                });
            }
        }

        Ok(())
    }

    fn compile_block(
        &mut self,
        block: &Block<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
        function: &str,
    ) -> CResult<()> {
        frame.push();
        for statement in &block.statements {
            self.compile_statement(statement, frame, out, function)?;
        }
        frame.pop();
        Ok(())
    }

    fn compile_variable_declaration(
        &mut self,
        declaration: &VariableDeclaration<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        match &declaration.initializer {
            Some(initializer) => self.compile_expression(initializer, frame, out)?,
            None => out.push(Xor(Register(Rax), Register(Rax))),
        }

        let offset = frame.add(&declaration.name, declaration.info.ty.clone(), SymbolKind::Local);
        out.push(Comment(format!(
            "{}: {} at [rbp-{offset}]",
            declaration.name, declaration.info.ty
        )));
        out.push(Mov(Memory(format!("rbp-{offset}")), Register(Rax)));

        Ok(())
    }

    fn compile_if(
        &mut self,
        if_statement: &IfStatement<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
        function: &str,
    ) -> CResult<()> {
        let label = self.next_label();
        let else_label = format!(".L_else_{label}");
        let end_label = format!(".L_end_{label}");

        self.compile_expression(&if_statement.condition, frame, out)?;
        out.push(Test(Register(Rax), Register(Rax)));
        out.push(Jz(if if_statement.else_block.is_some() {
            else_label.clone()
        } else {
            end_label.clone()
        }));

        self.compile_block(&if_statement.then_block, frame, out, function)?;

        if let Some(else_block) = &if_statement.else_block {
            out.push(Jmp(end_label.clone()));
            out.push(Label(else_label));
            self.compile_block(else_block, frame, out, function)?;
        }

        out.push(Label(end_label));
        Ok(())
    }

    fn compile_while(
        &mut self,
        while_loop: &WhileLoop<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
        function: &str,
    ) -> CResult<()> {
        let label = self.next_label();
        let start_label = format!(".L_while_start_{label}");
        let end_label = format!(".L_while_end_{label}");

        out.push(Label(start_label.clone()));
        self.compile_expression(&while_loop.condition, frame, out)?;
        out.push(Test(Register(Rax), Register(Rax)));
        out.push(Jz(end_label.clone()));

        self.compile_block(&while_loop.body, frame, out, function)?;

        out.push(Jmp(start_label));
        out.push(Label(end_label));
        Ok(())
    }

    fn compile_for(
        &mut self,
        for_loop: &ForLoop<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
        function: &str,
    ) -> CResult<()> {
        // The initializer lives in its own scope wrapping the loop.
        frame.push();

        let label = self.next_label();
        let start_label = format!(".L_for_start_{label}");
        let end_label = format!(".L_for_end_{label}");

        let result = (|this: &mut Self, frame: &mut FrameBuilder| -> CResult<()> {
            if let Some(initializer) = &for_loop.initializer {
                this.compile_statement(initializer, frame, out, function)?;
            }

            out.push(Label(start_label.clone()));
            match &for_loop.condition {
                Some(condition) => this.compile_expression(condition, frame, out)?,
                None => out.push(Mov(Register(Rax), Immediate(1))),
            }
            out.push(Test(Register(Rax), Register(Rax)));
            out.push(Jz(end_label.clone()));

            this.compile_block(&for_loop.body, frame, out, function)?;

            if let Some(increment) = &for_loop.increment {
                this.compile_expression(increment, frame, out)?;
            }
            out.push(Jmp(start_label.clone()));
            out.push(Label(end_label.clone()));
            Ok(())
        })(self, &mut *frame);

        frame.pop();
        result
    }

    /// Emit code leaving the expression's value in `rax`.
    fn compile_expression(
        &mut self,
        expression: &Expression<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        match expression {
            Expression::Literal(literal) => {
                match &literal.value {
                    Literal::Int(value) | Literal::Long(value) => {
                        out.push(Mov(Register(Rax), Immediate(*value)));
                    }
                    Literal::Char(value) => {
                        out.push(Mov(Register(Rax), Immediate(*value as i64)));
                    }
                    Literal::Bool(value) => {
                        out.push(Mov(Register(Rax), Immediate(i64::from(*value))));
                    }
                    Literal::Float(value) => {
                        // The IEEE-754 bit pattern travels through rax;
                        // doubles only support loading and printing.
                        out.push(Comment(format!("double {value}")));
                        out.push(Mov(Register(Rax), Immediate(value.to_bits() as i64)));
                    }
                    Literal::Str(value) => {
                        let label = self.strings.add(value);
                        out.push(Lea(Register(Rax), Rel(label)));
                    }
                    Literal::Nil => {
                        out.push(Xor(Register(Rax), Register(Rax)));
                    }
                }
                Ok(())
            }
            Expression::Variable(variable) => {
                let Some(symbol) = frame.lookup(&variable.name) else {
                    return Err(CompileError {
                        message: format!(
                            "Variable '{}' has no stack slot; module-level variables are not supported",
                            variable.name
                        ),
                        position: variable.position.clone(),
                    });
                };
                out.push(Mov(Register(Rax), Memory(format!("rbp-{}", symbol.offset))));
                Ok(())
            }
            Expression::Assign(assignment) => {
                self.compile_expression(&assignment.value, frame, out)?;
                let Some(symbol) = frame.lookup(&assignment.name) else {
                    return Err(CompileError {
                        message: format!(
                            "Variable '{}' has no stack slot; module-level variables are not supported",
                            assignment.name
                        ),
                        position: assignment.position.clone(),
                    });
                };
                out.push(Mov(Memory(format!("rbp-{}", symbol.offset)), Register(Rax)));
                Ok(())
            }
            Expression::Unary(unary) => {
                self.compile_expression(&unary.operand, frame, out)?;
                match unary.operator {
                    UnaryOperator::Negate => out.push(Neg(Register(Rax))),
                    UnaryOperator::Not => out.push(Xor(Register(Rax), Immediate(1))),
                }
                Ok(())
            }
            Expression::Increment(step) => self.compile_step(step, 1, frame, out),
            Expression::Decrement(step) => self.compile_step(step, -1, frame, out),
            Expression::Binary(binary) => self.compile_binary(binary, frame, out),
            Expression::Call(call) => self.compile_call(call, frame, out),
            Expression::Interpolated(interpolated) => Err(CompileError {
                message: "Interpolated strings are only supported as print arguments".to_string(),
                position: interpolated.position.clone(),
            }),
            Expression::Array(array) => Err(CompileError {
                message: "Arrays are not supported by the code generator yet".to_string(),
                position: array.position.clone(),
            }),
            Expression::ArrayAccess(access) => Err(CompileError {
                message: "Arrays are not supported by the code generator yet".to_string(),
                position: access.position.clone(),
            }),
        }
    }

    fn compile_step(
        &mut self,
        step: &StepExpression<TypeInfo>,
        delta: i64,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        let Expression::Variable(variable) = &step.operand else {
            return Err(CompileError {
                message: "'++' and '--' require a variable operand".to_string(),
                position: step.position.clone(),
            });
        };
        let Some(symbol) = frame.lookup(&variable.name) else {
            return Err(CompileError {
                message: format!(
                    "Variable '{}' has no stack slot; module-level variables are not supported",
                    variable.name
                ),
                position: variable.position.clone(),
            });
        };
        let slot = format!("rbp-{}", symbol.offset);

        out.push(Mov(Register(Rax), Memory(slot.clone())));
        if delta >= 0 {
            out.push(Add(Register(Rax), Immediate(delta)));
        } else {
            out.push(Sub(Register(Rax), Immediate(-delta)));
        }
        out.push(Mov(Memory(slot), Register(Rax)));

        Ok(())
    }

    fn compile_binary(
        &mut self,
        binary: &BinaryExpression<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        // Short-circuit operators skip the right operand entirely.
        match binary.operator {
            BinaryOperator::And => {
                let end_label = format!(".L_and_end_{}", self.next_label());
                self.compile_expression(&binary.left, frame, out)?;
                out.push(Test(Register(Rax), Register(Rax)));
                out.push(Jz(end_label.clone()));
                self.compile_expression(&binary.right, frame, out)?;
                out.push(Label(end_label));
                return Ok(());
            }
            BinaryOperator::Or => {
                let end_label = format!(".L_or_end_{}", self.next_label());
                self.compile_expression(&binary.left, frame, out)?;
                out.push(Test(Register(Rax), Register(Rax)));
                out.push(Jnz(end_label.clone()));
                self.compile_expression(&binary.right, frame, out)?;
                out.push(Label(end_label));
                return Ok(());
            }
            _ => {}
        }

        // The left value is sequenced through a 16-byte spill so the
        // right operand cannot clobber it; the spill width keeps rsp
        // 16-byte aligned for any calls inside the right operand.
        self.compile_expression(&binary.left, frame, out)?;
        out.push(Sub(Register(Rsp), Immediate(16)));
        out.push(Mov(Memory("rsp".to_string()), Register(Rax)));
        self.compile_expression(&binary.right, frame, out)?;
        out.push(Mov(Register(Rcx), Register(Rax)));
        out.push(Mov(Register(Rbx), Memory("rsp".to_string())));

        if binary.operator == BinaryOperator::Add && binary.info.ty == VariableType::Str {
            // String concatenation: strlen both operands, malloc the sum
            // plus the terminator, strcpy the left and strcat the right.
            // The spill slot doubles as scratch across the libc calls;
            // rbx survives them because it is callee-saved.
            out.push(Mov(Memory("rsp+8".to_string()), Register(Rcx)));
            out.push(Mov(Register(Rdi), Register(Rbx)));
            out.push(CallPlt("strlen".to_string()));
            out.push(Mov(Register(Rbx), Register(Rax)));
            out.push(Mov(Register(Rdi), Memory("rsp+8".to_string())));
            out.push(CallPlt("strlen".to_string()));
            out.push(Lea(Register(Rdi), Memory("rbx+rax+1".to_string())));
            out.push(CallPlt("malloc".to_string()));
            out.push(Mov(Register(Rdi), Register(Rax)));
            out.push(Mov(Register(Rsi), Memory("rsp".to_string())));
            out.push(CallPlt("strcpy".to_string()));
            out.push(Mov(Register(Rdi), Register(Rax)));
            out.push(Mov(Register(Rsi), Memory("rsp+8".to_string())));
            out.push(CallPlt("strcat".to_string()));
            out.push(Add(Register(Rsp), Immediate(16)));
            return Ok(());
        }

        out.push(Add(Register(Rsp), Immediate(16)));

        match binary.operator {
            BinaryOperator::Add => {
                out.push(Mov(Register(Rax), Register(Rbx)));
                out.push(Add(Register(Rax), Register(Rcx)));
            }
            BinaryOperator::Subtract => {
                out.push(Mov(Register(Rax), Register(Rbx)));
                out.push(Sub(Register(Rax), Register(Rcx)));
            }
            BinaryOperator::Multiply => {
                out.push(Mov(Register(Rax), Register(Rbx)));
                out.push(Imul(Register(Rax), Register(Rcx)));
            }
            BinaryOperator::Divide => {
                out.push(Mov(Register(Rax), Register(Rbx)));
                out.push(Cqo);
                out.push(Idiv(Register(Rcx)));
            }
            BinaryOperator::Modulo => {
                out.push(Mov(Register(Rax), Register(Rbx)));
                out.push(Cqo);
                out.push(Idiv(Register(Rcx)));
                out.push(Mov(Register(Rax), Register(Rdx)));
            }
            comparison => {
                out.push(Cmp(Register(Rbx), Register(Rcx)));
                out.push(match comparison {
                    BinaryOperator::Equal => Sete(Register(Al)),
                    BinaryOperator::NotEqual => Setne(Register(Al)),
                    BinaryOperator::LessThan => Setl(Register(Al)),
                    BinaryOperator::LessOrEqual => Setle(Register(Al)),
                    BinaryOperator::GreaterThan => Setg(Register(Al)),
                    BinaryOperator::GreaterOrEqual => Setge(Register(Al)),
                    _ => unreachable!("logical operators are handled above"),
                });
                out.push(Movzx(Register(Rax), Register(Al)));
            }
        }

        Ok(())
    }

    fn compile_call(
        &mut self,
        call: &CallExpression<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        let Expression::Variable(callee) = &call.callee else {
            return Err(CompileError {
                message: "Unsupported call target; only named functions can be called".to_string(),
                position: call.position.clone(),
            });
        };

        if callee.name == "print" {
            return self.compile_print(&call.args[0], frame, out);
        }

        if call.args.len() > ARG_REGISTERS.len() {
            return Err(CompileError {
                message: "More than 6 call arguments are not supported".to_string(),
                position: call.position.clone(),
            });
        }

        out.push(Comment(format!("call {}", callee.name)));

        // Arguments are evaluated right-to-left into 16-byte staging
        // slots, then loaded into their System-V registers.
        for arg in call.args.iter().rev() {
            self.compile_expression(arg, frame, out)?;
            out.push(Sub(Register(Rsp), Immediate(16)));
            out.push(Mov(Memory("rsp".to_string()), Register(Rax)));
        }
        for index in 0..call.args.len() {
            out.push(Mov(
                Register(ARG_REGISTERS[index]),
                Memory(format!("rsp+{}", 16 * index)),
            ));
        }
        if !call.args.is_empty() {
            out.push(Add(
                Register(Rsp),
                Immediate(16 * call.args.len() as i64),
            ));
        }

        out.push(Call(callee.name.clone()));
        Ok(())
    }

    /// `print(arg)`: dispatch on the argument's checked type to a printf
    /// format string. An interpolated argument is walked part by part,
    /// printing fragments with `fmt_string` and embedded expressions with
    /// the same per-type dispatch.
    fn compile_print(
        &mut self,
        arg: &Expression<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        if let Expression::Interpolated(interpolated) = arg {
            return self.compile_interpolated_print(interpolated, frame, out);
        }

        self.compile_expression(arg, frame, out)?;
        self.compile_print_value(&arg.info().ty, &arg.position(), out)
    }

    fn compile_interpolated_print(
        &mut self,
        interpolated: &InterpolatedString<TypeInfo>,
        frame: &mut FrameBuilder,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        for part in &interpolated.parts {
            match part {
                InterpolationPart::Fragment(fragment) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    let label = self.strings.add(fragment);
                    out.push(Lea(Register(Rsi), Rel(label)));
                    out.push(Lea(Register(Rdi), Rel("fmt_string".to_string())));
                    out.push(Xor(Register(Rax), Register(Rax)));
                    out.push(CallPlt("printf".to_string()));
                }
                InterpolationPart::Expression(expression) => {
                    self.compile_expression(expression, frame, out)?;
                    self.compile_print_value(&expression.info().ty, &expression.position(), out)?;
                }
            }
        }

        Ok(())
    }

    /// Print the value currently in `rax` according to its type.
    fn compile_print_value(
        &mut self,
        ty: &VariableType,
        position: &Position,
        out: &mut Vec<Instruction>,
    ) -> CResult<()> {
        match ty {
            VariableType::Int | VariableType::Long => {
                out.push(Mov(Register(Rsi), Register(Rax)));
                out.push(Lea(Register(Rdi), Rel("fmt_long".to_string())));
                out.push(Xor(Register(Rax), Register(Rax)));
                out.push(CallPlt("printf".to_string()));
            }
            VariableType::Double => {
                out.push(Movq(Register(Xmm0), Register(Rax)));
                out.push(Lea(Register(Rdi), Rel("fmt_double".to_string())));
                // One vector argument.
                out.push(Mov(Register(Rax), Immediate(1)));
                out.push(CallPlt("printf".to_string()));
            }
            VariableType::Char => {
                out.push(Mov(Register(Rsi), Register(Rax)));
                out.push(Lea(Register(Rdi), Rel("fmt_char".to_string())));
                out.push(Xor(Register(Rax), Register(Rax)));
                out.push(CallPlt("printf".to_string()));
            }
            VariableType::Str => {
                out.push(Mov(Register(Rsi), Register(Rax)));
                out.push(Lea(Register(Rdi), Rel("fmt_string".to_string())));
                out.push(Xor(Register(Rax), Register(Rax)));
                out.push(CallPlt("printf".to_string()));
            }
            VariableType::Bool => {
                let label = self.next_label();
                let false_label = format!(".L_false_{label}");
                let end_label = format!(".L_bool_end_{label}");
                out.push(Test(Register(Rax), Register(Rax)));
                out.push(Jz(false_label.clone()));
                out.push(Lea(Register(Rsi), Rel("true_str".to_string())));
                out.push(Jmp(end_label.clone()));
                out.push(Label(false_label));
                out.push(Lea(Register(Rsi), Rel("false_str".to_string())));
                out.push(Label(end_label));
                out.push(Lea(Register(Rdi), Rel("fmt_string".to_string())));
                out.push(Xor(Register(Rax), Register(Rax)));
                out.push(CallPlt("printf".to_string()));
            }
            other => {
                return Err(CompileError {
                    message: format!("print cannot render a value of type '{other}'"),
                    position: position.clone(),
                });
            }
        }

        Ok(())
    }
}

fn statement_position(statement: &Statement<TypeInfo>) -> Option<Position> {
    match statement {
        Statement::Expression(expression) => Some(expression.position()),
        Statement::VariableDeclaration(declaration) => Some(declaration.position.clone()),
        Statement::Import(import) => Some(import.position.clone()),
        _ => None,
    }
}

/// Assemble the generated file with NASM.
pub fn assemble_nasm(source: &Path, object: &Path) -> Result<(), Box<dyn Error>> {
    info!("Assembling '{}'...", source.display());

    let output = Command::new("nasm")
        .args([
            "-f",
            "elf64",
            &source.to_string_lossy(),
            "-o",
            &object.to_string_lossy(),
        ])
        .output()?;

    let stderr = std::str::from_utf8(&output.stderr)?;
    if !stderr.is_empty() {
        error!("{stderr}");
    }
    if !output.status.success() {
        return Err("nasm failed".into());
    }

    Ok(())
}

/// Link the assembled object against the C runtime.
pub fn link_executable(object: &Path, executable: &Path) -> Result<(), Box<dyn Error>> {
    info!("Linking '{}'...", executable.display());

    let output = Command::new("gcc")
        .args([
            "-no-pie",
            &object.to_string_lossy(),
            "-o",
            &executable.to_string_lossy(),
        ])
        .output()?;

    let stderr = std::str::from_utf8(&output.stderr)?;
    if !stderr.is_empty() {
        error!("{stderr}");
    }
    if !output.status.success() {
        return Err("linking failed".into());
    }

    Ok(())
}

/// Run the produced executable, forwarding its output, and return its
/// exit code.
pub fn run_executable(executable: &Path) -> Result<i32, Box<dyn Error>> {
    info!("Running '{}'...", executable.display());

    let output = Command::new(executable).output()?;

    print!("{}", String::from_utf8_lossy(&output.stdout));
    eprint!("{}", String::from_utf8_lossy(&output.stderr));

    Ok(output.status.code().unwrap_or(1))
}
