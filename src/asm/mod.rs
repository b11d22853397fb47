//! Textual x86-64 instruction model for the code generator.
//!
//! Instructions are kept as structured values until the very end of code
//! generation and rendered into NASM syntax via their [`Display`] impls.
mod reg;

use std::fmt::Display;

pub use self::reg::*;

#[derive(Debug, Clone, PartialEq)]
pub enum InstructionOperand {
    Register(Reg),
    Immediate(i64),
    /// A raw effective address, e.g. `rbp-16` or `rbx+rax+1`, rendered in
    /// brackets.
    Memory(String),
    /// A `[rel name]` reference to a label in `.data`.
    Rel(String),
}

impl Display for InstructionOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructionOperand::Register(reg) => write!(f, "{reg}"),
            InstructionOperand::Immediate(val) => write!(f, "{val}"),
            InstructionOperand::Memory(location) => write!(f, "[{location}]"),
            InstructionOperand::Rel(name) => write!(f, "[rel {name}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Comment(String),
    Label(String),
    Lea(InstructionOperand, InstructionOperand),
    Mov(InstructionOperand, InstructionOperand),
    Movzx(InstructionOperand, InstructionOperand),
    /// Bit-exact move between a general purpose register and an SSE
    /// register, used to hand doubles to `printf`.
    Movq(InstructionOperand, InstructionOperand),
    Add(InstructionOperand, InstructionOperand),
    Sub(InstructionOperand, InstructionOperand),
    Imul(InstructionOperand, InstructionOperand),
    Idiv(InstructionOperand),
    Cqo,
    Neg(InstructionOperand),
    Xor(InstructionOperand, InstructionOperand),
    Cmp(InstructionOperand, InstructionOperand),
    Test(InstructionOperand, InstructionOperand),
    Sete(InstructionOperand),
    Setne(InstructionOperand),
    Setl(InstructionOperand),
    Setle(InstructionOperand),
    Setg(InstructionOperand),
    Setge(InstructionOperand),
    Jz(String),
    Jnz(String),
    Jmp(String),
    Call(String),
    /// A PIC-safe call through the PLT, used for the C runtime symbols.
    CallPlt(String),
    Push(Reg),
    Pop(Reg),
    Ret,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Instruction::Comment(comment) => format!("\t; {comment}"),
            Instruction::Label(label) => format!("{label}:"),
            Instruction::Lea(target, source) => format!("\tlea {target}, {source}"),
            Instruction::Mov(target, source) => format!("\tmov {target}, {source}"),
            Instruction::Movzx(target, source) => format!("\tmovzx {target}, {source}"),
            Instruction::Movq(target, source) => format!("\tmovq {target}, {source}"),
            Instruction::Add(target, source) => format!("\tadd {target}, {source}"),
            Instruction::Sub(target, source) => format!("\tsub {target}, {source}"),
            Instruction::Imul(target, source) => format!("\timul {target}, {source}"),
            Instruction::Idiv(source) => format!("\tidiv {source}"),
            Instruction::Cqo => "\tcqo".to_string(),
            Instruction::Neg(target) => format!("\tneg {target}"),
            Instruction::Xor(target, source) => format!("\txor {target}, {source}"),
            Instruction::Cmp(target, source) => format!("\tcmp {target}, {source}"),
            Instruction::Test(target, source) => format!("\ttest {target}, {source}"),
            Instruction::Sete(target) => format!("\tsete {target}"),
            Instruction::Setne(target) => format!("\tsetne {target}"),
            Instruction::Setl(target) => format!("\tsetl {target}"),
            Instruction::Setle(target) => format!("\tsetle {target}"),
            Instruction::Setg(target) => format!("\tsetg {target}"),
            Instruction::Setge(target) => format!("\tsetge {target}"),
            Instruction::Jz(target) => format!("\tjz {target}"),
            Instruction::Jnz(target) => format!("\tjnz {target}"),
            Instruction::Jmp(target) => format!("\tjmp {target}"),
            Instruction::Call(name) => format!("\tcall {name}"),
            Instruction::CallPlt(name) => format!("\tcall {name} wrt ..plt"),
            Instruction::Push(source) => format!("\tpush {source}"),
            Instruction::Pop(target) => format!("\tpop {target}"),
            Instruction::Ret => "\tret".to_string(),
        };
        f.write_str(&value)
    }
}
