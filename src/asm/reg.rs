use std::fmt::Display;

/// The registers the code generator hands out. `Rax` is the accumulator:
/// every expression leaves its result there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rdi,
    Rsi,
    R8,
    R9,
    Rbp,
    Rsp,
    Al,
    Xmm0,
}

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Reg::Rax => "rax",
            Reg::Rbx => "rbx",
            Reg::Rcx => "rcx",
            Reg::Rdx => "rdx",
            Reg::Rdi => "rdi",
            Reg::Rsi => "rsi",
            Reg::R8 => "r8",
            Reg::R9 => "r9",
            Reg::Rbp => "rbp",
            Reg::Rsp => "rsp",
            Reg::Al => "al",
            Reg::Xmm0 => "xmm0",
        })
    }
}
