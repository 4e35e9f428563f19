//! Simulator error types.
//!
//! Every failure the core can detect is a [`SimError`]. No error is recovered
//! by the pipeline itself; all of them are fatal at the cycle in which they
//! are raised, and the surrounding driver decides the process exit code.

use thiserror::Error;

/// Fatal simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The fetched word's opcode (or opcode/funct combination) is not part of
    /// the supported RV32IM subset. Carries the raw 32-bit encoding.
    #[error("Invalid Instruction: 0x{0:08x}")]
    InvalidInstruction(u32),

    /// A read rejected while placing the program image. Reserved for the
    /// loader seam; pipeline accesses wrap and never raise it.
    #[error("Bad Read. Address: 0x{0:08x}")]
    BadRead(u32),

    /// A write rejected while placing the program image. Reserved for the
    /// loader seam; pipeline accesses wrap and never raise it.
    #[error("Bad Write. Address: 0x{0:08x}")]
    BadWrite(u32),

    /// An `ecall` was executed with an unsupported service number in `a0`.
    #[error("Illegal ecall number {0}")]
    IllegalEcall(u32),
}
