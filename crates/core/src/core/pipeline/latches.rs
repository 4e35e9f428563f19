//! Pipeline latches: the four stage-boundary registers.
//!
//! Each boundary is double-buffered: producers write the `input` side during
//! a cycle, consumers read the `output` side, and the driver promotes
//! `input -> output` at the cycle edge. The pair is two adjacent records,
//! not a pointer-linked structure.

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::Instruction;

/// A double-buffered stage-boundary register.
#[derive(Debug, Clone, Default)]
pub struct Latch<T: Clone> {
    /// Next-cycle value, written by the producing stage.
    pub input: T,
    /// Current-cycle value, read by the consuming stage.
    pub output: T,
}

impl<T: Clone> Latch<T> {
    /// Promotes the input side to the output side at the cycle edge.
    pub fn promote(&mut self) {
        self.output = self.input.clone();
    }
}

/// IF/ID boundary: the fetched instruction and its address.
#[derive(Debug, Clone, Default)]
pub struct IfId {
    /// Decoded instruction record.
    pub instr: Instruction,
    /// Address the instruction was fetched from.
    pub instr_addr: u32,
}

/// ID/EX boundary: decoded operands, immediate, and control.
#[derive(Debug, Clone, Default)]
pub struct IdEx {
    /// Instruction record, carried for tracing.
    pub instr: Instruction,
    /// Instruction address, used for branch-target computation.
    pub instr_addr: u32,
    /// Value read from `rs1` (for `jal`, the instruction address).
    pub read_data1: u32,
    /// Value read from `rs2`.
    pub read_data2: u32,
    /// Generated immediate.
    pub imm: u32,
    /// funct3 field for the ALU-control generator and memory width.
    pub funct3: u32,
    /// Bit 30 of the raw word (SUB/SRA discriminator).
    pub funct7_30: bool,
    /// Bit 25 of the raw word (M-extension discriminator).
    pub funct7_25: bool,
    /// Destination register index.
    pub rd: usize,
    /// First source register index, for the forwarding unit.
    pub rs1: usize,
    /// Second source register index, for the forwarding unit.
    pub rs2: usize,
    /// Control vector for the downstream stages.
    pub ctrl: ControlSignals,
}

/// EX/MEM boundary: ALU result, branch target, and store data.
#[derive(Debug, Clone, Default)]
pub struct ExMem {
    /// Instruction record, carried for tracing and branch resolution.
    pub instr: Instruction,
    /// Instruction address.
    pub instr_addr: u32,
    /// Branch/jump target (`instr_addr + imm`).
    pub branch_addr: u32,
    /// ALU result; doubles as the data memory address.
    pub alu_result: u32,
    /// Forwarded `rs2` value to be stored by the Memory stage.
    pub write_data: u32,
    /// Destination register index.
    pub rd: usize,
    /// Control vector (memory and writeback bits).
    pub ctrl: ControlSignals,
}

/// MEM/WB boundary: loaded data and the bypassed ALU result.
#[derive(Debug, Clone, Default)]
pub struct MemWb {
    /// Instruction record; the exit sentinel inspects its raw bits.
    pub instr: Instruction,
    /// Instruction address.
    pub instr_addr: u32,
    /// Data loaded from memory (for loads).
    pub read_data: u32,
    /// ALU result that bypassed the memory stage.
    pub alu_result: u32,
    /// Destination register index.
    pub rd: usize,
    /// Control vector (writeback bits).
    pub ctrl: ControlSignals,
}
