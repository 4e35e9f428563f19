//! Pipeline control signals and per-cycle wires.
//!
//! This module defines:
//! 1. **Control vector:** The per-stage control bits generated at Decode.
//! 2. **Forwarding selects:** The operand-source multiplexer encoding.
//! 3. **Wires:** The combinational state regenerated (or latched for one
//!    cycle) between stage evaluations.

use crate::isa::opcodes;

/// Per-stage control vector, generated from the opcode at Decode.
///
/// Stages only look at the signals relevant to them; a record with every bit
/// clear is a bubble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU-op bit 2 (distinguishes `lui` within the add group).
    pub alu_op2: bool,
    /// ALU-op bit 1 (register/immediate arithmetic group).
    pub alu_op1: bool,
    /// ALU-op bit 0 (branch group; immediate variant within `alu_op1`).
    pub alu_op0: bool,
    /// Second ALU operand comes from the immediate instead of `rs2`.
    pub alu_src: bool,
    /// Instruction may redirect the PC at the Memory stage.
    pub branch: bool,
    /// Memory read (load).
    pub mem_read: bool,
    /// Memory write (store).
    pub mem_write: bool,
    /// Destination register is written at Writeback.
    pub reg_write: bool,
    /// Writeback value comes from memory instead of the ALU.
    pub mem_to_reg: bool,
}

impl ControlSignals {
    /// Generates the control vector for an opcode.
    ///
    /// Unknown opcodes (including `ecall` and the reset word) produce the
    /// all-clear vector, which flows through the pipeline as a bubble.
    pub fn for_opcode(opcode: u32) -> Self {
        match opcode {
            opcodes::OP_REG => Self {
                alu_op1: true,
                reg_write: true,
                ..Self::default()
            },
            opcodes::OP_IMM => Self {
                alu_op1: true,
                alu_op0: true,
                alu_src: true,
                reg_write: true,
                ..Self::default()
            },
            opcodes::OP_LOAD => Self {
                alu_src: true,
                mem_read: true,
                reg_write: true,
                mem_to_reg: true,
                ..Self::default()
            },
            opcodes::OP_STORE => Self {
                alu_src: true,
                mem_write: true,
                ..Self::default()
            },
            opcodes::OP_BRANCH => Self {
                alu_op0: true,
                branch: true,
                ..Self::default()
            },
            opcodes::OP_LUI => Self {
                alu_op2: true,
                alu_src: true,
                reg_write: true,
                ..Self::default()
            },
            opcodes::OP_JAL => Self {
                alu_src: true,
                branch: true,
                reg_write: true,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Clears every control bit, turning the record into a bubble.
    pub fn flush(&mut self) {
        *self = Self::default();
    }
}

/// Source select for an Execute-stage operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Forward {
    /// No forwarding; use the value read from the register file at Decode.
    #[default]
    None,
    /// Forward the latched MEM/WB writeback value.
    FromMemWb,
    /// Forward the latched EX/MEM ALU result.
    FromExMem,
}

/// Pipeline wires: combinational control regenerated each cycle, plus the
/// values latched for exactly one cycle boundary (branch target, forwarding
/// data, stall controls).
#[derive(Debug, Clone, Default)]
pub struct Wires {
    /// Branch taken; Fetch redirects to `pc_src1` next cycle.
    pub pcsrc: bool,
    /// Fall-through PC for the next fetch.
    pub pc_src0: u32,
    /// Computed branch/jump target, set at the Memory stage.
    pub pc_src1: u32,
    /// Operand-1 forwarding select.
    pub forward_a: Forward,
    /// Operand-2 forwarding select.
    pub forward_b: Forward,
    /// Hold the IF/ID register this cycle (load-use stall).
    pub ifid_write: bool,
    /// Re-fetch the previous PC next cycle (load-use stall).
    pub pc_write: bool,
    /// Insert a bubble into ID/EX this cycle (load-use stall).
    pub flush_control: bool,
    /// Latched EX/MEM ALU result used by the forwarding multiplexers.
    pub alu_result: u32,
    /// Latched MEM/WB writeback value used by the forwarding multiplexers.
    pub write_data: u32,
}
