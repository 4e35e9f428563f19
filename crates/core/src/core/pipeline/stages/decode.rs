//! Decode: control generation, register reads, and immediate generation.

use tracing::trace;

use crate::common::bits::bit;
use crate::core::pipeline::hazards::source_regs;
use crate::core::pipeline::latches::IdEx;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::gen_imm;
use crate::isa::instruction::{InstrKind, InstructionBits};
use crate::sim::Simulator;

/// Runs the Decode stage, producing the next ID/EX record.
///
/// When the hazard unit asserted `flush_control` this cycle, the generated
/// control vector is cleared so the slot becomes a bubble; the instruction
/// and its address are still carried for traceability.
pub(crate) fn decode_stage(sim: &mut Simulator) -> IdEx {
    let ifid = sim.if_id.output.clone();
    let instr = ifid.instr;

    let mut ctrl = ControlSignals::for_opcode(instr.opcode());
    if sim.wires.flush_control {
        ctrl.flush();
        sim.wires.flush_control = false;
    }

    let (rs1, rs2) = source_regs(&instr);
    let mut idex = IdEx {
        instr,
        instr_addr: ifid.instr_addr,
        imm: gen_imm(&instr),
        rd: instr.bits.rd(),
        rs1,
        rs2,
        ctrl,
        ..IdEx::default()
    };

    match instr.kind {
        InstrKind::R(r) => {
            idex.read_data1 = sim.regs.read(rs1);
            idex.read_data2 = sim.regs.read(rs2);
            idex.funct3 = r.funct3;
            idex.funct7_30 = bit(instr.bits, 30);
            idex.funct7_25 = bit(instr.bits, 25);
        }
        InstrKind::I(it) => {
            idex.read_data1 = sim.regs.read(rs1);
            idex.funct3 = it.funct3;
            // Shift-immediate encodings keep funct7 in the upper immediate.
            idex.funct7_30 = bit(instr.bits, 30);
            idex.funct7_25 = bit(instr.bits, 25);
        }
        InstrKind::Load(it) => {
            idex.read_data1 = sim.regs.read(rs1);
            idex.funct3 = it.funct3;
        }
        InstrKind::S(s) => {
            idex.read_data1 = sim.regs.read(rs1);
            idex.read_data2 = sim.regs.read(rs2);
            idex.funct3 = s.funct3;
        }
        InstrKind::Sb(sb) => {
            idex.read_data1 = sim.regs.read(rs1);
            idex.read_data2 = sim.regs.read(rs2);
            idex.funct3 = sb.funct3;
        }
        InstrKind::U(_) => {}
        InstrKind::Uj(_) => {
            // The jump target is instr_addr + imm; feed the address through
            // the ALU's first operand.
            idex.read_data1 = ifid.instr_addr;
        }
        InstrKind::Ecall | InstrKind::Invalid => {}
    }

    trace!(
        "[ID ] pc={:#010x} inst={:#010x}",
        ifid.instr_addr, instr.bits
    );

    idex
}
