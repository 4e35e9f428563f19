//! Fetch: PC selection, stall replay, and instruction load.

use tracing::trace;

use crate::common::SimError;
use crate::core::pipeline::latches::IfId;
use crate::isa::Instruction;
use crate::memory::MemWidth;
use crate::sim::Simulator;

/// Runs the Fetch stage, producing the next IF/ID record.
///
/// PC selection happens in two steps, in this order: a taken branch observed
/// on the wires redirects both the PC and the fall-through; a pending
/// load-use stall then rewinds the PC by one instruction so the slot is
/// fetched again.
pub(crate) fn fetch_stage(sim: &mut Simulator) -> Result<IfId, SimError> {
    if sim.wires.pcsrc {
        sim.regs.pc = sim.wires.pc_src1;
        sim.wires.pc_src0 = sim.wires.pc_src1;
    } else {
        sim.regs.pc = sim.wires.pc_src0;
    }

    if sim.wires.pc_write {
        sim.regs.pc = sim.regs.pc.wrapping_sub(4);
        sim.wires.pc_src0 = sim.regs.pc;
        sim.wires.pc_write = false;
    }

    let instr_addr = sim.regs.pc;
    sim.wires.pc_src0 = sim.wires.pc_src0.wrapping_add(4);

    let word = sim.mem.load(instr_addr, MemWidth::Word);
    let instr = Instruction::decode(word)?;

    trace!("[IF ] pc={instr_addr:#010x} inst={word:#010x}");

    Ok(IfId { instr, instr_addr })
}
