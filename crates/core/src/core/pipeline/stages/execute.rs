//! Execute: forwarding multiplexers, ALU-src select, and the ALU.

use tracing::trace;

use crate::core::pipeline::latches::ExMem;
use crate::core::pipeline::signals::Forward;
use crate::core::units::alu::{execute_alu, gen_alu_control};
use crate::sim::Simulator;

/// Runs the Execute stage, producing the next EX/MEM record.
///
/// Each operand first passes the forwarding multiplexer; the pre-multiplexed
/// second operand is what a store carries to memory, and only then does the
/// ALU-src multiplexer substitute the immediate.
pub(crate) fn execute_stage(sim: &mut Simulator) -> ExMem {
    let idex = sim.id_ex.output.clone();

    let operand1 = match sim.wires.forward_a {
        Forward::FromMemWb => sim.wires.write_data,
        Forward::FromExMem => sim.wires.alu_result,
        Forward::None => idex.read_data1,
    };
    let forwarded2 = match sim.wires.forward_b {
        Forward::FromMemWb => sim.wires.write_data,
        Forward::FromExMem => sim.wires.alu_result,
        Forward::None => idex.read_data2,
    };

    let operand2 = if idex.ctrl.alu_src {
        idex.imm
    } else {
        forwarded2
    };

    let alu_control = gen_alu_control(&idex);
    let alu_result = execute_alu(operand1, operand2, alu_control);

    let exmem = ExMem {
        instr: idex.instr,
        instr_addr: idex.instr_addr,
        branch_addr: idex.instr_addr.wrapping_add(idex.imm),
        alu_result,
        write_data: forwarded2,
        rd: idex.rd,
        ctrl: idex.ctrl,
    };

    // Published for next cycle's EX-EX forwarding.
    sim.wires.alu_result = alu_result;

    trace!(
        "[EX ] pc={:#010x} result={alu_result:#010x}",
        idex.instr_addr
    );

    exmem
}
