//! Writeback: the register-file write port.

use tracing::trace;

use crate::isa::instruction::InstrKind;
use crate::sim::Simulator;

/// Runs the Writeback stage.
///
/// Selects the value per the MEM/WB control bits and writes `rd`. Jumps link
/// `instr_addr + 4`. The driver evaluates this stage before Decode, so a
/// same-cycle reader in Decode observes the freshly written value.
pub(crate) fn writeback_stage(sim: &mut Simulator) {
    let memwb = sim.mem_wb.output.clone();

    let value = if memwb.ctrl.mem_to_reg {
        memwb.read_data
    } else if matches!(memwb.instr.kind, InstrKind::Uj(_)) {
        memwb.instr_addr.wrapping_add(4)
    } else {
        memwb.alu_result
    };

    if memwb.ctrl.reg_write && memwb.rd != 0 {
        sim.regs.write(memwb.rd, value);
        trace!(
            "[WB ] pc={:#010x} x{} <- {value:#010x}",
            memwb.instr_addr, memwb.rd
        );
    }
}
