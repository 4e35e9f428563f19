//! Load-use hazard detection and operand forwarding.
//!
//! Both units are combinational: they inspect the current (`output`) side of
//! the pipeline latches and produce control decisions for this cycle. The
//! hazard unit runs between Fetch and Decode; the forwarding unit runs
//! between Decode and Execute.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::signals::Forward;
use crate::isa::instruction::{InstrKind, Instruction, InstructionBits};

/// Source register indices of an instruction, for dependence checks.
///
/// Only formats that actually carry the field contribute it: `rs2` exists in
/// the R/S/SB formats, `rs1` additionally in the I formats. U, UJ, `ecall`,
/// and unknown encodings read nothing and report 0, which never matches a
/// producing register other than `x0`.
pub fn source_regs(instr: &Instruction) -> (usize, usize) {
    match instr.kind {
        InstrKind::R(_) | InstrKind::S(_) | InstrKind::Sb(_) => {
            (instr.bits.rs1(), instr.bits.rs2())
        }
        InstrKind::I(_) | InstrKind::Load(_) => (instr.bits.rs1(), 0),
        InstrKind::U(_) | InstrKind::Uj(_) | InstrKind::Ecall | InstrKind::Invalid => (0, 0),
    }
}

/// Checks for a load-use hazard between Execute and Decode.
///
/// Fires when the instruction currently in Execute is a load whose
/// destination is a source of the instruction currently in Decode. The
/// resulting one-cycle stall lets the forwarding unit resolve the dependence
/// on the following cycle.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.ctrl.mem_read {
        return false;
    }
    let (rs1, rs2) = source_regs(&if_id.instr);
    id_ex.rd == rs1 || id_ex.rd == rs2
}

/// Chooses the Execute-stage operand sources.
///
/// The EX hazard (a producer one cycle ahead, in EX/MEM) takes priority over
/// the MEM hazard (two cycles ahead, in MEM/WB); `x0` is never forwarded.
pub fn forward_selects(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (Forward, Forward) {
    let mut forward_a = Forward::None;
    let mut forward_b = Forward::None;

    let ex_hazard = |rs: usize| ex_mem.ctrl.reg_write && ex_mem.rd != 0 && ex_mem.rd == rs;

    if ex_hazard(id_ex.rs1) {
        forward_a = Forward::FromExMem;
    }
    if ex_hazard(id_ex.rs2) {
        forward_b = Forward::FromExMem;
    }

    if mem_wb.ctrl.reg_write && mem_wb.rd != 0 {
        if mem_wb.rd == id_ex.rs1 && !ex_hazard(id_ex.rs1) {
            forward_a = Forward::FromMemWb;
        }
        if mem_wb.rd == id_ex.rs2 && !ex_hazard(id_ex.rs2) {
            forward_b = Forward::FromMemWb;
        }
    }

    (forward_a, forward_b)
}
