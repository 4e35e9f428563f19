//! Memory: branch resolution, data access, and latency accounting.

use tracing::trace;

use crate::common::bits::sign_extend;
use crate::common::constants::MEM_LATENCY;
use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::units::cache::CacheAccess;
use crate::isa::funct3;
use crate::isa::instruction::{InstrKind, InstructionBits};
use crate::memory::MemWidth;
use crate::sim::Simulator;

/// Runs the Memory stage, producing the next MEM/WB record.
///
/// Resolves branches (publishing `pc_src1`/`pcsrc`), performs the data
/// access, publishes the writeback value for forwarding, and charges the
/// access latency. One cycle of the latency is the baseline cycle the driver
/// counts anyway, so `latency - 1` is added here.
pub(crate) fn mem_stage(sim: &mut Simulator) -> MemWb {
    let exmem = sim.ex_mem.output.clone();

    sim.wires.pc_src1 = exmem.branch_addr;
    sim.wires.pcsrc = gen_branch(&exmem);

    let mut read_data = 0u32;

    if exmem.ctrl.mem_read {
        read_data = match exmem.instr.bits.funct3() {
            funct3::LB => sign_extend(sim.mem.load(exmem.alu_result, MemWidth::Byte), 8) as u32,
            funct3::LH => sign_extend(sim.mem.load(exmem.alu_result, MemWidth::Half), 16) as u32,
            funct3::LW => sim.mem.load(exmem.alu_result, MemWidth::Word),
            _ => 0,
        };
    }

    if exmem.ctrl.mem_write {
        match exmem.instr.bits.funct3() {
            funct3::SB => sim.mem.store(exmem.alu_result, MemWidth::Byte, exmem.write_data),
            funct3::SH => sim.mem.store(exmem.alu_result, MemWidth::Half, exmem.write_data),
            funct3::SW => sim.mem.store(exmem.alu_result, MemWidth::Word, exmem.write_data),
            _ => {}
        }
    }

    // Published for next cycle's MEM-EX forwarding; jumps forward their link.
    sim.wires.write_data = if exmem.ctrl.mem_to_reg {
        read_data
    } else if matches!(exmem.instr.kind, InstrKind::Uj(_)) {
        exmem.instr_addr.wrapping_add(4)
    } else {
        exmem.alu_result
    };

    if exmem.ctrl.mem_read || exmem.ctrl.mem_write {
        sim.stats.mem_accesses += 1;
        if sim.config.cache_enabled {
            let access = sim.cache.operate(exmem.alu_result);
            match access {
                CacheAccess::Hit => sim.stats.cache_hits += 1,
                CacheAccess::Miss { .. } | CacheAccess::Evict { .. } => {
                    sim.stats.cache_misses += 1;
                }
            }
            sim.stats.cycles += access.latency() - 1;
        } else {
            sim.stats.cycles += MEM_LATENCY - 1;
        }
    }

    trace!(
        "[MEM] pc={:#010x} addr={:#010x} taken={}",
        exmem.instr_addr, exmem.alu_result, sim.wires.pcsrc
    );

    MemWb {
        instr: exmem.instr,
        instr_addr: exmem.instr_addr,
        read_data,
        alu_result: exmem.alu_result,
        rd: exmem.rd,
        ctrl: exmem.ctrl,
    }
}

/// Evaluates whether the instruction in EX/MEM takes its branch.
///
/// `jal` is unconditional. Conditional branches reuse the ALU's subtraction:
/// a zero result encodes equality, so `beq` takes on zero and `bne` takes on
/// non-zero. Other branch variants are outside the supported subset.
fn gen_branch(exmem: &ExMem) -> bool {
    if !exmem.ctrl.branch {
        return false;
    }
    match exmem.instr.kind {
        InstrKind::Uj(_) => true,
        _ => {
            if exmem.instr.bits.funct3() == funct3::BEQ {
                exmem.alu_result == 0
            } else {
                exmem.alu_result != 0
            }
        }
    }
}
