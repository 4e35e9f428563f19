//! The cycle driver: owns the architectural state, the pipeline latches and
//! wires, and advances everything one clock edge per [`Simulator::step`].

use tracing::{debug, trace};

use crate::common::{RegisterFile, SimError};
use crate::config::Config;
use crate::core::pipeline::hazards::{forward_selects, need_stall_load_use};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, Latch, MemWb};
use crate::core::pipeline::signals::{Forward, Wires};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, writeback_stage,
};
use crate::core::units::cache::{Cache, CacheParams};
use crate::isa::Instruction;
use crate::memory::{MemWidth, Memory};
use crate::stats::SimStats;

/// Raw encoding of the `ecall` instruction the exit sentinel matches.
const ECALL_BITS: u32 = 0x0000_0073;

/// The ecall service number that terminates the simulation.
const ECALL_EXIT: u32 = 10;

/// The five-stage pipeline simulator.
///
/// Construction bootstraps the machine: latches hold bubbles, the wires are
/// cleared, and the fall-through PC is set to the entry point. Each call to
/// [`step`](Self::step) then advances exactly one clock edge.
#[derive(Debug)]
pub struct Simulator {
    /// General-purpose registers and PC.
    pub regs: RegisterFile,
    /// The memory image, preloaded with the program by the driver.
    pub mem: Memory,
    /// Data cache (consulted only when enabled in the configuration).
    pub cache: Cache,
    /// IF/ID boundary register.
    pub if_id: Latch<IfId>,
    /// ID/EX boundary register.
    pub id_ex: Latch<IdEx>,
    /// EX/MEM boundary register.
    pub ex_mem: Latch<ExMem>,
    /// MEM/WB boundary register.
    pub mem_wb: Latch<MemWb>,
    /// Per-cycle wires.
    pub wires: Wires,
    /// Run counters.
    pub stats: SimStats,
    /// Simulator options.
    pub config: Config,
    exited: bool,
}

impl Simulator {
    /// Builds a simulator over a preloaded memory image.
    ///
    /// `entry_pc` is where the first fetch happens.
    pub fn new(mem: Memory, entry_pc: u32, config: Config) -> Self {
        let cache = Cache::new(&CacheParams {
            policy: config.replacement_policy,
            ..CacheParams::default()
        });
        let wires = Wires {
            pc_src0: entry_pc,
            ..Wires::default()
        };
        Self {
            regs: RegisterFile::new(entry_pc),
            mem,
            cache,
            if_id: Latch::default(),
            id_ex: Latch::default(),
            ex_mem: Latch::default(),
            mem_wb: Latch::default(),
            wires,
            stats: SimStats::default(),
            config,
            exited: false,
        }
    }

    /// Whether the exit ecall has been observed.
    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Advances one clock edge.
    ///
    /// Evaluation order within the cycle: Fetch, hazard detection (possibly
    /// holding IF/ID), Writeback, Decode, the forwarding unit, Execute,
    /// Memory. Writeback runs before Decode so the register file behaves as
    /// if written in the first half of the cycle. All latches then promote
    /// atomically, a taken branch flushes the younger stages, and the cycle
    /// counter advances.
    ///
    /// Returns `Ok(true)` once the ecall-exit condition is reached.
    pub fn step(&mut self) -> Result<bool, SimError> {
        trace!(cycle = self.stats.cycles, "cycle start");

        self.if_id.input = fetch_stage(self)?;

        self.detect_hazard();
        if self.wires.ifid_write {
            self.if_id.input = self.if_id.output.clone();
            self.wires.ifid_write = false;
        }

        writeback_stage(self);
        self.id_ex.input = decode_stage(self);
        self.forward_unit();
        self.ex_mem.input = execute_stage(self);
        self.mem_wb.input = mem_stage(self);

        self.if_id.promote();
        self.id_ex.promote();
        self.ex_mem.promote();
        self.mem_wb.promote();

        if self.wires.pcsrc {
            self.flush_pipeline();
        }

        self.stats.cycles += 1;

        if self.mem_wb.output.instr.bits == ECALL_BITS {
            return self.dispatch_ecall();
        }
        Ok(false)
    }

    /// Runs the hazard detection unit between Fetch and Decode.
    fn detect_hazard(&mut self) {
        if need_stall_load_use(&self.id_ex.output, &self.if_id.output) {
            self.wires.flush_control = true;
            self.wires.ifid_write = true;
            self.wires.pc_write = true;
            self.stats.stalls += 1;
            trace!(
                "[HZD] load-use stall pc={:#010x}",
                self.if_id.output.instr_addr
            );
        }
    }

    /// Runs the forwarding unit between Decode and Execute.
    fn forward_unit(&mut self) {
        let (forward_a, forward_b) =
            forward_selects(&self.id_ex.output, &self.ex_mem.output, &self.mem_wb.output);
        for select in [forward_a, forward_b] {
            match select {
                Forward::FromExMem => self.stats.fwd_ex_ex += 1,
                Forward::FromMemWb => self.stats.fwd_mem_ex += 1,
                Forward::None => {}
            }
        }
        if forward_a != Forward::None || forward_b != Forward::None {
            trace!(?forward_a, ?forward_b, "[FWD]");
        }
        self.wires.forward_a = forward_a;
        self.wires.forward_b = forward_b;
    }

    /// Squashes IF/ID, ID/EX, and EX/MEM into bubbles after a taken branch,
    /// keeping each slot's instruction address for traceability.
    fn flush_pipeline(&mut self) {
        self.if_id.output = IfId {
            instr: Instruction::bubble(),
            instr_addr: self.if_id.output.instr_addr,
        };
        self.id_ex.output = IdEx {
            instr: Instruction::bubble(),
            instr_addr: self.id_ex.output.instr_addr,
            ..IdEx::default()
        };
        self.ex_mem.output = ExMem {
            instr: Instruction::bubble(),
            instr_addr: self.ex_mem.output.instr_addr,
            ..ExMem::default()
        };
        self.stats.branch_flushes += 1;
        trace!("[CPL] pipeline flushed, redirect to {:#010x}", self.wires.pc_src1);
    }

    /// Dispatches the ecall protocol once the instruction reaches MEM/WB.
    ///
    /// Service number in `a0` (x10): 1 prints `a1` as a signed decimal, 4
    /// prints the NUL-terminated string at `a1`, 10 ends the simulation, 11
    /// prints `a1` as a character. Anything else prints its diagnostic and
    /// raises [`SimError::IllegalEcall`].
    fn dispatch_ecall(&mut self) -> Result<bool, SimError> {
        let service = self.regs.read(10);
        match service {
            1 => {
                print!("{}", self.regs.read(11) as i32);
                Ok(false)
            }
            4 => {
                let mut addr = self.regs.read(11);
                while (addr as usize) < self.mem.len() {
                    let byte = self.mem.load(addr, MemWidth::Byte);
                    if byte == 0 {
                        break;
                    }
                    print!("{}", byte as u8 as char);
                    addr = addr.wrapping_add(1);
                }
                Ok(false)
            }
            ECALL_EXIT => {
                println!("exiting the simulator");
                self.exited = true;
                Ok(true)
            }
            11 => {
                print!("{}", self.regs.read(11) as u8 as char);
                Ok(false)
            }
            n => {
                println!("Illegal ecall number {n}");
                Err(SimError::IllegalEcall(n))
            }
        }
    }

    /// Emits the register file contents as a debug trace, eight rows of four.
    pub fn trace_registers(&self) {
        let regs = self.regs.dump();
        for (i, chunk) in regs.chunks(4).enumerate() {
            debug!(
                "r{:<2}={:08x} r{:<2}={:08x} r{:<2}={:08x} r{:<2}={:08x}",
                i * 4,
                chunk[0],
                i * 4 + 1,
                chunk[1],
                i * 4 + 2,
                chunk[2],
                i * 4 + 3,
                chunk[3]
            );
        }
    }
}
