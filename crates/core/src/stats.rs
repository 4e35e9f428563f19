//! Simulation statistics.
//!
//! One aggregate holds every counter of a simulation run. The aggregate is
//! owned by the simulator and reset implicitly when a new simulator is
//! built, so counters never leak across runs.

/// Counters accumulated over one simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimStats {
    /// Total clock cycles, including memory/cache latency cycles.
    pub cycles: u64,
    /// Data memory accesses performed by the Memory stage.
    pub mem_accesses: u64,
    /// Load-use stalls inserted by the hazard unit.
    pub stalls: u64,
    /// Taken branches that flushed the younger pipeline stages.
    pub branch_flushes: u64,
    /// Operands forwarded from EX/MEM to Execute.
    pub fwd_ex_ex: u64,
    /// Operands forwarded from MEM/WB to Execute.
    pub fwd_mem_ex: u64,
    /// Data cache hits.
    pub cache_hits: u64,
    /// Data cache misses (evictions included).
    pub cache_misses: u64,
}

impl SimStats {
    /// Prints the run report to stdout.
    pub fn print(&self) {
        println!("\n=========================================================");

        println!("\n[General]");
        println!("  Cycles:               {}", self.cycles);
        println!("  Memory Accesses:      {}", self.mem_accesses);

        println!("\n[Pipeline]");
        println!("  Load-Use Stalls:      {}", self.stalls);
        println!("  Branch Flushes:       {}", self.branch_flushes);
        println!("  EX-EX Forwards:       {}", self.fwd_ex_ex);
        println!("  MEM-EX Forwards:      {}", self.fwd_mem_ex);

        println!("\n[Data Cache]");
        let total = self.cache_hits + self.cache_misses;
        if total > 0 {
            let rate = self.cache_hits as f64 / total as f64;
            println!(
                "  Hit Rate:             {:.2}% ({} / {})",
                rate * 100.0,
                self.cache_hits,
                total
            );
        } else {
            println!("  No Accesses");
        }

        println!("=========================================================\n");
    }
}
