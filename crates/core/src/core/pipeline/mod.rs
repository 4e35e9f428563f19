//! The five-stage pipeline: latches, control signals, hazards, and stages.

/// Load-use hazard detection and operand forwarding.
pub mod hazards;

/// Stage-boundary registers.
pub mod latches;

/// Control vector and per-cycle wires.
pub mod signals;

/// Fetch, Decode, Execute, Memory, and Writeback stage functions.
pub mod stages;
