//! Core machinery: pipeline structures and functional units.

/// Pipeline latches, wires, hazard handling, and stage functions.
pub mod pipeline;

/// ALU and cache.
pub mod units;
