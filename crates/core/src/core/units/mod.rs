//! Functional units: the ALU and the optional data cache.

/// ALU and ALU-control generation.
pub mod alu;

/// Set-associative data cache.
pub mod cache;
