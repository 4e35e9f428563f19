//! Common utilities and types shared across the simulator core.
//!
//! This module provides the building blocks the rest of the crate leans on:
//! 1. **Bit utilities:** Arithmetic sign extension and field extraction.
//! 2. **Constants:** Memory size, access latencies, and cache geometry.
//! 3. **Error handling:** The fatal [`SimError`] kinds.
//! 4. **Registers:** The 32-entry general-purpose register file with PC.

/// Bit-field extraction and sign extension.
pub mod bits;

/// System-wide constants.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::SimError;
pub use reg::RegisterFile;
