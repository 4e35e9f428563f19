//! Pipeline stage functions.
//!
//! Each stage consumes the `output` side of the upstream latch (plus the
//! wires) and produces the `input` side of the downstream latch. The driver
//! promotes all latches at the end of the cycle.

mod decode;
mod execute;
mod fetch;
mod memory;
mod writeback;

pub(crate) use decode::decode_stage;
pub(crate) use execute::execute_stage;
pub(crate) use fetch::fetch_stage;
pub(crate) use memory::mem_stage;
pub(crate) use writeback::writeback_stage;
