//! System-wide constants: memory size, latencies, and cache geometry.

/// Size of the flat memory image in bytes.
pub const MEMORY_SPACE: usize = 0x0010_0000;

/// Fixed data-memory latency in cycles, charged when the cache is disabled.
pub const MEM_LATENCY: u64 = 100;

/// Latency of a cache hit, in cycles.
pub const CACHE_HIT_LATENCY: u64 = 2;

/// Latency of a cache miss that installs into an empty line, in cycles.
pub const CACHE_MISS_LATENCY: u64 = 100;

/// Latency of a cache miss that evicts a victim line, in cycles.
pub const CACHE_OTHER_LATENCY: u64 = 120;

/// log2 of the cache block size in bytes (64-byte blocks).
pub const CACHE_BLOCK_BITS: u32 = 6;

/// log2 of the number of cache sets.
pub const CACHE_SET_BITS: u32 = 4;

/// Associativity: lines per cache set.
pub const CACHE_LINES_PER_SET: usize = 4;
