//! Set-associative data cache with LRU/LFU replacement.
//!
//! The cache sits in front of the memory image at the Memory stage purely
//! for latency observability; data always lives in the image itself. An
//! address decomposes into `block_offset` (low `block_bits`), `set_index`
//! (next `set_bits`), and `tag` (the remainder). Each set keeps a monotonic
//! `lru_clock` that is bumped once at the start of every operation and again
//! whenever a line is installed or refreshed.

use serde::Deserialize;
use tracing::trace;

use crate::common::constants::{
    CACHE_BLOCK_BITS, CACHE_HIT_LATENCY, CACHE_LINES_PER_SET, CACHE_MISS_LATENCY,
    CACHE_OTHER_LATENCY, CACHE_SET_BITS,
};

/// Victim-selection policy for a cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least recently used: victim is the valid line with the smallest
    /// `lru_clock`.
    #[default]
    Lru,
    /// Least frequently used: victim is the valid line with the smallest
    /// `access_counter`; ties break toward the smallest `lru_clock`.
    Lfu,
}

/// Cache geometry and policy.
///
/// The simulator builds its cache from the compile-time constants; tests
/// build small custom geometries directly.
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// log2 of the block size in bytes.
    pub block_bits: u32,
    /// log2 of the number of sets.
    pub set_bits: u32,
    /// Associativity.
    pub lines_per_set: usize,
    /// Replacement policy.
    pub policy: ReplacementPolicy,
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            block_bits: CACHE_BLOCK_BITS,
            set_bits: CACHE_SET_BITS,
            lines_per_set: CACHE_LINES_PER_SET,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// Outcome of one cache operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAccess {
    /// The block was resident.
    Hit,
    /// The block was installed into an invalid line.
    Miss {
        /// Block address that was installed.
        insert_block_addr: u32,
    },
    /// The block displaced a valid victim line.
    Evict {
        /// Block address of the displaced line.
        victim_block_addr: u32,
        /// Block address that was installed.
        insert_block_addr: u32,
    },
}

impl CacheAccess {
    /// Latency in cycles charged for this outcome.
    pub fn latency(&self) -> u64 {
        match self {
            Self::Hit => CACHE_HIT_LATENCY,
            Self::Miss { .. } => CACHE_MISS_LATENCY,
            Self::Evict { .. } => CACHE_OTHER_LATENCY,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheLine {
    valid: bool,
    tag: u32,
    block_addr: u32,
    lru_clock: u64,
    access_counter: u64,
}

impl Default for CacheLine {
    fn default() -> Self {
        Self {
            valid: false,
            tag: 0,
            block_addr: 0,
            lru_clock: 0,
            access_counter: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheSet {
    lines: Vec<CacheLine>,
    lru_clock: u64,
}

/// The cache: `1 << set_bits` sets of `lines_per_set` lines each.
#[derive(Debug, Clone)]
pub struct Cache {
    sets: Vec<CacheSet>,
    block_bits: u32,
    set_bits: u32,
    policy: ReplacementPolicy,
    /// Running hit total.
    pub hit_count: u64,
    /// Running miss total; evictions count as misses too.
    pub miss_count: u64,
    /// Running eviction total.
    pub eviction_count: u64,
}

impl Cache {
    /// Builds an empty cache with the given geometry and policy.
    pub fn new(params: &CacheParams) -> Self {
        let num_sets = 1usize << params.set_bits;
        let sets = (0..num_sets)
            .map(|_| CacheSet {
                lines: vec![CacheLine::default(); params.lines_per_set],
                lru_clock: 0,
            })
            .collect();
        Self {
            sets,
            block_bits: params.block_bits,
            set_bits: params.set_bits,
            policy: params.policy,
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
        }
    }

    /// Block-aligned address.
    #[inline]
    fn block_addr(&self, addr: u32) -> u32 {
        (addr >> self.block_bits) << self.block_bits
    }

    /// Tag portion of an address.
    #[inline]
    fn tag(&self, addr: u32) -> u32 {
        addr >> (self.set_bits + self.block_bits)
    }

    /// Set-index portion of an address.
    #[inline]
    fn set_index(&self, addr: u32) -> usize {
        ((addr >> self.block_bits) & ((1 << self.set_bits) - 1)) as usize
    }

    /// Performs one cache operation on `addr` and returns the outcome.
    ///
    /// Hits refresh the line per the policy (`lru_clock` for LRU,
    /// `access_counter` for LFU). Misses install into an invalid line when
    /// one exists, otherwise the policy's victim is replaced and reported.
    pub fn operate(&mut self, addr: u32) -> CacheAccess {
        let tag = self.tag(addr);
        let block_addr = self.block_addr(addr);
        let set_index = self.set_index(addr);
        let policy = self.policy;

        let set = &mut self.sets[set_index];
        set.lru_clock += 1;

        if let Some(line) = set
            .lines
            .iter_mut()
            .find(|line| line.valid && line.tag == tag)
        {
            match policy {
                ReplacementPolicy::Lru => {
                    set.lru_clock += 1;
                    line.lru_clock = set.lru_clock;
                }
                ReplacementPolicy::Lfu => line.access_counter += 1,
            }
            self.hit_count += 1;
            trace!("cache hit addr={addr:#010x}");
            return CacheAccess::Hit;
        }

        if let Some(line) = set.lines.iter_mut().find(|line| !line.valid) {
            set.lru_clock += 1;
            *line = CacheLine {
                valid: true,
                tag,
                block_addr,
                lru_clock: set.lru_clock,
                access_counter: 1,
            };
            self.miss_count += 1;
            trace!("cache miss addr={addr:#010x}");
            return CacheAccess::Miss {
                insert_block_addr: block_addr,
            };
        }

        let victim_index = match policy {
            ReplacementPolicy::Lru => index_of_min(&set.lines, |line| (line.lru_clock, 0)),
            ReplacementPolicy::Lfu => {
                index_of_min(&set.lines, |line| (line.access_counter, line.lru_clock))
            }
        };
        let victim_block_addr = set.lines[victim_index].block_addr;
        set.lru_clock += 1;
        set.lines[victim_index] = CacheLine {
            valid: true,
            tag,
            block_addr,
            lru_clock: set.lru_clock,
            access_counter: 1,
        };
        self.miss_count += 1;
        self.eviction_count += 1;
        trace!("cache eviction addr={addr:#010x} victim={victim_block_addr:#010x}");
        CacheAccess::Evict {
            victim_block_addr,
            insert_block_addr: block_addr,
        }
    }
}

/// Index of the line minimizing `key` (first minimum wins).
fn index_of_min(lines: &[CacheLine], key: impl Fn(&CacheLine) -> (u64, u64)) -> usize {
    let mut best = 0;
    for (i, line) in lines.iter().enumerate().skip(1) {
        if key(line) < key(&lines[best]) {
            best = i;
        }
    }
    best
}
