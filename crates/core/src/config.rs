//! Simulator configuration.
//!
//! Cache geometry and latencies are compile-time constants
//! ([`crate::common::constants`]); the configuration only selects whether the
//! data cache is modeled at all and which replacement policy it runs.

use serde::Deserialize;

use crate::core::units::cache::ReplacementPolicy;

/// Top-level simulator configuration.
///
/// Deserializable from JSON for external drivers:
///
/// ```
/// use rvpipe_core::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{ "cache_enabled": true, "replacement_policy": "LFU" }"#,
/// ).unwrap();
/// assert!(config.cache_enabled);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Model the data cache at the Memory stage. When disabled, every data
    /// access is charged the fixed memory latency instead.
    #[serde(default)]
    pub cache_enabled: bool,

    /// Replacement policy of the data cache.
    #[serde(default)]
    pub replacement_policy: ReplacementPolicy,
}
