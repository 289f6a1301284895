//! Runtime settings shared by the scan and watch commands.

use std::time::Duration;

/// Upper bound on a single probe's wait for an echo reply.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 200;

/// Wall-clock budget for an entire sweep, independent of subnet size.
pub const DEFAULT_SETTLE_MS: u64 = 3_000;

/// Ceiling on concurrently in-flight probes.
pub const DEFAULT_MAX_INFLIGHT: usize = 64;

/// Cadence of the single-target presence monitor.
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 5;

/// Knobs assembled from CLI flags and passed down into the scanners.
///
/// None of these affect correctness — they trade sweep latency against
/// network load.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// How long a single probe waits for a reply before giving up on it.
    pub probe_timeout: Duration,
    /// After this deadline the sweep stops waiting on outstanding probes.
    pub settle: Duration,
    /// Maximum number of probes in flight at once.
    pub max_inflight: usize,
    /// Suppresses decorative output. 1 drops headers, 2 drops host trees.
    pub quiet: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            max_inflight: DEFAULT_MAX_INFLIGHT,
            quiet: 0,
        }
    }
}
