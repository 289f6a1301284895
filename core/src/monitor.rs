//! Single-target presence monitoring.
//!
//! One tick round-trips through the same resolution mechanism the sweep
//! uses: evict the cached entry, force a fresh resolution attempt with a
//! probe, read the entry back, and map its state to a verdict.

use std::fmt;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use lanwatch_common::NetError;

use crate::neighbors::NeighborTable;
use crate::probe::Prober;

/// Observed presence of the watched device. With no prior information the
/// device reads as offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    Online,
    #[default]
    Offline,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Online => f.write_str("online"),
            Verdict::Offline => f.write_str("offline"),
        }
    }
}

pub struct PresenceMonitor {
    prober: Arc<dyn Prober>,
    table: Arc<dyn NeighborTable>,
    target: Ipv4Addr,
    probe_timeout: Duration,
}

impl PresenceMonitor {
    pub fn new(
        prober: Arc<dyn Prober>,
        table: Arc<dyn NeighborTable>,
        target: Ipv4Addr,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            prober,
            table,
            target,
            probe_timeout,
        }
    }

    pub fn target(&self) -> Ipv4Addr {
        self.target
    }

    /// One poll tick: evict, probe, read back, judge.
    ///
    /// The probe's own outcome is ignored — echo traffic may be filtered
    /// while link-layer resolution still succeeds. The neighbor entry's
    /// state is the authority: anything the kernel resolved counts as
    /// online, an absent or never-resolved entry counts as offline.
    pub async fn check(&self) -> Result<Verdict, NetError> {
        self.table.evict(self.target).await?;
        let _ = self.prober.probe(self.target, self.probe_timeout).await;
        let record = self.table.lookup(self.target).await?;
        Ok(match record {
            Some(entry) if entry.state.is_resolved() => Verdict::Online,
            _ => Verdict::Offline,
        })
    }

    /// Polls on `cadence` until `shutdown` resolves, handing every tick's
    /// verdict to `report` together with whether it changed since the last
    /// successful tick.
    ///
    /// A failed tick is logged and swallowed — the loop itself never stops
    /// on a per-tick failure; the next cadence is the retry.
    pub async fn run<F>(&self, cadence: Duration, shutdown: impl Future<Output = ()>, mut report: F)
    where
        F: FnMut(Verdict, bool),
    {
        let mut last = Verdict::default();
        let mut ticker = tokio::time::interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(target = %self.target, "presence watch cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    match self.check().await {
                        Ok(verdict) => {
                            report(verdict, verdict != last);
                            last = verdict;
                        }
                        Err(err) => {
                            warn!(%err, target = %self.target, "tick failed, retrying on next cadence");
                        }
                    }
                }
            }
        }
    }
}
