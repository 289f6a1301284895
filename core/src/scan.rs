//! The full-sweep use case: probe the subnet, collect the neighbor table,
//! classify what resolved.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use lanwatch_common::config::Settings;
use lanwatch_common::network::mac::{self, Classification};
use lanwatch_common::network::neighbor::NeighborRecord;
use lanwatch_common::network::subnet::SubnetRange;

use crate::neighbors::NeighborTable;
use crate::probe::{self, Prober};

/// Everything one sweep produced.
#[derive(Debug)]
pub struct ScanReport {
    pub range: SubnetRange,
    /// Probes dispatched (usable hosts minus our own address).
    pub probed: usize,
    /// Raw in-range neighbor records, before classification filtering.
    pub neighbors: Vec<NeighborRecord>,
    pub classification: Classification,
    pub elapsed: Duration,
}

/// Probes every usable host in `range` except `own_ip`, then reads the
/// resolution cache back and classifies the entries inside the range.
///
/// Probe silence is expected and invisible here; only the cache read can
/// fail, and that failure means "no data this sweep", not a crashed
/// scanner.
pub async fn run_scan(
    prober: Arc<dyn Prober>,
    table: &dyn NeighborTable,
    range: SubnetRange,
    own_ip: Ipv4Addr,
    settings: &Settings,
) -> anyhow::Result<ScanReport> {
    let started = Instant::now();

    let probed = probe::sweep(prober, range.hosts(), own_ip, settings).await;
    info!(%range, probed, "sweep settled, collecting neighbor table");

    let neighbors: Vec<NeighborRecord> = table
        .read_all()
        .await?
        .into_iter()
        .filter(|record| range.contains(record.ip) && record.ip != own_ip)
        .collect();
    let classification = mac::classify(neighbors.iter().copied());

    Ok(ScanReport {
        range,
        probed,
        neighbors,
        classification,
        elapsed: started.elapsed(),
    })
}
