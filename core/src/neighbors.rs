//! Access to the OS neighbor (address resolution) cache.
//!
//! Reads go through `ip -4 neigh show`, with `/proc/net/arp` as a fallback
//! where iproute2 is unavailable. The text handling lives in the tolerant
//! parsers of `lanwatch-common`; this module owns the process plumbing and
//! the one narrow write: single-entry eviction.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use lanwatch_common::NetError;
use lanwatch_common::network::neighbor::{self, NeighborRecord};

const PROC_ARP: &str = "/proc/net/arp";

/// The OS resolution cache, reduced to the three operations the scanner
/// needs. The cache is shared, externally-synchronized state owned by the
/// kernel; this seam reads it and performs single-entry eviction, nothing
/// else.
#[async_trait]
pub trait NeighborTable: Send + Sync {
    /// Every IPv4 entry currently in the cache.
    async fn read_all(&self) -> Result<Vec<NeighborRecord>, NetError>;

    /// The entry for one address, if the cache holds one.
    async fn lookup(&self, ip: Ipv4Addr) -> Result<Option<NeighborRecord>, NetError>;

    /// Drops the entry for one address so the next lookup reflects a fresh
    /// resolution attempt instead of history from a previous cycle.
    async fn evict(&self, ip: Ipv4Addr) -> Result<(), NetError>;
}

pub struct OsNeighborTable;

#[async_trait]
impl NeighborTable for OsNeighborTable {
    async fn read_all(&self) -> Result<Vec<NeighborRecord>, NetError> {
        match run_ip_neigh(None).await {
            Ok(output) => Ok(neighbor::parse_table(&output, neighbor::parse_neigh_line)),
            Err(err) => {
                debug!(%err, "ip neigh unavailable, falling back to {PROC_ARP}");
                let output = tokio::fs::read_to_string(PROC_ARP)
                    .await
                    .map_err(|err| NetError::QueryFailure(format!("reading {PROC_ARP}: {err}")))?;
                Ok(neighbor::parse_table(&output, neighbor::parse_proc_arp_line))
            }
        }
    }

    async fn lookup(&self, ip: Ipv4Addr) -> Result<Option<NeighborRecord>, NetError> {
        match run_ip_neigh(Some(ip)).await {
            Ok(output) => Ok(neighbor::parse_table(&output, neighbor::parse_neigh_line)
                .into_iter()
                .find(|record| record.ip == ip)),
            Err(_) => Ok(self.read_all().await?.into_iter().find(|r| r.ip == ip)),
        }
    }

    async fn evict(&self, ip: Ipv4Addr) -> Result<(), NetError> {
        let status = Command::new("ip")
            .args(["-4", "neigh", "flush", "to", &ip.to_string()])
            .status()
            .await
            .map_err(|err| NetError::QueryFailure(format!("spawning `ip neigh flush`: {err}")))?;
        if !status.success() {
            // Unprivileged flush is routinely refused. The probe that
            // follows still refreshes the entry's state in the kernel, so
            // a refused eviction degrades accuracy, not correctness.
            debug!(%ip, %status, "neighbor eviction refused");
        }
        Ok(())
    }
}

async fn run_ip_neigh(target: Option<Ipv4Addr>) -> Result<String, NetError> {
    let mut command = Command::new("ip");
    command.args(["-4", "neigh", "show"]);
    let target = target.map(|ip| ip.to_string());
    if let Some(ip) = &target {
        command.args(["to", ip]);
    }
    let output = command
        .output()
        .await
        .map_err(|err| NetError::QueryFailure(format!("spawning `ip neigh`: {err}")))?;
    if !output.status.success() {
        return Err(NetError::QueryFailure(format!(
            "`ip neigh` exited with {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
