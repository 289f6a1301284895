//! Mock collaborators standing in for the ICMP socket and the OS neighbor
//! cache.

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use lanwatch_common::NetError;
use lanwatch_common::network::neighbor::{NeighborRecord, NudState};
use lanwatch_core::neighbors::NeighborTable;
use lanwatch_core::probe::{ProbeStatus, Prober};

pub fn record(ip: Ipv4Addr, first_octet: u8, state: NudState) -> NeighborRecord {
    NeighborRecord {
        ip,
        mac: MacAddr::new(first_octet, 0x11, 0x22, 0x33, 0x44, 0x55),
        state,
    }
}

/// Prober that records every target it was pointed at and never replies —
/// exactly how a sweep over sleeping devices behaves.
#[derive(Default)]
pub struct RecordingProber {
    pub probed: Mutex<Vec<Ipv4Addr>>,
}

#[async_trait]
impl Prober for RecordingProber {
    async fn probe(&self, target: Ipv4Addr, _timeout: Duration) -> ProbeStatus {
        self.probed.lock().unwrap().push(target);
        ProbeStatus::NoReply
    }
}

/// Prober that never finishes inside any reasonable settle window.
pub struct StallingProber;

#[async_trait]
impl Prober for StallingProber {
    async fn probe(&self, _target: Ipv4Addr, _timeout: Duration) -> ProbeStatus {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        ProbeStatus::NoReply
    }
}

/// Neighbor table built from a fixed record set, with lookups optionally
/// scripted per call and every eviction recorded.
#[derive(Default)]
pub struct ScriptedTable {
    pub records: Mutex<Vec<NeighborRecord>>,
    pub lookups: Mutex<VecDeque<Result<Option<NeighborRecord>, NetError>>>,
    pub evictions: Mutex<Vec<Ipv4Addr>>,
}

impl ScriptedTable {
    pub fn with_records(records: Vec<NeighborRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn push_lookup(&self, outcome: Result<Option<NeighborRecord>, NetError>) {
        self.lookups.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl NeighborTable for ScriptedTable {
    async fn read_all(&self) -> Result<Vec<NeighborRecord>, NetError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn lookup(&self, ip: Ipv4Addr) -> Result<Option<NeighborRecord>, NetError> {
        match self.lookups.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            // No script: behave like a real table and search the records.
            None => Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|record| record.ip == ip)
                .copied()),
        }
    }

    async fn evict(&self, ip: Ipv4Addr) -> Result<(), NetError> {
        self.evictions.lock().unwrap().push(ip);
        Ok(())
    }
}
