use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lanwatch_common::config::Settings;
use lanwatch_common::network::neighbor::NudState;
use lanwatch_common::network::subnet::SubnetRange;
use lanwatch_core::{probe, scan};

use crate::helpers::{RecordingProber, ScriptedTable, StallingProber, record};

fn fast_settings() -> Settings {
    Settings {
        probe_timeout: Duration::from_millis(10),
        settle: Duration::from_millis(500),
        max_inflight: 8,
        quiet: 0,
    }
}

#[tokio::test]
async fn scan_probes_every_host_except_our_own() {
    let own_ip = Ipv4Addr::new(192, 168, 9, 10);
    let range = SubnetRange::new(own_ip, 28).unwrap();
    let prober = Arc::new(RecordingProber::default());
    let table = ScriptedTable::default();

    let report = scan::run_scan(
        Arc::clone(&prober) as _,
        &table,
        range,
        own_ip,
        &fast_settings(),
    )
    .await
    .unwrap();

    // A /28 has 14 usable hosts; one of them is us.
    assert_eq!(report.probed, 13);
    let probed = prober.probed.lock().unwrap();
    assert_eq!(probed.len(), 13);
    assert!(!probed.contains(&own_ip));
    assert!(!probed.contains(&range.network()));
    assert!(!probed.contains(&range.broadcast()));
}

#[tokio::test]
async fn scan_classifies_what_the_cache_resolved() {
    let own_ip = Ipv4Addr::new(192, 168, 9, 10);
    let range = SubnetRange::new(own_ip, 24).unwrap();
    let table = ScriptedTable::with_records(vec![
        // 0xa4 & 0x02 == 0, vendor-assigned.
        record(Ipv4Addr::new(192, 168, 9, 1), 0xa4, NudState::Reachable),
        // 0xda & 0x02 != 0, randomized.
        record(Ipv4Addr::new(192, 168, 9, 23), 0xda, NudState::Stale),
        // Broadcast-ish entries never classify.
        record(Ipv4Addr::new(192, 168, 9, 255), 0xff, NudState::Permanent),
        // Outside the scanned range, dropped before classification.
        record(Ipv4Addr::new(10, 0, 0, 1), 0x00, NudState::Reachable),
    ]);

    let report = scan::run_scan(
        Arc::new(RecordingProber::default()),
        &table,
        range,
        own_ip,
        &fast_settings(),
    )
    .await
    .unwrap();

    assert_eq!(report.neighbors.len(), 3);
    assert_eq!(report.classification.vendor_assigned.len(), 1);
    assert_eq!(
        report.classification.vendor_assigned[0].ip,
        Ipv4Addr::new(192, 168, 9, 1)
    );
    assert_eq!(report.classification.locally_administered.len(), 1);
    assert_eq!(
        report.classification.locally_administered[0].ip,
        Ipv4Addr::new(192, 168, 9, 23)
    );
}

#[tokio::test]
async fn sweep_is_bounded_by_the_settle_deadline() {
    let own_ip = Ipv4Addr::new(10, 0, 0, 1);
    let range = SubnetRange::new(own_ip, 24).unwrap();
    let settings = Settings {
        settle: Duration::from_millis(200),
        ..fast_settings()
    };

    let started = Instant::now();
    let dispatched = probe::sweep(Arc::new(StallingProber), range.hosts(), own_ip, &settings).await;

    assert_eq!(dispatched, 253);
    // Stalled probes are abandoned at the deadline, not awaited.
    assert!(started.elapsed() < Duration::from_secs(5));
}
