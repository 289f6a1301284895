use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use lanwatch_common::NetError;
use lanwatch_common::network::neighbor::NudState;
use lanwatch_core::monitor::{PresenceMonitor, Verdict};

use crate::helpers::{RecordingProber, ScriptedTable, record};

const TARGET: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 50);
const TICK_TIMEOUT: Duration = Duration::from_millis(50);

fn make_monitor(table: Arc<ScriptedTable>) -> (PresenceMonitor, Arc<RecordingProber>) {
    let prober = Arc::new(RecordingProber::default());
    let monitor = PresenceMonitor::new(Arc::clone(&prober) as _, table, TARGET, TICK_TIMEOUT);
    (monitor, prober)
}

#[tokio::test]
async fn offline_until_a_reachable_entry_appears() {
    let table = Arc::new(ScriptedTable::default());
    table.push_lookup(Ok(None));
    table.push_lookup(Ok(Some(record(TARGET, 0xa4, NudState::Reachable))));
    let (monitor, _) = make_monitor(table);

    assert_eq!(monitor.check().await.unwrap(), Verdict::Offline);
    assert_eq!(monitor.check().await.unwrap(), Verdict::Online);
}

#[tokio::test]
async fn every_tick_evicts_then_probes_then_reads() {
    let table = Arc::new(ScriptedTable::default());
    table.push_lookup(Ok(None));
    let (monitor, prober) = make_monitor(Arc::clone(&table));

    monitor.check().await.unwrap();

    assert_eq!(*table.evictions.lock().unwrap(), vec![TARGET]);
    assert_eq!(*prober.probed.lock().unwrap(), vec![TARGET]);
}

#[tokio::test]
async fn stale_and_probe_states_still_read_as_online() {
    for state in [
        NudState::Stale,
        NudState::Delay,
        NudState::Probe,
        NudState::Permanent,
    ] {
        let table = Arc::new(ScriptedTable::default());
        table.push_lookup(Ok(Some(record(TARGET, 0xa4, state))));
        let (monitor, _) = make_monitor(table);
        assert_eq!(monitor.check().await.unwrap(), Verdict::Online, "{state:?}");
    }
}

#[tokio::test]
async fn unresolved_states_read_as_offline() {
    for state in [NudState::Incomplete, NudState::Unknown] {
        let table = Arc::new(ScriptedTable::default());
        table.push_lookup(Ok(Some(record(TARGET, 0xa4, state))));
        let (monitor, _) = make_monitor(table);
        assert_eq!(monitor.check().await.unwrap(), Verdict::Offline, "{state:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn loop_reports_every_tick_and_flags_the_transition() {
    let table = Arc::new(ScriptedTable::default());
    table.push_lookup(Ok(None));
    table.push_lookup(Ok(Some(record(TARGET, 0xa4, NudState::Reachable))));
    table.push_lookup(Ok(Some(record(TARGET, 0xa4, NudState::Stale))));
    let (monitor, _) = make_monitor(table);

    let mut reports = Vec::new();
    monitor
        .run(
            Duration::from_secs(5),
            tokio::time::sleep(Duration::from_secs(12)),
            |verdict, changed| reports.push((verdict, changed)),
        )
        .await;

    assert_eq!(
        reports,
        vec![
            (Verdict::Offline, false),
            (Verdict::Online, true),
            (Verdict::Online, false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn a_failed_tick_does_not_stop_the_loop() {
    let table = Arc::new(ScriptedTable::default());
    table.push_lookup(Err(NetError::QueryFailure("interface down".into())));
    table.push_lookup(Ok(Some(record(TARGET, 0xa4, NudState::Reachable))));
    let (monitor, _) = make_monitor(table);

    let mut reports = Vec::new();
    monitor
        .run(
            Duration::from_secs(5),
            tokio::time::sleep(Duration::from_secs(8)),
            |verdict, changed| reports.push((verdict, changed)),
        )
        .await;

    // The first tick failed and reported nothing; the loop survived and the
    // second tick delivered its verdict.
    assert_eq!(reports, vec![(Verdict::Online, true)]);
}
