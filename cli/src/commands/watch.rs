use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use tracing::info;

use lanwatch_common::config::Settings;
use lanwatch_core::monitor::{PresenceMonitor, Verdict};
use lanwatch_core::neighbors::OsNeighborTable;
use lanwatch_core::probe::IcmpProber;

use crate::terminal::print;

pub async fn watch(target: Ipv4Addr, interval: u64, settings: &Settings) -> anyhow::Result<()> {
    print::header("presence watch", settings.quiet);

    let monitor = PresenceMonitor::new(
        Arc::new(IcmpProber),
        Arc::new(OsNeighborTable),
        target,
        settings.probe_timeout,
    );

    let cadence = Duration::from_secs(interval.max(1));
    info!(%target, interval_secs = cadence.as_secs(), "watching, ctrl-c to stop");

    monitor
        .run(cadence, shutdown_signal(), |verdict, changed| {
            report_tick(target, verdict, changed);
        })
        .await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn report_tick(target: Ipv4Addr, verdict: Verdict, changed: bool) {
    let label = match verdict {
        Verdict::Online => "online".green().bold(),
        Verdict::Offline => "offline".red().bold(),
    };
    if changed {
        info!("{} is {} {}", target, label, "(changed)".yellow());
    } else {
        info!("{} is {}", target, label);
    }
}
