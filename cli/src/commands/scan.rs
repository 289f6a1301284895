use std::sync::Arc;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use lanwatch_common::config::Settings;
use lanwatch_common::network::interface;
use lanwatch_common::network::neighbor::NeighborRecord;
use lanwatch_common::network::subnet::SubnetRange;
use lanwatch_core::neighbors::OsNeighborTable;
use lanwatch_core::probe::IcmpProber;
use lanwatch_core::scan::{self, ScanReport};

use crate::terminal::print;

pub async fn scan(target: Option<SubnetRange>, settings: &Settings) -> anyhow::Result<()> {
    let lan = interface::discover()?;
    let range = match target {
        Some(range) => range,
        None => lan.subnet()?,
    };

    print::header("network census", settings.quiet);
    print::status(format!(
        "sweeping {} ({} usable hosts) via {}",
        range,
        range.host_count(),
        lan.name
    ));

    let spinner = start_spinner(settings.quiet);
    let report = scan::run_scan(
        Arc::new(IcmpProber),
        &OsNeighborTable,
        range,
        lan.ip,
        settings,
    )
    .await;
    spinner.finish_and_clear();
    let report = report?;

    render(&report, settings);
    Ok(())
}

fn start_spinner(quiet: u8) -> ProgressBar {
    if quiet > 0 {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("probing, waiting for the cache to settle...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn render(report: &ScanReport, settings: &Settings) {
    if report.classification.is_empty() {
        print::status("no neighbors resolved this sweep");
        return;
    }

    if settings.quiet < 2 {
        print_partition(
            "vendor-assigned",
            &report.classification.vendor_assigned,
            settings.quiet,
        );
        print_partition(
            "locally administered (randomized)",
            &report.classification.locally_administered,
            settings.quiet,
        );
    }

    let randomized = report.classification.locally_administered.len();
    let summary = format!(
        "{} identified in {} ({} randomized)",
        format!("{} hosts", report.classification.len()).green().bold(),
        format!("{:.2}s", report.elapsed.as_secs_f64()).yellow().bold(),
        randomized
    );
    if settings.quiet == 0 {
        print::separator();
    }
    print::status(summary);
}

fn print_partition(title: &str, records: &[NeighborRecord], quiet: u8) {
    if records.is_empty() {
        return;
    }
    print::header(title, quiet);
    for (idx, record) in records.iter().enumerate() {
        print::tree_head(idx, &record.ip.to_string());
        print::tree_details(&[
            ("mac", record.mac.to_string().normal()),
            ("state", format!("{:?}", record.state).to_lowercase().normal()),
        ]);
    }
}
