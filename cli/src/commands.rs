pub mod info;
pub mod scan;
pub mod watch;

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{Parser, Subcommand};

use lanwatch_common::config::{
    DEFAULT_MAX_INFLIGHT, DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_SETTLE_MS,
    DEFAULT_WATCH_INTERVAL_SECS, Settings,
};
use lanwatch_common::network::subnet::SubnetRange;

#[derive(Parser)]
#[command(name = "lanwatch")]
#[command(about = "LAN presence scanner and MAC-randomization census.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Per-probe reply timeout in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Sweep settle deadline in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_SETTLE_MS)]
    pub settle_ms: u64,

    /// Maximum probes in flight at once
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_INFLIGHT)]
    pub max_inflight: usize,

    /// Reduce decorative output (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep a subnet and classify the hardware addresses that resolved
    #[command(alias = "s")]
    Scan {
        /// CIDR to sweep (e.g. 192.168.1.0/24); defaults to the subnet of
        /// the LAN interface
        target: Option<SubnetRange>,
    },
    /// Watch one device's presence on a fixed cadence
    #[command(alias = "w")]
    Watch {
        /// IPv4 address of the device to watch
        target: Ipv4Addr,
        /// Seconds between polls
        #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL_SECS)]
        interval: u64,
    },
    /// Show the interface and subnet a sweep would use
    #[command(alias = "i")]
    Info,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            probe_timeout: Duration::from_millis(self.timeout_ms),
            settle: Duration::from_millis(self.settle_ms),
            max_inflight: self.max_inflight.max(1),
            quiet: self.quiet,
        }
    }
}
