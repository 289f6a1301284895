//! Neighbor-cache records and tolerant parsing of OS resolution-table output.
//!
//! The parsers accept the free-form text emitted by `ip neigh` and
//! `/proc/net/arp`. A line that does not carry a complete (address, hardware
//! address, state) triple yields `None` and is dropped by the caller — the
//! table formats drift between platform versions and a sweep must survive
//! that drift.

use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::util::MacAddr;
use tracing::trace;

/// Resolution state of a neighbor-cache entry, mirroring the kernel's NUD
/// state set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NudState {
    #[default]
    Unknown,
    Incomplete,
    Reachable,
    Stale,
    Delay,
    Probe,
    Permanent,
}

impl NudState {
    /// Whether an entry in this state counts as evidence the host is up.
    ///
    /// Anything the kernel has ever resolved — fresh or gone stale — counts;
    /// only entries it never resolved do not.
    pub fn is_resolved(self) -> bool {
        !matches!(self, NudState::Unknown | NudState::Incomplete)
    }

    fn from_word(word: &str) -> Option<Self> {
        let state = match word {
            "REACHABLE" => Self::Reachable,
            "STALE" => Self::Stale,
            "DELAY" => Self::Delay,
            "PROBE" => Self::Probe,
            "PERMANENT" => Self::Permanent,
            "INCOMPLETE" => Self::Incomplete,
            // FAILED, NOARP and any state iproute2 grows later read as
            // unresolved rather than failing the line.
            "FAILED" | "NOARP" => Self::Unknown,
            _ => return None,
        };
        Some(state)
    }
}

/// One (IP, hardware address, state) row from the OS resolution cache.
///
/// Lives for a single sweep or poll tick; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRecord {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub state: NudState,
}

/// Normalizes colon- or hyphen-delimited hex into a [`MacAddr`], whose
/// display form is canonical lowercase colon-delimited.
pub fn parse_mac(raw: &str) -> Option<MacAddr> {
    MacAddr::from_str(raw.to_ascii_lowercase().replace('-', ":").as_str()).ok()
}

/// Parses one line of `ip -4 neigh show` output, e.g.
/// `192.168.1.7 dev wlan0 lladdr aa:bb:cc:dd:ee:ff REACHABLE`.
///
/// INCOMPLETE and FAILED entries carry no `lladdr` and are skipped along
/// with anything else that does not match the expected shape.
pub fn parse_neigh_line(line: &str) -> Option<NeighborRecord> {
    let mut fields = line.split_whitespace();
    let ip = Ipv4Addr::from_str(fields.next()?).ok()?;

    let mut mac = None;
    let mut state = NudState::Unknown;
    while let Some(token) = fields.next() {
        if token == "lladdr" {
            mac = parse_mac(fields.next()?);
        } else if let Some(parsed) = NudState::from_word(token) {
            state = parsed;
        }
        // `dev <name>`, `router`, `proxy` and friends fall through.
    }

    Some(NeighborRecord {
        ip,
        mac: mac?,
        state,
    })
}

/// Parses one row of `/proc/net/arp`. The header row fails the address parse
/// and falls out naturally.
pub fn parse_proc_arp_line(line: &str) -> Option<NeighborRecord> {
    const ATF_COM: u32 = 0x02;
    const ATF_PERM: u32 = 0x04;

    let mut fields = line.split_whitespace();
    let ip = Ipv4Addr::from_str(fields.next()?).ok()?;
    let _hw_type = fields.next()?;
    let flags = fields.next()?.strip_prefix("0x")?;
    let flags = u32::from_str_radix(flags, 16).ok()?;
    let mac = parse_mac(fields.next()?)?;

    // The proc table exposes completion flags, not NUD states; a completed
    // entry maps onto the closest resolved state.
    let state = if flags & ATF_PERM != 0 {
        NudState::Permanent
    } else if flags & ATF_COM != 0 {
        NudState::Reachable
    } else {
        NudState::Incomplete
    };

    Some(NeighborRecord { ip, mac, state })
}

/// Runs `parse` over every line, dropping the ones that don't match.
pub fn parse_table<F>(output: &str, parse: F) -> Vec<NeighborRecord>
where
    F: Fn(&str) -> Option<NeighborRecord>,
{
    output
        .lines()
        .filter_map(|line| {
            let record = parse(line);
            if record.is_none() && !line.trim().is_empty() {
                trace!(line, "skipping unparseable neighbor-table line");
            }
            record
        })
        .collect()
}
