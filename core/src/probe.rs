//! The reachability probe primitive and the concurrent sweep dispatcher.
//!
//! A probe's reply is informational only. The sweep exists for its side
//! effect: forcing the OS to attempt link-layer resolution for every
//! candidate address, which populates the neighbor cache the reader then
//! collects. Hosts that filter echo traffic still show up there.

use std::mem::MaybeUninit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, trace};

use lanwatch_common::config::Settings;
use lanwatch_protocols::icmp;

/// Outcome of a single probe. `NoReply` is the common case on a quiet
/// network and never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Reply,
    NoReply,
}

/// The probe primitive: one bounded reachability attempt per call.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: Ipv4Addr, timeout: Duration) -> ProbeStatus;
}

/// Echo-request prober. Uses a datagram ICMP socket where the platform
/// allows unprivileged ICMP, falling back to a raw socket.
pub struct IcmpProber;

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, target: Ipv4Addr, timeout: Duration) -> ProbeStatus {
        // socket2 I/O is synchronous; one blocking slot per probe, bounded
        // by the sweep's semaphore.
        tokio::task::spawn_blocking(move || ping_once(target, timeout))
            .await
            .unwrap_or(ProbeStatus::NoReply)
    }
}

fn open_icmp_socket() -> Option<Socket> {
    Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::ICMPV4))
        .or_else(|_| Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)))
        .ok()
}

fn ping_once(target: Ipv4Addr, timeout: Duration) -> ProbeStatus {
    let Some(socket) = open_icmp_socket() else {
        return ProbeStatus::NoReply;
    };
    let _ = socket.set_read_timeout(Some(timeout));
    let _ = socket.set_write_timeout(Some(timeout));

    // Connecting scopes recv to this target, so concurrent probes don't
    // steal each other's replies.
    let addr = SocketAddr::new(IpAddr::V4(target), 0);
    if socket.connect(&addr.into()).is_err() {
        return ProbeStatus::NoReply;
    }

    let identifier = std::process::id() as u16;
    let sequence = u32::from(target) as u16;
    let Ok(packet) = icmp::create_echo_request(identifier, sequence) else {
        return ProbeStatus::NoReply;
    };
    if socket.send(&packet).is_err() {
        return ProbeStatus::NoReply;
    }

    let mut buffer = [MaybeUninit::<u8>::uninit(); 512];
    match socket.recv(&mut buffer) {
        Ok(len) => {
            // Safety: the kernel initialized the first `len` bytes.
            let received =
                unsafe { std::slice::from_raw_parts(buffer.as_ptr().cast::<u8>(), len) };
            match icmp::parse_echo_reply(received) {
                Some(_) => ProbeStatus::Reply,
                None => ProbeStatus::NoReply,
            }
        }
        Err(_) => ProbeStatus::NoReply,
    }
}

/// Fires one probe per candidate address, excluding `own_ip`, with at most
/// `settings.max_inflight` in flight at once. Returns the number of probes
/// dispatched once every probe finished or the settle deadline passed —
/// outstanding probes are abandoned, not awaited, since only their side
/// effect on the resolution cache matters.
pub async fn sweep(
    prober: Arc<dyn Prober>,
    targets: impl IntoIterator<Item = Ipv4Addr>,
    own_ip: Ipv4Addr,
    settings: &Settings,
) -> usize {
    let limiter = Arc::new(Semaphore::new(settings.max_inflight.max(1)));
    let mut probes = JoinSet::new();
    let mut dispatched = 0usize;

    for target in targets {
        if target == own_ip {
            continue;
        }
        dispatched += 1;
        let prober = Arc::clone(&prober);
        let limiter = Arc::clone(&limiter);
        let timeout = settings.probe_timeout;
        probes.spawn(async move {
            let Ok(_permit) = limiter.acquire().await else {
                return;
            };
            let status = prober.probe(target, timeout).await;
            trace!(%target, ?status, "probe finished");
        });
    }

    let drained = tokio::time::timeout(settings.settle, async {
        while probes.join_next().await.is_some() {}
    })
    .await;

    if drained.is_err() {
        debug!(
            outstanding = probes.len(),
            "settle deadline reached, abandoning outstanding probes"
        );
        probes.abort_all();
    }
    dispatched
}
