//! Selection of the interface that fronts the local network.
//!
//! The sweep needs one interface: up, broadcast-capable, with a routable
//! IPv4 assignment. Among the survivors of the viability filter, the one
//! holding the default route wins.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use anyhow::Context;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use tracing::debug;

use crate::error::NetError;

use super::subnet::SubnetRange;

/// Why an interface was rejected as a sweep candidate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    IsLoopback,
    /// The interface has no MAC address, so it cannot take part in
    /// link-layer resolution.
    NoMacAddress,
    /// A point-to-point link (e.g. a VPN) has no neighbors to resolve.
    IsPointToPoint,
    /// No routable IPv4 assignment (unspecified and 169.254/16 don't count).
    NoUsableIpv4,
}

/// The interface the sweep and the monitor operate through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanInterface {
    pub name: String,
    pub ip: Ipv4Addr,
    pub prefix: u8,
    pub mac: MacAddr,
}

impl LanInterface {
    /// The subnet implied by the interface's address assignment.
    pub fn subnet(&self) -> Result<SubnetRange, NetError> {
        SubnetRange::new(self.ip, self.prefix)
    }
}

/// Finds the interface to sweep: enumerates the system's interfaces, filters
/// for viability, and prefers the one holding the default route.
pub fn discover() -> anyhow::Result<LanInterface> {
    let interfaces = datalink::interfaces();
    select(&interfaces, default_route_ip()).context("no viable LAN interface found")
}

/// Pure selection over an interface list; `preferred_ip` is the local
/// address of the default route when one is known.
pub fn select(
    interfaces: &[NetworkInterface],
    preferred_ip: Option<Ipv4Addr>,
) -> Option<LanInterface> {
    let candidates: Vec<&NetworkInterface> = interfaces
        .iter()
        .filter(|intf| match check_viability(intf) {
            Ok(()) => true,
            Err(reason) => {
                debug!(name = %intf.name, ?reason, "interface rejected");
                false
            }
        })
        .collect();

    let chosen = candidates
        .iter()
        .find(|intf| {
            preferred_ip.is_some_and(|ip| usable_ipv4(intf).is_some_and(|(addr, _)| addr == ip))
        })
        .or_else(|| candidates.first())?;

    let (ip, prefix) = usable_ipv4(chosen)?;
    Some(LanInterface {
        name: chosen.name.clone(),
        ip,
        prefix,
        mac: chosen.mac?,
    })
}

fn check_viability(intf: &NetworkInterface) -> Result<(), ViabilityError> {
    if intf.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if !intf.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if intf.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    match intf.mac {
        Some(mac) if mac != MacAddr::zero() => {}
        _ => return Err(ViabilityError::NoMacAddress),
    }
    if usable_ipv4(intf).is_none() {
        return Err(ViabilityError::NoUsableIpv4);
    }
    Ok(())
}

fn usable_ipv4(intf: &NetworkInterface) -> Option<(Ipv4Addr, u8)> {
    intf.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4)
            if !v4.ip().is_unspecified() && !v4.ip().is_link_local() && v4.prefix() > 0 =>
        {
            Some((v4.ip(), v4.prefix()))
        }
        _ => None,
    })
}

/// Asks the routing table which local address fronts the default route by
/// connecting an unbound UDP socket outward. Nothing is sent — `connect` on
/// a datagram socket only fixes the route.
fn default_route_ip() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 53)).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) => Some(ip),
        IpAddr::V6(_) => None,
    }
}
