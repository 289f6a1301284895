//! ICMP echo request construction and reply recognition.

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{IcmpCode, IcmpPacket, IcmpTypes, checksum};

pub const ECHO_REQ_LEN: usize = 8;

/// A recognized echo reply. On Linux datagram-ICMP sockets the kernel
/// rewrites the identifier, so callers should treat both fields as
/// informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoReply {
    pub identifier: u16,
    pub sequence: u16,
}

pub fn create_echo_request(identifier: u16, sequence: u16) -> anyhow::Result<Vec<u8>> {
    let mut buffer = vec![0u8; ECHO_REQ_LEN];
    let mut echo =
        MutableEchoRequestPacket::new(&mut buffer).context("creating echo request packet")?;
    echo.set_icmp_type(IcmpTypes::EchoRequest);
    echo.set_icmp_code(IcmpCode(0));
    echo.set_identifier(identifier);
    echo.set_sequence_number(sequence);
    echo.set_checksum(0);

    let sum = checksum(&IcmpPacket::new(echo.packet()).context("reading back echo request")?);
    echo.set_checksum(sum);
    Ok(buffer)
}

/// Recognizes an ICMP echo reply in a received datagram. Anything else —
/// other ICMP types, truncated frames, non-ICMP noise — yields `None`.
pub fn parse_echo_reply(buf: &[u8]) -> Option<EchoReply> {
    let payload = strip_ipv4_header(buf);
    let icmp = IcmpPacket::new(payload)?;
    if icmp.get_icmp_type() != IcmpTypes::EchoReply {
        return None;
    }
    let reply = EchoReplyPacket::new(payload)?;
    Some(EchoReply {
        identifier: reply.get_identifier(),
        sequence: reply.get_sequence_number(),
    })
}

/// Raw ICMP sockets deliver the IPv4 header in front of the ICMP payload,
/// datagram ICMP sockets do not. An echo reply's first byte is its type
/// (0), so a leading version nibble of 4 can only be an IPv4 header.
fn strip_ipv4_header(buf: &[u8]) -> &[u8] {
    if let Some(&first) = buf.first() {
        if first >> 4 == 4 {
            let header_len = usize::from(first & 0x0f) * 4;
            if header_len >= 20 && buf.len() > header_len {
                return &buf[header_len..];
            }
        }
    }
    buf
}
