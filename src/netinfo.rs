use std::net::{IpAddr, Ipv4Addr};

use if_addrs::get_if_addrs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetinfoError {
    #[error("failed to enumerate network interfaces: {0}")]
    Enumerate(#[from] std::io::Error),
    #[error("no private IP address found")]
    NoPrivateAddress,
}

/// Resolves the address other devices on the LAN can reach this host at:
/// the first non-loopback private IPv4 address in interface enumeration
/// order. Multi-homed hosts get an arbitrary but stable pick.
pub fn resolve_local_private_ipv4() -> Result<Ipv4Addr, NetinfoError> {
    let interfaces = get_if_addrs()?;
    first_private_ipv4(
        interfaces
            .iter()
            .filter(|iface| !iface.is_loopback())
            .map(|iface| iface.ip()),
    )
    .ok_or(NetinfoError::NoPrivateAddress)
}

/// Picks the first RFC-1918 IPv4 address (10/8, 172.16/12, 192.168/16)
/// from the candidates, skipping everything else.
fn first_private_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(ip) if ip.is_private() => Some(ip),
        _ => None,
    })
}
