use std::net::{SocketAddr, ToSocketAddrs};
use log::error;
use crate::network::enums::address_family::AddressFamily;
use crate::network::enums::socket_address::SocketAddress;
use crate::network::ipv6;

impl SocketAddress {
    /// Parses `address` and resolves it to one endpoint of `family`.
    ///
    /// Accepted forms are `host:port` (exactly one colon), `[ipv6]:port`,
    /// a bare IPv6 literal and a bare host name. When no port is given,
    /// `port_number` is used. IPv4 results win over IPv6 ones, and an
    /// IPv4-mapped IPv6 result is only taken when the host itself was
    /// written as `::ffff:...`. Every failure is logged and yields
    /// [`SocketAddress::Unset`].
    pub fn parse(address: &str, port_number: u16, family: AddressFamily) -> SocketAddress {
        if address.is_empty() {
            error!("[NETWORK] Empty address is given");
            return SocketAddress::Unset;
        }

        let Some((host, port)) = split_host_port(address, port_number) else {
            return SocketAddress::Unset;
        };

        let resolved = match (host, port).to_socket_addrs() {
            Ok(resolved) => resolved,
            Err(resolve_error) => {
                error!("[NETWORK] Unable to resolve {address}: {resolve_error}");
                return SocketAddress::Unset;
            }
        };

        let mapped_input = host.to_ascii_lowercase().starts_with("::ffff:");
        let mut ipv6_candidate = None;
        for candidate in resolved {
            match candidate {
                SocketAddr::V4(_) if family.allows_ipv4() => {
                    return SocketAddress::from(candidate);
                }
                SocketAddr::V6(v6) if family.allows_ipv6() && ipv6_candidate.is_none() => {
                    if mapped_input || !ipv6::is_ipv4_mapped(&v6.ip().octets()) {
                        ipv6_candidate = Some(candidate);
                    }
                }
                _ => {}
            }
        }

        match ipv6_candidate {
            Some(candidate) => SocketAddress::from(candidate),
            None => {
                error!("[NETWORK] No usable {family:?} address found for {address}");
                SocketAddress::Unset
            }
        }
    }
}

/// Splits `address` into the host part and the port to use.
fn split_host_port(address: &str, port_number: u16) -> Option<(&str, u16)> {
    if address.matches(':').count() == 1 {
        let (host, port) = address.split_once(':')?;
        return Some((host, parse_port(address, port, port_number)?));
    }

    if let Some(bracketed) = address.strip_prefix('[') {
        let Some(end) = bracketed.find(']') else {
            error!("[NETWORK] Missing ']' in {address}");
            return None;
        };
        if end == 0 {
            error!("[NETWORK] Empty IPv6 literal in {address}");
            return None;
        }
        let host = &bracketed[..end];
        let rest = &bracketed[end + 1..];
        let port = match rest.strip_prefix(':') {
            Some(port) => parse_port(address, port, port_number)?,
            None if rest.is_empty() => port_number,
            None => {
                error!("[NETWORK] Unexpected text after ']' in {address}");
                return None;
            }
        };
        return Some((host, port));
    }

    Some((address, port_number))
}

fn parse_port(address: &str, port: &str, port_number: u16) -> Option<u16> {
    if port.is_empty() {
        return Some(port_number);
    }
    match port.parse::<u16>() {
        Ok(port) => Some(port),
        Err(parse_error) => {
            error!("[NETWORK] Invalid port in {address}: {parse_error}");
            None
        }
    }
}
