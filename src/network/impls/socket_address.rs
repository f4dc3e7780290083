use std::fmt;
use std::fmt::Formatter;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use log::{debug, warn};
use crate::config::enums::ip_type::IpType;
use crate::config::structs::network_config::NetworkConfig;
use crate::network::enums::address_family::AddressFamily;
use crate::network::enums::socket_address::SocketAddress;
use crate::network::ipv6;
use crate::network::structs::ipv4_endpoint::Ipv4Endpoint;
use crate::network::structs::ipv6_endpoint::Ipv6Endpoint;

impl SocketAddress {
    /// IPv4 address from a host-order integer.
    pub fn from_ipv4(ip: u32, port: u16) -> SocketAddress {
        SocketAddress::V4(Ipv4Endpoint {
            octets: ip.to_be_bytes(),
            port,
        })
    }

    pub fn from_octets(b1: u8, b2: u8, b3: u8, b4: u8, port: u16) -> SocketAddress {
        SocketAddress::V4(Ipv4Endpoint {
            octets: [b1, b2, b3, b4],
            port,
        })
    }

    /// Parses `address` with no default port and any family.
    pub fn new(address: &str) -> SocketAddress {
        SocketAddress::parse(address, 0, AddressFamily::Unspecified)
    }

    pub fn with_port(address: &str, port: u16) -> SocketAddress {
        SocketAddress::parse(address, port, AddressFamily::Unspecified)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, SocketAddress::Unset)
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, SocketAddress::V6(_))
    }

    pub fn family(&self) -> AddressFamily {
        match self {
            SocketAddress::Unset => AddressFamily::Unspecified,
            SocketAddress::V4(_) => AddressFamily::Inet,
            SocketAddress::V6(_) => AddressFamily::Inet6,
        }
    }

    /// Host-order IPv4 value; unwraps IPv4-mapped IPv6, 0 for anything else.
    pub fn get_ip(&self) -> u32 {
        match self {
            SocketAddress::V4(endpoint) => u32::from_be_bytes(endpoint.octets),
            SocketAddress::V6(endpoint) if ipv6::is_ipv4_mapped(&endpoint.octets) => {
                u32::from_be_bytes([endpoint.octets[12], endpoint.octets[13], endpoint.octets[14], endpoint.octets[15]])
            }
            _ => 0,
        }
    }

    pub fn get_port(&self) -> u16 {
        match self {
            SocketAddress::Unset => 0,
            SocketAddress::V4(endpoint) => endpoint.port,
            SocketAddress::V6(endpoint) => endpoint.port,
        }
    }

    /// Always leaves an IPv4 address behind; the port survives only when the
    /// address already was IPv4.
    pub fn set_ip(&mut self, ip: u32) {
        match self {
            SocketAddress::V4(endpoint) => endpoint.octets = ip.to_be_bytes(),
            _ => *self = SocketAddress::from_ipv4(ip, 0),
        }
    }

    pub fn set_port(&mut self, port: u16) {
        match self {
            SocketAddress::Unset => {}
            SocketAddress::V4(endpoint) => endpoint.port = port,
            SocketAddress::V6(endpoint) => endpoint.port = port,
        }
    }

    pub fn is_loopback(&self) -> bool {
        let ip = self.get_ip();
        if ip != 0 {
            return ip >> 24 == 0x7f;
        }
        match self {
            SocketAddress::V6(endpoint) => endpoint.octets == Ipv6Addr::LOCALHOST.octets(),
            _ => false,
        }
    }

    /// Loopback, RFC 1918 ranges, unique-local (fc00::/7) or link-local
    /// (fe80::/10).
    pub fn is_lan(&self) -> bool {
        if self.is_loopback() {
            return true;
        }
        let ip = self.get_ip();
        if ip != 0 {
            return (ip >> 16) == 0xc0a8
                || (ip >> 20) == 0xac1
                || (ip >> 24) == 0x0a;
        }
        match self {
            SocketAddress::V6(endpoint) => {
                let prefix = u16::from_be_bytes([endpoint.octets[0], endpoint.octets[1]]);
                (0xfc00..=0xfdff).contains(&prefix) || (0xfe80..=0xfebf).contains(&prefix)
            }
            _ => false,
        }
    }

    /// True when this address is loopback or belongs to one of the local
    /// network interfaces.
    pub fn is_public_address_localhost(&self) -> bool {
        match self {
            SocketAddress::Unset => return false,
            SocketAddress::V4(_) if self.get_ip() == 0 => return false,
            _ => {}
        }
        if self.is_loopback() {
            return true;
        }
        let interfaces = match local_ip_address::list_afinet_netifas() {
            Ok(interfaces) => interfaces,
            Err(error) => {
                warn!("[NETWORK] Unable to list the network interfaces: {error}");
                return false;
            }
        };
        let ip = self.get_ip();
        interfaces.iter().any(|(name, address)| {
            let found = match (address, self) {
                (IpAddr::V4(v4), _) => ip != 0 && u32::from(*v4) == ip,
                (IpAddr::V6(v6), SocketAddress::V6(endpoint)) => v6.octets() == endpoint.octets,
                _ => false,
            };
            if found {
                debug!("[NETWORK] {} is bound to interface {name}", self.readable(false));
            }
            found
        })
    }

    /// Dotted quad for IPv4 and IPv4-mapped addresses, canonical IPv6 text
    /// otherwise. An unset address prints as an empty string.
    pub fn readable(&self, show_port: bool) -> String {
        self.readable_with_prefix(show_port, None)
    }

    /// Like [`SocketAddress::readable`], with addresses under the NAT64
    /// prefix of `network` printed with a dotted-quad tail.
    pub fn readable_nat64(&self, show_port: bool, network: &NetworkConfig) -> String {
        self.readable_with_prefix(show_port, network.nat64_prefix_octets().as_ref())
    }

    fn readable_with_prefix(&self, show_port: bool, nat64_prefix: Option<&[u8; 12]>) -> String {
        let ip = self.get_ip();
        match self {
            SocketAddress::Unset => String::new(),
            SocketAddress::V6(endpoint) if ip == 0 => {
                let text = ipv6::readable_string_nat64(&endpoint.octets, nat64_prefix);
                match show_port {
                    true => format!("[{text}]:{}", endpoint.port),
                    false => text,
                }
            }
            _ => {
                let [b1, b2, b3, b4] = ip.to_be_bytes();
                match show_port {
                    true => format!("{b1}.{b2}.{b3}.{b4}:{}", self.get_port()),
                    false => format!("{b1}.{b2}.{b3}.{b4}"),
                }
            }
        }
    }

    /// Rewrites an IPv4 address so a dual-stack socket can reach it.
    ///
    /// With a NAT64 network the address moves under the configured prefix,
    /// otherwise it becomes `::ffff:a.b.c.d`. IPv6 and unset addresses, and
    /// any address when `ipv6` is false, are left alone.
    pub fn convert_for_ipv6_socket(&mut self, ipv6: bool, network: &NetworkConfig) {
        if !ipv6 || !matches!(self, SocketAddress::V4(_)) {
            return;
        }
        let port = self.get_port();
        let text = self.readable(false);
        let converted = match network.ip_type {
            IpType::ipv6_nat64 => format!("{}{text}", network.nat64_prefix),
            _ => format!("::ffff:{text}"),
        };
        let address = SocketAddress::parse(&converted, port, AddressFamily::Inet6);
        if address.is_unset() {
            warn!("[NETWORK] Unable to convert {text} for an IPv6 socket");
            return;
        }
        *self = address;
    }

    pub fn to_std(&self) -> Option<SocketAddr> {
        match self {
            SocketAddress::Unset => None,
            SocketAddress::V4(endpoint) => Some(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(endpoint.octets), endpoint.port))),
            SocketAddress::V6(endpoint) => Some(SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::from(endpoint.octets), endpoint.port, 0, endpoint.scope_id))),
        }
    }
}

impl From<SocketAddr> for SocketAddress {
    fn from(address: SocketAddr) -> Self {
        match address {
            SocketAddr::V4(v4) => SocketAddress::V4(Ipv4Endpoint {
                octets: v4.ip().octets(),
                port: v4.port(),
            }),
            SocketAddr::V6(v6) => SocketAddress::V6(Ipv6Endpoint {
                octets: v6.ip().octets(),
                port: v6.port(),
                scope_id: v6.scope_id(),
            }),
        }
    }
}

impl PartialEq for SocketAddress {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SocketAddress::V4(a), SocketAddress::V4(b)) => a == b,
            (SocketAddress::V6(a), SocketAddress::V6(b)) => ipv6::address_equals(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.readable(true))
    }
}
