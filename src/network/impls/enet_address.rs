use byteorder::{ByteOrder, LittleEndian};
use crate::network::enums::socket_address::SocketAddress;
use crate::network::structs::enet_address::ENetAddress;
use crate::network::structs::ipv6_endpoint::Ipv6Endpoint;

impl SocketAddress {
    /// Builds an address from its transport form.
    ///
    /// On an IPv6 socket the four host words carry the 16 address bytes and
    /// word 4 the scope id; otherwise word 0 carries the IPv4 address.
    pub fn from_enet(address: &ENetAddress, ipv6_socket: bool) -> SocketAddress {
        if ipv6_socket {
            let mut octets = [0u8; 16];
            LittleEndian::write_u32_into(&address.host[..4], &mut octets);
            return SocketAddress::V6(Ipv6Endpoint {
                octets,
                port: address.port,
                scope_id: address.host[4],
            });
        }
        let mut octets = [0u8; 4];
        LittleEndian::write_u32(&mut octets, address.host[0]);
        SocketAddress::from_ipv4(u32::from_be_bytes(octets), address.port)
    }

    /// Transport form of this address.
    ///
    /// An IPv4 address handed to an IPv6 socket is written as its
    /// `::ffff:a.b.c.d` form. On an IPv4 socket an IPv6 address only keeps
    /// its embedded IPv4 value, if any.
    pub fn to_enet_address(&self, ipv6_socket: bool) -> ENetAddress {
        let mut address = ENetAddress {
            host: [0; 5],
            port: self.get_port(),
        };
        if !ipv6_socket {
            address.host[0] = LittleEndian::read_u32(&self.get_ip().to_be_bytes());
            return address;
        }
        let (octets, scope_id) = match self {
            SocketAddress::Unset => ([0u8; 16], 0),
            SocketAddress::V4(endpoint) => {
                let mut octets = [0u8; 16];
                octets[10] = 0xff;
                octets[11] = 0xff;
                octets[12..].copy_from_slice(&endpoint.octets);
                (octets, 0)
            }
            SocketAddress::V6(endpoint) => (endpoint.octets, endpoint.scope_id),
        };
        LittleEndian::read_u32_into(&octets, &mut address.host[..4]);
        address.host[4] = scope_id;
        address
    }
}
