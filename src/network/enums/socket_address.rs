use crate::network::structs::ipv4_endpoint::Ipv4Endpoint;
use crate::network::structs::ipv6_endpoint::Ipv6Endpoint;

/// A peer endpoint on either address family.
///
/// An address only ever holds one family's data. IPv4-mapped IPv6 addresses
/// (`::ffff:a.b.c.d`) keep the `V6` shape so they can be handed back to a
/// dual-stack socket, but classify and print as the IPv4 address they wrap.
///
/// Malformed or unresolvable input produces `Unset`; callers check
/// [`SocketAddress::is_unset`].
#[derive(Debug, Clone, Copy, Default)]
pub enum SocketAddress {
    #[default]
    Unset,
    V4(Ipv4Endpoint),
    V6(Ipv6Endpoint),
}
