#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ipv6Endpoint {
    /// Address in network byte order.
    pub octets: [u8; 16],
    pub port: u16,
    pub scope_id: u32,
}
