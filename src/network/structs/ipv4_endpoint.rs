#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ipv4Endpoint {
    /// Address in network byte order.
    pub octets: [u8; 4],
    pub port: u16,
}
