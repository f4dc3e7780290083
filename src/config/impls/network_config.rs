use crate::config::enums::ip_type::IpType;
use crate::config::structs::network_config::NetworkConfig;
use crate::network::ipv6;

impl NetworkConfig {
    /// First 12 bytes of the configured NAT64 prefix.
    ///
    /// `None` unless the network is NAT64 and the prefix parses.
    pub fn nat64_prefix_octets(&self) -> Option<[u8; 12]> {
        if self.ip_type != IpType::ipv6_nat64 {
            return None;
        }
        let octets = ipv6::parse_ipv6(&self.nat64_prefix)?;
        let mut prefix = [0u8; 12];
        prefix.copy_from_slice(&octets[..12]);
        Some(prefix)
    }
}
