use crate::network::enums::address_family::AddressFamily;

impl AddressFamily {
    pub fn allows_ipv4(&self) -> bool {
        matches!(self, AddressFamily::Unspecified | AddressFamily::Inet)
    }

    pub fn allows_ipv6(&self) -> bool {
        matches!(self, AddressFamily::Unspecified | AddressFamily::Inet6)
    }
}
