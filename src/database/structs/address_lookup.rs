use serde::Serialize;
use crate::network::enums::address_family::AddressFamily;

/// How the server sees one peer address.
///
/// Classification and geolocation describe the address as given;
/// `transport` is the form handed to the transport socket.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressLookup {
    pub address: String,
    pub transport: String,
    pub family: AddressFamily,
    pub ipv4: u32,
    pub port: u16,
    pub loopback: bool,
    pub lan: bool,
    pub local_interface: bool,
    pub country_code: String,
}
