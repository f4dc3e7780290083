/// Address as the transport layer stores it.
///
/// Words 0-3 hold the 16 IPv6 address bytes read as little-endian words and
/// word 4 holds the scope id. On an IPv4 socket only word 0 is used, holding
/// the address bytes in network order read as a little-endian word.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ENetAddress {
    pub host: [u32; 5],
    pub port: u16,
}
