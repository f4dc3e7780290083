use serde::{Deserialize, Serialize};
use crate::config::enums::ip_type::IpType;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub ip_type: IpType,
    /// /96 prefix, written like `64:ff9b::`.
    pub nat64_prefix: String,
    /// Whether the transport socket is a dual-stack IPv6 socket.
    pub ipv6_socket: bool
}
