use crate::network::enums::socket_address::SocketAddress;

#[derive(Debug, Clone, Default)]
pub struct PeerSession {
    pub host_id: u32,
    pub address: SocketAddress,
    /// Online id of the first player on this peer, 0 when offline.
    pub online_id: u32,
    pub username: String,
    pub player_count: u32,
    /// Client user agent, e.g. `SuperTuxKart/1.4 (Linux)`.
    pub user_version: String,
    pub average_ping: u32,
    pub packet_loss: i32,
    /// Passed the connection handshake.
    pub validated: bool,
    /// Server-side AI peer; never stored or banned.
    pub ai: bool,
}
