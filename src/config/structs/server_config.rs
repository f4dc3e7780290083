use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Unique name of this server, part of the statistics table name.
    pub server_uid: String,
    /// Schema version prefix of every generated table and view.
    pub server_db_version: u32,
    /// Whether peers may connect over IPv6; adds the `ipv6` columns.
    pub ipv6_connection: bool
}
