use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub enabled: bool,
    pub path: String,
    /// Milliseconds to keep retrying a busy database.
    pub timeout: u64,
    /// Seconds between two ban list polls.
    pub poll_interval: u64,
    pub ip_ban_table: String,
    pub ipv6_ban_table: String,
    pub online_id_ban_table: String,
    pub player_reports_table: String,
    pub ip_geolocation_table: String,
    pub ipv6_geolocation_table: String,
    /// Days a player report is kept; 0 keeps them forever.
    pub player_reports_expired_days: f32
}
