use serde::{Deserialize, Serialize};
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::network_config::NetworkConfig;
use crate::config::structs::server_config::ServerConfig;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    pub log_level: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub network: NetworkConfig
}
