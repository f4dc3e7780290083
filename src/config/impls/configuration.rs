use std::fs::File;
use std::io::Write;
use regex::Regex;
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::enums::ip_type::IpType;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::network_config::NetworkConfig;
use crate::config::structs::server_config::ServerConfig;

const IDENTIFIER_REGEX: &str = r"^[a-z_][a-z0-9_]{0,30}$";
const SERVER_UID_REGEX: &str = r"^[A-Za-z0-9_]{1,30}$";
const LOG_LEVEL_REGEX: &str = r"^(off|trace|debug|info|warn|error)$";

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            server: ServerConfig {
                server_uid: String::from("stk"),
                server_db_version: 1,
                ipv6_connection: true
            },
            database: DatabaseConfig {
                enabled: true,
                path: String::from("stkservers.db"),
                timeout: 3000,
                poll_interval: 60,
                ip_ban_table: String::from("ip_ban"),
                ipv6_ban_table: String::from("ipv6_ban"),
                online_id_ban_table: String::from("online_id_ban"),
                player_reports_table: String::from("player_reports"),
                ip_geolocation_table: String::from("ip_mapping"),
                ipv6_geolocation_table: String::from("ipv6_mapping"),
                player_reports_expired_days: 3.0
            },
            network: NetworkConfig {
                ip_type: IpType::ipv4,
                nat64_prefix: String::new(),
                ipv6_socket: false
            }
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => {
                        Ok(cfg)
                    }
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    /// Loads and validates `path`.
    ///
    /// When the file is missing or corrupt and `create` is set, a default
    /// configuration is written to `path` and the caller is asked to edit it.
    /// Runs before logging exists, so progress goes to stderr.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, CustomError> {
        let mut config = Configuration::init();
        match Configuration::load_file(path) {
            Ok(c) => { config = c; }
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own {path} file, or start this app using '--create-config' as parameter.");
                    return Err(CustomError::new(&format!("will not create automatically {path} file")));
                }
                eprintln!("Creating config file..");

                let config_toml = match toml::to_string(&config) {
                    Ok(data) => data,
                    Err(e) => return Err(CustomError::new(&ConfigurationError::SerializeError(e).to_string()))
                };
                return match Configuration::save_file(path, config_toml) {
                    Ok(_) => {
                        eprintln!("Please edit {path}, exiting now...");
                        Err(CustomError::new(&format!("create {path} file")))
                    }
                    Err(e) => {
                        eprintln!("{path} file could not be created, check permissions...");
                        eprintln!("{e}");
                        Err(CustomError::new(&format!("could not create {path} file")))
                    }
                };
            }
        };

        eprintln!("[VALIDATE] Validating configuration...");
        if let Err(error) = config.validate() {
            return Err(CustomError::new(&error.to_string()));
        }
        config.sanitize();
        Ok(config)
    }

    /// Checks every value that ends up inside SQL text or selects a mode.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let check_map = vec![
            ("[LOG] Level", self.log_level.as_str(), LOG_LEVEL_REGEX),
            ("[SERVER] Server UID", self.server.server_uid.as_str(), SERVER_UID_REGEX),
            ("[DB: ip_ban]", self.database.ip_ban_table.as_str(), IDENTIFIER_REGEX),
            ("[DB: ipv6_ban]", self.database.ipv6_ban_table.as_str(), IDENTIFIER_REGEX),
            ("[DB: online_id_ban]", self.database.online_id_ban_table.as_str(), IDENTIFIER_REGEX),
            ("[DB: player_reports]", self.database.player_reports_table.as_str(), IDENTIFIER_REGEX),
            ("[DB: ip_geolocation]", self.database.ip_geolocation_table.as_str(), IDENTIFIER_REGEX),
            ("[DB: ipv6_geolocation]", self.database.ipv6_geolocation_table.as_str(), IDENTIFIER_REGEX),
        ];

        for (name, value, regex) in check_map {
            Self::validate_value(name, value, regex)?;
        }

        if self.network.ip_type == IpType::ipv6_nat64 && self.network.nat64_prefix_octets().is_none() {
            return Err(ConfigurationError::ValidationError(format!(
                "[NETWORK] NAT64 prefix \"{}\" is not a valid IPv6 prefix",
                self.network.nat64_prefix
            )));
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str, regex: &str) -> Result<(), ConfigurationError>
    {
        let regex_check = Regex::new(regex).map_err(|e| ConfigurationError::ValidationError(e.to_string()))?;
        if !regex_check.is_match(value) {
            return Err(ConfigurationError::ValidationError(format!(
                "Error checking {} [:] Name: \"{}\" [:] Regex: \"{}\"",
                name, value, regex_check
            )));
        }
        Ok(())
    }

    /// Replaces out-of-range numbers with their defaults.
    pub fn sanitize(&mut self) {
        if !self.database.player_reports_expired_days.is_finite() || self.database.player_reports_expired_days < 0.0 {
            eprintln!("[VALIDATE] player_reports_expired_days must not be negative, using the default");
            self.database.player_reports_expired_days = Configuration::init().database.player_reports_expired_days;
        }
        if self.database.poll_interval == 0 {
            eprintln!("[VALIDATE] poll_interval must be at least one second, using the default");
            self.database.poll_interval = Configuration::init().database.poll_interval;
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::init()
    }
}
