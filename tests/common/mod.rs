#![allow(dead_code)]
use std::sync::{Arc, Mutex};
use rusqlite::Connection;
use tempfile::TempDir;
use kartnet::config::structs::configuration::Configuration;
use kartnet::database::structs::database_connector::DatabaseConnector;
use kartnet::database::structs::peer_session::PeerSession;
use kartnet::database::traits::peer_registry::PeerRegistry;
use kartnet::network::enums::socket_address::SocketAddress;

pub type TestConfig = Arc<Configuration>;

pub const BAN_SCHEMA: &str = "
    CREATE TABLE ip_ban (
        ip_start INTEGER UNSIGNED NOT NULL UNIQUE,
        ip_end INTEGER UNSIGNED NOT NULL UNIQUE,
        starting_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        expired_days REAL NULL DEFAULT NULL,
        reason TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        trigger_count INTEGER UNSIGNED NOT NULL DEFAULT 0,
        last_trigger TIMESTAMP NULL DEFAULT NULL
    );
    CREATE TABLE ipv6_ban (
        ipv6_cidr TEXT NOT NULL UNIQUE,
        starting_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        expired_days REAL NULL DEFAULT NULL,
        reason TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        trigger_count INTEGER UNSIGNED NOT NULL DEFAULT 0,
        last_trigger TIMESTAMP NULL DEFAULT NULL
    );
    CREATE TABLE online_id_ban (
        online_id INTEGER UNSIGNED NOT NULL UNIQUE,
        starting_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        expired_days REAL NULL DEFAULT NULL,
        reason TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        trigger_count INTEGER UNSIGNED NOT NULL DEFAULT 0,
        last_trigger TIMESTAMP NULL DEFAULT NULL
    );
    CREATE TABLE player_reports (
        server_uid TEXT NOT NULL,
        reporter_ip INTEGER UNSIGNED NOT NULL,
        reporter_ipv6 TEXT NOT NULL DEFAULT '',
        reporter_online_id INTEGER UNSIGNED NOT NULL,
        reporter_username TEXT NOT NULL,
        reported_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        info TEXT NOT NULL,
        reporting_ip INTEGER UNSIGNED NOT NULL,
        reporting_ipv6 TEXT NOT NULL DEFAULT '',
        reporting_online_id INTEGER UNSIGNED NOT NULL,
        reporting_username TEXT NOT NULL
    );
";

pub fn create_test_config(dir: &TempDir) -> Configuration {
    let mut config = Configuration::init();
    config.database.path = dir.path().join("stkservers.db").to_string_lossy().into_owned();
    config.database.poll_interval = 0;
    config
}

/// Writes `schema` into a fresh database file and opens a connector on it.
pub fn create_test_connector(dir: &TempDir, schema: &str) -> DatabaseConnector {
    let config = create_test_config(dir);
    let connection = Connection::open(&config.database.path).unwrap();
    connection.execute_batch(schema).unwrap();
    drop(connection);

    let mut connector = DatabaseConnector::new(Arc::new(config));
    connector.init_database(false);
    connector
}

pub fn first_value(connector: &DatabaseConnector, query: &str) -> String {
    let mut rows = Vec::new();
    assert!(connector.easy_sql_query(query, Some(&mut rows), None, "NULL"), "query failed: {query}");
    rows[0][0].clone()
}

pub fn create_test_peer(host_id: u32, address: SocketAddress, online_id: u32) -> PeerSession {
    PeerSession {
        host_id,
        address,
        online_id,
        username: format!("racer{host_id}"),
        player_count: 1,
        user_version: String::from("SuperTuxKart/1.4 (Windows)"),
        average_ping: 25,
        packet_loss: 0,
        validated: true,
        ai: false,
    }
}

/// In-memory lobby: a fixed peer list and the last host id handed to it.
#[derive(Default)]
pub struct TestRegistry {
    pub peers: Mutex<Vec<PeerSession>>,
    pub next_host_id: Mutex<Option<u32>>,
}

impl TestRegistry {
    pub fn with_peers(peers: Vec<PeerSession>) -> TestRegistry {
        TestRegistry {
            peers: Mutex::new(peers),
            next_host_id: Mutex::new(None),
        }
    }

    pub fn next_host_id(&self) -> Option<u32> {
        *self.next_host_id.lock().unwrap()
    }
}

impl PeerRegistry for TestRegistry {
    fn connected_peers(&self) -> Vec<PeerSession> {
        self.peers.lock().unwrap().clone()
    }

    fn set_next_host_id(&self, host_id: u32) {
        *self.next_host_id.lock().unwrap() = Some(host_id);
    }
}
