use std::process::exit;
use std::sync::Arc;
use clap::Parser;
use log::{error, info, warn};
use kartnet::common::common::setup_logging;
use kartnet::config::structs::configuration::Configuration;
use kartnet::database::enums::optional_table::OptionalTable;
use kartnet::database::structs::database_connector::DatabaseConnector;
use kartnet::database::structs::peer_session::PeerSession;
use kartnet::database::traits::peer_registry::PeerRegistry;
use kartnet::network::enums::socket_address::SocketAddress;
use kartnet::structs::{Cli, Commands};

/// The console runs outside a lobby, so nobody is connected.
struct ConsoleRegistry;

impl PeerRegistry for ConsoleRegistry {
    fn connected_peers(&self) -> Vec<PeerSession> {
        Vec::new()
    }

    fn set_next_host_id(&self, host_id: u32) {
        info!("[BOOT] Next session starts after host id {}", host_id);
    }
}

#[tracing::instrument(level = "debug")]
fn main()
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101)
    };

    if let Err(e) = setup_logging(&config) {
        eprintln!("{e}");
        exit(1);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut connector = DatabaseConnector::new(config.clone());
    connector.init_database(args.create_database);

    let code = match args.command.clone() {
        None => {
            status(&connector);
            0
        }
        Some(Commands::Lookup { address, json }) => lookup(&connector, &address, json),
        Some(Commands::Bans) => bans(&connector),
        Some(Commands::Ban { address }) => ban(&connector, &address),
        Some(Commands::InitStats) => match connector.init_server_stats_table(&ConsoleRegistry) {
            Ok(_) => {
                info!("[BOOT] Statistics table {} is ready", connector.server_stats_table());
                0
            }
            Err(e) => {
                error!("[BOOT] Unable to create the statistics table: {}", e);
                1
            }
        },
        Some(Commands::ClearReports) => match connector.clear_old_reports() {
            Ok(_) => {
                info!("[BOOT] Expired player reports removed");
                0
            }
            Err(e) => {
                error!("[BOOT] Unable to clear player reports: {}", e);
                1
            }
        },
    };

    connector.destroy_database(&ConsoleRegistry);
    exit(code);
}

fn status(connector: &DatabaseConnector) {
    if !connector.is_open() {
        warn!("[BOOT] Database {} is not available", connector.config().database.path);
        return;
    }
    for table in OptionalTable::ALL {
        let name = table.table_name(&connector.config().database);
        match connector.has_table(table) {
            true => info!("[BOOT] {} table: {}", table.label(), name),
            false => info!("[BOOT] {} table: missing ({})", table.label(), name),
        }
    }
}

fn lookup(connector: &DatabaseConnector, address: &str, as_json: bool) -> i32 {
    let resolved = SocketAddress::new(address);
    if resolved.is_unset() {
        error!("[LOOKUP] Unable to resolve {}", address);
        return 1;
    }
    let report = match serde_json::to_value(connector.lookup_address(&resolved)) {
        Ok(report) => report,
        Err(e) => {
            error!("[LOOKUP] Unable to serialize the lookup of {}: {}", address, e);
            return 1;
        }
    };
    if as_json {
        println!("{report}");
    } else {
        match report.as_object() {
            Some(fields) => {
                for (key, value) in fields {
                    println!("{key:>16}: {value}");
                }
            }
            None => println!("{report}"),
        }
    }
    0
}

fn bans(connector: &DatabaseConnector) -> i32 {
    match connector.list_ban_tables() {
        Ok(listings) => {
            for (table, columns, rows) in listings {
                println!("[{}] {}", table, columns.join(" | "));
                for row in rows {
                    println!("{}", row.join(" | "));
                }
            }
            0
        }
        Err(e) => {
            error!("[BANS] Unable to list ban tables: {}", e);
            1
        }
    }
}

fn ban(connector: &DatabaseConnector, address: &str) -> i32 {
    let resolved = SocketAddress::new(address);
    match connector.save_address_to_ip_ban_table(&resolved) {
        Ok(_) => 0,
        Err(e) => {
            error!("[BANS] Unable to ban {}: {}", address, e);
            1
        }
    }
}
