#[cfg(test)]
mod database_tests {
    use std::sync::Arc;
    use rusqlite::Connection;
    use tempfile::TempDir;
    use crate::config::structs::configuration::Configuration;
    use crate::database::structs::database_connector::DatabaseConnector;
    use crate::database::structs::peer_session::PeerSession;
    use crate::network::enums::socket_address::SocketAddress;

    const SCHEMA: &str = "
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
        CREATE TABLE ip_mapping (
            ip_start INTEGER UNSIGNED NOT NULL PRIMARY KEY UNIQUE,
            ip_end INTEGER UNSIGNED NOT NULL UNIQUE,
            latitude REAL NOT NULL DEFAULT 0,
            longitude REAL NOT NULL DEFAULT 0,
            country_code TEXT NOT NULL
        );
        CREATE TABLE ipv6_mapping (
            ip_start INTEGER NOT NULL PRIMARY KEY UNIQUE,
            ip_end INTEGER NOT NULL UNIQUE,
            latitude REAL NOT NULL DEFAULT 0,
            longitude REAL NOT NULL DEFAULT 0,
            country_code TEXT NOT NULL
        );
        INSERT INTO ip_ban (ip_start, ip_end, starting_time, reason, description)
            VALUES (16909056, 16909311, datetime('now', '-1 day'), 'cheating', 'speed hack');
        INSERT INTO ip_ban (ip_start, ip_end, starting_time, expired_days, reason)
            VALUES (84281096, 84281096, datetime('now', '-10 days'), 1, 'expired');
        INSERT INTO ip_ban (ip_start, ip_end, starting_time, reason)
            VALUES (151587081, 151587081, datetime('now', '+1 day'), 'future');
        INSERT INTO ipv6_ban (ipv6_cidr, starting_time, reason, description)
            VALUES ('2001:db8::/32', datetime('now', '-1 day'), 'spam', 'chat flood');
        INSERT INTO online_id_ban (online_id, starting_time, reason, description)
            VALUES (4242, datetime('now', '-1 day'), 'abuse', 'griefing');
        INSERT INTO ip_mapping (ip_start, ip_end, country_code) VALUES (16777216, 33554431, 'AU');
        INSERT INTO ipv6_mapping (ip_start, ip_end, country_code)
            VALUES (2306139568115548160, 2306139572410515455, 'DE');
    ";

    fn config_for(dir: &TempDir) -> Configuration {
        let mut config = Configuration::init();
        config.database.path = dir.path().join("stkservers.db").to_string_lossy().into_owned();
        config.database.poll_interval = 0;
        config
    }

    fn open_fixture(dir: &TempDir) -> DatabaseConnector {
        open_fixture_with(config_for(dir))
    }

    fn open_fixture_with(config: Configuration) -> DatabaseConnector {
        let connection = Connection::open(&config.database.path).unwrap();
        connection.execute_batch(SCHEMA).unwrap();
        drop(connection);

        let mut connector = DatabaseConnector::new(Arc::new(config));
        connector.init_database(false);
        assert!(connector.is_open());
        connector
    }

    fn scalar(connector: &DatabaseConnector, query: &str) -> String {
        let mut rows = Vec::new();
        assert!(connector.easy_sql_query(query, Some(&mut rows), None, "NULL"), "query failed: {query}");
        rows[0][0].clone()
    }

    fn peer(host_id: u32, address: SocketAddress, online_id: u32) -> PeerSession {
        PeerSession {
            host_id,
            address,
            online_id,
            username: format!("player{host_id}"),
            player_count: 1,
            user_version: String::from("SuperTuxKart/1.4 (Linux)"),
            average_ping: 40,
            packet_loss: 0,
            validated: true,
            ai: false,
        }
    }

    mod query_builder_tests {
        use crate::database::structs::query_builder::QueryBuilder;

        #[test]
        fn test_text_and_binders_stay_aligned() {
            let mut query = QueryBuilder::with("SELECT * FROM ip_ban WHERE reason = ");
            query.push_bind("cheating", "reason", false)
                .push_str(" AND rowid IN (")
                .push_list(&[1, 2, 3], ",")
                .push_str(") AND ip_start <= ")
                .push_value(16909060u32)
                .push_str(";");
            assert_eq!(query.sql(), "SELECT * FROM ip_ban WHERE reason = ? AND rowid IN (1,2,3) AND ip_start <= 16909060;");
            assert_eq!(query.binders().len(), 1);
            let binder = query.binders().iter().next().unwrap();
            assert_eq!(binder.name, "reason");
            assert_eq!(binder.value, "cheating");
        }

        #[test]
        fn test_placeholder_records_binder() {
            let mut query = QueryBuilder::new();
            let placeholder = query.placeholder("", "country_code", true);
            assert_eq!(placeholder, "?");
            assert_eq!(query.sql(), "");
            let (sql, binders) = query.into_parts();
            assert!(sql.is_empty());
            assert!(binders.iter().next().unwrap().binds_null());
        }

        #[test]
        fn test_empty_list() {
            let mut query = QueryBuilder::with("(");
            query.push_list::<u32>(&[], ",").push_str(")");
            assert_eq!(query.sql(), "()");
        }
    }

    mod binder_tests {
        use rusqlite::Connection;
        use crate::database::structs::binder::Binder;
        use crate::database::structs::binder_collection::BinderCollection;

        #[test]
        fn test_binds_null() {
            assert!(Binder::new("", "a", true).binds_null());
            assert!(!Binder::new("", "a", false).binds_null());
            assert!(!Binder::new("x", "a", true).binds_null());
        }

        #[test]
        fn test_bind_function_binds_in_order() {
            let connection = Connection::open_in_memory().unwrap();
            let mut statement = connection.prepare("SELECT ?, ? IS NULL, ?").unwrap();
            let mut binders = BinderCollection::new();
            binders.push(Binder::new("first", "first", false));
            binders.push(Binder::new("", "second", true));
            binders.push(Binder::new("", "third", false));
            let bind = binders.bind_function();
            binders.push(Binder::new("late", "late", false));
            bind(&mut statement);

            let mut rows = statement.raw_query();
            let row = rows.next().unwrap().unwrap();
            assert_eq!(row.get::<_, String>(0).unwrap(), "first");
            assert_eq!(row.get::<_, i64>(1).unwrap(), 1);
            assert_eq!(row.get::<_, String>(2).unwrap(), "");
        }

        #[test]
        fn test_bind_all_rejects_count_mismatch() {
            let connection = Connection::open_in_memory().unwrap();
            let mut statement = connection.prepare("SELECT ?").unwrap();
            let binders = BinderCollection::new();
            assert!(binders.is_empty());
            assert!(matches!(
                binders.bind_all(&mut statement),
                Err(rusqlite::Error::InvalidParameterCount(0, 1))
            ));
        }
    }

    mod busy_retry_tests {
        use std::time::Duration;
        use crate::database::structs::busy_retry::BusyRetry;

        #[test]
        fn test_from_timeout() {
            assert_eq!(BusyRetry::from_timeout(3000).attempts, 30);
            assert_eq!(BusyRetry::from_timeout(50).attempts, 0);
            assert_eq!(BusyRetry::from_timeout(3000).interval, Duration::from_millis(100));
            assert_eq!(BusyRetry::default().attempts, 0);
        }

        #[test]
        fn test_retries_until_exhausted() {
            let retry = BusyRetry::from_timeout(300);
            let mut calls = 0;
            let mut sleeps = Vec::new();
            let result: Result<(), u8> = retry.run_with(
                || {
                    calls += 1;
                    Err(5)
                },
                |error| *error == 5,
                |interval| sleeps.push(interval),
            );
            assert_eq!(result, Err(5));
            assert_eq!(calls, 4);
            assert_eq!(sleeps, vec![Duration::from_millis(100); 3]);
        }

        #[test]
        fn test_stops_on_success_or_other_error() {
            let retry = BusyRetry::from_timeout(1000);
            let mut calls = 0;
            let result = retry.run_with(
                || {
                    calls += 1;
                    if calls < 3 { Err("busy") } else { Ok(calls) }
                },
                |error| *error == "busy",
                |_| {},
            );
            assert_eq!(result, Ok(3));

            let mut calls = 0;
            let result: Result<(), &str> = retry.run_with(
                || {
                    calls += 1;
                    Err("syntax")
                },
                |error| *error == "busy",
                |_| panic!("must not sleep"),
            );
            assert_eq!(result, Err("syntax"));
            assert_eq!(calls, 1);
        }
    }

    mod helpers_tests {
        use rusqlite::Connection;
        use rusqlite::types::ValueRef;
        use crate::database::helpers::{column_text, has_window_functions, register_ipv6_functions};

        #[test]
        fn test_column_text() {
            assert_eq!(column_text(ValueRef::Null, "NULL"), "NULL");
            assert_eq!(column_text(ValueRef::Integer(-7), ""), "-7");
            assert_eq!(column_text(ValueRef::Real(1.5), ""), "1.5");
            assert_eq!(column_text(ValueRef::Real(3.0), ""), "3.0");
            assert_eq!(column_text(ValueRef::Text(b"AU"), ""), "AU");
        }

        #[test]
        fn test_registered_sql_functions() {
            let connection = Connection::open_in_memory().unwrap();
            register_ipv6_functions(&connection).unwrap();
            let (inside, outside, upper, bad) = connection
                .query_row(
                    "SELECT insideIPv6CIDR('2001:db8::/32', '2001:db8::1'), insideIPv6CIDR('2001:db8::/32', '::1'), \
                     upperIPv6('2001:db8::1'), insideIPv6CIDR(1, 2);",
                    [],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?, row.get::<_, i64>(3)?)),
                )
                .unwrap();
            assert_eq!((inside, outside, bad), (1, 0, 0));
            assert_eq!(upper, 0x2001_0db8_0000_0000);
        }

        #[test]
        fn test_bundled_sqlite_has_window_functions() {
            assert!(has_window_functions());
        }
    }

    mod optional_table_tests {
        use crate::config::structs::configuration::Configuration;
        use crate::database::enums::optional_table::OptionalTable;
        use crate::database::structs::table_flags::TableFlags;

        #[test]
        fn test_table_names_follow_config() {
            let mut config = Configuration::init();
            config.database.ipv6_geolocation_table = String::from("geo6");
            assert_eq!(OptionalTable::IpBan.table_name(&config.database), "ip_ban");
            assert_eq!(OptionalTable::Ipv6Geolocation.table_name(&config.database), "geo6");
        }

        #[test]
        fn test_table_flags() {
            let mut flags = TableFlags::default();
            for table in OptionalTable::ALL {
                assert!(!flags.get(table));
            }
            flags.set(OptionalTable::PlayerReports, true);
            assert!(flags.get(OptionalTable::PlayerReports));
            assert!(!flags.get(OptionalTable::IpBan));
        }
    }

    mod closed_connector_tests {
        use std::sync::Arc;
        use tempfile::TempDir;
        use crate::config::structs::configuration::Configuration;
        use crate::database::enums::database_error::DatabaseError;
        use crate::database::structs::database_connector::DatabaseConnector;
        use crate::database::structs::report_party::ReportParty;
        use crate::database::traits::peer_registry::MockPeerRegistry;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{config_for, peer};

        #[test]
        fn test_operations_without_handle() {
            let mut connector = DatabaseConnector::new(Arc::new(Configuration::init()));
            assert!(!connector.is_open());
            assert!(!connector.easy_sql_query("SELECT 1;", None, None, ""));
            let mut rows = vec![vec![String::from("x")]];
            assert!(!connector.easy_sql_query("SELECT 1;", Some(&mut rows), None, ""));
            assert_eq!(rows, vec![vec!["x"]]);
            assert!(matches!(connector.get_ip_ban_table_data(None), Err(DatabaseError::NotConfigured(_))));
            assert!(matches!(connector.list_ban_tables(), Err(DatabaseError::NotConfigured(_))));
            assert!(matches!(
                connector.write_report(&ReportParty::default(), &ReportParty::default(), "info"),
                Err(DatabaseError::NotConfigured(_))
            ));
            let address = SocketAddress::from_octets(1, 2, 3, 4, 0);
            assert_eq!(connector.country_code(&address), "");
            assert!(connector.check_peer_ban(&peer(1, address, 4242)).is_none());

            let registry = MockPeerRegistry::new();
            assert!(connector.poll_database(&registry).is_empty());
            assert!(matches!(connector.init_server_stats_table(&registry), Err(DatabaseError::NotConfigured(_))));
            connector.destroy_database(&registry);
        }

        #[test]
        fn test_missing_file_without_create() {
            let dir = TempDir::new().unwrap();
            let mut connector = DatabaseConnector::new(Arc::new(config_for(&dir)));
            connector.init_database(false);
            assert!(!connector.is_open());
        }

        #[test]
        fn test_disabled_database() {
            let dir = TempDir::new().unwrap();
            let mut config = config_for(&dir);
            config.database.enabled = false;
            let mut connector = DatabaseConnector::new(Arc::new(config));
            connector.init_database(true);
            assert!(!connector.is_open());
        }

        #[test]
        fn test_new_file_has_no_optional_tables() {
            let dir = TempDir::new().unwrap();
            let mut connector = DatabaseConnector::new(Arc::new(config_for(&dir)));
            connector.init_database(true);
            assert!(connector.is_open());
            assert!(!connector.has_ip_ban_table());
            assert!(!connector.has_player_reports_table());
            assert!(!connector.has_ipv6_geolocation_table());
            assert!(matches!(connector.get_online_id_ban_table_data(None), Err(DatabaseError::NotConfigured(_))));
            assert!(connector.list_ban_tables().unwrap().is_empty());
            assert!(connector.easy_sql_query("SELECT 1;", None, None, ""));
        }
    }

    mod ban_tests {
        use tempfile::TempDir;
        use crate::database::enums::ban_kind::BanKind;
        use crate::database::enums::database_error::DatabaseError;
        use crate::database::structs::binder::Binder;
        use crate::database::structs::binder_collection::BinderCollection;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{open_fixture, peer, scalar};

        #[test]
        fn test_optional_tables_detected() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            assert!(connector.has_ip_ban_table());
            assert!(connector.has_ipv6_ban_table());
            assert!(connector.has_online_id_ban_table());
            assert!(connector.has_player_reports_table());
            assert!(connector.has_ip_geolocation_table());
            assert!(connector.has_ipv6_geolocation_table());
            assert!(connector.check_table_exists("ip_ban"));
            assert!(!connector.check_table_exists("nothing_here"));
        }

        #[test]
        fn test_ip_ban_lookup_honours_time_window() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            let all = connector.get_ip_ban_table_data(None).unwrap();
            assert_eq!(all.len(), 1);
            assert_eq!(all[0].row_id, 1);
            assert_eq!(all[0].ip_start, 16909056);
            assert_eq!(all[0].reason, "cheating");

            assert_eq!(connector.get_ip_ban_table_data(Some(16909060)).unwrap().len(), 1);
            assert!(connector.get_ip_ban_table_data(Some(84281096)).unwrap().is_empty());
            assert!(connector.get_ip_ban_table_data(Some(151587081)).unwrap().is_empty());
        }

        #[test]
        fn test_ipv6_and_online_id_lookup() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            assert_eq!(connector.get_ipv6_ban_table_data(Some("2001:db8::5")).unwrap()[0].reason, "spam");
            assert!(connector.get_ipv6_ban_table_data(Some("2001:db9::1")).unwrap().is_empty());
            assert_eq!(connector.get_ipv6_ban_table_data(Some("")).unwrap().len(), 1);

            assert_eq!(connector.get_online_id_ban_table_data(Some(4242)).unwrap()[0].description, "griefing");
            assert!(connector.get_online_id_ban_table_data(Some(1)).unwrap().is_empty());
        }

        #[test]
        fn test_check_peer_ban_counts_triggers() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            let found = connector.check_peer_ban(&peer(3, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0)).unwrap();
            assert_eq!(found.kind, BanKind::ip);
            assert_eq!(found.row_id, 1);
            assert_eq!(found.host_id, 3);
            assert_eq!(found.address, "1.2.3.4");
            assert_eq!(scalar(&connector, "SELECT trigger_count FROM ip_ban WHERE rowid = 1;"), "1");
            assert_ne!(scalar(&connector, "SELECT last_trigger FROM ip_ban WHERE rowid = 1;"), "NULL");

            let found = connector.check_peer_ban(&peer(4, SocketAddress::new("[2001:db8::7]:2759"), 0)).unwrap();
            assert_eq!(found.kind, BanKind::ipv6);
            assert_eq!(scalar(&connector, "SELECT trigger_count FROM ipv6_ban;"), "1");

            let found = connector.check_peer_ban(&peer(5, SocketAddress::from_octets(8, 8, 8, 8, 2759), 4242)).unwrap();
            assert_eq!(found.kind, BanKind::online_id);
            assert_eq!(found.reason, "abuse");
            assert_eq!(scalar(&connector, "SELECT trigger_count FROM online_id_ban;"), "1");
        }

        #[test]
        fn test_check_peer_ban_skips_clean_and_ai_peers() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            assert!(connector.check_peer_ban(&peer(1, SocketAddress::from_octets(8, 8, 8, 8, 1), 7)).is_none());
            let mut ai = peer(2, SocketAddress::from_octets(1, 2, 3, 4, 1), 4242);
            ai.ai = true;
            assert!(connector.check_peer_ban(&ai).is_none());
            assert_eq!(scalar(&connector, "SELECT trigger_count FROM ip_ban WHERE rowid = 1;"), "0");
        }

        #[test]
        fn test_mapped_peer_uses_ipv4_table() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            let found = connector.check_peer_ban(&peer(1, SocketAddress::new("[::ffff:1.2.3.9]:2759"), 0)).unwrap();
            assert_eq!(found.kind, BanKind::ip);
        }

        #[test]
        fn test_save_address_to_ip_ban_table() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            connector.save_address_to_ip_ban_table(&SocketAddress::from_octets(8, 8, 4, 4, 0)).unwrap();
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM ip_ban WHERE ip_start = 134743044 AND ip_end = 134743044;"), "1");

            let ipv6 = SocketAddress::new("[2001:db8::1]:0");
            assert!(matches!(connector.save_address_to_ip_ban_table(&ipv6), Err(DatabaseError::InvalidInput(_))));
            assert!(matches!(
                connector.save_address_to_ip_ban_table(&SocketAddress::Unset),
                Err(DatabaseError::InvalidInput(_))
            ));
        }

        #[test]
        fn test_list_ban_tables_includes_inactive_rows() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            let listings = connector.list_ban_tables().unwrap();
            assert_eq!(listings.len(), 3);
            let (name, columns, rows) = &listings[0];
            assert_eq!(name, "ip_ban");
            assert_eq!(columns[0], "ip_start");
            assert_eq!(rows.len(), 3);
        }

        #[test]
        fn test_easy_sql_query_binding_and_nulls() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);

            let mut binders = BinderCollection::new();
            binders.push(Binder::new("cheating", "reason", false));
            let mut rows = Vec::new();
            assert!(connector.easy_sql_query("SELECT rowid, last_trigger FROM ip_ban WHERE reason = ?;", Some(&mut rows), Some(&binders), "none"));
            assert_eq!(rows, vec![vec![String::from("1"), String::from("none")]]);

            assert!(!connector.easy_sql_query("SELECT rowid FROM ip_ban;", None, Some(&binders), ""));
            assert!(!connector.easy_sql_query("SELECT nonsense FROM nowhere;", None, None, ""));

            let mut rows = vec![vec![String::from("kept")]];
            assert!(!connector.easy_sql_query("SELECT nonsense FROM nowhere;", Some(&mut rows), None, ""));
            assert_eq!(rows, vec![vec!["kept"]]);
        }
    }

    mod report_tests {
        use std::sync::Arc;
        use tempfile::TempDir;
        use crate::database::structs::report_party::ReportParty;
        use crate::database::structs::database_connector::DatabaseConnector;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{config_for, open_fixture, scalar};

        fn parties() -> (ReportParty, ReportParty) {
            (
                ReportParty {
                    address: SocketAddress::from_octets(1, 2, 3, 4, 2759),
                    online_id: 10,
                    name: String::from("alice"),
                },
                ReportParty {
                    address: SocketAddress::new("[2001:db8::9]:2759"),
                    online_id: 0,
                    name: String::from("bob"),
                },
            )
        }

        #[test]
        fn test_write_report() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            let (reporter, reporting) = parties();
            connector.write_report(&reporter, &reporting, "ramming").unwrap();

            let mut rows = Vec::new();
            assert!(connector.easy_sql_query(
                "SELECT server_uid, reporter_ip, reporter_ipv6, reporter_username, info, reporting_ip, reporting_ipv6, reporting_username FROM player_reports;",
                Some(&mut rows), None, ""));
            assert_eq!(rows[0], vec!["stk", "16909060", "", "alice", "ramming", "0", "2001:db8::9", "bob"]);
        }

        #[test]
        fn test_write_report_without_ipv6_columns() {
            let dir = TempDir::new().unwrap();
            drop(open_fixture(&dir));
            let mut config = config_for(&dir);
            config.server.ipv6_connection = false;
            let mut connector = DatabaseConnector::new(Arc::new(config));
            connector.init_database(false);

            let (reporter, reporting) = parties();
            connector.write_report(&reporter, &reporting, "blocking").unwrap();
            assert_eq!(scalar(&connector, "SELECT reporting_ipv6 || '|' || reporting_ip FROM player_reports;"), "|0");
        }

        #[test]
        fn test_clear_old_reports() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            let (reporter, reporting) = parties();
            connector.write_report(&reporter, &reporting, "fresh").unwrap();
            assert!(connector.easy_sql_query(
                "INSERT INTO player_reports (server_uid, reporter_ip, reporter_online_id, reporter_username, reported_time, info, reporting_ip, reporting_online_id, reporting_username) \
                 VALUES ('stk', 1, 0, 'a', datetime('now', '-10 days'), 'stale', 2, 0, 'b');",
                None, None, ""));

            connector.clear_old_reports().unwrap();
            assert_eq!(scalar(&connector, "SELECT group_concat(info) FROM player_reports;"), "fresh");
        }

        #[test]
        fn test_zero_retention_keeps_reports() {
            let dir = TempDir::new().unwrap();
            drop(open_fixture(&dir));
            let mut config = config_for(&dir);
            config.database.player_reports_expired_days = 0.0;
            let mut connector = DatabaseConnector::new(Arc::new(config));
            connector.init_database(false);
            assert!(connector.easy_sql_query(
                "INSERT INTO player_reports (server_uid, reporter_ip, reporter_online_id, reporter_username, reported_time, info, reporting_ip, reporting_online_id, reporting_username) \
                 VALUES ('stk', 1, 0, 'a', datetime('now', '-100 days'), 'ancient', 2, 0, 'b');",
                None, None, ""));
            connector.clear_old_reports().unwrap();
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM player_reports;"), "1");
        }
    }

    mod geolocation_tests {
        use tempfile::TempDir;
        use crate::config::enums::ip_type::IpType;
        use crate::database::enums::database_error::DatabaseError;
        use crate::network::enums::address_family::AddressFamily;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{config_for, open_fixture, open_fixture_with};

        #[test]
        fn test_lookup_classifies_address_before_nat64_conversion() {
            let dir = TempDir::new().unwrap();
            let mut config = config_for(&dir);
            config.network.ip_type = IpType::ipv6_nat64;
            config.network.nat64_prefix = String::from("64:ff9b::");
            config.network.ipv6_socket = true;
            let connector = open_fixture_with(config);

            let lan = connector.lookup_address(&SocketAddress::new("192.168.1.10:2759"));
            assert_eq!(lan.address, "192.168.1.10:2759");
            assert_eq!(lan.transport, "[64:ff9b::192.168.1.10]:2759");
            assert_eq!(lan.family, AddressFamily::Inet);
            assert_eq!(lan.ipv4, 3232235786);
            assert_eq!(lan.port, 2759);
            assert!(lan.lan);
            assert!(!lan.loopback);
            assert_eq!(lan.country_code, "");

            let public = connector.lookup_address(&SocketAddress::new("1.2.3.4:2759"));
            assert_eq!(public.ipv4, 16909060);
            assert!(!public.lan);
            assert_eq!(public.country_code, "AU");
            assert_eq!(public.transport, "[64:ff9b::1.2.3.4]:2759");
        }

        #[test]
        fn test_lookup_on_ipv4_socket_keeps_address() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            let lookup = connector.lookup_address(&SocketAddress::new("127.0.0.1:2759"));
            assert_eq!(lookup.transport, lookup.address);
            assert!(lookup.loopback);
            assert!(lookup.lan);
            assert!(lookup.local_interface);
        }

        #[test]
        fn test_ip2country() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            assert_eq!(connector.ip2country(&SocketAddress::from_octets(1, 2, 3, 4, 0)).unwrap(), "AU");
            assert_eq!(connector.ip2country(&SocketAddress::from_octets(8, 8, 8, 8, 0)), Err(DatabaseError::NoRows));
            assert_eq!(connector.ip2country(&SocketAddress::from_octets(192, 168, 0, 1, 0)), Err(DatabaseError::NoRows));
        }

        #[test]
        fn test_ipv62country() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            assert_eq!(connector.ipv62country(&SocketAddress::new("[2001:db8::1]:0")).unwrap(), "DE");
            assert_eq!(connector.ipv62country(&SocketAddress::new("[2a00::1]:0")), Err(DatabaseError::NoRows));
            assert_eq!(connector.ipv62country(&SocketAddress::new("[fe80::1]:0")), Err(DatabaseError::NoRows));
        }

        #[test]
        fn test_country_code_routes_by_family() {
            let dir = TempDir::new().unwrap();
            let connector = open_fixture(&dir);
            assert_eq!(connector.country_code(&SocketAddress::from_octets(1, 9, 9, 9, 0)), "AU");
            assert_eq!(connector.country_code(&SocketAddress::new("[::ffff:1.9.9.9]:0")), "AU");
            assert_eq!(connector.country_code(&SocketAddress::new("[2001:db8:1::1]:0")), "DE");
            assert_eq!(connector.country_code(&SocketAddress::from_octets(8, 8, 8, 8, 0)), "");
        }
    }

    mod stats_tests {
        use mockall::predicate::eq;
        use tempfile::TempDir;
        use crate::database::traits::peer_registry::MockPeerRegistry;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{open_fixture, peer, scalar};

        fn registry_expecting(host_id: u32) -> MockPeerRegistry {
            let mut registry = MockPeerRegistry::new();
            registry.expect_set_next_host_id().with(eq(host_id)).times(1).return_const(());
            registry
        }

        #[test]
        fn test_init_creates_versioned_objects() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            assert!(!connector.has_server_stats_table());

            assert_eq!(connector.init_server_stats_table(&registry_expecting(0)).unwrap(), 0);
            assert!(connector.has_server_stats_table());
            assert_eq!(connector.server_stats_table(), "v1_stk_stats");
            assert_eq!(connector.versioned_name("full_stats"), "v1_stk_full_stats");
            assert_eq!(connector.countries_table_name(), "v1_countries");
            for object in ["v1_stk_stats", "v1_countries"] {
                assert!(connector.check_table_exists(object));
            }
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view';"), "3");
        }

        #[test]
        fn test_player_join_and_disconnect() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            connector.init_server_stats_table(&registry_expecting(0)).unwrap();

            connector.on_player_join_queries(&peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 4242), 4242, 1, "AU").unwrap();
            connector.on_player_join_queries(&peer(2, SocketAddress::new("[2001:db8::2]:2759"), 0), 0, 2, "").unwrap();
            let mut ai = peer(3, SocketAddress::from_octets(127, 0, 0, 1, 2759), 0);
            ai.ai = true;
            connector.on_player_join_queries(&ai, 0, 1, "").unwrap();

            let mut rows = Vec::new();
            assert!(connector.easy_sql_query(
                "SELECT host_id, ip, ipv6, port, version, os, country_code FROM v1_stk_stats ORDER BY host_id;",
                Some(&mut rows), None, "NULL"));
            assert_eq!(rows, vec![
                vec!["1", "16909060", "", "2759", "1.4", "Linux", "AU"],
                vec!["2", "0", "2001:db8::2", "2759", "1.4", "Linux", "NULL"],
            ]);

            assert!(connector.easy_sql_query(
                "UPDATE v1_stk_stats SET connected_time = datetime('now', '-1 hour'), disconnected_time = datetime('now', '-1 hour');",
                None, None, ""));
            connector.set_disconnection_times(&[1]).unwrap();
            assert_eq!(scalar(&connector, "SELECT group_concat(host_id) FROM v1_stk_current_players;"), "1");

            let mut leaving = peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 4242);
            leaving.average_ping = 85;
            leaving.packet_loss = 3;
            connector.write_disconnect_info(&leaving).unwrap();
            assert_eq!(scalar(&connector, "SELECT ping || '/' || packet_loss FROM v1_stk_stats WHERE host_id = 1;"), "85/3");
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM v1_stk_current_players;"), "0");
            assert_eq!(scalar(&connector, "SELECT num_connections FROM v1_stk_player_stats WHERE online_id = 4242;"), "1");
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM v1_stk_full_stats;"), "2");
        }

        #[test]
        fn test_empty_present_list_closes_every_session() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            connector.init_server_stats_table(&registry_expecting(0)).unwrap();
            connector.on_player_join_queries(&peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0), 0, 1, "").unwrap();
            connector.on_player_join_queries(&peer(2, SocketAddress::from_octets(1, 2, 3, 5, 2759), 0), 0, 2, "").unwrap();
            assert!(connector.easy_sql_query(
                "UPDATE v1_stk_stats SET connected_time = datetime('now', '-1 hour'), disconnected_time = datetime('now', '-1 hour');",
                None, None, ""));
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM v1_stk_current_players;"), "2");

            connector.set_disconnection_times(&[]).unwrap();
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM v1_stk_current_players;"), "0");
        }

        #[test]
        fn test_restart_resumes_host_ids_and_closes_sessions() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            connector.init_server_stats_table(&registry_expecting(0)).unwrap();
            connector.on_player_join_queries(&peer(7, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0), 0, 1, "").unwrap();
            assert!(connector.easy_sql_query(
                "UPDATE v1_stk_stats SET connected_time = datetime('now', '-1 hour'), disconnected_time = datetime('now', '-1 hour');",
                None, None, ""));

            connector.init_database(false);
            assert!(!connector.has_server_stats_table());
            assert_eq!(connector.init_server_stats_table(&registry_expecting(7)).unwrap(), 7);
            assert_eq!(scalar(&connector, "SELECT COUNT(*) FROM v1_stk_current_players;"), "0");
        }

        #[test]
        fn test_destroy_writes_disconnect_info() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            connector.init_server_stats_table(&registry_expecting(0)).unwrap();
            connector.on_player_join_queries(&peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0), 0, 1, "").unwrap();

            let mut registry = MockPeerRegistry::new();
            let mut leaving = peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0);
            leaving.average_ping = 120;
            registry.expect_connected_peers().times(1).returning(move || vec![leaving.clone()]);
            connector.destroy_database(&registry);
            assert!(!connector.is_open());
            assert!(!connector.has_server_stats_table());

            connector.init_database(false);
            assert_eq!(scalar(&connector, "SELECT ping FROM v1_stk_stats WHERE host_id = 1;"), "120");
        }
    }

    mod poll_tests {
        use tempfile::TempDir;
        use crate::database::enums::ban_kind::BanKind;
        use crate::database::structs::database_connector::DatabaseConnector;
        use crate::database::structs::ip_ban_table_data::IpBanTableData;
        use crate::database::structs::ipv6_ban_table_data::Ipv6BanTableData;
        use crate::database::structs::online_id_ban_table_data::OnlineIdBanTableData;
        use crate::database::traits::peer_registry::MockPeerRegistry;
        use crate::network::enums::socket_address::SocketAddress;
        use super::{open_fixture, peer};

        #[test]
        fn test_poll_returns_kicks_for_banned_peers() {
            let dir = TempDir::new().unwrap();
            let mut connector = open_fixture(&dir);
            assert!(connector.is_time_to_poll());

            let mut ai = peer(3, SocketAddress::from_octets(1, 2, 3, 5, 2759), 0);
            ai.ai = true;
            let peers = vec![
                peer(1, SocketAddress::from_octets(1, 2, 3, 4, 2759), 0),
                peer(2, SocketAddress::from_octets(8, 8, 8, 8, 2759), 99),
                ai,
                peer(4, SocketAddress::from_octets(9, 9, 9, 9, 2759), 4242),
            ];
            let mut registry = MockPeerRegistry::new();
            registry.expect_connected_peers().times(1).returning(move || peers.clone());

            let kicks = connector.poll_database(&registry);
            assert_eq!(kicks.len(), 2);
            assert_eq!((kicks[0].host_id, kicks[0].kind), (1, BanKind::ip));
            assert_eq!((kicks[1].host_id, kicks[1].kind), (4, BanKind::online_id));
        }

        #[test]
        fn test_poll_waits_for_interval() {
            let dir = TempDir::new().unwrap();
            drop(open_fixture(&dir));
            let mut config = super::config_for(&dir);
            config.database.poll_interval = 3600;
            let mut connector = DatabaseConnector::new(std::sync::Arc::new(config));
            connector.init_database(false);
            assert!(!connector.is_time_to_poll());
            assert!(connector.poll_database(&MockPeerRegistry::new()).is_empty());
        }

        #[test]
        fn test_match_ban_lists_order() {
            let ip_bans = vec![IpBanTableData {
                row_id: 1,
                ip_start: 16909056,
                ip_end: 16909311,
                reason: String::from("range"),
                description: String::new(),
            }];
            let ipv6_bans = vec![Ipv6BanTableData {
                row_id: 2,
                ipv6_cidr: String::from("2001:db8::/32"),
                reason: String::from("cidr"),
                description: String::new(),
            }];
            let online_id_bans = vec![OnlineIdBanTableData {
                row_id: 3,
                online_id: 4242,
                reason: String::from("account"),
                description: String::new(),
            }];
            let check = |address: SocketAddress, online_id: u32| {
                DatabaseConnector::match_ban_lists(&peer(1, address, online_id), &ip_bans, &ipv6_bans, &online_id_bans)
                    .map(|found| found.reason)
            };

            assert_eq!(check(SocketAddress::from_octets(1, 2, 3, 4, 0), 4242).as_deref(), Some("range"));
            assert_eq!(check(SocketAddress::new("[2001:db8::1]:0"), 4242).as_deref(), Some("cidr"));
            assert_eq!(check(SocketAddress::new("[2001:db9::1]:0"), 4242).as_deref(), Some("account"));
            assert_eq!(check(SocketAddress::from_octets(8, 8, 8, 8, 0), 0), None);
            assert_eq!(check(SocketAddress::Unset, 4242).as_deref(), Some("account"));
        }
    }
}
