use crate::database::enums::database_error::DatabaseError;
use crate::database::enums::optional_table::OptionalTable;
use crate::database::structs::address_lookup::AddressLookup;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::query_builder::QueryBuilder;
use crate::network::enums::socket_address::SocketAddress;

impl DatabaseConnector {
    /// Country code of an IPv4 (or IPv4-mapped) address.
    ///
    /// LAN addresses have no country and give [`DatabaseError::NoRows`].
    pub fn ip2country(&self, address: &SocketAddress) -> Result<String, DatabaseError> {
        let table = self.table(OptionalTable::IpGeolocation)?;
        if address.is_lan() {
            return Err(DatabaseError::NoRows);
        }
        let ip = address.get_ip();
        let mut query = QueryBuilder::with("SELECT country_code FROM ");
        query.push_str(table)
            .push_str(" WHERE ip_start <= ").push_value(ip)
            .push_str(" AND ip_end >= ").push_value(ip)
            .push_str(" ORDER BY ip_start DESC LIMIT 1;");
        Self::first_column(self.query_rows(&query)?)
    }

    /// Country code of an IPv6 address, matched on its upper 64 bits.
    pub fn ipv62country(&self, address: &SocketAddress) -> Result<String, DatabaseError> {
        let table = self.table(OptionalTable::Ipv6Geolocation)?;
        if address.is_lan() {
            return Err(DatabaseError::NoRows);
        }
        let ipv6 = address.readable(false);
        let mut query = QueryBuilder::with("SELECT country_code FROM ");
        query.push_str(table)
            .push_str(" WHERE ip_start <= upperIPv6(")
            .push_bind(ipv6.as_str(), "ipv6", false)
            .push_str(") AND ip_end >= upperIPv6(")
            .push_bind(ipv6.as_str(), "ipv6", false)
            .push_str(") ORDER BY ip_start DESC LIMIT 1;");
        Self::first_column(self.query_rows(&query)?)
    }

    /// Country code through whichever table fits the address, empty when
    /// unknown.
    pub fn country_code(&self, address: &SocketAddress) -> String {
        let result = match address.get_ip() {
            0 => self.ipv62country(address),
            _ => self.ip2country(address),
        };
        result.unwrap_or_default()
    }

    /// Classifies and geolocates `address` as given, and shows the form it
    /// takes on the configured transport socket.
    pub fn lookup_address(&self, address: &SocketAddress) -> AddressLookup {
        let network = &self.config.network;
        let mut transport = *address;
        transport.convert_for_ipv6_socket(network.ipv6_socket, network);
        AddressLookup {
            address: address.readable(true),
            transport: transport.readable_nat64(true, network),
            family: address.family(),
            ipv4: address.get_ip(),
            port: address.get_port(),
            loopback: address.is_loopback(),
            lan: address.is_lan(),
            local_interface: address.is_public_address_localhost(),
            country_code: self.country_code(address),
        }
    }

    fn first_column(rows: Vec<Vec<String>>) -> Result<String, DatabaseError> {
        rows.into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .ok_or(DatabaseError::NoRows)
    }
}
