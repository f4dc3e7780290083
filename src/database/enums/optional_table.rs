#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalTable {
    IpBan,
    Ipv6Ban,
    OnlineIdBan,
    PlayerReports,
    IpGeolocation,
    Ipv6Geolocation,
}
