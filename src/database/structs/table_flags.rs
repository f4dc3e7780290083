#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableFlags {
    pub ip_ban: bool,
    pub ipv6_ban: bool,
    pub online_id_ban: bool,
    pub player_reports: bool,
    pub ip_geolocation: bool,
    pub ipv6_geolocation: bool,
}
