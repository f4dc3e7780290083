use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::database::enums::ban_kind::BanKind;
use crate::database::enums::database_error::DatabaseError;
use crate::database::impls::database_connector::LOG_PREFIX;
use crate::database::structs::ban_match::BanMatch;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::ip_ban_table_data::IpBanTableData;
use crate::database::structs::ipv6_ban_table_data::Ipv6BanTableData;
use crate::database::structs::online_id_ban_table_data::OnlineIdBanTableData;
use crate::database::structs::peer_session::PeerSession;
use crate::database::traits::peer_registry::PeerRegistry;
use crate::network::ipv6::inside_ipv6_cidr;

impl DatabaseConnector {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.database.poll_interval)
    }

    pub fn is_time_to_poll(&self) -> bool {
        self.last_poll.elapsed() >= self.poll_interval()
    }

    pub fn update_poll_time(&mut self) {
        self.last_poll = Instant::now();
    }

    /// Periodic moderation pass.
    ///
    /// Does nothing until the poll interval has elapsed. Then re-reads every
    /// ban list, returns one kick decision per banned connected peer, drops
    /// expired reports and closes stored sessions of peers that already
    /// left.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn poll_database(&mut self, registry: &dyn PeerRegistry) -> Vec<BanMatch> {
        if !self.is_open() || !self.is_time_to_poll() {
            return Vec::new();
        }
        self.update_poll_time();

        let ip_bans = Self::or_empty(self.get_ip_ban_table_data(None));
        let ipv6_bans = Self::or_empty(self.get_ipv6_ban_table_data(None));
        let online_id_bans = Self::or_empty(self.get_online_id_ban_table_data(None));

        let peers = registry.connected_peers();
        let kicks: Vec<BanMatch> = peers
            .iter()
            .filter(|peer| !peer.ai)
            .filter_map(|peer| Self::match_ban_lists(peer, &ip_bans, &ipv6_bans, &online_id_bans))
            .inspect(|kick| {
                info!("{} Kick {} ({:?} ban {}), reason: {}, description: {}",
                    LOG_PREFIX, kick.address, kick.kind, kick.row_id, kick.reason, kick.description);
            })
            .collect();

        if let Err(e) = self.clear_old_reports() {
            debug!("{} Old reports not cleared: {}", LOG_PREFIX, e);
        }

        let present_hosts: Vec<u32> = peers
            .iter()
            .filter(|peer| peer.validated)
            .map(|peer| peer.host_id)
            .collect();
        if let Err(e) = self.set_disconnection_times(&present_hosts) {
            debug!("{} Disconnection times not updated: {}", LOG_PREFIX, e);
        }
        kicks
    }

    /// First ban in the given lists that covers `peer`: its address (IPv6
    /// CIDR or IPv4 range) first, then its online id.
    pub fn match_ban_lists(
        peer: &PeerSession,
        ip_bans: &[IpBanTableData],
        ipv6_bans: &[Ipv6BanTableData],
        online_id_bans: &[OnlineIdBanTableData],
    ) -> Option<BanMatch> {
        let address = peer.address.readable(false);
        let ip = peer.address.get_ip();
        let address_match = if peer.address.is_unset() {
            None
        } else if ip == 0 {
            ipv6_bans
                .iter()
                .find(|ban| inside_ipv6_cidr(&ban.ipv6_cidr, &address))
                .map(|ban| (BanKind::ipv6, ban.row_id, &ban.reason, &ban.description))
        } else {
            ip_bans
                .iter()
                .find(|ban| ban.ip_start <= ip && ban.ip_end >= ip)
                .map(|ban| (BanKind::ip, ban.row_id, &ban.reason, &ban.description))
        };
        let found = address_match.or_else(|| match peer.online_id {
            0 => None,
            online_id => online_id_bans
                .iter()
                .find(|ban| ban.online_id == online_id)
                .map(|ban| (BanKind::online_id, ban.row_id, &ban.reason, &ban.description)),
        })?;

        let (kind, row_id, reason, description) = found;
        Some(BanMatch {
            host_id: peer.host_id,
            address,
            kind,
            row_id,
            reason: reason.clone(),
            description: description.clone(),
        })
    }

    /// Checks one peer against the ban tables when it connects.
    ///
    /// The first matching ban has its trigger count increased and is
    /// returned. Lookup failures count as "not banned".
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn check_peer_ban(&self, peer: &PeerSession) -> Option<BanMatch> {
        if peer.ai || peer.address.is_unset() {
            return None;
        }
        let address = peer.address.readable(false);
        let ip = peer.address.get_ip();

        let found = if ip == 0 {
            Self::first_ban(self.get_ipv6_ban_table_data(Some(&address)))
                .map(|ban| (BanKind::ipv6, ban.row_id, ban.reason, ban.description, self.increase_ipv6_ban_trigger_count(&ban.ipv6_cidr)))
        } else {
            Self::first_ban(self.get_ip_ban_table_data(Some(ip)))
                .map(|ban| (BanKind::ip, ban.row_id, ban.reason, ban.description, self.increase_ip_ban_trigger_count(ban.ip_start, ban.ip_end)))
        };
        let found = found.or_else(|| match peer.online_id {
            0 => None,
            online_id => Self::first_ban(self.get_online_id_ban_table_data(Some(online_id)))
                .map(|ban| (BanKind::online_id, ban.row_id, ban.reason, ban.description, self.increase_online_id_ban_trigger_count(online_id))),
        });

        let (kind, row_id, reason, description, trigger) = found?;
        if let Err(e) = trigger {
            warn!("{} Trigger count of {:?} ban {} not updated: {}", LOG_PREFIX, kind, row_id, e);
        }
        info!("{} {} ({:?} ban {}) is banned, reason: {}, description: {}",
            LOG_PREFIX, address, kind, row_id, reason, description);
        Some(BanMatch {
            host_id: peer.host_id,
            address,
            kind,
            row_id,
            reason,
            description,
        })
    }

    fn first_ban<T>(result: Result<Vec<T>, DatabaseError>) -> Option<T> {
        Self::or_empty(result).into_iter().next()
    }

    fn or_empty<T>(result: Result<Vec<T>, DatabaseError>) -> Vec<T> {
        match result {
            Ok(rows) => rows,
            Err(DatabaseError::NotConfigured(_)) => Vec::new(),
            Err(e) => {
                warn!("{} Ban lookup failed: {}", LOG_PREFIX, e);
                Vec::new()
            }
        }
    }
}
