use crate::database::structs::peer_session::PeerSession;

/// The part of the lobby the database layer talks to.
#[cfg_attr(test, mockall::automock)]
pub trait PeerRegistry {
    fn connected_peers(&self) -> Vec<PeerSession>;

    /// Resumes host id allocation after the highest stored id.
    fn set_next_host_id(&self, host_id: u32);
}
