//! Collaborator interfaces of the connector.

/// Read access to the peers the server currently holds.
pub mod peer_registry;
