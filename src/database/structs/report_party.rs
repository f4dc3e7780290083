use crate::network::enums::socket_address::SocketAddress;

#[derive(Debug, Clone, Default)]
pub struct ReportParty {
    pub address: SocketAddress,
    pub online_id: u32,
    pub name: String,
}
