use serde::{Deserialize, Serialize};
use crate::database::enums::ban_kind::BanKind;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BanMatch {
    pub host_id: u32,
    /// Readable address of the banned peer.
    pub address: String,
    pub kind: BanKind,
    pub row_id: i64,
    pub reason: String,
    pub description: String,
}
