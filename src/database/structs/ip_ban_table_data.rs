use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IpBanTableData {
    pub row_id: i64,
    pub ip_start: u32,
    pub ip_end: u32,
    pub reason: String,
    pub description: String,
}
