use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OnlineIdBanTableData {
    pub row_id: i64,
    pub online_id: u32,
    pub reason: String,
    pub description: String,
}
