use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv6BanTableData {
    pub row_id: i64,
    pub ipv6_cidr: String,
    pub reason: String,
    pub description: String,
}
