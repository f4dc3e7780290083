use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which address families the host network can reach.
#[allow(non_camel_case_types)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IpType {
    none,
    #[default]
    ipv4,
    ipv6,
    /// IPv6-only network reaching IPv4 through a NAT64 gateway.
    ipv6_nat64,
    dual_stack,
}
