use serde::{Deserialize, Serialize};

/// Which family a textual address may resolve to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    #[default]
    Unspecified,
    Inet,
    Inet6,
}
