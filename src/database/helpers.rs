use rusqlite::Connection;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::ValueRef;
use crate::network::ipv6::{inside_ipv6_cidr, upper_ipv6};

/// Rows of a ban table that are active right now.
pub const BAN_ACTIVE_FILTER: &str = "datetime('now') > datetime(starting_time) AND \
    (expired_days IS NULL OR datetime(starting_time, '+'||expired_days||' days') > datetime('now'))";

/// First SQLite release with window functions (3.25.0).
pub const WINDOW_FUNCTIONS_VERSION: i32 = 3_025_000;

/// Registers `insideIPv6CIDR(cidr, address)` and `upperIPv6(address)`.
///
/// Non-text arguments make the functions return 0.
pub fn register_ipv6_functions(connection: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    connection.create_scalar_function("insideIPv6CIDR", 2, flags, |ctx| {
        match (text_argument(ctx, 0), text_argument(ctx, 1)) {
            (Some(cidr), Some(address)) => Ok(i32::from(inside_ipv6_cidr(&cidr, &address))),
            _ => Ok(0),
        }
    })?;
    connection.create_scalar_function("upperIPv6", 1, flags, |ctx| {
        Ok(text_argument(ctx, 0).map_or(0i64, |address| upper_ipv6(&address)))
    })?;
    Ok(())
}

fn text_argument(ctx: &Context<'_>, index: usize) -> Option<String> {
    match ctx.get_raw(index) {
        ValueRef::Text(text) => std::str::from_utf8(text).ok().map(str::to_owned),
        _ => None,
    }
}

/// Text form of one result column; NULL becomes `null_value`.
pub fn column_text(value: ValueRef<'_>, null_value: &str) -> String {
    match value {
        ValueRef::Null => null_value.to_string(),
        ValueRef::Integer(integer) => integer.to_string(),
        ValueRef::Real(real) => format!("{real:?}"),
        ValueRef::Text(text) | ValueRef::Blob(text) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// Whether the linked SQLite library supports window functions.
pub fn has_window_functions() -> bool {
    rusqlite::version_number() >= WINDOW_FUNCTIONS_VERSION
}
