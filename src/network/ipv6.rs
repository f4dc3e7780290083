//! IPv6 primitive helpers.
//!
//! Pure functions over 16-byte addresses and IPv6 text. The database layer
//! registers [`inside_ipv6_cidr`] and [`upper_ipv6`] as SQL functions, so
//! both must stay total: bad input yields `false` / `0`, never an error.

use std::fmt::Write;
use std::net::Ipv6Addr;
use std::str::FromStr;
use crate::network::structs::ipv6_endpoint::Ipv6Endpoint;

/// Parses IPv6 text into network-order bytes.
pub fn parse_ipv6(text: &str) -> Option<[u8; 16]> {
    Ipv6Addr::from_str(text.trim()).ok().map(|address| address.octets())
}

/// True when both endpoints carry the same port and the same 16 bytes.
///
/// The scope id is not compared.
pub fn address_equals(a: &Ipv6Endpoint, b: &Ipv6Endpoint) -> bool {
    a.port == b.port && a.octets == b.octets
}

/// `::ffff:a.b.c.d`
pub fn is_ipv4_mapped(octets: &[u8; 16]) -> bool {
    octets[..10].iter().all(|byte| *byte == 0) && octets[10] == 0xff && octets[11] == 0xff
}

/// Upper 64 bits of an IPv6 literal as SQLite stores them.
///
/// The first 8 bytes are read big-endian and reinterpreted as a signed
/// integer. Unparsable input gives 0.
pub fn upper_ipv6(literal: &str) -> i64 {
    match parse_ipv6(literal) {
        None => 0,
        Some(octets) => {
            let mut upper = [0u8; 8];
            upper.copy_from_slice(&octets[..8]);
            u64::from_be_bytes(upper) as i64
        }
    }
}

/// Checks whether `address` lies inside `cidr` (`<network>/<prefix>`).
///
/// The prefix length must be within 1..=128. Any parse failure gives false.
pub fn inside_ipv6_cidr(cidr: &str, address: &str) -> bool {
    let Some((network, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let prefix = match prefix.trim().parse::<u32>() {
        Ok(prefix) if (1..=128).contains(&prefix) => prefix,
        _ => return false,
    };
    let (Some(network), Some(address)) = (parse_ipv6(network), parse_ipv6(address)) else {
        return false;
    };

    let mut remaining = prefix;
    for (network_byte, address_byte) in network.iter().zip(address.iter()) {
        let mask = match remaining {
            0 => 0x00u8,
            1..=7 => 0xffu8 << (8 - remaining),
            _ => 0xffu8,
        };
        remaining = remaining.saturating_sub(8);
        if network_byte & mask != address_byte & mask {
            return false;
        }
    }
    true
}

/// Canonical text of an IPv6 address.
///
/// The longest run of two or more zero words collapses to `::`. IPv4-mapped
/// and IPv4-compatible addresses end in a dotted quad.
pub fn readable_string(octets: &[u8; 16]) -> String {
    format_ipv6(octets, None)
}

/// Same as [`readable_string`], but addresses under `nat64_prefix` (the
/// first 12 bytes of a /96 prefix) also end in a dotted quad.
pub fn readable_string_nat64(octets: &[u8; 16], nat64_prefix: Option<&[u8; 12]>) -> String {
    format_ipv6(octets, nat64_prefix)
}

fn format_ipv6(octets: &[u8; 16], nat64_prefix: Option<&[u8; 12]>) -> String {
    let mut words = [0u16; 8];
    for (index, word) in words.iter_mut().enumerate() {
        *word = u16::from_be_bytes([octets[index * 2], octets[index * 2 + 1]]);
    }

    let (zero_base, zero_len) = longest_zero_run(&words);
    let in_zero_run = |index: usize| {
        zero_base.is_some_and(|base| index >= base && index < base + zero_len)
    };
    let dotted_tail = match zero_base {
        Some(0) => zero_len == 6 || (zero_len == 5 && words[5] == 0xffff),
        _ => false,
    } || nat64_prefix.is_some_and(|prefix| octets[..12] == prefix[..]);

    let mut text = String::with_capacity(46);
    for (index, word) in words.iter().enumerate() {
        if in_zero_run(index) {
            if Some(index) == zero_base {
                text.push(':');
            }
            continue;
        }
        if index != 0 {
            text.push(':');
        }
        if index == 6 && dotted_tail {
            let _ = write!(text, "{}.{}.{}.{}", octets[12], octets[13], octets[14], octets[15]);
            return text;
        }
        let _ = write!(text, "{word:x}");
    }
    if zero_base.is_some_and(|base| base + zero_len == words.len()) {
        text.push(':');
    }
    text
}

fn longest_zero_run(words: &[u16; 8]) -> (Option<usize>, usize) {
    let mut best: (Option<usize>, usize) = (None, 0);
    let mut current: (Option<usize>, usize) = (None, 0);
    for (index, word) in words.iter().enumerate() {
        if *word == 0 {
            current = match current.0 {
                None => (Some(index), 1),
                Some(base) => (Some(base), current.1 + 1),
            };
        } else if current.0.is_some() {
            if best.0.is_none() || current.1 > best.1 {
                best = current;
            }
            current = (None, 0);
        }
    }
    if current.0.is_some() && (best.0.is_none() || current.1 > best.1) {
        best = current;
    }
    if best.1 < 2 {
        return (None, 0);
    }
    best
}
