//! Address format conversion and literal validation.
//!
//! Binary, hexadecimal and decimal (integer) forms of an address, and the
//! reverse parsers. Every conversion is bit-exact, so converting to any form
//! and back yields the original address.

use crate::error::{Result, SubnetError};
use crate::models::{Family, Ipv4Network, Ipv6Network, V4, V6};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

lazy_static! {
    static ref RE_BINARY: Regex = Regex::new(r"^[01]+([.:_ ][01]+)*$").expect("Invalid Regex?");
    static ref RE_HEX: Regex =
        Regex::new(r"^[0-9A-Fa-f]+([.:_ ][0-9A-Fa-f]+)*$").expect("Invalid Regex?");
}

/// Binary form, one group per octet (IPv4) or hextet (IPv6).
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use subnet_planner::convert::to_binary;
/// use subnet_planner::models::V4;
/// assert_eq!(
///     to_binary::<V4>(Ipv4Addr::new(192, 168, 0, 1)),
///     "11000000.10101000.00000000.00000001"
/// );
/// ```
pub fn to_binary<F: Family>(addr: F::Addr) -> String {
    let raw = format!("{:0width$b}", F::to_bits(addr), width = F::BITS as usize);
    let groups = raw.chars().chunks(F::GROUP_BITS as usize);
    let binary = groups
        .into_iter()
        .map(|group| group.collect::<String>())
        .join(&F::GROUP_SEPARATOR.to_string());
    binary
}

/// Zero-padded hexadecimal form with a `0x` prefix.
pub fn to_hex<F: Family>(addr: F::Addr) -> String {
    format!("0x{:0width$x}", F::to_bits(addr), width = F::BITS as usize / 4)
}

/// The address as an unsigned integer.
pub fn to_decimal<F: Family>(addr: F::Addr) -> String {
    F::to_bits(addr).to_string()
}

/// Parse the output of [`to_binary`].
///
/// Without separators exactly [`Family::BITS`] digits are required. With
/// separators (`.`, `:`, `_`, space) there must be one group per octet (IPv4)
/// or hextet (IPv6); a short group is left-padded with zeros.
pub fn from_binary<F: Family>(binary: &str) -> Result<F::Addr> {
    let binary = binary.trim();
    let invalid = || {
        SubnetError::InvalidAddressFormat(format!(
            "{binary}: not a {}-bit binary {} address",
            F::BITS,
            F::NAME
        ))
    };
    if !RE_BINARY.is_match(binary) {
        return Err(invalid());
    }
    let bits = if binary.contains(is_separator) {
        parse_groups::<F>(binary, 2, F::GROUP_BITS as usize)
    } else if binary.len() == F::BITS as usize {
        u128::from_str_radix(binary, 2).ok()
    } else {
        None
    };
    bits.map(F::from_bits).ok_or_else(invalid)
}

/// Parse the output of [`to_hex`]. The `0x` prefix and leading zeros are optional.
///
/// Grouped input (`c0.a8.0.1`, `2001:db8:0:0:0:0:0:1`) needs one group per octet
/// (IPv4) or hextet (IPv6), each padded to its own width.
pub fn from_hex<F: Family>(hex: &str) -> Result<F::Addr> {
    let hex = hex.trim();
    let invalid = || {
        SubnetError::InvalidAddressFormat(format!(
            "{hex}: not a hexadecimal {} address",
            F::NAME
        ))
    };
    let body = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if !RE_HEX.is_match(body) {
        return Err(invalid());
    }
    let bits = if body.contains(is_separator) {
        parse_groups::<F>(body, 16, F::GROUP_BITS as usize / 4)
    } else if body.len() <= F::BITS as usize / 4 {
        u128::from_str_radix(body, 16).ok()
    } else {
        None
    };
    bits.map(F::from_bits).ok_or_else(invalid)
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | ':' | '_' | ' ')
}

/// Combine one group per octet or hextet into raw bits. Each group holds at
/// most `max_digits` digits in `radix`.
fn parse_groups<F: Family>(body: &str, radix: u32, max_digits: usize) -> Option<u128> {
    let groups: Vec<&str> = body.split(is_separator).collect();
    if groups.len() != (F::BITS / F::GROUP_BITS) as usize
        || groups.iter().any(|g| g.is_empty() || g.len() > max_digits)
    {
        return None;
    }
    groups.iter().try_fold(0u128, |bits, group| {
        let value = u128::from_str_radix(group, radix).ok()?;
        Some((bits << F::GROUP_BITS) | value)
    })
}

/// Parse the output of [`to_decimal`].
pub fn from_decimal<F: Family>(decimal: &str) -> Result<F::Addr> {
    let decimal = decimal.trim();
    match decimal.parse::<u128>() {
        Ok(bits) if bits <= F::max_bits() => Ok(F::from_bits(bits)),
        _ => Err(SubnetError::InvalidAddressFormat(format!(
            "{decimal}: not a decimal {} address (0-{})",
            F::NAME,
            F::max_bits()
        ))),
    }
}

/// Parse an address of either family.
pub fn parse_address(literal: &str) -> Result<IpAddr> {
    literal
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| SubnetError::InvalidAddressFormat(literal.to_string()))
}

pub fn address_to_binary(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(a) => to_binary::<V4>(a),
        IpAddr::V6(a) => to_binary::<V6>(a),
    }
}

pub fn address_to_hex(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(a) => to_hex::<V4>(a),
        IpAddr::V6(a) => to_hex::<V6>(a),
    }
}

pub fn address_to_decimal(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(a) => to_decimal::<V4>(a),
        IpAddr::V6(a) => to_decimal::<V6>(a),
    }
}

pub fn is_valid_ipv4_address(literal: &str) -> bool {
    literal.parse::<Ipv4Addr>().is_ok()
}

pub fn is_valid_ipv6_address(literal: &str) -> bool {
    literal.parse::<Ipv6Addr>().is_ok()
}

/// True for `address/prefix` literals with no host bits set.
pub fn is_valid_ipv4_network(literal: &str) -> bool {
    literal.parse::<Ipv4Network>().is_ok()
}

/// True for `address/prefix` literals with no host bits set.
pub fn is_valid_ipv6_network(literal: &str) -> bool {
    literal.parse::<Ipv6Network>().is_ok()
}
