//! Address families and their bit-width arithmetic.
//!
//! Both families do their arithmetic on a `u128` holding the raw address bits.
//! IPv4 values only ever occupy the low 32 bits.

use std::fmt;
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Bit mask covering the low `host_bits` bits.
///
/// # Examples
/// ```
/// use subnet_planner::models::host_mask;
/// assert_eq!(host_mask(8), 0xFF);
/// assert_eq!(host_mask(128), u128::MAX);
/// ```
pub fn host_mask(host_bits: u8) -> u128 {
    if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

/// Number of addresses in a block with `host_bits` host bits.
///
/// 2^128 does not fit in a `u128`; that single case saturates at `u128::MAX`.
pub fn block_size(host_bits: u8) -> u128 {
    if host_bits >= 128 {
        u128::MAX
    } else {
        1u128 << host_bits
    }
}

/// An address family the subnet engine can operate on.
///
/// Implemented by the [`V4`] and [`V6`] markers; the engine is generic over this
/// trait so the family is chosen once, at the boundary, and never re-checked.
pub trait Family:
    Copy + Clone + fmt::Debug + Default + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static
{
    /// Address width in bits.
    const BITS: u8;
    /// Width of one textual group (octet for IPv4, hextet for IPv6).
    const GROUP_BITS: u8;
    /// Separator placed between groups in binary output.
    const GROUP_SEPARATOR: char;
    /// Human readable family name.
    const NAME: &'static str;

    type Addr: Copy + fmt::Display + fmt::Debug + FromStr + Eq + Ord + Hash + Send + Sync;

    fn to_bits(addr: Self::Addr) -> u128;

    /// Build an address from raw bits. Bits above [`Family::BITS`] are discarded.
    fn from_bits(bits: u128) -> Self::Addr;

    /// Usable host addresses in a block with `host_bits` host bits.
    fn usable_hosts(host_bits: u8) -> u128;

    /// True when the first and last address of the block are not assignable.
    fn reserves_edges(host_bits: u8) -> bool;

    /// True when the family has a broadcast address.
    fn has_broadcast() -> bool;

    /// Parse a netmask written as an address (e.g. `255.255.255.0`) into a prefix length.
    fn parse_mask(_mask: &str) -> Option<u8> {
        None
    }

    /// Largest raw value an address of this family can hold.
    fn max_bits() -> u128 {
        host_mask(Self::BITS)
    }

    /// Network mask for `prefix` as raw bits.
    fn prefix_mask(prefix: u8) -> u128 {
        let host_bits = Self::BITS.saturating_sub(prefix);
        Self::max_bits() & !host_mask(host_bits)
    }
}

/// IPv4 marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct V4;

/// IPv6 marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct V6;

impl Family for V4 {
    const BITS: u8 = 32;
    const GROUP_BITS: u8 = 8;
    const GROUP_SEPARATOR: char = '.';
    const NAME: &'static str = "IPv4";

    type Addr = Ipv4Addr;

    fn to_bits(addr: Ipv4Addr) -> u128 {
        u32::from(addr) as u128
    }

    fn from_bits(bits: u128) -> Ipv4Addr {
        Ipv4Addr::from(bits as u32)
    }

    /// Network and broadcast are reserved, except on point-to-point `/31`
    /// links (RFC 3021) and single-host `/32` routes.
    fn usable_hosts(host_bits: u8) -> u128 {
        match host_bits {
            0 => 1,
            1 => 2,
            _ => block_size(host_bits) - 2,
        }
    }

    fn reserves_edges(host_bits: u8) -> bool {
        host_bits >= 2
    }

    fn has_broadcast() -> bool {
        true
    }

    fn parse_mask(mask: &str) -> Option<u8> {
        let mask = u32::from(mask.parse::<Ipv4Addr>().ok()?);
        // Contiguous masks have every set bit in front of every clear bit
        if mask.leading_ones() + mask.trailing_zeros() == 32 {
            Some(mask.leading_ones() as u8)
        } else {
            None
        }
    }
}

impl Family for V6 {
    const BITS: u8 = 128;
    const GROUP_BITS: u8 = 16;
    const GROUP_SEPARATOR: char = ':';
    const NAME: &'static str = "IPv6";

    type Addr = Ipv6Addr;

    fn to_bits(addr: Ipv6Addr) -> u128 {
        u128::from(addr)
    }

    fn from_bits(bits: u128) -> Ipv6Addr {
        Ipv6Addr::from(bits)
    }

    /// IPv6 has no broadcast, every address in the block is assignable.
    fn usable_hosts(host_bits: u8) -> u128 {
        block_size(host_bits)
    }

    fn reserves_edges(_host_bits: u8) -> bool {
        false
    }

    fn has_broadcast() -> bool {
        false
    }
}
