//! Prefix-length derivation shared by the FLSM and VLSM allocators.

use crate::models::{block_size, Family};

/// Longest prefix whose block still holds `hosts` usable addresses.
///
/// Returns `None` when even a `/0` cannot hold that many hosts.
pub fn prefix_for_hosts<F: Family>(hosts: u128) -> Option<u8> {
    (0..=F::BITS)
        .find(|&host_bits| F::usable_hosts(host_bits) >= hosts)
        .map(|host_bits| F::BITS - host_bits)
}

/// Shortest prefix, not shallower than `base_prefix`, that yields at least
/// `subnets` child networks.
///
/// Returns `None` when the base network cannot be split that many times.
pub fn prefix_for_subnets<F: Family>(base_prefix: u8, subnets: u128) -> Option<u8> {
    (0..=F::BITS.saturating_sub(base_prefix))
        .find(|&extra_bits| block_size(extra_bits) >= subnets)
        .map(|extra_bits| base_prefix + extra_bits)
}
