//! Network (address + prefix length) value type.
//!
//! Provides [`Network`] generic over the address [`Family`], together with the
//! [`Subnets`] iterator used to carve a network into equal child networks.

use super::family::{block_size, host_mask, Family, V4, V6};
use crate::error::{Result, SubnetError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

lazy_static! {
    static ref RE_CIDR: Regex =
        Regex::new(r"^([0-9A-Fa-f:.]+)/([0-9.]+)$").expect("Invalid Regex?");
}

pub type Ipv4Network = Network<V4>;
pub type Ipv6Network = Network<V6>;

/// A network base address paired with a prefix length.
///
/// Host bits of the base address are always zero. Ordering is by base address,
/// then by prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Network<F: Family> {
    bits: u128,
    prefix: u8,
    family: PhantomData<F>,
}

impl<F: Family> Network<F> {
    /// Create a network, rejecting a base address with host bits set.
    pub fn new(addr: F::Addr, prefix: u8) -> Result<Self> {
        check_prefix::<F>(prefix)?;
        let bits = F::to_bits(addr);
        if bits & !F::prefix_mask(prefix) != 0 {
            return Err(SubnetError::InvalidNetworkFormat(format!(
                "{addr}/{prefix} has host bits set"
            )));
        }
        Ok(Network::from_raw(bits, prefix))
    }

    /// Create a network, clearing any host bits of `addr`.
    pub fn new_truncated(addr: F::Addr, prefix: u8) -> Result<Self> {
        check_prefix::<F>(prefix)?;
        Ok(Network::from_raw(F::to_bits(addr) & F::prefix_mask(prefix), prefix))
    }

    /// Caller guarantees `prefix <= F::BITS` and that `bits` is aligned to it.
    pub(crate) fn from_raw(bits: u128, prefix: u8) -> Self {
        debug_assert!(prefix <= F::BITS);
        debug_assert_eq!(bits & !F::prefix_mask(prefix), 0);
        Network {
            bits,
            prefix,
            family: PhantomData,
        }
    }

    pub fn bit_width(&self) -> u8 {
        F::BITS
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn host_bits(&self) -> u8 {
        F::BITS - self.prefix
    }

    pub fn network_address(&self) -> F::Addr {
        F::from_bits(self.bits)
    }

    pub fn mask(&self) -> F::Addr {
        F::from_bits(F::prefix_mask(self.prefix))
    }

    /// Highest address in the network.
    pub fn last_address(&self) -> F::Addr {
        F::from_bits(self.last_bits())
    }

    /// Broadcast address; `None` for families without broadcast.
    pub fn broadcast(&self) -> Option<F::Addr> {
        F::has_broadcast().then(|| self.last_address())
    }

    /// Total number of addresses, saturating at `u128::MAX` for `::/0`.
    pub fn address_count(&self) -> u128 {
        block_size(self.host_bits())
    }

    pub fn usable_host_count(&self) -> u128 {
        F::usable_hosts(self.host_bits())
    }

    pub fn first_usable(&self) -> F::Addr {
        if F::reserves_edges(self.host_bits()) {
            F::from_bits(self.bits + 1)
        } else {
            self.network_address()
        }
    }

    pub fn last_usable(&self) -> F::Addr {
        if F::reserves_edges(self.host_bits()) {
            F::from_bits(self.last_bits() - 1)
        } else {
            self.last_address()
        }
    }

    /// True when `other` lies completely inside this network.
    pub fn contains(&self, other: &Network<F>) -> bool {
        other.prefix >= self.prefix && other.bits & F::prefix_mask(self.prefix) == self.bits
    }

    pub fn contains_address(&self, addr: F::Addr) -> bool {
        F::to_bits(addr) & F::prefix_mask(self.prefix) == self.bits
    }

    /// Number of child networks of `new_prefix`, saturating like [`Network::address_count`].
    pub fn subnet_count(&self, new_prefix: u8) -> Result<u128> {
        self.check_child_prefix(new_prefix)?;
        Ok(block_size(new_prefix - self.prefix))
    }

    /// All child networks of `new_prefix`, in ascending address order.
    ///
    /// # Arguments
    /// * `new_prefix` - Child prefix length, `prefix() <= new_prefix <= bit_width()`
    pub fn subnets(&self, new_prefix: u8) -> Result<Subnets<F>> {
        let total = self.subnet_count(new_prefix)?;
        Ok(Subnets {
            next: Some(self.bits),
            last: self.last_bits(),
            prefix: new_prefix,
            total,
            emitted: 0,
            family: PhantomData,
        })
    }

    pub(crate) fn bits(&self) -> u128 {
        self.bits
    }

    pub(crate) fn last_bits(&self) -> u128 {
        self.bits | host_mask(self.host_bits())
    }

    fn check_child_prefix(&self, new_prefix: u8) -> Result<()> {
        if new_prefix < self.prefix || new_prefix > F::BITS {
            return Err(SubnetError::InvalidPrefixLength {
                prefix: new_prefix,
                min: self.prefix,
                max: F::BITS,
            });
        }
        Ok(())
    }
}

fn check_prefix<F: Family>(prefix: u8) -> Result<()> {
    if prefix > F::BITS {
        Err(SubnetError::InvalidPrefixLength {
            prefix,
            min: 0,
            max: F::BITS,
        })
    } else {
        Ok(())
    }
}

impl<F: Family> fmt::Display for Network<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network_address(), self.prefix)
    }
}

impl<F: Family> FromStr for Network<F> {
    type Err = SubnetError;

    /// Parse `address/prefix`. IPv4 also accepts a dotted netmask as the prefix.
    fn from_str(literal: &str) -> Result<Self> {
        let literal = literal.trim();
        let invalid = |reason: &str| {
            SubnetError::InvalidNetworkFormat(format!("{literal}: {reason}"))
        };

        let caps = RE_CIDR
            .captures(literal)
            .ok_or_else(|| invalid("expected <address>/<prefix>"))?;
        let (addr, prefix) = (&caps[1], &caps[2]);

        let addr: F::Addr = addr
            .parse()
            .map_err(|_| invalid(&format!("not an {} address", F::NAME)))?;
        let prefix = match prefix.parse::<u8>() {
            Ok(p) if p <= F::BITS => p,
            Ok(_) => return Err(invalid(&format!("prefix must be 0-{}", F::BITS))),
            Err(_) => F::parse_mask(prefix).ok_or_else(|| invalid("invalid prefix or netmask"))?,
        };

        Network::new(addr, prefix).map_err(|e| match e {
            SubnetError::InvalidNetworkFormat(msg) => SubnetError::InvalidNetworkFormat(msg),
            other => invalid(&other.to_string()),
        })
    }
}

impl<F: Family> Serialize for Network<F> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Iterator over equal-sized child networks, lowest address first.
///
/// Lazily produced so that e.g. a `/32` carved into `/64`s never materialises.
#[derive(Debug, Clone)]
pub struct Subnets<F: Family> {
    next: Option<u128>,
    last: u128,
    prefix: u8,
    total: u128,
    emitted: u128,
    family: PhantomData<F>,
}

impl<F: Family> Subnets<F> {
    /// Total number of child networks, independent of how many were consumed.
    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl<F: Family> Iterator for Subnets<F> {
    type Item = Network<F>;

    fn next(&mut self) -> Option<Network<F>> {
        let start = self.next?;
        let end = start | host_mask(F::BITS - self.prefix);
        self.next = if end >= self.last { None } else { Some(end + 1) };
        self.emitted = self.emitted.saturating_add(1);
        Some(Network::from_raw(start, self.prefix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_none() {
            return (0, Some(0));
        }
        let remaining = self.total.saturating_sub(self.emitted);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
