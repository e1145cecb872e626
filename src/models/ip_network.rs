//! Family-tagged network, resolved once from user input.

use super::family::{Family, V4, V6};
use super::network::{Ipv4Network, Ipv6Network};
use crate::error::{Result, SubnetError};
use std::fmt;
use std::str::FromStr;

/// A network of either family.
///
/// The family is decided when the literal is parsed; everything behind the
/// match in each method runs on the concrete [`super::Network`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpNetwork {
    V4(Ipv4Network),
    V6(Ipv6Network),
}

impl IpNetwork {
    pub fn family_name(&self) -> &'static str {
        match self {
            IpNetwork::V4(_) => V4::NAME,
            IpNetwork::V6(_) => V6::NAME,
        }
    }

    pub fn bit_width(&self) -> u8 {
        match self {
            IpNetwork::V4(net) => net.bit_width(),
            IpNetwork::V6(net) => net.bit_width(),
        }
    }

    pub fn prefix(&self) -> u8 {
        match self {
            IpNetwork::V4(net) => net.prefix(),
            IpNetwork::V6(net) => net.prefix(),
        }
    }

    pub fn address_count(&self) -> u128 {
        match self {
            IpNetwork::V4(net) => net.address_count(),
            IpNetwork::V6(net) => net.address_count(),
        }
    }

    pub fn usable_host_count(&self) -> u128 {
        match self {
            IpNetwork::V4(net) => net.usable_host_count(),
            IpNetwork::V6(net) => net.usable_host_count(),
        }
    }

    /// True when `other` is the same family and lies completely inside this network.
    pub fn contains(&self, other: &IpNetwork) -> bool {
        match (self, other) {
            (IpNetwork::V4(a), IpNetwork::V4(b)) => a.contains(b),
            (IpNetwork::V6(a), IpNetwork::V6(b)) => a.contains(b),
            _ => false,
        }
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpNetwork::V4(net) => net.fmt(f),
            IpNetwork::V6(net) => net.fmt(f),
        }
    }
}

impl FromStr for IpNetwork {
    type Err = SubnetError;

    /// A literal whose address part holds a `:` is IPv6, anything else IPv4.
    fn from_str(literal: &str) -> Result<Self> {
        let addr = literal.trim().split('/').next().unwrap_or_default();
        if addr.contains(':') {
            Ok(IpNetwork::V6(literal.parse()?))
        } else {
            Ok(IpNetwork::V4(literal.parse()?))
        }
    }
}

impl From<Ipv4Network> for IpNetwork {
    fn from(net: Ipv4Network) -> Self {
        IpNetwork::V4(net)
    }
}

impl From<Ipv6Network> for IpNetwork {
    fn from(net: Ipv6Network) -> Self {
        IpNetwork::V6(net)
    }
}
