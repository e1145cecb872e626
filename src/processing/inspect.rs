//! Single-address inspection: conversions, class and sizing facts.

use crate::convert::{address_to_binary, address_to_decimal, address_to_hex};
use crate::error::Result;
use crate::models::{block_size, AddressClass, Family, Network, V4, V6};
use serde::Serialize;
use std::net::IpAddr;

/// Networks of an IPv6 address are counted inside its enclosing /48 site.
pub const IPV6_SITE_PREFIX: u8 = 48;
/// Default prefix assumed for an IPv6 address given without one.
pub const IPV6_DEFAULT_PREFIX: u8 = 64;

/// Everything the `ip` command can report about an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressReport {
    pub address: String,
    pub family: &'static str,
    pub binary: String,
    pub decimal: String,
    pub hex: String,
    /// Classful IPv4 class; `None` for IPv6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Prefix used for `network`, `usable_hosts` and `subnets`.
    pub prefix: u8,
    pub network: String,
    pub usable_hosts: u128,
    /// Enclosing classful network (IPv4) or /48 site (IPv6).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Networks of `prefix` that fit in `parent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<u128>,
}

/// Inspect `addr`, sizing it as `addr/prefix`.
///
/// When `prefix` is `None` an IPv4 address takes its classful default (or /32
/// for classes without one) and an IPv6 address takes /64.
pub fn inspect(addr: IpAddr, prefix: Option<u8>) -> Result<AddressReport> {
    let (class, default_prefix, parent) = match addr {
        IpAddr::V4(a) => {
            let class = AddressClass::of(a);
            let parent = AddressClass::classful_network(a);
            (
                Some(class.to_string()),
                class.default_prefix().unwrap_or(V4::BITS),
                parent.map(|p| (p.to_string(), p.prefix())),
            )
        }
        IpAddr::V6(a) => {
            let parent = Network::<V6>::new_truncated(a, IPV6_SITE_PREFIX)?;
            (None, IPV6_DEFAULT_PREFIX, Some((parent.to_string(), parent.prefix())))
        }
    };
    let prefix = prefix.unwrap_or(default_prefix);

    let (network, usable_hosts) = match addr {
        IpAddr::V4(a) => sizing::<V4>(a, prefix)?,
        IpAddr::V6(a) => sizing::<V6>(a, prefix)?,
    };

    // A prefix shallower than the parent has no place inside it
    let subnets = parent
        .as_ref()
        .and_then(|(_, parent_prefix)| prefix.checked_sub(*parent_prefix))
        .map(block_size);

    log::debug!("inspect {addr}/{prefix}: {network}, parent {parent:?}");
    Ok(AddressReport {
        address: addr.to_string(),
        family: if addr.is_ipv4() { V4::NAME } else { V6::NAME },
        binary: address_to_binary(addr),
        decimal: address_to_decimal(addr),
        hex: address_to_hex(addr),
        class,
        prefix,
        network,
        usable_hosts,
        parent: parent.map(|(name, _)| name),
        subnets,
    })
}

fn sizing<F: Family>(addr: F::Addr, prefix: u8) -> Result<(String, u128)> {
    let network = Network::<F>::new_truncated(addr, prefix)?;
    Ok((network.to_string(), network.usable_host_count()))
}
