//! Variable-Length Subnet Masking.
//!
//! Packs one block per host requirement into the base network, largest
//! requirement first, each block aligned to its own size.

use super::prefix::prefix_for_hosts;
use crate::error::{Constraint, Result, SubnetError};
use crate::models::{block_size, host_mask, Family, Network};
use itertools::Itertools;

/// A block handed out for one host requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlsmAllocation<F: Family> {
    pub network: Network<F>,
    pub requested_hosts: u128,
    /// Position of the requirement in the caller's list.
    pub requirement_index: usize,
}

/// Outcome of a VLSM calculation.
///
/// Allocations are kept in allocation order: descending block size, which is
/// also ascending address order. Use [`VlsmPlan::in_input_order`] to get them
/// back in the order the requirements were given.
#[derive(Debug, Clone)]
pub struct VlsmPlan<F: Family> {
    pub base: Network<F>,
    allocations: Vec<VlsmAllocation<F>>,
}

impl<F: Family> VlsmPlan<F> {
    pub fn allocations(&self) -> &[VlsmAllocation<F>] {
        &self.allocations
    }

    pub fn in_input_order(&self) -> Vec<VlsmAllocation<F>> {
        self.allocations
            .iter()
            .copied()
            .sorted_by_key(|a| a.requirement_index)
            .collect()
    }

    /// Addresses consumed by all allocated blocks.
    pub fn allocated_addresses(&self) -> u128 {
        self.allocations
            .iter()
            .fold(0u128, |sum, a| sum.saturating_add(a.network.address_count()))
    }

    /// Addresses of the base network not handed out.
    pub fn free_addresses(&self) -> u128 {
        self.base
            .address_count()
            .saturating_sub(self.allocated_addresses())
    }
}

/// Calculate VLSM subnets of `base`.
///
/// # Arguments
/// * `base` - The network to allocate from
/// * `requirements` - Usable hosts needed per subnet, in any order
///
/// # Returns
/// * `Ok(VlsmPlan)` - One block per requirement, non-overlapping, inside `base`
/// * `Err(CapacityExceeded)` - Some requirement cannot be placed; nothing is allocated
pub fn subnets_vlsm<F: Family>(base: &Network<F>, requirements: &[u128]) -> Result<VlsmPlan<F>> {
    if requirements.is_empty() {
        return Err(SubnetError::InvalidRequirement(
            "at least one host requirement is needed".to_string(),
        ));
    }

    // Stable sort keeps equal requirements in the caller's order
    let ordered = requirements
        .iter()
        .copied()
        .enumerate()
        .sorted_by(|a, b| b.1.cmp(&a.1));

    let mut allocations = Vec::with_capacity(requirements.len());
    let mut cursor = Some(base.bits());
    let end = base.last_bits();

    for (requirement_index, requested_hosts) in ordered {
        let prefix = prefix_for_hosts::<F>(requested_hosts)
            .filter(|&p| p >= base.prefix())
            .ok_or_else(|| SubnetError::CapacityExceeded {
                network: base.to_string(),
                constraint: Constraint::Hosts,
                requested: requested_hosts,
                available: base.usable_host_count(),
            })?;
        let mask = host_mask(F::BITS - prefix);

        let block = cursor
            .and_then(|c| align_up(c, mask))
            .filter(|start| start | mask <= end)
            .ok_or_else(|| SubnetError::CapacityExceeded {
                network: base.to_string(),
                constraint: Constraint::TotalAddresses,
                requested: total_demand::<F>(requirements),
                available: base.address_count(),
            })?;

        let network = Network::from_raw(block, prefix);
        log::trace!("vlsm {base}: {requested_hosts} hosts -> {network}");

        let block_end = block | mask;
        cursor = if block_end >= end { None } else { Some(block_end + 1) };
        allocations.push(VlsmAllocation {
            network,
            requested_hosts,
            requirement_index,
        });
    }

    log::debug!(
        "vlsm {base}: placed {} blocks, {} addresses left",
        allocations.len(),
        cursor.map(|c| (end - c).saturating_add(1)).unwrap_or(0)
    );
    Ok(VlsmPlan {
        base: *base,
        allocations,
    })
}

/// Round `bits` up to the next multiple of the block whose host mask is `mask`.
fn align_up(bits: u128, mask: u128) -> Option<u128> {
    if bits & mask == 0 {
        Some(bits)
    } else {
        (bits | mask).checked_add(1)
    }
}

/// Addresses needed to satisfy every requirement, saturating.
fn total_demand<F: Family>(requirements: &[u128]) -> u128 {
    requirements.iter().fold(0u128, |sum, &hosts| {
        let block = prefix_for_hosts::<F>(hosts)
            .map(|p| block_size(F::BITS - p))
            .unwrap_or(u128::MAX);
        sum.saturating_add(block)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Network, Ipv6Network, V4};

    fn v4(s: &str) -> Ipv4Network {
        s.parse().unwrap()
    }

    fn names<F: Family>(allocations: &[VlsmAllocation<F>]) -> Vec<String> {
        allocations.iter().map(|a| a.network.to_string()).collect()
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 0xFF), Some(0));
        assert_eq!(align_up(1, 0xFF), Some(0x100));
        assert_eq!(align_up(0x180, 0xFF), Some(0x200));
        assert_eq!(align_up(0x180, 0x7F), Some(0x180));
        assert_eq!(align_up(u128::MAX, 0xF), None);
    }

    #[test]
    fn test_vlsm_fits_exactly() {
        let plan = subnets_vlsm(&v4("10.0.0.0/24"), &[100, 50, 50]).unwrap();
        assert_eq!(
            names(plan.allocations()),
            vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/26"]
        );
        let hosts: Vec<u128> = plan
            .allocations()
            .iter()
            .map(|a| a.network.usable_host_count())
            .collect();
        assert_eq!(hosts, vec![126, 62, 62]);
        assert_eq!(plan.free_addresses(), 0);
    }

    #[test]
    fn test_vlsm_overflow_is_atomic() {
        let err = subnets_vlsm(&v4("10.0.0.0/24"), &[100, 50, 50, 2]).unwrap_err();
        assert_eq!(
            err,
            SubnetError::CapacityExceeded {
                network: "10.0.0.0/24".to_string(),
                constraint: Constraint::TotalAddresses,
                requested: 258,
                available: 256,
            }
        );
    }

    #[test]
    fn test_vlsm_sorts_largest_first() {
        let plan = subnets_vlsm(&v4("192.168.10.0/24"), &[10, 60, 2, 25]).unwrap();
        assert_eq!(
            names(plan.allocations()),
            vec![
                "192.168.10.0/26",
                "192.168.10.64/27",
                "192.168.10.96/28",
                "192.168.10.112/31"
            ]
        );
        let indexes: Vec<usize> = plan.allocations().iter().map(|a| a.requirement_index).collect();
        assert_eq!(indexes, vec![1, 3, 0, 2]);

        assert_eq!(
            names(&plan.in_input_order()),
            vec![
                "192.168.10.96/28",
                "192.168.10.0/26",
                "192.168.10.112/31",
                "192.168.10.64/27"
            ]
        );
        assert_eq!(plan.allocated_addresses(), 64 + 32 + 16 + 2);
    }

    #[test]
    fn test_vlsm_equal_requirements_keep_input_order() {
        let plan = subnets_vlsm(&v4("10.0.0.0/24"), &[20, 20, 20]).unwrap();
        let indexes: Vec<usize> = plan.allocations().iter().map(|a| a.requirement_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_vlsm_single_requirement_too_big() {
        let err = subnets_vlsm(&v4("10.0.0.0/24"), &[300]).unwrap_err();
        assert!(matches!(
            err,
            SubnetError::CapacityExceeded {
                constraint: Constraint::Hosts,
                requested: 300,
                available: 254,
                ..
            }
        ));
    }

    #[test]
    fn test_vlsm_empty_requirements() {
        assert!(matches!(
            subnets_vlsm(&v4("10.0.0.0/24"), &[]),
            Err(SubnetError::InvalidRequirement(_))
        ));
    }

    #[test]
    fn test_vlsm_small_base() {
        let plan = subnets_vlsm(&v4("10.0.0.4/31"), &[1, 0]).unwrap();
        assert_eq!(names(plan.allocations()), vec!["10.0.0.4/32", "10.0.0.5/32"]);

        let plan = subnets_vlsm(&v4("10.0.0.4/31"), &[2]).unwrap();
        assert_eq!(names(plan.allocations()), vec!["10.0.0.4/31"]);
    }

    #[test]
    fn test_vlsm_top_of_address_space() {
        let plan = subnets_vlsm(&v4("255.255.255.0/24"), &[120, 60, 30, 14]).unwrap();
        assert_eq!(
            names(plan.allocations()),
            vec![
                "255.255.255.0/25",
                "255.255.255.128/26",
                "255.255.255.192/27",
                "255.255.255.224/28"
            ]
        );
    }

    #[test]
    fn test_vlsm_ipv6() {
        let base: Ipv6Network = "2001:db8::/120".parse().unwrap();
        let plan = subnets_vlsm(&base, &[128, 64, 64]).unwrap();
        assert_eq!(
            names(plan.allocations()),
            vec!["2001:db8::/121", "2001:db8::80/122", "2001:db8::c0/122"]
        );
        assert!(subnets_vlsm(&base, &[128, 64, 64, 1]).is_err());

        let all: Ipv6Network = "::/0".parse().unwrap();
        let plan = subnets_vlsm(&all, &[u128::MAX]).unwrap();
        assert_eq!(names(plan.allocations()), vec!["::/0"]);
    }

    #[test]
    fn test_vlsm_properties_hold() {
        let base = v4("10.10.0.0/22");
        let requirements = [500u128, 3, 120, 0, 60, 60, 14, 1, 100];
        let plan = subnets_vlsm(&base, &requirements).unwrap();
        assert_eq!(plan.allocations().len(), requirements.len());

        for a in plan.allocations() {
            assert!(a.network.usable_host_count() >= requirements[a.requirement_index]);
            assert!(base.contains(&a.network));
        }
        for pair in plan.allocations().windows(2) {
            assert!(pair[0].network.last_bits() < pair[1].network.bits());
        }
        assert!(plan.allocated_addresses() <= base.address_count());
        assert_eq!(total_demand::<V4>(&requirements), plan.allocated_addresses());
    }
}
