//! Fixed-Length Subnet Masking.
//!
//! Splits a base network into equal subnets sized by a host requirement and a
//! subnet-count requirement, letting a [`Priority`] settle any conflict.

use super::prefix::{prefix_for_hosts, prefix_for_subnets};
use crate::error::{Constraint, Result, SubnetError};
use crate::models::{Family, Network, Subnets};
use serde::Serialize;

/// Which requirement wins when hosts-per-subnet and subnet count conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Keep the host requirement, fit as many subnets as possible.
    #[default]
    Hosts,
    /// Keep the subnet count, give each subnet as many hosts as possible.
    Subnets,
}

/// Outcome of an FLSM calculation.
#[derive(Debug, Clone)]
pub struct FlsmPlan<F: Family> {
    pub base: Network<F>,
    pub prefix: u8,
    /// False when the host requirement was given up in favour of the subnet count.
    pub hosts_met: bool,
    /// False when the subnet count was given up in favour of the host requirement.
    pub subnets_met: bool,
    subnets: Subnets<F>,
}

impl<F: Family> FlsmPlan<F> {
    /// Every subnet the base network yields at the chosen prefix.
    pub fn subnet_count(&self) -> u128 {
        self.subnets.total()
    }

    pub fn usable_hosts_per_subnet(&self) -> u128 {
        F::usable_hosts(F::BITS - self.prefix)
    }

    /// Iterate the subnets in ascending address order.
    pub fn subnets(&self) -> Subnets<F> {
        self.subnets.clone()
    }

    pub fn into_subnets(self) -> Subnets<F> {
        self.subnets
    }
}

/// Calculate FLSM subnets of `base`.
///
/// # Arguments
/// * `base` - The network to split
/// * `hosts` - Minimum usable hosts per subnet; `0` means no host requirement
/// * `subnets` - Minimum number of subnets, at least 1
/// * `priority` - Requirement kept when both cannot be met at one prefix
///
/// # Returns
/// * `Ok(FlsmPlan)` - Chosen prefix and a lazy iterator over every subnet
/// * `Err(CapacityExceeded)` - The base network cannot satisfy the winning requirement
pub fn subnets_flsm<F: Family>(
    base: &Network<F>,
    hosts: u128,
    subnets: u128,
    priority: Priority,
) -> Result<FlsmPlan<F>> {
    if subnets == 0 {
        return Err(SubnetError::InvalidRequirement(
            "subnet count must be at least 1".to_string(),
        ));
    }

    let capacity_exceeded = |constraint, requested, available| SubnetError::CapacityExceeded {
        network: base.to_string(),
        constraint,
        requested,
        available,
    };

    // More subnets than addresses can never be satisfied, whatever the priority
    let subnet_prefix = prefix_for_subnets::<F>(base.prefix(), subnets)
        .ok_or_else(|| capacity_exceeded(Constraint::Subnets, subnets, base.address_count()))?;

    let host_prefix = if hosts == 0 {
        None
    } else {
        Some(
            prefix_for_hosts::<F>(hosts)
                .filter(|&p| p >= base.prefix())
                .ok_or_else(|| {
                    capacity_exceeded(Constraint::Hosts, hosts, base.usable_host_count())
                }),
        )
    };

    let (prefix, hosts_met, subnets_met) = match (host_prefix, priority) {
        (None, _) => (subnet_prefix, true, true),
        (Some(Ok(host_prefix)), _) if subnet_prefix <= host_prefix => match priority {
            Priority::Hosts => (host_prefix, true, true),
            Priority::Subnets => (subnet_prefix, true, true),
        },
        (Some(Ok(host_prefix)), Priority::Hosts) => {
            log::debug!(
                "flsm {base}: /{host_prefix} for {hosts} hosts leaves fewer than {subnets} subnets, keeping hosts"
            );
            (host_prefix, true, false)
        }
        (Some(Err(e)), Priority::Hosts) => return Err(e),
        (Some(_), Priority::Subnets) => {
            log::debug!(
                "flsm {base}: /{subnet_prefix} for {subnets} subnets leaves fewer than {hosts} hosts, keeping subnets"
            );
            (subnet_prefix, false, true)
        }
    };

    let plan = FlsmPlan {
        base: *base,
        prefix,
        hosts_met,
        subnets_met,
        subnets: base.subnets(prefix)?,
    };
    log::debug!(
        "flsm {base}: /{prefix} gives {} subnets of {} usable hosts",
        plan.subnet_count(),
        plan.usable_hosts_per_subnet()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Network, Ipv6Network};

    fn v4(s: &str) -> Ipv4Network {
        s.parse().unwrap()
    }

    fn names<F: Family>(plan: &FlsmPlan<F>) -> Vec<String> {
        plan.subnets().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_flsm_hosts_and_subnets_agree() {
        let plan = subnets_flsm(&v4("192.168.0.0/24"), 50, 4, Priority::Hosts).unwrap();
        assert_eq!(plan.prefix, 26);
        assert_eq!(plan.subnet_count(), 4);
        assert_eq!(plan.usable_hosts_per_subnet(), 62);
        assert!(plan.hosts_met && plan.subnets_met);
        assert_eq!(
            names(&plan),
            vec![
                "192.168.0.0/26",
                "192.168.0.64/26",
                "192.168.0.128/26",
                "192.168.0.192/26"
            ]
        );
        assert!(plan.subnets().all(|n| n.usable_host_count() == 62));
    }

    #[test]
    fn test_flsm_priority_picks_within_range() {
        // Any prefix in /25../28 satisfies 10 hosts and 2 subnets
        let base = v4("10.0.0.0/24");
        let hosts = subnets_flsm(&base, 10, 2, Priority::Hosts).unwrap();
        assert_eq!(hosts.prefix, 28);
        assert_eq!(hosts.subnet_count(), 16);

        let subnets = subnets_flsm(&base, 10, 2, Priority::Subnets).unwrap();
        assert_eq!(subnets.prefix, 25);
        assert_eq!(subnets.subnet_count(), 2);
        assert_eq!(subnets.usable_hosts_per_subnet(), 126);
    }

    #[test]
    fn test_flsm_conflict_hosts_priority() {
        let plan = subnets_flsm(&v4("10.0.0.0/24"), 100, 4, Priority::Hosts).unwrap();
        assert_eq!(plan.prefix, 25);
        assert_eq!(plan.subnet_count(), 2);
        assert!(plan.hosts_met);
        assert!(!plan.subnets_met);
    }

    #[test]
    fn test_flsm_conflict_subnets_priority() {
        let plan = subnets_flsm(&v4("10.0.0.0/24"), 100, 4, Priority::Subnets).unwrap();
        assert_eq!(plan.prefix, 26);
        assert_eq!(plan.subnet_count(), 4);
        assert_eq!(plan.usable_hosts_per_subnet(), 62);
        assert!(!plan.hosts_met);
        assert!(plan.subnets_met);
    }

    #[test]
    fn test_flsm_subnets_priority_ignores_impossible_hosts() {
        let plan = subnets_flsm(&v4("10.0.0.0/24"), 1000, 2, Priority::Subnets).unwrap();
        assert_eq!(plan.prefix, 25);
        assert!(!plan.hosts_met);
    }

    #[test]
    fn test_flsm_hosts_exceed_base() {
        let err = subnets_flsm(&v4("10.0.0.0/24"), 300, 1, Priority::Hosts).unwrap_err();
        assert_eq!(
            err,
            SubnetError::CapacityExceeded {
                network: "10.0.0.0/24".to_string(),
                constraint: Constraint::Hosts,
                requested: 300,
                available: 254,
            }
        );
    }

    #[test]
    fn test_flsm_subnets_exceed_address_count() {
        for priority in [Priority::Hosts, Priority::Subnets] {
            let err = subnets_flsm(&v4("10.0.0.0/24"), 1, 257, priority).unwrap_err();
            assert!(matches!(
                err,
                SubnetError::CapacityExceeded {
                    constraint: Constraint::Subnets,
                    requested: 257,
                    available: 256,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_flsm_zero_subnets_rejected() {
        assert!(matches!(
            subnets_flsm(&v4("10.0.0.0/24"), 1, 0, Priority::Hosts),
            Err(SubnetError::InvalidRequirement(_))
        ));
    }

    #[test]
    fn test_flsm_degenerate_returns_base() {
        for literal in ["10.0.0.0/24", "10.0.0.0/31", "10.0.0.1/32"] {
            let base = v4(literal);
            let plan = subnets_flsm(&base, 0, 1, Priority::Hosts).unwrap();
            assert_eq!(plan.subnets().collect::<Vec<_>>(), vec![base]);
        }
        for literal in ["2001:db8::/127", "2001:db8::1/128"] {
            let base: Ipv6Network = literal.parse().unwrap();
            let plan = subnets_flsm(&base, 0, 1, Priority::Subnets).unwrap();
            assert_eq!(plan.subnets().collect::<Vec<_>>(), vec![base]);
        }
    }

    #[test]
    fn test_flsm_zero_hosts_uses_subnet_count() {
        let plan = subnets_flsm(&v4("10.0.0.0/30"), 0, 4, Priority::Hosts).unwrap();
        assert_eq!(plan.prefix, 32);
        assert_eq!(names(&plan), vec!["10.0.0.0/32", "10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32"]);
    }

    #[test]
    fn test_flsm_ipv6() {
        let base: Ipv6Network = "2001:db8::/48".parse().unwrap();
        let plan = subnets_flsm(&base, 1u128 << 64, 256, Priority::Hosts).unwrap();
        assert_eq!(plan.prefix, 64);
        assert_eq!(plan.subnet_count(), 65536);
        let mut subnets = plan.subnets();
        assert_eq!(subnets.next().unwrap().to_string(), "2001:db8::/64");
        assert_eq!(subnets.next().unwrap().to_string(), "2001:db8:0:1::/64");
    }

    #[test]
    fn test_flsm_properties_hold() {
        let base = v4("172.16.0.0/20");
        for hosts in [1u128, 2, 5, 30, 200, 1000, 4094] {
            for subnets in [1u128, 3, 8, 64] {
                let plan = match subnets_flsm(&base, hosts, subnets, Priority::Hosts) {
                    Ok(plan) => plan,
                    Err(_) => continue,
                };
                assert!(plan.subnets().all(|n| n.usable_host_count() >= hosts));
                assert!(plan.subnets().all(|n| base.contains(&n)));
                if plan.subnets_met {
                    assert!(plan.subnet_count() >= subnets);
                }
            }
        }
    }
}
