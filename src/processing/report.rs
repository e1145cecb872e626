//! Family-independent allocation results handed to the presentation layer.

use super::flsm::{subnets_flsm, FlsmPlan, Priority};
use super::vlsm::{subnets_vlsm, VlsmPlan};
use crate::error::Result;
use crate::models::{Family, IpNetwork, Network};
use serde::Serialize;

/// Represents one subnet of an allocation, ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetRow {
    /// 1-based row number in allocation order.
    pub index: usize,
    /// Subnet in CIDR notation.
    pub network: String,
    pub prefix: u8,
    pub network_address: String,
    pub first_usable: String,
    pub last_usable: String,
    /// Broadcast address (IPv4 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<String>,
    pub usable_hosts: u128,
    /// Hosts asked for by the requirement this block serves (VLSM only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_hosts: Option<u128>,
    /// Position of that requirement in the caller's list (VLSM only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement_index: Option<usize>,
}

impl SubnetRow {
    pub fn from_network<F: Family>(index: usize, network: &Network<F>) -> SubnetRow {
        SubnetRow {
            index,
            network: network.to_string(),
            prefix: network.prefix(),
            network_address: network.network_address().to_string(),
            first_usable: network.first_usable().to_string(),
            last_usable: network.last_usable().to_string(),
            broadcast: network.broadcast().map(|b| b.to_string()),
            usable_hosts: network.usable_host_count(),
            requested_hosts: None,
            requirement_index: None,
        }
    }
}

/// FLSM result with its subnets still to be enumerated.
pub struct FlsmReport {
    pub base: String,
    pub family: &'static str,
    pub prefix: u8,
    /// Total subnets available at `prefix`, which may exceed the count requested.
    pub subnet_count: u128,
    pub usable_hosts: u128,
    pub hosts_met: bool,
    pub subnets_met: bool,
    pub rows: Box<dyn Iterator<Item = SubnetRow> + Send>,
}

impl<F: Family> From<FlsmPlan<F>> for FlsmReport {
    fn from(plan: FlsmPlan<F>) -> Self {
        FlsmReport {
            base: plan.base.to_string(),
            family: F::NAME,
            prefix: plan.prefix,
            subnet_count: plan.subnet_count(),
            usable_hosts: plan.usable_hosts_per_subnet(),
            hosts_met: plan.hosts_met,
            subnets_met: plan.subnets_met,
            rows: Box::new(
                plan.into_subnets()
                    .enumerate()
                    .map(|(i, net)| SubnetRow::from_network(i + 1, &net)),
            ),
        }
    }
}

/// VLSM result, rows in allocation order.
#[derive(Debug, Clone, Serialize)]
pub struct VlsmReport {
    pub base: String,
    pub family: &'static str,
    pub allocated_addresses: u128,
    pub free_addresses: u128,
    pub rows: Vec<SubnetRow>,
}

impl VlsmReport {
    /// Reorder rows to follow the caller's requirement list.
    pub fn into_input_order(mut self) -> VlsmReport {
        self.rows.sort_by_key(|row| row.requirement_index);
        self
    }
}

impl<F: Family> From<VlsmPlan<F>> for VlsmReport {
    fn from(plan: VlsmPlan<F>) -> Self {
        let rows = plan
            .allocations()
            .iter()
            .enumerate()
            .map(|(i, a)| SubnetRow {
                requested_hosts: Some(a.requested_hosts),
                requirement_index: Some(a.requirement_index),
                ..SubnetRow::from_network(i + 1, &a.network)
            })
            .collect();
        VlsmReport {
            base: plan.base.to_string(),
            family: F::NAME,
            allocated_addresses: plan.allocated_addresses(),
            free_addresses: plan.free_addresses(),
            rows,
        }
    }
}

impl IpNetwork {
    /// FLSM on whichever family this network is.
    pub fn subnets_flsm(&self, hosts: u128, subnets: u128, priority: Priority) -> Result<FlsmReport> {
        Ok(match self {
            IpNetwork::V4(net) => subnets_flsm(net, hosts, subnets, priority)?.into(),
            IpNetwork::V6(net) => subnets_flsm(net, hosts, subnets, priority)?.into(),
        })
    }

    /// VLSM on whichever family this network is.
    pub fn subnets_vlsm(&self, requirements: &[u128]) -> Result<VlsmReport> {
        Ok(match self {
            IpNetwork::V4(net) => subnets_vlsm(net, requirements)?.into(),
            IpNetwork::V6(net) => subnets_vlsm(net, requirements)?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Constraint, SubnetError};

    #[test]
    fn test_row_from_network_v4() {
        let net: crate::models::Ipv4Network = "192.168.0.64/26".parse().unwrap();
        let row = SubnetRow::from_network(2, &net);
        assert_eq!(row.index, 2);
        assert_eq!(row.network, "192.168.0.64/26");
        assert_eq!(row.network_address, "192.168.0.64");
        assert_eq!(row.first_usable, "192.168.0.65");
        assert_eq!(row.last_usable, "192.168.0.126");
        assert_eq!(row.broadcast.as_deref(), Some("192.168.0.127"));
        assert_eq!(row.usable_hosts, 62);
    }

    #[test]
    fn test_row_from_network_v6() {
        let net: crate::models::Ipv6Network = "2001:db8::/126".parse().unwrap();
        let row = SubnetRow::from_network(1, &net);
        assert_eq!(row.first_usable, "2001:db8::");
        assert_eq!(row.last_usable, "2001:db8::3");
        assert_eq!(row.broadcast, None);
        assert_eq!(row.usable_hosts, 4);
    }

    #[test]
    fn test_flsm_report() {
        let net: IpNetwork = "192.168.0.0/24".parse().unwrap();
        let report = net.subnets_flsm(50, 4, Priority::Hosts).unwrap();
        assert_eq!(report.family, "IPv4");
        assert_eq!(report.prefix, 26);
        assert_eq!(report.subnet_count, 4);
        let rows: Vec<SubnetRow> = report.rows.collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].network, "192.168.0.192/26");
        assert_eq!(rows[3].index, 4);
    }

    #[test]
    fn test_vlsm_report_orders() {
        let net: IpNetwork = "10.0.0.0/24".parse().unwrap();
        let report = net.subnets_vlsm(&[2, 100, 50]).unwrap();
        let networks: Vec<&str> = report.rows.iter().map(|r| r.network.as_str()).collect();
        assert_eq!(networks, vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/31"]);
        assert_eq!(report.rows[0].requested_hosts, Some(100));
        assert_eq!(report.free_addresses, 256 - 128 - 64 - 2);

        let report = report.into_input_order();
        let requested: Vec<Option<u128>> = report.rows.iter().map(|r| r.requested_hosts).collect();
        assert_eq!(requested, vec![Some(2), Some(100), Some(50)]);
    }

    #[test]
    fn test_ipnetwork_capacity_error() {
        let net: IpNetwork = "2001:db8::/126".parse().unwrap();
        let err = net.subnets_vlsm(&[4, 1]).err().unwrap();
        assert!(matches!(
            err,
            SubnetError::CapacityExceeded {
                constraint: Constraint::TotalAddresses,
                ..
            }
        ));
    }
}
