//! JSON output via serde.

use crate::processing::{AddressReport, FlsmReport, SubnetRow, VlsmReport};
use serde::Serialize;

/// Serializable view of an FLSM report with the rows actually listed.
#[derive(Debug, Serialize)]
struct FlsmJson<'a> {
    base: &'a str,
    family: &'a str,
    prefix: u8,
    subnet_count: u128,
    usable_hosts: u128,
    hosts_met: bool,
    subnets_met: bool,
    /// True when `subnets` holds fewer rows than `subnet_count`.
    truncated: bool,
    subnets: &'a [SubnetRow],
}

pub fn flsm_json(report: &FlsmReport, rows: &[SubnetRow]) -> serde_json::Result<String> {
    let view = FlsmJson {
        base: &report.base,
        family: report.family,
        prefix: report.prefix,
        subnet_count: report.subnet_count,
        usable_hosts: report.usable_hosts,
        hosts_met: report.hosts_met,
        subnets_met: report.subnets_met,
        truncated: (rows.len() as u128) < report.subnet_count,
        subnets: rows,
    };
    serde_json::to_string_pretty(&view)
}

pub fn vlsm_json(report: &VlsmReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn address_json(report: &AddressReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
