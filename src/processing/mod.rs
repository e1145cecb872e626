//! Subnet allocation logic.
//!
//! This module contains the subnet allocation engine:
//! - [`flsm`] - Fixed-length subnets sized by host and subnet count
//! - [`vlsm`] - Variable-length blocks packed largest first
//! - [`prefix`] - Prefix-length derivation shared by both
//! - [`report`] - Family-independent rows for the presentation layer
//! - [`inspect`] - Single-address facts for the `ip` command

mod flsm;
mod inspect;
mod prefix;
mod report;
mod vlsm;

// Re-export public functions
pub use flsm::{subnets_flsm, FlsmPlan, Priority};
pub use inspect::{inspect, AddressReport, IPV6_DEFAULT_PREFIX, IPV6_SITE_PREFIX};
pub use prefix::{prefix_for_hosts, prefix_for_subnets};
pub use report::{FlsmReport, SubnetRow, VlsmReport};
pub use vlsm::{subnets_vlsm, VlsmAllocation, VlsmPlan};
