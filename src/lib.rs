//! FLSM/VLSM subnet planning and address conversion for IPv4 and IPv6.
//!
//! The engine is generic over an address [`models::Family`]; [`models::IpNetwork`]
//! picks the family once from a literal so callers do not have to.
//!
//! ```
//! use subnet_planner::models::IpNetwork;
//! use subnet_planner::processing::Priority;
//!
//! let base: IpNetwork = "192.168.0.0/24".parse().unwrap();
//! let report = base.subnets_flsm(50, 4, Priority::Hosts).unwrap();
//! assert_eq!(report.prefix, 26);
//! assert_eq!(report.rows.count(), 4);
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Constraint, Result, SubnetError};
pub use models::{IpNetwork, Ipv4Network, Ipv6Network, Network};
pub use processing::{subnets_flsm, subnets_vlsm, Priority};
