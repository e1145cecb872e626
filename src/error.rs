//! Error taxonomy for the subnet engine.
//!
//! Every failure is terminal for the call that raised it: the engine either
//! returns a complete allocation or one of these errors, never a partial result.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which sizing constraint could not be met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Required usable hosts per subnet.
    Hosts,
    /// Required number of subnets.
    Subnets,
    /// Sum of all blocks requested by a VLSM plan.
    TotalAddresses,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Hosts => write!(f, "hosts"),
            Constraint::Subnets => write!(f, "subnets"),
            Constraint::TotalAddresses => write!(f, "total addresses"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("Invalid IP address: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid network: {0}")]
    InvalidNetworkFormat(String),

    #[error("Invalid prefix length: /{prefix} (must be {min}-{max})")]
    InvalidPrefixLength { prefix: u8, min: u8, max: u8 },

    #[error("{network} cannot accommodate the {constraint} requirement: requested {requested}, available {available}")]
    CapacityExceeded {
        network: String,
        constraint: Constraint,
        requested: u128,
        available: u128,
    },

    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),
}

pub type Result<T> = std::result::Result<T, SubnetError>;
