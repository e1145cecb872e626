//! Address and network value types.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Family`] - IPv4 / IPv6 bit-width arithmetic and usable-host policy
//! - [`Network`] - Network base address with prefix length, and its [`Subnets`]
//! - [`IpNetwork`] - Network of either family, chosen when parsed
//! - [`AddressClass`] - Classful IPv4 address classes

mod class;
mod family;
mod ip_network;
mod network;

// Re-export public types
pub use class::AddressClass;
pub use family::{block_size, host_mask, Family, V4, V6};
pub use ip_network::IpNetwork;
pub use network::{Ipv4Network, Ipv6Network, Network, Subnets};
