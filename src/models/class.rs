//! Classful IPv4 addressing.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use super::network::Ipv4Network;

/// Historic IPv4 address class, taken from the leading bits of the address.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
    Zero,
    Broadcast,
}

impl AddressClass {
    ///
    /// | Class   | 1st octet value | Leading bits |
    /// |---------|-----------------|--------------|
    /// | A       | 0 - 127         | 0xxxxxxx     |
    /// | B       | 128 - 191       | 10xxxxxx     |
    /// | C       | 192 - 223       | 110xxxxx     |
    /// | D       | 224 - 239       | 1110xxxx     |
    /// | E       | 240 - 255       | 1111xxxx     |
    ///
    pub fn of(addr: Ipv4Addr) -> AddressClass {
        let address = u32::from(addr);
        match address.leading_ones() {
            _ if address == 0 => AddressClass::Zero,
            32 => AddressClass::Broadcast,
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// Classes A through C have network masks /8, /16 and /24 respectively.
    pub fn default_prefix(&self) -> Option<u8> {
        match self {
            AddressClass::A => Some(8),
            AddressClass::B => Some(16),
            AddressClass::C => Some(24),
            _ => None,
        }
    }

    /// The classful network `addr` belongs to, for classes A through C.
    pub fn classful_network(addr: Ipv4Addr) -> Option<Ipv4Network> {
        let prefix = AddressClass::of(addr).default_prefix()?;
        Ipv4Network::new_truncated(addr, prefix).ok()
    }
}

impl Display for AddressClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressClass::A => write!(f, "Class A"),
            AddressClass::B => write!(f, "Class B"),
            AddressClass::C => write!(f, "Class C"),
            AddressClass::D => write!(f, "Class D (multicast)"),
            AddressClass::E => write!(f, "Class E (reserved)"),
            AddressClass::Zero => write!(f, "Zero address"),
            AddressClass::Broadcast => write!(f, "Broadcast address"),
        }
    }
}
