use std::{
    fmt::{Display, Formatter},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use serde::Deserialize;

use super::{error::AddressKind, AddressParseError};

/// An IPv4 or IPv6 prefix: an address together with a prefix length in bits.
///
/// The address is stored exactly as provided. Bits beyond the prefix length are not cleared, so
/// `192.0.2.0/16` and `192.0.0.0/16` are distinct values that cover the same network. Use
/// [`network()`][Self::network] to obtain the masked address.
///
/// # Examples
///
/// ```
/// # use flowspec::address::Prefix;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let prefix: Prefix = "192.0.2.0/16".parse()?;
/// assert_eq!(prefix.bits(), 16);
/// assert_eq!(prefix.addr(), "192.0.2.0".parse::<std::net::IpAddr>()?);
/// assert_eq!(prefix.network(), "192.0.0.0".parse::<std::net::IpAddr>()?);
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Prefix {
    addr: IpAddr,
    bits: u8,
}

impl Prefix {
    /// Creates a new prefix from an address and a prefix length.
    ///
    /// Errs if `bits` exceeds the width of the address family (32 for IPv4, 128 for IPv6).
    pub fn new(addr: IpAddr, bits: u8) -> Result<Self, AddressParseError> {
        if bits > Self::max_bits_for(&addr) {
            return Err(AddressKind::PrefixLength.into());
        }
        Ok(Self { addr, bits })
    }

    /// Returns the address of the prefix, as it was provided on construction.
    pub const fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Returns the length of the prefix in bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Returns the width in bits of the prefix's address family.
    pub fn max_bits(&self) -> u8 {
        Self::max_bits_for(&self.addr)
    }

    /// Returns true if the prefix is an IPv4 prefix.
    pub const fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Returns the address with all bits beyond the prefix length cleared.
    pub fn network(&self) -> IpAddr {
        match self.addr {
            IpAddr::V4(addr) => Ipv4Addr::from(u32::from(addr) & self.v4_mask()).into(),
            IpAddr::V6(addr) => Ipv6Addr::from(u128::from(addr) & self.v6_mask()).into(),
        }
    }

    /// Returns true if `addr` lies within the network covered by this prefix.
    ///
    /// Addresses of a different family are never contained.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowspec::address::Prefix;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let prefix: Prefix = "192.0.2.0/24".parse()?;
    /// assert!(prefix.contains("192.0.2.77".parse()?));
    /// assert!(!prefix.contains("192.0.3.1".parse()?));
    /// assert!(!prefix.contains("2001:db8::1".parse()?));
    /// # Ok(())
    /// # }
    /// ```
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self.addr, addr) {
            (IpAddr::V4(own), IpAddr::V4(other)) => {
                let mask = self.v4_mask();
                u32::from(own) & mask == u32::from(other) & mask
            }
            (IpAddr::V6(own), IpAddr::V6(other)) => {
                let mask = self.v6_mask();
                u128::from(own) & mask == u128::from(other) & mask
            }
            _ => false,
        }
    }

    /// Returns true if `other` is equal to or more specific than this prefix and lies within it.
    pub fn covers(&self, other: &Prefix) -> bool {
        self.bits <= other.bits && self.contains(other.addr)
    }

    /// Returns true if this prefix is strictly more specific than `other` and lies within it.
    pub fn is_more_specific_than(&self, other: &Prefix) -> bool {
        self.bits > other.bits && other.contains(self.addr)
    }

    fn max_bits_for(addr: &IpAddr) -> u8 {
        match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    fn v4_mask(&self) -> u32 {
        u32::MAX.checked_shl(32 - u32::from(self.bits)).unwrap_or(0)
    }

    fn v6_mask(&self) -> u128 {
        u128::MAX.checked_shl(128 - u32::from(self.bits)).unwrap_or(0)
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.bits)
    }
}

impl FromStr for Prefix {
    type Err = AddressParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let Some((addr, bits)) = string.split_once('/') else {
            return Err(AddressKind::Prefix.into());
        };
        if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressKind::Prefix.into());
        }

        let addr = IpAddr::from_str(addr).map_err(|_| AddressKind::Prefix)?;
        let bits = u8::from_str(bits).map_err(|_| AddressKind::PrefixLength)?;

        Prefix::new(addr, bits)
    }
}

impl TryFrom<String> for Prefix {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
