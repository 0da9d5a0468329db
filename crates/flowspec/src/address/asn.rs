use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::Deserialize;

use super::{error::AddressKind, AddressParseError};

/// A 32-bit BGP autonomous system (AS) number, as defined by RFC 6793.
///
/// AS numbers are displayed in the "asplain" notation and can be parsed from either "asplain" or
/// "asdot" (RFC 5396), optionally prefixed with `AS`.
///
/// # Examples
///
/// ```
/// # use flowspec::address::Asn;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(Asn::new(65001), "65001".parse()?);
/// assert_eq!(Asn::new(65546), "1.10".parse()?);
/// assert_eq!(Asn::new(64512), "AS64512".parse()?);
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
#[repr(transparent)]
pub struct Asn(u32);

impl Asn {
    /// The reserved AS number zero, which must never appear in an AS_PATH.
    pub const RESERVED: Self = Self(0);

    /// AS_TRANS, the placeholder used by 2-octet-only speakers for 4-octet AS numbers (RFC 6793).
    pub const TRANS: Self = Self(23456);

    /// The number of bits in a BGP AS number.
    pub const BITS: u32 = u32::BITS;

    const BITS_PER_PART: u32 = 16;

    /// Creates a new AS number from its numeric value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the AS number as a u32 integer.
    pub const fn to_u32(&self) -> u32 {
        self.0
    }

    /// Returns true for the reserved AS number zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowspec::address::Asn;
    /// assert!(Asn::RESERVED.is_reserved());
    /// assert!(!Asn::new(65001).is_reserved());
    /// ```
    pub const fn is_reserved(&self) -> bool {
        self.0 == Self::RESERVED.0
    }

    fn parse_digits<T: FromStr>(digits: &str) -> Result<T, AddressParseError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressKind::Asn.into());
        }
        digits.parse().map_err(|_| AddressKind::Asn.into())
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.to_u32()
    }
}

impl From<u32> for Asn {
    fn from(value: u32) -> Self {
        Asn(value)
    }
}

impl FromStr for Asn {
    type Err = AddressParseError;

    fn from_str(asn_string: &str) -> Result<Self, Self::Err> {
        let number = match asn_string.get(..2) {
            Some(label) if label.eq_ignore_ascii_case("as") => &asn_string[2..],
            _ => asn_string,
        };

        match number.split_once('.') {
            Some((high, low)) => {
                let high: u16 = Self::parse_digits(high)?;
                let low: u16 = Self::parse_digits(low)?;
                Ok(Asn(u32::from(high) << Self::BITS_PER_PART | u32::from(low)))
            }
            None => Self::parse_digits(number).map(Asn),
        }
    }
}

impl TryFrom<String> for Asn {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
