//! Addressing values shared by FlowSpec rules and unicast routes (AS numbers and IP prefixes).

mod asn;
pub use asn::Asn;

mod prefix;
pub use prefix::Prefix;

mod error;
pub use error::AddressParseError;
