use std::fmt::Display;

/// An error which can be returned when parsing or constructing AS numbers and prefixes.
#[derive(Eq, PartialEq, Clone, Debug, thiserror::Error)]
pub struct AddressParseError(pub(super) AddressKind);

impl Display for AddressParseError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self.0 {
            AddressKind::Asn => "invalid AS number syntax",
            AddressKind::Prefix => "invalid IP prefix syntax",
            AddressKind::PrefixLength => "prefix length exceeds the address family width",
        };

        fmt.write_str(description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum AddressKind {
    Asn,
    Prefix,
    PrefixLength,
}

impl From<AddressKind> for AddressParseError {
    fn from(value: AddressKind) -> Self {
        Self(value)
    }
}
