//! FlowSpec NLRI components and the component lists that identify a FlowSpec rule.
//!
//! A FlowSpec rule is keyed by an ordered list of typed match criteria ([`Component`]s). The
//! component types are those of RFC 8955 §4.2.2. Prefix-typed components carry a [`Prefix`], all
//! other components carry their NLRI-encoded value bytes, which are only ever compared and never
//! interpreted by this crate.

use std::fmt::{self, Display, Formatter};

use bytes::Bytes;

use crate::address::Prefix;

mod list;
pub use list::ComponentList;

/// The type of a FlowSpec component, corresponding to the RFC 8955 component type octet.
///
/// Types are ordered by their numeric value, with lower types taking precedence when ordering
/// FlowSpec rules.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    /// Type 1, the destination prefix.
    DestinationPrefix = 1,
    /// Type 2, the source prefix.
    SourcePrefix,
    /// Type 3, the IP protocol (IPv4) or next header (IPv6).
    IpProtocol,
    /// Type 4, a source or destination port.
    Port,
    /// Type 5, the destination port.
    DestinationPort,
    /// Type 6, the source port.
    SourcePort,
    /// Type 7, the ICMP type.
    IcmpType,
    /// Type 8, the ICMP code.
    IcmpCode,
    /// Type 9, the TCP flags.
    TcpFlags,
    /// Type 10, the total IP packet length.
    PacketLength,
    /// Type 11, the DSCP value.
    Dscp,
    /// Type 12, the fragmentation bits.
    Fragment,
}

impl ComponentType {
    /// Convert a component type octet to its enum variant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowspec::component::ComponentType;
    /// assert_eq!(ComponentType::from_byte(1), Some(ComponentType::DestinationPrefix));
    /// assert_eq!(ComponentType::from_byte(3), Some(ComponentType::IpProtocol));
    /// assert_eq!(ComponentType::from_byte(12), Some(ComponentType::Fragment));
    /// assert_eq!(ComponentType::from_byte(0), None);
    /// assert_eq!(ComponentType::from_byte(13), None);
    /// ```
    pub fn from_byte(byte: u8) -> Option<Self> {
        let component_type = match byte {
            1 => Self::DestinationPrefix,
            2 => Self::SourcePrefix,
            3 => Self::IpProtocol,
            4 => Self::Port,
            5 => Self::DestinationPort,
            6 => Self::SourcePort,
            7 => Self::IcmpType,
            8 => Self::IcmpCode,
            9 => Self::TcpFlags,
            10 => Self::PacketLength,
            11 => Self::Dscp,
            12 => Self::Fragment,
            _ => return None,
        };
        Some(component_type)
    }

    /// Returns true for the component types that carry a [`Prefix`].
    pub const fn is_prefix(&self) -> bool {
        matches!(self, Self::DestinationPrefix | Self::SourcePrefix)
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::DestinationPrefix => "destination-prefix",
            Self::SourcePrefix => "source-prefix",
            Self::IpProtocol => "ip-protocol",
            Self::Port => "port",
            Self::DestinationPort => "destination-port",
            Self::SourcePort => "source-port",
            Self::IcmpType => "icmp-type",
            Self::IcmpCode => "icmp-code",
            Self::TcpFlags => "tcp-flags",
            Self::PacketLength => "packet-length",
            Self::Dscp => "dscp",
            Self::Fragment => "fragment",
        }
    }
}

impl From<ComponentType> for u8 {
    fn from(value: ComponentType) -> Self {
        value as u8
    }
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised when constructing components or component lists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// The payload kind does not match the component type, such as raw bytes for a prefix type.
    #[error("{0} components cannot carry this kind of payload")]
    PayloadMismatch(ComponentType),
    /// Components are not sorted by ascending type.
    #[error("component {next} follows {previous}, components must be in ascending type order")]
    OutOfOrder {
        /// The type of the earlier component.
        previous: ComponentType,
        /// The type of the component found out of order.
        next: ComponentType,
    },
    /// A component type appears more than once.
    #[error("component type {0} appears more than once")]
    DuplicateType(ComponentType),
}

/// A single FlowSpec NLRI component.
///
/// Each variant corresponds to one [`ComponentType`], which determines the kind of payload
/// carried. Prefix components carry a [`Prefix`], the remaining components carry the
/// NLRI-encoded operator/value bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// Type 1, the destination prefix.
    DestinationPrefix(Prefix),
    /// Type 2, the source prefix.
    SourcePrefix(Prefix),
    /// Type 3, the encoded IP protocol operator/value pairs.
    IpProtocol(Bytes),
    /// Type 4, the encoded port operator/value pairs.
    Port(Bytes),
    /// Type 5, the encoded destination port operator/value pairs.
    DestinationPort(Bytes),
    /// Type 6, the encoded source port operator/value pairs.
    SourcePort(Bytes),
    /// Type 7, the encoded ICMP type operator/value pairs.
    IcmpType(Bytes),
    /// Type 8, the encoded ICMP code operator/value pairs.
    IcmpCode(Bytes),
    /// Type 9, the encoded TCP flags operator/value pairs.
    TcpFlags(Bytes),
    /// Type 10, the encoded packet length operator/value pairs.
    PacketLength(Bytes),
    /// Type 11, the encoded DSCP operator/value pairs.
    Dscp(Bytes),
    /// Type 12, the encoded fragment operator/value pairs.
    Fragment(Bytes),
}

/// A borrowed view of the value carried by a [`Component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// The prefix of a destination or source prefix component.
    Prefix(&'a Prefix),
    /// The raw value bytes of any other component.
    Raw(&'a [u8]),
}

impl Component {
    /// Creates a prefix component of the given type.
    ///
    /// Errs with [`ComponentError::PayloadMismatch`] if the type does not carry a prefix.
    pub fn prefix(component_type: ComponentType, prefix: Prefix) -> Result<Self, ComponentError> {
        match component_type {
            ComponentType::DestinationPrefix => Ok(Self::DestinationPrefix(prefix)),
            ComponentType::SourcePrefix => Ok(Self::SourcePrefix(prefix)),
            _ => Err(ComponentError::PayloadMismatch(component_type)),
        }
    }

    /// Creates a component of the given type carrying raw value bytes.
    ///
    /// Errs with [`ComponentError::PayloadMismatch`] if the type carries a prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowspec::component::{Component, ComponentType};
    /// let protocol = Component::raw(ComponentType::IpProtocol, vec![0x81, 0x06]).unwrap();
    /// assert_eq!(protocol.component_type(), ComponentType::IpProtocol);
    ///
    /// assert!(Component::raw(ComponentType::SourcePrefix, vec![0x18]).is_err());
    /// ```
    pub fn raw(
        component_type: ComponentType,
        value: impl Into<Bytes>,
    ) -> Result<Self, ComponentError> {
        let value = value.into();
        let component = match component_type {
            ComponentType::DestinationPrefix | ComponentType::SourcePrefix => {
                return Err(ComponentError::PayloadMismatch(component_type))
            }
            ComponentType::IpProtocol => Self::IpProtocol(value),
            ComponentType::Port => Self::Port(value),
            ComponentType::DestinationPort => Self::DestinationPort(value),
            ComponentType::SourcePort => Self::SourcePort(value),
            ComponentType::IcmpType => Self::IcmpType(value),
            ComponentType::IcmpCode => Self::IcmpCode(value),
            ComponentType::TcpFlags => Self::TcpFlags(value),
            ComponentType::PacketLength => Self::PacketLength(value),
            ComponentType::Dscp => Self::Dscp(value),
            ComponentType::Fragment => Self::Fragment(value),
        };
        Ok(component)
    }

    /// Returns the type of the component.
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::DestinationPrefix(_) => ComponentType::DestinationPrefix,
            Self::SourcePrefix(_) => ComponentType::SourcePrefix,
            Self::IpProtocol(_) => ComponentType::IpProtocol,
            Self::Port(_) => ComponentType::Port,
            Self::DestinationPort(_) => ComponentType::DestinationPort,
            Self::SourcePort(_) => ComponentType::SourcePort,
            Self::IcmpType(_) => ComponentType::IcmpType,
            Self::IcmpCode(_) => ComponentType::IcmpCode,
            Self::TcpFlags(_) => ComponentType::TcpFlags,
            Self::PacketLength(_) => ComponentType::PacketLength,
            Self::Dscp(_) => ComponentType::Dscp,
            Self::Fragment(_) => ComponentType::Fragment,
        }
    }

    /// Returns a view of the value carried by the component.
    pub fn payload(&self) -> Payload<'_> {
        match self {
            Self::DestinationPrefix(prefix) | Self::SourcePrefix(prefix) => Payload::Prefix(prefix),
            Self::IpProtocol(value)
            | Self::Port(value)
            | Self::DestinationPort(value)
            | Self::SourcePort(value)
            | Self::IcmpType(value)
            | Self::IcmpCode(value)
            | Self::TcpFlags(value)
            | Self::PacketLength(value)
            | Self::Dscp(value)
            | Self::Fragment(value) => Payload::Raw(value),
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.component_type())?;
        match self.payload() {
            Payload::Prefix(prefix) => write!(f, "{prefix}"),
            Payload::Raw(value) => {
                f.write_str("0x")?;
                value.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{param_test, parse};

    use super::*;

    #[test]
    fn component_type_round_trips_through_byte() {
        for byte in 1..=12u8 {
            let component_type = ComponentType::from_byte(byte).unwrap();
            assert_eq!(u8::from(component_type), byte);
        }
    }

    #[test]
    fn component_types_order_by_value() {
        assert!(ComponentType::DestinationPrefix < ComponentType::SourcePrefix);
        assert!(ComponentType::Port < ComponentType::DestinationPort);
        assert!(ComponentType::Dscp < ComponentType::Fragment);
    }

    param_test! {
        identifies_prefix_types: [
            destination_prefix: (ComponentType::DestinationPrefix, true),
            source_prefix: (ComponentType::SourcePrefix, true),
            ip_protocol: (ComponentType::IpProtocol, false),
            fragment: (ComponentType::Fragment, false),
        ]
    }
    fn identifies_prefix_types(component_type: ComponentType, expected: bool) {
        assert_eq!(component_type.is_prefix(), expected);
    }

    #[test]
    fn prefix_constructor_rejects_raw_types() {
        assert_eq!(
            Component::prefix(ComponentType::Port, parse!("192.0.2.0/24")),
            Err(ComponentError::PayloadMismatch(ComponentType::Port))
        );
    }

    #[test]
    fn raw_constructor_rejects_prefix_types() {
        assert_eq!(
            Component::raw(ComponentType::DestinationPrefix, vec![0x18, 0xc0]),
            Err(ComponentError::PayloadMismatch(
                ComponentType::DestinationPrefix
            ))
        );
    }

    #[test]
    fn raw_components_keep_their_type() {
        for byte in 3..=12u8 {
            let component_type = ComponentType::from_byte(byte).unwrap();
            let component = Component::raw(component_type, vec![0x81, byte]).unwrap();

            assert_eq!(component.component_type(), component_type);
            assert_eq!(component.payload(), Payload::Raw(&[0x81, byte]));
        }
    }

    #[test]
    fn prefix_components_expose_prefix() {
        let prefix: Prefix = parse!("198.51.100.0/24");
        let component = Component::prefix(ComponentType::SourcePrefix, prefix).unwrap();

        assert_eq!(component, Component::SourcePrefix(prefix));
        assert_eq!(component.payload(), Payload::Prefix(&prefix));
    }

    param_test! {
        displays_component: [
            destination: (
                Component::DestinationPrefix(parse!("192.0.2.0/24")),
                "destination-prefix 192.0.2.0/24"
            ),
            protocol: (
                Component::IpProtocol(Bytes::from_static(&[0x81, 0x06])),
                "ip-protocol 0x8106"
            ),
            empty_value: (Component::Dscp(Bytes::new()), "dscp 0x"),
        ]
    }
    fn displays_component(component: Component, expected: &str) {
        assert_eq!(component.to_string(), expected);
    }
}
