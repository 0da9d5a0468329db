//! FlowSpec rules under validation and the unicast routes they are correlated with.

use std::{
    fmt::{self, Display, Formatter},
    net::Ipv4Addr,
    slice,
};

use crate::address::{Asn, Prefix};

/// The sequence of AS numbers traversed by a route, nearest AS first.
///
/// An empty AS_PATH denotes a route originated within the local AS (or confederation).
///
/// # Examples
///
/// ```
/// # use flowspec::{address::Asn, route::AsPath};
/// let path = AsPath::from(vec![Asn::new(65001), Asn::new(64512)]);
/// assert_eq!(path.left_most(), Some(Asn::new(65001)));
/// assert_eq!(path.to_string(), "65001 64512");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AsPath(Vec<Asn>);

impl AsPath {
    /// Returns an empty AS_PATH.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the left-most AS, which is the neighboring AS the route was learned from.
    pub fn left_most(&self) -> Option<Asn> {
        self.0.first().copied()
    }

    /// Returns true if the path contains no AS numbers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of AS numbers in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the AS numbers, left-most first.
    pub fn iter(&self) -> slice::Iter<'_, Asn> {
        self.0.iter()
    }
}

impl From<Vec<Asn>> for AsPath {
    fn from(value: Vec<Asn>) -> Self {
        Self(value)
    }
}

impl FromIterator<Asn> for AsPath {
    fn from_iter<T: IntoIterator<Item = Asn>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AsPath {
    type Item = &'a Asn;
    type IntoIter = slice::Iter<'a, Asn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, asn) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{asn}")?;
        }
        Ok(())
    }
}

/// A FlowSpec rule together with the attributes needed to decide its feasibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSpecRoute {
    /// The destination prefix component of the rule, if any
    pub destination_prefix: Option<Prefix>,
    /// Whether the rule was received over an external (eBGP) session
    pub from_ebgp: bool,
    /// The AS of the neighbor the rule was received from
    pub neighbor_as: Asn,
    /// The AS_PATH of the rule
    pub as_path: AsPath,
    /// The identifier of the speaker that originated the rule
    pub originator_id: Ipv4Addr,
}

/// The projection of a unicast RIB entry used to correlate FlowSpec rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicastRoute {
    /// The destination prefix of the route
    pub prefix: Prefix,
    /// The AS of the neighbor the route was received from
    pub neighbor_as: Asn,
    /// The AS_PATH of the route
    pub as_path: AsPath,
    /// The identifier of the speaker that originated the route
    pub originator_id: Ipv4Addr,
}
