//! Precedence ordering of FlowSpec rules, as per RFC 8955 §5.1.
//!
//! When several FlowSpec rules match the same traffic, the rule with the highest precedence is
//! applied. Precedence is decided on the rules' [`ComponentList`]s: in short, the more specific
//! rule wins. [`compare`] decides between two lists and [`sort`] orders a set of lists from
//! highest to lowest precedence.
//!
//! The comparison walks both lists position by position:
//!
//! 1. a list with more components precedes one with fewer;
//! 2. at the first position whose component types differ, the lower type precedes;
//! 3. for prefix components of the same type, a longer prefix precedes a shorter prefix that
//!    contains it, and among prefixes of equal length the lower address precedes;
//! 4. for other components of the same type, the value bytes are compared lexicographically and
//!    the lower value precedes; if one value extends the other, the longer value precedes.
//!
//! Prefixes of different lengths that do not contain one another decide nothing, and the walk
//! continues with the next position. Precedence is therefore not transitive over lists whose
//! prefixes are disjoint at an otherwise deciding position.

use std::cmp::Ordering;

use crate::{
    address::Prefix,
    component::{ComponentList, Payload},
};

/// The outcome of comparing two FlowSpec component lists.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precedence {
    /// The left-hand (first) list has precedence.
    Left = -1,
    /// Neither list has precedence.
    Equal = 0,
    /// The right-hand (second) list has precedence.
    Right = 1,
}

impl Precedence {
    /// Returns the outcome of the comparison with both operands swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowspec::ordering::Precedence;
    /// assert_eq!(Precedence::Left.reverse(), Precedence::Right);
    /// assert_eq!(Precedence::Equal.reverse(), Precedence::Equal);
    /// ```
    pub const fn reverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Equal => Self::Equal,
            Self::Right => Self::Left,
        }
    }

    /// Returns -1, 0, or 1 when the left list, neither, or the right list has precedence.
    pub const fn to_i8(self) -> i8 {
        self as i8
    }
}

/// Converts to an [`Ordering`] under which higher-precedence lists sort first.
impl From<Precedence> for Ordering {
    fn from(value: Precedence) -> Self {
        match value {
            Precedence::Left => Ordering::Less,
            Precedence::Equal => Ordering::Equal,
            Precedence::Right => Ordering::Greater,
        }
    }
}

/// Compares two component lists according to RFC 8955 §5.1.
///
/// Both lists are expected to hold their components in strictly ascending type order, as
/// guaranteed by [`ComponentList::new`].
///
/// # Examples
///
/// ```
/// # use flowspec::{component::{Component, ComponentList}, ordering::{compare, Precedence}};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let narrow = ComponentList::new(vec![Component::DestinationPrefix("192.0.2.0/24".parse()?)])?;
/// let wide = ComponentList::new(vec![Component::DestinationPrefix("192.0.0.0/16".parse()?)])?;
///
/// assert_eq!(compare(&narrow, &wide), Precedence::Left);
/// assert_eq!(compare(&wide, &narrow), Precedence::Right);
/// # Ok(())
/// # }
/// ```
pub fn compare(a: &ComponentList, b: &ComponentList) -> Precedence {
    match a.len().cmp(&b.len()) {
        Ordering::Greater => return Precedence::Left,
        Ordering::Less => return Precedence::Right,
        Ordering::Equal => (),
    }

    for (index, (left, right)) in a.iter().zip(b.iter()).enumerate() {
        match left.component_type().cmp(&right.component_type()) {
            Ordering::Less => return Precedence::Left,
            Ordering::Greater => return Precedence::Right,
            Ordering::Equal => (),
        }

        let decision = match (left.payload(), right.payload()) {
            (Payload::Prefix(left), Payload::Prefix(right)) => {
                let decision = compare_prefixes(left, right);
                if decision.is_none() && left.bits() != right.bits() {
                    tracing::trace!(
                        index,
                        %left,
                        %right,
                        "disjoint prefixes decide no precedence, continuing"
                    );
                }
                decision
            }
            (Payload::Raw(left), Payload::Raw(right)) => compare_values(left, right),
            _ => unreachable!("components of the same type carry the same kind of payload"),
        };

        if let Some(precedence) = decision {
            return precedence;
        }
    }

    Precedence::Equal
}

/// Sorts component lists in place from highest to lowest precedence.
///
/// See [`sort_by_key`] for details on the sort.
pub fn sort(lists: &mut [ComponentList]) {
    sort_by_key(lists, |list| list)
}

/// Sorts items in place from highest to lowest precedence of the component list returned by
/// `key`.
///
/// The sort is stable and only ever exchanges neighbouring items, after comparing them with
/// [`compare`]. It is well defined even where precedence is not transitive: on return, no item
/// is preceded by a neighbour over which it has precedence.
///
/// # Examples
///
/// ```
/// # use flowspec::{component::{Component, ComponentList}, ordering::sort_by_key};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// struct Rule {
///     name: &'static str,
///     key: ComponentList,
/// }
///
/// let mut rules = vec![
///     Rule {
///         name: "wide",
///         key: ComponentList::new(vec![Component::DestinationPrefix("192.0.0.0/16".parse()?)])?,
///     },
///     Rule {
///         name: "narrow",
///         key: ComponentList::new(vec![Component::DestinationPrefix("192.0.2.0/24".parse()?)])?,
///     },
/// ];
/// sort_by_key(&mut rules, |rule| &rule.key);
///
/// assert_eq!(rules[0].name, "narrow");
/// # Ok(())
/// # }
/// ```
pub fn sort_by_key<T, F>(items: &mut [T], mut key: F)
where
    F: FnMut(&T) -> &ComponentList,
{
    for unsorted in 1..items.len() {
        let mut position = unsorted;
        while position > 0
            && compare(key(&items[position]), key(&items[position - 1])) == Precedence::Left
        {
            items.swap(position, position - 1);
            position -= 1;
        }
    }
}

fn compare_prefixes(left: &Prefix, right: &Prefix) -> Option<Precedence> {
    match left.bits().cmp(&right.bits()) {
        Ordering::Greater => right.contains(left.addr()).then_some(Precedence::Left),
        Ordering::Less => left.contains(right.addr()).then_some(Precedence::Right),
        Ordering::Equal => match left.addr().cmp(&right.addr()) {
            Ordering::Less => Some(Precedence::Left),
            Ordering::Greater => Some(Precedence::Right),
            Ordering::Equal => None,
        },
    }
}

fn compare_values(left: &[u8], right: &[u8]) -> Option<Precedence> {
    let first_difference = left.iter().zip(right).find(|(l, r)| l != r);

    match first_difference {
        Some((l, r)) if l < r => Some(Precedence::Left),
        Some(_) => Some(Precedence::Right),
        None => match left.len().cmp(&right.len()) {
            Ordering::Greater => Some(Precedence::Left),
            Ordering::Less => Some(Precedence::Right),
            Ordering::Equal => None,
        },
    }
}
