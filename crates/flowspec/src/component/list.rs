use std::{
    fmt::{self, Display, Formatter},
    slice,
};

use super::{Component, ComponentError, ComponentType};
use crate::address::Prefix;

/// The ordered list of components that identifies a FlowSpec rule.
///
/// This is the unit ranked by [`ordering::compare`][crate::ordering::compare]. Lists built with
/// [`ComponentList::new`] hold their components in strictly ascending type order, which is the
/// order in which components appear in the NLRI encoding and the precondition under which the
/// ordering is defined.
///
/// # Examples
///
/// ```
/// # use flowspec::component::{Component, ComponentList, ComponentType};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let list = ComponentList::new(vec![
///     Component::DestinationPrefix("192.0.2.0/24".parse()?),
///     Component::raw(ComponentType::IpProtocol, vec![0x81, 0x06])?,
/// ])?;
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.destination_prefix().map(ToString::to_string).as_deref(), Some("192.0.2.0/24"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentList {
    components: Vec<Component>,
}

impl ComponentList {
    /// Creates a component list, checking that components appear in strictly ascending type
    /// order.
    ///
    /// Errs with [`ComponentError::DuplicateType`] if a type is repeated, or with
    /// [`ComponentError::OutOfOrder`] if a component follows one of a higher type.
    pub fn new(components: Vec<Component>) -> Result<Self, ComponentError> {
        for pair in components.windows(2) {
            let previous = pair[0].component_type();
            let next = pair[1].component_type();

            if previous == next {
                tracing::debug!(%next, "rejecting component list with a repeated type");
                return Err(ComponentError::DuplicateType(next));
            }
            if previous > next {
                tracing::debug!(%previous, %next, "rejecting unordered component list");
                return Err(ComponentError::OutOfOrder { previous, next });
            }
        }

        Ok(Self { components })
    }

    /// Returns a list without any components, matching all traffic.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of components in the list.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the list contains no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns an iterator over the components, in ascending type order.
    pub fn iter(&self) -> slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// Returns the components as a slice.
    pub fn as_slice(&self) -> &[Component] {
        &self.components
    }

    /// Returns the component of the given type, if present.
    pub fn get(&self, component_type: ComponentType) -> Option<&Component> {
        self.components
            .binary_search_by_key(&component_type, Component::component_type)
            .ok()
            .map(|index| &self.components[index])
    }

    /// Returns the prefix of the destination prefix component, if present.
    pub fn destination_prefix(&self) -> Option<&Prefix> {
        match self.components.first() {
            Some(Component::DestinationPrefix(prefix)) => Some(prefix),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a ComponentList {
    type Item = &'a Component;
    type IntoIter = slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Component>> for ComponentList {
    type Error = ComponentError;

    fn try_from(value: Vec<Component>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for ComponentList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, component) in self.components.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{component}")?;
        }
        f.write_str("]")
    }
}
