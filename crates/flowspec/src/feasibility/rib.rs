use crate::{address::Prefix, route::UnicastRoute};

/// Read-only access to the local unicast routing table.
///
/// Route selection is entirely the responsibility of the implementation. Validation only ever
/// reads from the RIB, so an implementation shared between threads only needs to support
/// concurrent reads.
pub trait UnicastRib {
    /// Returns the best path used to forward traffic towards `prefix`, as chosen by
    /// longest-prefix match and best-path selection.
    fn best_path(&self, prefix: Prefix) -> Option<UnicastRoute>;

    /// Returns all routes strictly more specific than `prefix`, in any order.
    fn more_specifics(&self, prefix: Prefix) -> Vec<UnicastRoute>;
}

