/// Reasons for which a FlowSpec rule is rejected as infeasible.
///
/// Validation stops at the first failing check, so exactly one reason is reported even when a
/// rule violates several conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FeasibilityError {
    /// The rule has no destination prefix component, and none is tolerated by the configuration
    /// (RFC 8955 §6 a).
    #[error("destination prefix component not present; required by configuration (RFC 8955 6.a)")]
    NoDestinationPrefix,
    /// No unicast best path covers the rule's destination prefix.
    #[error("no unicast best path exists for the destination prefix")]
    NoBestUnicast,
    /// The rule's originator differs from that of the unicast best path (RFC 8955 §6 b, RFC 9117
    /// §4.1).
    #[error("originator does not match the unicast best path (RFC 8955 6.b / RFC 9117 4.1)")]
    OriginatorValidationFailed,
    /// A more-specific unicast route was learned from a neighbor AS other than that of the best
    /// path (RFC 8955 §6 c).
    #[error("more-specific unicast route learned from a different neighbor AS (RFC 8955 6.c)")]
    MoreSpecificFromOtherNeighbor,
    /// The rule was received over eBGP and its left-most AS differs from that of the unicast best
    /// path, or either AS_PATH is empty (RFC 9117 §4.2).
    #[error("left-most AS does not match the unicast best path (RFC 9117 4.2)")]
    LeftMostAsMismatch,
}
