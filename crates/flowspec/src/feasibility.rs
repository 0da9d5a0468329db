//! Feasibility validation of FlowSpec rules against the unicast RIB.
//!
//! A FlowSpec rule may only be installed if it was announced by a party entitled to filter
//! traffic towards its destination. RFC 8955 §6, as amended by RFC 9117 §4, establishes this by
//! correlating the rule with the unicast best path for its destination prefix. [`validate`]
//! performs the following checks in order, and rejects the rule at the first failing one:
//!
//! 1. the rule has a destination prefix, unless [`Config::allow_no_destination_prefix`] is set,
//!    in which case a rule without one is feasible;
//! 2. a unicast best path covers the destination, and was originated by the rule's originator;
//!    the originator check is skipped for rules with an empty AS_PATH that were not received
//!    over eBGP when [`Config::empty_as_path_relaxation`] is set;
//! 3. every unicast route more specific than the destination was learned from the best path's
//!    neighbor AS;
//! 4. for rules received over eBGP, the left-most AS of the rule matches that of the best path,
//!    and neither AS_PATH is empty.

mod config;
pub use config::{AsPathPolicy, Config, PermitAll};

mod error;
pub use error::FeasibilityError;

mod rib;
pub use rib::UnicastRib;

use crate::route::{AsPath, FlowSpecRoute};

/// Validates the feasibility of a FlowSpec rule against the unicast RIB.
///
/// Validating without a configuration is equivalent to validating with [`Config::default()`].
///
/// The RIB is queried at most once for the best path and once for more-specific routes. The
/// function has no other side effects and returns the same result for the same inputs and RIB
/// answers.
///
/// # Examples
///
/// ```
/// # use flowspec::{
/// #     address::{Asn, Prefix},
/// #     feasibility::{validate, FeasibilityError, UnicastRib},
/// #     route::{AsPath, FlowSpecRoute, UnicastRoute},
/// # };
/// struct EmptyRib;
///
/// impl UnicastRib for EmptyRib {
///     fn best_path(&self, _prefix: Prefix) -> Option<UnicastRoute> {
///         None
///     }
///
///     fn more_specifics(&self, _prefix: Prefix) -> Vec<UnicastRoute> {
///         vec![]
///     }
/// }
///
/// let rule = FlowSpecRoute {
///     destination_prefix: Some("192.0.2.0/24".parse().unwrap()),
///     from_ebgp: false,
///     neighbor_as: Asn::new(65001),
///     as_path: AsPath::from(vec![Asn::new(65001)]),
///     originator_id: "192.0.2.1".parse().unwrap(),
/// };
///
/// assert_eq!(validate(&rule, &EmptyRib, None), Err(FeasibilityError::NoBestUnicast));
/// ```
pub fn validate<R>(
    rule: &FlowSpecRoute,
    rib: &R,
    config: Option<&Config>,
) -> Result<(), FeasibilityError>
where
    R: UnicastRib + ?Sized,
{
    let default_config;
    let config = match config {
        Some(config) => config,
        None => {
            default_config = Config::default();
            &default_config
        }
    };

    let Some(destination) = rule.destination_prefix else {
        return if config.allow_no_destination_prefix {
            Ok(())
        } else {
            Err(FeasibilityError::NoDestinationPrefix)
        };
    };

    let best_path = rib
        .best_path(destination)
        .ok_or(FeasibilityError::NoBestUnicast)?;

    let trusted_internal =
        config.empty_as_path_relaxation && !rule.from_ebgp && rule.as_path.is_empty();
    if !trusted_internal && rule.originator_id != best_path.originator_id {
        return Err(FeasibilityError::OriginatorValidationFailed);
    }

    if rib
        .more_specifics(destination)
        .iter()
        .any(|route| route.neighbor_as != best_path.neighbor_as)
    {
        return Err(FeasibilityError::MoreSpecificFromOtherNeighbor);
    }

    if rule.from_ebgp {
        check_left_most_as(&rule.as_path, &best_path.as_path)?;
    }

    Ok(())
}

/// An empty best-path AS_PATH denotes a locally originated route, which an externally received
/// rule may never filter.
fn check_left_most_as(rule_path: &AsPath, best_path: &AsPath) -> Result<(), FeasibilityError> {
    match (rule_path.left_most(), best_path.left_most()) {
        (Some(rule_as), Some(best_as)) if rule_as == best_as => Ok(()),
        _ => Err(FeasibilityError::LeftMostAsMismatch),
    }
}
