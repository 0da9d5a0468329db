use std::{fmt::Debug, sync::Arc};

use serde::Deserialize;

use crate::route::AsPath;

/// Admission policy applied to the AS_PATH of FlowSpec rules (RFC 9117 §4.1 b.2.3).
///
/// This is an extension point: the configured policy is carried by [`Config`] but not yet
/// consulted during validation. [`PermitAll`] is the baseline policy.
pub trait AsPathPolicy: Debug + Send + Sync {
    /// Returns true if a rule with the given AS_PATH may be admitted.
    fn allows(&self, as_path: &AsPath) -> bool;
}

/// An [`AsPathPolicy`] that admits every AS_PATH.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermitAll;

impl AsPathPolicy for PermitAll {
    fn allows(&self, _as_path: &AsPath) -> bool {
        true
    }
}

/// Options relaxing or extending the feasibility checks.
///
/// The default configuration requires a destination prefix and enables the empty AS_PATH
/// relaxation, as does validating without any configuration. When deserialized, missing fields
/// take their default values.
///
/// # Examples
///
/// ```
/// # use flowspec::feasibility::Config;
/// let config = Config::default();
/// assert!(!config.allow_no_destination_prefix);
/// assert!(config.empty_as_path_relaxation);
/// assert!(config.as_path_policy.is_none());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Accept rules without a destination prefix component, which are then trivially feasible
    /// (RFC 8955 §6, "rule a MAY be relaxed by explicit configuration").
    pub allow_no_destination_prefix: bool,
    /// Skip the originator check for rules with an empty AS_PATH that were not received over
    /// eBGP, i.e. locally originated or confederation-internal rules (RFC 9117 §4.1 b.2.1).
    pub empty_as_path_relaxation: bool,
    /// AS_PATH admission policy (RFC 9117 §4.1 b.2.3), never deserialized.
    #[serde(skip)]
    pub as_path_policy: Option<Arc<dyn AsPathPolicy>>,
}

impl Config {
    /// Returns the configuration with the given AS_PATH admission policy.
    pub fn with_as_path_policy(mut self, policy: impl AsPathPolicy + 'static) -> Self {
        self.as_path_policy = Some(Arc::new(policy));
        self
    }

    /// Returns the configured AS_PATH admission policy, or [`PermitAll`] if none is set.
    pub fn policy(&self) -> &dyn AsPathPolicy {
        match &self.as_path_policy {
            Some(policy) => policy.as_ref(),
            None => &PermitAll,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_no_destination_prefix: false,
            empty_as_path_relaxation: true,
            as_path_policy: None,
        }
    }
}
