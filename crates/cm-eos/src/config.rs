//! Explicit evaluation settings.

use crate::critical::CriticalConfig;
use crate::cubic::DEFAULT_NEAR_CRITICAL_REL_TOL;
use crate::family::EosFamily;
use crate::mixing::MixingRule;

/// Everything that selects how a state is evaluated.
///
/// Passed by value into [`crate::Evaluator`]; nothing is read from process-wide
/// settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EosConfig {
    pub family: EosFamily,
    pub mixing_rule: MixingRule,
    /// Interaction-table scope; `None` uses the family name.
    pub interaction_scope: Option<String>,
    pub near_critical_rel_tol: f64,
    pub critical: CriticalConfig,
}

impl Default for EosConfig {
    fn default() -> Self {
        Self {
            family: EosFamily::Srk,
            mixing_rule: MixingRule::Classic,
            interaction_scope: None,
            near_critical_rel_tol: DEFAULT_NEAR_CRITICAL_REL_TOL,
            critical: CriticalConfig::default(),
        }
    }
}

impl EosConfig {
    pub fn new(family: EosFamily, mixing_rule: MixingRule) -> Self {
        Self {
            family,
            mixing_rule,
            ..Self::default()
        }
    }

    pub fn with_interaction_scope(mut self, scope: impl Into<String>) -> Self {
        self.interaction_scope = Some(scope.into());
        self
    }

    /// Key used for interaction-table lookups.
    pub fn scope_name(&self) -> &str {
        self.interaction_scope
            .as_deref()
            .unwrap_or_else(|| self.family.name())
    }
}
