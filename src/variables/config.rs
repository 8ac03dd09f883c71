//! Raw problem configuration consumed by the engine
//!
//! A [`VariableConfig`] carries what the parsing collaborator hands us:
//! per-type instance counts, optional per-instance labels, and per-instance
//! categorical flags for discrete parameters. Bounds and initial values are
//! opaque to this engine and never appear here.

use crate::error::{Result, VarViewError};
use crate::variables::taxonomy::{ComponentTotals, Domain, ParameterType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-type instance counts, labels, and categorical flags for a problem.
///
/// Stored in ordered maps so iteration follows the canonical catalogue
/// order; the ordering of every derived array in the engine depends on it.
///
/// # Examples
///
/// ```
/// use varview_rs::variables::config::VariableConfig;
/// use varview_rs::variables::taxonomy::ParameterType;
///
/// let mut config = VariableConfig::new();
/// config.set_count(ParameterType::ContinuousDesign, 2);
/// config.set_count(ParameterType::DiscreteDesignRange, 1);
/// assert_eq!(config.count(ParameterType::ContinuousDesign), 2);
/// assert_eq!(config.component_totals().total(), 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableConfig {
    /// Instance count per parameter type; absent means zero.
    counts: BTreeMap<ParameterType, usize>,

    /// User-supplied labels per type; absent means generated defaults.
    labels: BTreeMap<ParameterType, Vec<String>>,

    /// Per-instance categorical flags for discrete types; absent means
    /// all-false (relaxable).
    categorical: BTreeMap<ParameterType, Vec<bool>>,
}

impl VariableConfig {
    /// Create an empty configuration (every count zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instance count for a parameter type.
    pub fn set_count(&mut self, ptype: ParameterType, count: usize) {
        if count == 0 {
            self.counts.remove(&ptype);
        } else {
            self.counts.insert(ptype, count);
        }
    }

    /// Set user labels for a parameter type.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the label list length matches the type's instance count,
    /// or a `ConfigurationError` otherwise.
    pub fn set_labels(&mut self, ptype: ParameterType, labels: Vec<String>) -> Result<()> {
        let count = self.count(ptype);
        if labels.len() != count {
            return Err(VarViewError::ConfigurationError(format!(
                "{:?}: {} labels supplied for {} instances",
                ptype,
                labels.len(),
                count
            )));
        }
        self.labels.insert(ptype, labels);
        Ok(())
    }

    /// Set per-instance categorical flags for a discrete parameter type.
    ///
    /// A categorical instance keeps its discrete domain under relaxation.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success; a `ConfigurationError` if the type is not
    /// discrete-int/discrete-real or the flag list length does not match the
    /// instance count.
    pub fn set_categorical(&mut self, ptype: ParameterType, flags: Vec<bool>) -> Result<()> {
        match ptype.domain() {
            Domain::DiscreteInt | Domain::DiscreteReal => {}
            domain => {
                return Err(VarViewError::ConfigurationError(format!(
                    "{:?}: categorical flags apply to discrete int/real types, not {}",
                    ptype,
                    domain.as_str()
                )));
            }
        }
        let count = self.count(ptype);
        if flags.len() != count {
            return Err(VarViewError::ConfigurationError(format!(
                "{:?}: {} categorical flags supplied for {} instances",
                ptype,
                flags.len(),
                count
            )));
        }
        self.categorical.insert(ptype, flags);
        Ok(())
    }

    /// Instance count for a parameter type (zero when unset).
    pub fn count(&self, ptype: ParameterType) -> usize {
        self.counts.get(&ptype).copied().unwrap_or(0)
    }

    /// Labels for a parameter type: user labels when supplied, otherwise
    /// generated `"{prefix}_{i}"` defaults with 1-based indices.
    pub fn labels_for(&self, ptype: ParameterType) -> Vec<String> {
        match self.labels.get(&ptype) {
            Some(labels) => labels.clone(),
            None => (1..=self.count(ptype))
                .map(|i| format!("{}_{}", ptype.label_prefix(), i))
                .collect(),
        }
    }

    /// Categorical flags for a discrete parameter type; all-false when the
    /// user supplied none.
    pub fn categorical_for(&self, ptype: ParameterType) -> Vec<bool> {
        match self.categorical.get(&ptype) {
            Some(flags) => flags.clone(),
            None => vec![false; self.count(ptype)],
        }
    }

    /// Check internal consistency: every supplied label or flag list must
    /// match its type's instance count, and categorical flags must belong
    /// to discrete int/real types.
    ///
    /// The mutators enforce this at write time; this exists for
    /// configurations restored from persisted state, which bypass them.
    pub fn validate(&self) -> Result<()> {
        for (ptype, labels) in &self.labels {
            if labels.len() != self.count(*ptype) {
                return Err(VarViewError::InvalidInput(format!(
                    "{:?}: {} labels for {} instances",
                    ptype,
                    labels.len(),
                    self.count(*ptype)
                )));
            }
        }
        for (ptype, flags) in &self.categorical {
            if !matches!(ptype.domain(), Domain::DiscreteInt | Domain::DiscreteReal) {
                return Err(VarViewError::InvalidInput(format!(
                    "{:?}: categorical flags on a {} type",
                    ptype,
                    ptype.domain().as_str()
                )));
            }
            if flags.len() != self.count(*ptype) {
                return Err(VarViewError::InvalidInput(format!(
                    "{:?}: {} categorical flags for {} instances",
                    ptype,
                    flags.len(),
                    self.count(*ptype)
                )));
            }
        }
        Ok(())
    }

    /// Aggregate the raw counts into per-(role, domain) component totals.
    ///
    /// A pure reduction over the static type -> (role, domain) map; the
    /// grand total always equals the sum of the raw counts.
    pub fn component_totals(&self) -> ComponentTotals {
        let mut totals = ComponentTotals::new();
        for (ptype, count) in &self.counts {
            totals.add(ptype.role(), ptype.domain(), *count);
        }
        totals
    }
}
