//! Relaxation masks over the canonical discrete sequences
//!
//! Relaxed domain mode reclassifies eligible discrete parameters into the
//! continuous domain so algorithms that cannot handle discreteness still see
//! them. Eligibility is per instance: a mask bit is set when the instance is
//! reclassified. Bit positions follow canonical role-major, type-minor order
//! over the discrete-int sequence and, separately, the discrete-real
//! sequence; every downstream offset computation advances through these
//! masks by pre-relaxation instance counts.

use crate::variables::config::VariableConfig;
use crate::variables::taxonomy::{ComponentTotals, Domain, ParameterType, Role};
use crate::variables::view::DomainMode;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which discrete instances move to the continuous domain under relaxation.
///
/// Both masks are empty when the problem never uses relaxed mode; otherwise
/// `relaxed_int` is sized to the discrete-int grand total and `relaxed_real`
/// to the discrete-real grand total. Immutable once resolved; a reshape
/// resolves a fresh pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxationMasks {
    relaxed_int: Vec<bool>,
    relaxed_real: Vec<bool>,
}

impl RelaxationMasks {
    /// Empty masks: nothing relaxed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve the masks for a problem configuration.
    ///
    /// Mixed mode needs no reclassification and yields empty masks. Relaxed
    /// mode walks the discrete-int and discrete-real catalogue sequences in
    /// canonical order, setting a bit when the instance's categorical flag
    /// is absent or false. Discrete interval uncertain instances bypass the
    /// flag and are always relaxed.
    pub fn resolve(
        config: &VariableConfig,
        totals: &ComponentTotals,
        mode: DomainMode,
    ) -> RelaxationMasks {
        if mode == DomainMode::Mixed {
            return RelaxationMasks::none();
        }

        let mut relaxed_int = Vec::with_capacity(totals.domain_total(Domain::DiscreteInt));
        let mut relaxed_real = Vec::with_capacity(totals.domain_total(Domain::DiscreteReal));

        for role in Role::ALL {
            for ptype in ParameterType::ALL.iter().filter(|t| t.role() == role) {
                let mask = match ptype.domain() {
                    Domain::DiscreteInt => &mut relaxed_int,
                    Domain::DiscreteReal => &mut relaxed_real,
                    _ => continue,
                };
                let bypass = ptype.relax_ignores_categorical();
                for categorical in config.categorical_for(*ptype) {
                    mask.push(bypass || !categorical);
                }
            }
        }

        debug_assert_eq!(relaxed_int.len(), totals.domain_total(Domain::DiscreteInt));
        debug_assert_eq!(relaxed_real.len(), totals.domain_total(Domain::DiscreteReal));

        RelaxationMasks {
            relaxed_int,
            relaxed_real,
        }
    }

    /// Whether no instance anywhere is relaxed.
    pub fn is_empty(&self) -> bool {
        self.relaxed_int.is_empty() && self.relaxed_real.is_empty()
    }

    /// Bit at one canonical discrete-int position; false when the mask is
    /// empty (nothing relaxed).
    pub fn int_bit(&self, pos: usize) -> bool {
        self.relaxed_int.get(pos).copied().unwrap_or(false)
    }

    /// Bit at one canonical discrete-real position.
    pub fn real_bit(&self, pos: usize) -> bool {
        self.relaxed_real.get(pos).copied().unwrap_or(false)
    }

    /// Number of set bits in a discrete-int mask segment.
    pub fn int_bits_set_in(&self, range: Range<usize>) -> usize {
        range.filter(|p| self.int_bit(*p)).count()
    }

    /// Number of set bits in a discrete-real mask segment.
    pub fn real_bits_set_in(&self, range: Range<usize>) -> usize {
        range.filter(|p| self.real_bit(*p)).count()
    }

    /// The full discrete-int mask.
    pub fn relaxed_int(&self) -> &[bool] {
        &self.relaxed_int
    }

    /// The full discrete-real mask.
    pub fn relaxed_real(&self) -> &[bool] {
        &self.relaxed_real
    }
}
