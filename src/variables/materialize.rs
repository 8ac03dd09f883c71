//! Materialization of the canonical per-domain label/type/id arrays
//!
//! One builder pass walks the catalogue in canonical order and emits into
//! four growable arrays per kind. The relaxation check is the only branch:
//! a discrete int/real instance whose mask bit is set is appended to the
//! continuous arrays instead of its native discrete arrays. Everything else
//! (ordering, id assignment) follows mechanically from the iteration order,
//! so the error-prone logic lives in exactly one place.

use crate::variables::config::VariableConfig;
use crate::variables::relaxation::RelaxationMasks;
use crate::variables::taxonomy::{ComponentTotals, Domain, ParameterType, Role};
use serde::{Deserialize, Serialize};

/// The parallel arrays for one domain.
///
/// Only labels are persisted; types and canonical ids are recomputed from
/// the restored configuration and masks on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainArrays {
    pub labels: Vec<String>,
    #[serde(skip)]
    pub types: Vec<ParameterType>,
    /// 1-based canonical ids, in this domain's post-relaxation order.
    #[serde(skip)]
    pub ids: Vec<usize>,
}

impl DomainArrays {
    fn push(&mut self, label: String, ptype: ParameterType, id: usize) {
        self.labels.push(label);
        self.types.push(ptype);
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The four per-domain parallel array sets in canonical role-major order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterializedArrays {
    pub cv: DomainArrays,
    pub div: DomainArrays,
    pub dsv: DomainArrays,
    pub drv: DomainArrays,
}

impl MaterializedArrays {
    /// The arrays for one domain.
    pub fn get(&self, domain: Domain) -> &DomainArrays {
        match domain {
            Domain::Continuous => &self.cv,
            Domain::DiscreteInt => &self.div,
            Domain::DiscreteString => &self.dsv,
            Domain::DiscreteReal => &self.drv,
        }
    }
}

/// Build the four parallel array sets for a problem.
///
/// Iteration is role-major, catalogue order within role, so within each
/// role the continuous arrays receive native continuous instances first,
/// then relaxed discrete-int instances, then relaxed discrete-real
/// instances. Ids are the 1-based canonical positions fixed by declaration
/// order; every id `1..=N` lands in exactly one domain array.
pub fn materialize(
    config: &VariableConfig,
    totals: &ComponentTotals,
    masks: &RelaxationMasks,
) -> MaterializedArrays {
    let mut out = MaterializedArrays::default();
    let mut int_cursor = 0;
    let mut real_cursor = 0;

    for role in Role::ALL {
        let base = totals.role_offset(role);
        let native = totals.count(role, Domain::Continuous);
        let ints = totals.count(role, Domain::DiscreteInt);
        let strings = totals.count(role, Domain::DiscreteString);

        // Canonical id cursors for the role's four domain bands.
        let mut cont_id = base;
        let mut int_id = base + native;
        let mut str_id = base + native + ints;
        let mut real_id = base + native + ints + strings;

        for ptype in ParameterType::ALL.iter().filter(|t| t.role() == role) {
            let labels = config.labels_for(*ptype);
            match ptype.domain() {
                Domain::Continuous => {
                    for label in labels {
                        cont_id += 1;
                        out.cv.push(label, *ptype, cont_id);
                    }
                }
                Domain::DiscreteString => {
                    for label in labels {
                        str_id += 1;
                        out.dsv.push(label, *ptype, str_id);
                    }
                }
                Domain::DiscreteInt => {
                    for label in labels {
                        int_id += 1;
                        let target = if masks.int_bit(int_cursor) {
                            &mut out.cv
                        } else {
                            &mut out.div
                        };
                        target.push(label, *ptype, int_id);
                        int_cursor += 1;
                    }
                }
                Domain::DiscreteReal => {
                    for label in labels {
                        real_id += 1;
                        let target = if masks.real_bit(real_cursor) {
                            &mut out.cv
                        } else {
                            &mut out.drv
                        };
                        target.push(label, *ptype, real_id);
                        real_cursor += 1;
                    }
                }
            }
        }
    }

    debug_assert_eq!(
        out.cv.len() + out.div.len() + out.dsv.len() + out.drv.len(),
        totals.total()
    );
    out
}
