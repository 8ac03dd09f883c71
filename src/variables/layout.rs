//! Problem layout: the resolved, immutable core plus the current view
//!
//! A [`Layout`] is built once per problem from a [`VariableConfig`] and an
//! initial [`View`]. Component totals, relaxation masks, and the
//! materialized arrays are fixed at construction (a reshape builds a whole
//! new layout); the view is the only run-time mutable state, and every view
//! change re-resolves the cached active/inactive slices.

use crate::error::{Result, VarViewError};
use crate::variables::config::VariableConfig;
use crate::variables::index::IndexTranslator;
use crate::variables::materialize::{materialize, MaterializedArrays};
use crate::variables::relaxation::RelaxationMasks;
use crate::variables::taxonomy::{ComponentTotals, Domain, ParameterType};
use crate::variables::view::{resolve_view, DomainMode, RoleSet, Slice, SliceSet, View};
use serde::{Deserialize, Serialize};

/// Which partition of the current view an index translation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    /// The view's active roles.
    Active,
    /// The view's inactive roles (empty when the view has none).
    Inactive,
    /// Every role not in the active partition.
    Complement,
    /// Every role.
    All,
}

/// The resolved variable layout of one problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    config: VariableConfig,
    totals: ComponentTotals,
    masks: RelaxationMasks,
    view: View,
    arrays: MaterializedArrays,
    #[serde(skip)]
    active: SliceSet,
    #[serde(skip)]
    inactive: Option<SliceSet>,
}

impl Layout {
    /// Build the layout for a problem configuration under an initial view.
    ///
    /// The view's domain mode decides relaxation for the lifetime of the
    /// layout: masks are resolved here and never mutated afterwards.
    pub fn new(config: VariableConfig, view: View) -> Result<Self> {
        config.validate()?;
        let totals = config.component_totals();
        let masks = RelaxationMasks::resolve(&config, &totals, view.mode());
        let arrays = materialize(&config, &totals, &masks);
        let (active, inactive) = resolve_view(&view, &totals, &masks);
        Ok(Self {
            config,
            totals,
            masks,
            view,
            arrays,
            active,
            inactive,
        })
    }

    /// The current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// The layout's fixed domain mode.
    pub fn mode(&self) -> DomainMode {
        self.view.mode()
    }

    /// Switch the view and re-resolve the cached slices.
    ///
    /// The domain mode is fixed at construction because the materialized
    /// arrays depend on it; switching mode requires a reshape.
    pub fn set_view(&mut self, view: View) -> Result<()> {
        if view.mode() != self.view.mode() {
            return Err(VarViewError::ConfigurationError(format!(
                "domain mode is fixed at construction ({}); reshape to switch to {}",
                self.view.mode().as_str(),
                view.mode().as_str()
            )));
        }
        let (active, inactive) = resolve_view(&view, &self.totals, &self.masks);
        self.view = view;
        self.active = active;
        self.inactive = inactive;
        Ok(())
    }

    /// Per-(role, domain) totals for the whole problem.
    pub fn component_totals(&self) -> ComponentTotals {
        self.totals
    }

    /// Totals restricted to the active partition's roles.
    pub fn active_components_totals(&self) -> ComponentTotals {
        let roles = self.view.active_roles();
        self.totals.restricted(|r| roles.contains(r))
    }

    /// Totals restricted to the inactive partition's roles (all-zero when
    /// the view has no inactive partition).
    pub fn inactive_components_totals(&self) -> ComponentTotals {
        let roles = self.view.inactive_roles();
        self.totals.restricted(|r| roles.contains(r))
    }

    /// The relaxation masks resolved at construction.
    pub fn masks(&self) -> &RelaxationMasks {
        &self.masks
    }

    /// The four per-domain slices of the active partition.
    pub fn active_slices(&self) -> SliceSet {
        self.active
    }

    /// The four per-domain slices of the inactive partition, if any.
    pub fn inactive_slices(&self) -> Option<SliceSet> {
        self.inactive
    }

    /// Active (offset, count) for one domain.
    pub fn active_slice(&self, domain: Domain) -> Slice {
        self.active.get(domain)
    }

    /// Inactive (offset, count) for one domain; zero when absent.
    pub fn inactive_slice(&self, domain: Domain) -> Slice {
        self.inactive.map(|s| s.get(domain)).unwrap_or_default()
    }

    /// Post-relaxation continuous grand total (the materialized cv length).
    pub fn acv(&self) -> usize {
        self.arrays.cv.len()
    }

    /// Post-relaxation discrete-int grand total.
    pub fn adiv(&self) -> usize {
        self.arrays.div.len()
    }

    /// Discrete-string grand total.
    pub fn adsv(&self) -> usize {
        self.arrays.dsv.len()
    }

    /// Post-relaxation discrete-real grand total.
    pub fn adrv(&self) -> usize {
        self.arrays.drv.len()
    }

    /// Role membership of one partition of the current view.
    pub fn partition_roles(&self, partition: Partition) -> RoleSet {
        match partition {
            Partition::Active => self.view.active_roles(),
            Partition::Inactive => self.view.inactive_roles(),
            Partition::Complement => self.view.active_roles().complement(),
            Partition::All => RoleSet::all(),
        }
    }

    /// An index translator for one partition of the current view.
    pub fn translator(&self, partition: Partition) -> IndexTranslator<'_> {
        IndexTranslator::new(
            self.partition_roles(partition),
            self.view.mode(),
            &self.totals,
            &self.masks,
        )
    }

    /// Read-only label slice of one domain array.
    pub fn labels(&self, domain: Domain, start: usize, count: usize) -> Result<&[String]> {
        self.check_slice(domain, start, count)?;
        Ok(&self.arrays.get(domain).labels[start..start + count])
    }

    /// Read-only fine-grained type slice of one domain array.
    pub fn types(&self, domain: Domain, start: usize, count: usize) -> Result<&[ParameterType]> {
        self.check_slice(domain, start, count)?;
        Ok(&self.arrays.get(domain).types[start..start + count])
    }

    /// Read-only 1-based canonical id slice of one domain array.
    pub fn ids(&self, domain: Domain, start: usize, count: usize) -> Result<&[usize]> {
        self.check_slice(domain, start, count)?;
        Ok(&self.arrays.get(domain).ids[start..start + count])
    }

    fn check_slice(&self, domain: Domain, start: usize, count: usize) -> Result<()> {
        let len = self.arrays.get(domain).len();
        if start + count > len {
            return Err(VarViewError::IndexOutOfRange(format!(
                "{} slice ({}, {}) exceeds array length {}",
                domain.as_str(),
                start,
                count,
                len
            )));
        }
        Ok(())
    }

    /// Restore the state serde skips: recompute types/ids from the restored
    /// configuration and masks, and re-resolve the cached slices.
    ///
    /// Persisted labels are kept as-is (they may be user labels); only
    /// their lengths are checked against the recomputed arrays.
    pub(crate) fn rebuild(&mut self) -> Result<()> {
        self.config.validate()?;
        // Serde bypasses View::new; re-run its validation on the restored pair.
        self.view = View::new(self.view.active(), self.view.inactive())?;
        if self.totals != self.config.component_totals() {
            return Err(VarViewError::InvalidInput(
                "persisted component totals disagree with the persisted configuration".to_string(),
            ));
        }
        if self.masks != RelaxationMasks::resolve(&self.config, &self.totals, self.view.mode()) {
            return Err(VarViewError::InvalidInput(
                "persisted relaxation masks disagree with the persisted configuration".to_string(),
            ));
        }
        let fresh = materialize(&self.config, &self.totals, &self.masks);
        for domain in Domain::ALL {
            let persisted = self.arrays.get(domain).labels.len();
            let expected = fresh.get(domain).len();
            if persisted != expected {
                return Err(VarViewError::InvalidInput(format!(
                    "persisted {} labels ({}) disagree with recomputed length {}",
                    domain.as_str(),
                    persisted,
                    expected
                )));
            }
        }
        self.arrays.cv.types = fresh.cv.types;
        self.arrays.cv.ids = fresh.cv.ids;
        self.arrays.div.types = fresh.div.types;
        self.arrays.div.ids = fresh.div.ids;
        self.arrays.dsv.types = fresh.dsv.types;
        self.arrays.dsv.ids = fresh.dsv.ids;
        self.arrays.drv.types = fresh.drv.types;
        self.arrays.drv.ids = fresh.drv.ids;

        let (active, inactive) = resolve_view(&self.view, &self.totals, &self.masks);
        self.active = active;
        self.inactive = inactive;
        Ok(())
    }
}
