//! Shared ownership of a problem layout
//!
//! One canonical [`Layout`] is shared read-mostly by every consumer of the
//! same problem. [`SharedLayout`] is an explicit reference-counted handle:
//! `Clone` shares the underlying layout, [`SharedLayout::copy`] deep-clones
//! it. View mutation through any handle is visible to every other handle of
//! the same layout, and the engine provides no internal locking; callers
//! that need divergent views must `copy()` first.

use crate::error::Result;
use crate::variables::config::VariableConfig;
use crate::variables::layout::{Layout, Partition};
use crate::variables::taxonomy::{ComponentTotals, Domain, ParameterType};
use crate::variables::view::{DomainMode, Slice, SliceSet, View};
use std::cell::{Ref, RefCell};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

/// Reference-counted handle to a problem layout.
///
/// # Examples
///
/// ```
/// use varview_rs::variables::config::VariableConfig;
/// use varview_rs::variables::shared::SharedLayout;
/// use varview_rs::variables::taxonomy::{Domain, ParameterType};
/// use varview_rs::variables::view::{DomainMode, View};
///
/// let mut config = VariableConfig::new();
/// config.set_count(ParameterType::ContinuousDesign, 3);
/// let handle = SharedLayout::new(config, View::all(DomainMode::Mixed)).unwrap();
/// assert_eq!(handle.active_slice(Domain::Continuous).count, 3);
/// ```
#[derive(Debug, Clone)]
pub struct SharedLayout {
    inner: Rc<RefCell<Layout>>,
}

impl SharedLayout {
    /// Build a layout from a problem configuration and wrap it in a handle.
    pub fn new(config: VariableConfig, view: View) -> Result<Self> {
        Ok(Self::from_layout(Layout::new(config, view)?))
    }

    fn from_layout(layout: Layout) -> Self {
        Self {
            inner: Rc::new(RefCell::new(layout)),
        }
    }

    /// Deep-clone the layout into an independent handle.
    pub fn copy(&self) -> SharedLayout {
        Self::from_layout(self.inner.borrow().clone())
    }

    /// Deep-clone the layout and immediately assign a new view.
    pub fn copy_with_view(&self, view: View) -> Result<SharedLayout> {
        let copied = self.copy();
        copied.set_view(view)?;
        Ok(copied)
    }

    /// Replace the layout wholesale from a new configuration.
    ///
    /// Every handle sharing this layout sees the new state.
    pub fn reshape(&self, config: VariableConfig, view: View) -> Result<()> {
        *self.inner.borrow_mut() = Layout::new(config, view)?;
        Ok(())
    }

    /// Read access to the underlying layout.
    ///
    /// The borrow must be released before any mutating call on a handle to
    /// the same layout.
    pub fn layout(&self) -> Ref<'_, Layout> {
        self.inner.borrow()
    }

    /// The current view.
    pub fn view(&self) -> View {
        self.inner.borrow().view()
    }

    /// Switch the view; offsets cached in this layout change for every
    /// handle sharing it.
    pub fn set_view(&self, view: View) -> Result<()> {
        self.inner.borrow_mut().set_view(view)
    }

    /// The layout's fixed domain mode.
    pub fn mode(&self) -> DomainMode {
        self.inner.borrow().mode()
    }

    /// Per-(role, domain) totals for the whole problem.
    pub fn component_totals(&self) -> ComponentTotals {
        self.inner.borrow().component_totals()
    }

    /// Totals restricted to the active partition's roles.
    pub fn active_components_totals(&self) -> ComponentTotals {
        self.inner.borrow().active_components_totals()
    }

    /// Totals restricted to the inactive partition's roles.
    pub fn inactive_components_totals(&self) -> ComponentTotals {
        self.inner.borrow().inactive_components_totals()
    }

    /// The four per-domain slices of the active partition.
    pub fn active_slices(&self) -> SliceSet {
        self.inner.borrow().active_slices()
    }

    /// The four per-domain slices of the inactive partition, if any.
    pub fn inactive_slices(&self) -> Option<SliceSet> {
        self.inner.borrow().inactive_slices()
    }

    /// Active (offset, count) for one domain.
    pub fn active_slice(&self, domain: Domain) -> Slice {
        self.inner.borrow().active_slice(domain)
    }

    /// Inactive (offset, count) for one domain; zero when absent.
    pub fn inactive_slice(&self, domain: Domain) -> Slice {
        self.inner.borrow().inactive_slice(domain)
    }

    /// Post-relaxation continuous grand total.
    pub fn acv(&self) -> usize {
        self.inner.borrow().acv()
    }

    /// Post-relaxation discrete-int grand total.
    pub fn adiv(&self) -> usize {
        self.inner.borrow().adiv()
    }

    /// Discrete-string grand total.
    pub fn adsv(&self) -> usize {
        self.inner.borrow().adsv()
    }

    /// Post-relaxation discrete-real grand total.
    pub fn adrv(&self) -> usize {
        self.inner.borrow().adrv()
    }

    /// Labels of one domain array, addressed by (start, count).
    pub fn labels(&self, domain: Domain, start: usize, count: usize) -> Result<Vec<String>> {
        Ok(self.inner.borrow().labels(domain, start, count)?.to_vec())
    }

    /// Fine-grained types of one domain array, addressed by (start, count).
    pub fn types(
        &self,
        domain: Domain,
        start: usize,
        count: usize,
    ) -> Result<Vec<ParameterType>> {
        Ok(self.inner.borrow().types(domain, start, count)?.to_vec())
    }

    /// 1-based canonical ids of one domain array, addressed by (start, count).
    pub fn ids(&self, domain: Domain, start: usize, count: usize) -> Result<Vec<usize>> {
        Ok(self.inner.borrow().ids(domain, start, count)?.to_vec())
    }

    /// Canonical position of a partition-local continuous index.
    pub fn cv_index_to_all_index(&self, partition: Partition, local: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .cv_index_to_all_index(local)
    }

    /// Canonical position of a partition-local discrete-int index.
    pub fn div_index_to_all_index(&self, partition: Partition, local: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .div_index_to_all_index(local)
    }

    /// Canonical position of a partition-local discrete-string index.
    pub fn dsv_index_to_all_index(&self, partition: Partition, local: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .dsv_index_to_all_index(local)
    }

    /// Canonical position of a partition-local discrete-real index.
    pub fn drv_index_to_all_index(&self, partition: Partition, local: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .drv_index_to_all_index(local)
    }

    /// Partition-local continuous index of a canonical position.
    pub fn all_index_to_cv_index(&self, partition: Partition, all_index: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .all_index_to_cv_index(all_index)
    }

    /// Partition-local discrete-int index of a canonical position.
    pub fn all_index_to_div_index(&self, partition: Partition, all_index: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .all_index_to_div_index(all_index)
    }

    /// Partition-local discrete-string index of a canonical position.
    pub fn all_index_to_dsv_index(&self, partition: Partition, all_index: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .all_index_to_dsv_index(all_index)
    }

    /// Partition-local discrete-real index of a canonical position.
    pub fn all_index_to_drv_index(&self, partition: Partition, all_index: usize) -> Result<usize> {
        self.inner
            .borrow()
            .translator(partition)
            .all_index_to_drv_index(all_index)
    }

    /// One bit per canonical position: membership in a partition.
    pub fn membership_mask(&self, partition: Partition) -> Vec<bool> {
        self.inner.borrow().translator(partition).membership_mask()
    }

    /// Serialize the layout to a JSON string.
    ///
    /// The persisted form carries the configuration, view pair, component
    /// totals, both relaxation masks, and the four label arrays; types and
    /// canonical ids are recomputed on load.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&*self.inner.borrow())?;
        Ok(json)
    }

    /// Reconstruct a handle from a JSON string.
    pub fn from_json(json: &str) -> Result<SharedLayout> {
        let mut layout: Layout = serde_json::from_str(json)?;
        layout.rebuild()?;
        Ok(Self::from_layout(layout))
    }

    /// Save the layout to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &*self.inner.borrow())?;
        Ok(())
    }

    /// Load a handle from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SharedLayout> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}
