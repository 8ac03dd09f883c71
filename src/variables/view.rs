//! View specification and slice resolution
//!
//! A view names the parameters a consumer currently sees: an active
//! (role-selector, domain-mode) pair and an optional inactive pair. The
//! resolver turns a view into four per-domain (offset, count) slices over
//! the canonical domain-ordered arrays. Offsets under relaxed mode depend on
//! the relaxation masks: every set bit moves one instance from its discrete
//! array into the continuous array.

use crate::error::{Result, VarViewError};
use crate::variables::relaxation::RelaxationMasks;
use crate::variables::taxonomy::{ComponentTotals, Domain, Role};
use serde::{Deserialize, Serialize};

/// Domain arrangement of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainMode {
    /// Continuous and discrete parameters stay in their native arrays.
    Mixed,

    /// Eligible discrete parameters are reclassified into the continuous
    /// array, per the relaxation masks.
    Relaxed,
}

impl DomainMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainMode::Mixed => "mixed",
            DomainMode::Relaxed => "relaxed",
        }
    }
}

/// Which roles a partition selects.
///
/// There is deliberately no `Empty` variant: an empty active partition is a
/// configuration error, and an empty inactive partition is expressed as
/// `None` on the [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSelector {
    All,
    Design,
    Aleatory,
    Epistemic,
    /// Aleatory and epistemic together.
    Uncertain,
    State,
}

impl RoleSelector {
    /// Whether this selector includes a role.
    pub fn includes(&self, role: Role) -> bool {
        match self {
            RoleSelector::All => true,
            RoleSelector::Design => role == Role::Design,
            RoleSelector::Aleatory => role == Role::Aleatory,
            RoleSelector::Epistemic => role == Role::Epistemic,
            RoleSelector::Uncertain => role == Role::Aleatory || role == Role::Epistemic,
            RoleSelector::State => role == Role::State,
        }
    }

    /// Whether two selectors share any role.
    pub fn overlaps(&self, other: &RoleSelector) -> bool {
        Role::ALL.iter().any(|r| self.includes(*r) && other.includes(*r))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleSelector::All => "all",
            RoleSelector::Design => "design",
            RoleSelector::Aleatory => "aleatory",
            RoleSelector::Epistemic => "epistemic",
            RoleSelector::Uncertain => "uncertain",
            RoleSelector::State => "state",
        }
    }
}

/// Arbitrary role membership set.
///
/// Selectors always cover a contiguous role range, but the complement of an
/// active partition need not (the complement of `Aleatory` is design,
/// epistemic, and state). The index translator therefore works with role
/// sets rather than selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet {
    members: [bool; 4],
}

impl RoleSet {
    /// The set a selector covers.
    pub fn from_selector(selector: RoleSelector) -> Self {
        let mut members = [false; 4];
        for role in Role::ALL {
            members[role.index()] = selector.includes(role);
        }
        Self { members }
    }

    /// Every role.
    pub fn all() -> Self {
        Self { members: [true; 4] }
    }

    /// No role.
    pub fn none() -> Self {
        Self { members: [false; 4] }
    }

    /// Roles not in this set.
    pub fn complement(&self) -> Self {
        let mut members = self.members;
        for m in &mut members {
            *m = !*m;
        }
        Self { members }
    }

    /// Whether a role belongs to the set.
    pub fn contains(&self, role: Role) -> bool {
        self.members[role.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.members.iter().all(|m| !m)
    }
}

/// One side of a view: a role selector plus a domain mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPartition {
    pub roles: RoleSelector,
    pub mode: DomainMode,
}

impl ViewPartition {
    pub fn new(roles: RoleSelector, mode: DomainMode) -> Self {
        Self { roles, mode }
    }
}

/// An active/inactive partition pair.
///
/// Validated at construction; an instance always satisfies:
/// - the active partition is present (no empty active view);
/// - an `All` active partition has no inactive partition;
/// - the inactive partition is never `All`;
/// - active and inactive selectors share no role;
/// - active and inactive domain modes match (a mixed/relaxed split would
///   count relaxed instances twice across the partitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    active: ViewPartition,
    inactive: Option<ViewPartition>,
}

impl View {
    /// Build a validated view.
    ///
    /// # Examples
    ///
    /// ```
    /// use varview_rs::variables::view::{DomainMode, RoleSelector, View, ViewPartition};
    ///
    /// let view = View::new(
    ///     ViewPartition::new(RoleSelector::Design, DomainMode::Mixed),
    ///     Some(ViewPartition::new(RoleSelector::Uncertain, DomainMode::Mixed)),
    /// )
    /// .unwrap();
    /// assert_eq!(view.active().roles, RoleSelector::Design);
    /// ```
    pub fn new(active: ViewPartition, inactive: Option<ViewPartition>) -> Result<Self> {
        if let Some(inactive) = inactive {
            if active.roles == RoleSelector::All {
                return Err(VarViewError::ConfigurationError(
                    "an all-roles active view admits no inactive view".to_string(),
                ));
            }
            if inactive.roles == RoleSelector::All {
                return Err(VarViewError::ConfigurationError(
                    "inactive view cannot select all roles".to_string(),
                ));
            }
            if active.roles.overlaps(&inactive.roles) {
                return Err(VarViewError::ConfigurationError(format!(
                    "active ({}) and inactive ({}) views overlap",
                    active.roles.as_str(),
                    inactive.roles.as_str()
                )));
            }
            if active.mode != inactive.mode {
                return Err(VarViewError::ConfigurationError(format!(
                    "active ({}) and inactive ({}) domain modes conflict",
                    active.mode.as_str(),
                    inactive.mode.as_str()
                )));
            }
        }
        Ok(Self { active, inactive })
    }

    /// An all-roles active view with no inactive partition.
    pub fn all(mode: DomainMode) -> Self {
        Self {
            active: ViewPartition::new(RoleSelector::All, mode),
            inactive: None,
        }
    }

    pub fn active(&self) -> ViewPartition {
        self.active
    }

    pub fn inactive(&self) -> Option<ViewPartition> {
        self.inactive
    }

    /// The single domain mode of the view (validation keeps active and
    /// inactive modes equal).
    pub fn mode(&self) -> DomainMode {
        self.active.mode
    }

    /// Role membership of the active partition.
    pub fn active_roles(&self) -> RoleSet {
        RoleSet::from_selector(self.active.roles)
    }

    /// Role membership of the inactive partition (empty when absent).
    pub fn inactive_roles(&self) -> RoleSet {
        match self.inactive {
            Some(p) => RoleSet::from_selector(p.roles),
            None => RoleSet::none(),
        }
    }
}

/// A contiguous (offset, count) range in one canonical domain array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub start: usize,
    pub count: usize,
}

impl Slice {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// One past the last selected position.
    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

/// The four per-domain slices a partition selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSet {
    pub cv: Slice,
    pub div: Slice,
    pub dsv: Slice,
    pub drv: Slice,
}

impl SliceSet {
    /// The slice for one domain.
    pub fn get(&self, domain: Domain) -> Slice {
        match domain {
            Domain::Continuous => self.cv,
            Domain::DiscreteInt => self.div,
            Domain::DiscreteString => self.dsv,
            Domain::DiscreteReal => self.drv,
        }
    }

    /// Total selected count across the four domains.
    pub fn total(&self) -> usize {
        self.cv.count + self.div.count + self.dsv.count + self.drv.count
    }
}

/// Per-domain counts for one role after mode adjustment.
///
/// Under relaxed mode, `cv` gains the role's set mask bits while `div` and
/// `drv` lose them; mask cursors always advance by the role's
/// pre-relaxation counts. Shared between the view resolver and the index
/// translator so the error-prone arithmetic lives in one place.
pub(crate) struct RoleSegments {
    pub cv: usize,
    pub div: usize,
    pub dsv: usize,
    pub drv: usize,
    /// Pre-relaxation discrete-int count (mask cursor advance).
    pub raw_int: usize,
    /// Pre-relaxation discrete-real count (mask cursor advance).
    pub raw_real: usize,
    /// Set bits in the role's discrete-int mask segment.
    pub relaxed_int: usize,
}

pub(crate) fn role_segments(
    role: Role,
    mode: DomainMode,
    totals: &ComponentTotals,
    masks: &RelaxationMasks,
    int_pos: usize,
    real_pos: usize,
) -> RoleSegments {
    let cv = totals.count(role, Domain::Continuous);
    let div = totals.count(role, Domain::DiscreteInt);
    let dsv = totals.count(role, Domain::DiscreteString);
    let drv = totals.count(role, Domain::DiscreteReal);
    let (ri, rr) = match mode {
        DomainMode::Mixed => (0, 0),
        DomainMode::Relaxed => (
            masks.int_bits_set_in(int_pos..int_pos + div),
            masks.real_bits_set_in(real_pos..real_pos + drv),
        ),
    };
    RoleSegments {
        cv: cv + ri,
        div: div - ri,
        dsv,
        drv: drv - rr,
        raw_int: div,
        raw_real: drv,
        relaxed_int: ri,
    }
}

/// Resolve the four per-domain slices one partition selects.
///
/// Mixed mode reduces to plain cumulative sums of the preceding roles'
/// per-domain counts. Relaxed mode additionally shifts instances between
/// arrays per the mask bits; the `All` selector reproduces the
/// post-relaxation grand totals exactly.
pub fn resolve_partition(
    selector: RoleSelector,
    mode: DomainMode,
    totals: &ComponentTotals,
    masks: &RelaxationMasks,
) -> SliceSet {
    let mut start = [0usize; 4];
    let mut count = [0usize; 4];
    let mut int_pos = 0;
    let mut real_pos = 0;
    let mut seen = false;

    for role in Role::ALL {
        let seg = role_segments(role, mode, totals, masks, int_pos, real_pos);
        let lens = [seg.cv, seg.div, seg.dsv, seg.drv];
        if selector.includes(role) {
            seen = true;
            for (c, len) in count.iter_mut().zip(lens) {
                *c += len;
            }
        } else if !seen {
            for (s, len) in start.iter_mut().zip(lens) {
                *s += len;
            }
        }
        int_pos += seg.raw_int;
        real_pos += seg.raw_real;
    }

    SliceSet {
        cv: Slice::new(start[0], count[0]),
        div: Slice::new(start[1], count[1]),
        dsv: Slice::new(start[2], count[2]),
        drv: Slice::new(start[3], count[3]),
    }
}

/// Resolve the active and inactive slices of a view against one set of
/// totals and masks.
pub fn resolve_view(
    view: &View,
    totals: &ComponentTotals,
    masks: &RelaxationMasks,
) -> (SliceSet, Option<SliceSet>) {
    let active = resolve_partition(view.active().roles, view.mode(), totals, masks);
    let inactive = view
        .inactive()
        .map(|p| resolve_partition(p.roles, p.mode, totals, masks));
    (active, inactive)
}
