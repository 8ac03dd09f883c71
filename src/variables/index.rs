//! Bidirectional index translation between partitions and canonical order
//!
//! Canonical ("all") order is fixed by the configuration: role-major, and
//! within each role continuous, discrete-int, discrete-string, discrete-real
//! instances in catalogue order. A partition (active, inactive, complement,
//! or all) sees per-domain local indices; the translator maps those to
//! canonical cross-domain positions and back, accounting for relaxed
//! instances that live in the continuous sequence of their role.
//!
//! Out-of-range input is a caller bug and reports `IndexOutOfRange`; nothing
//! here clamps or wraps.

use crate::error::{Result, VarViewError};
use crate::variables::relaxation::RelaxationMasks;
use crate::variables::taxonomy::{ComponentTotals, Domain, Role};
use crate::variables::view::{role_segments, DomainMode, RoleSet};

/// Translator for one partition of one problem.
///
/// Borrows the problem constants; construct one per partition as needed,
/// they are free to build.
#[derive(Debug, Clone, Copy)]
pub struct IndexTranslator<'a> {
    roles: RoleSet,
    mode: DomainMode,
    totals: &'a ComponentTotals,
    masks: &'a RelaxationMasks,
}

impl<'a> IndexTranslator<'a> {
    pub fn new(
        roles: RoleSet,
        mode: DomainMode,
        totals: &'a ComponentTotals,
        masks: &'a RelaxationMasks,
    ) -> Self {
        Self {
            roles,
            mode,
            totals,
            masks,
        }
    }

    /// Canonical position of the `local`-th continuous instance of the
    /// partition.
    pub fn cv_index_to_all_index(&self, local: usize) -> Result<usize> {
        let mut remaining = local;
        let mut int_pos = 0;
        let mut real_pos = 0;

        for role in Role::ALL {
            let seg = role_segments(role, self.mode, self.totals, self.masks, int_pos, real_pos);
            if self.roles.contains(role) && remaining < seg.cv {
                let base = self.totals.role_offset(role);
                let native = self.totals.count(role, Domain::Continuous);
                if remaining < native {
                    return Ok(base + remaining);
                }
                // Relaxed instances follow the role's native continuous
                // block: ints first, then reals, in canonical order.
                let mut k = remaining - native;
                if k < seg.relaxed_int {
                    let p = nth_matching(k, int_pos..int_pos + seg.raw_int, |i| {
                        self.masks.int_bit(i)
                    })
                    .expect("popcount covers k");
                    return Ok(base + native + (p - int_pos));
                }
                k -= seg.relaxed_int;
                let q = nth_matching(k, real_pos..real_pos + seg.raw_real, |i| {
                    self.masks.real_bit(i)
                })
                .expect("popcount covers k");
                let dsv = self.totals.count(role, Domain::DiscreteString);
                return Ok(base + native + seg.raw_int + dsv + (q - real_pos));
            }
            if self.roles.contains(role) {
                remaining -= seg.cv;
            }
            int_pos += seg.raw_int;
            real_pos += seg.raw_real;
        }

        Err(self.out_of_range(Domain::Continuous, local))
    }

    /// Canonical position of the `local`-th discrete-int instance of the
    /// partition (relaxed instances are not addressable here).
    pub fn div_index_to_all_index(&self, local: usize) -> Result<usize> {
        let mut remaining = local;
        let mut int_pos = 0;
        let mut real_pos = 0;

        for role in Role::ALL {
            let seg = role_segments(role, self.mode, self.totals, self.masks, int_pos, real_pos);
            if self.roles.contains(role) && remaining < seg.div {
                let base = self.totals.role_offset(role);
                let native = self.totals.count(role, Domain::Continuous);
                let p = nth_matching(remaining, int_pos..int_pos + seg.raw_int, |i| {
                    !self.relaxes_int(i)
                })
                .expect("segment count covers remaining");
                return Ok(base + native + (p - int_pos));
            }
            if self.roles.contains(role) {
                remaining -= seg.div;
            }
            int_pos += seg.raw_int;
            real_pos += seg.raw_real;
        }

        Err(self.out_of_range(Domain::DiscreteInt, local))
    }

    /// Canonical position of the `local`-th discrete-string instance of the
    /// partition. Strings are never relaxed.
    pub fn dsv_index_to_all_index(&self, local: usize) -> Result<usize> {
        let mut remaining = local;
        for role in Role::ALL {
            let dsv = self.totals.count(role, Domain::DiscreteString);
            if self.roles.contains(role) {
                if remaining < dsv {
                    let base = self.totals.role_offset(role);
                    let native = self.totals.count(role, Domain::Continuous);
                    let ints = self.totals.count(role, Domain::DiscreteInt);
                    return Ok(base + native + ints + remaining);
                }
                remaining -= dsv;
            }
        }
        Err(self.out_of_range(Domain::DiscreteString, local))
    }

    /// Canonical position of the `local`-th discrete-real instance of the
    /// partition.
    pub fn drv_index_to_all_index(&self, local: usize) -> Result<usize> {
        let mut remaining = local;
        let mut int_pos = 0;
        let mut real_pos = 0;

        for role in Role::ALL {
            let seg = role_segments(role, self.mode, self.totals, self.masks, int_pos, real_pos);
            if self.roles.contains(role) && remaining < seg.drv {
                let base = self.totals.role_offset(role);
                let native = self.totals.count(role, Domain::Continuous);
                let ints = self.totals.count(role, Domain::DiscreteInt);
                let dsv = self.totals.count(role, Domain::DiscreteString);
                let q = nth_matching(remaining, real_pos..real_pos + seg.raw_real, |i| {
                    !self.relaxes_real(i)
                })
                .expect("segment count covers remaining");
                return Ok(base + native + ints + dsv + (q - real_pos));
            }
            if self.roles.contains(role) {
                remaining -= seg.drv;
            }
            int_pos += seg.raw_int;
            real_pos += seg.raw_real;
        }

        Err(self.out_of_range(Domain::DiscreteReal, local))
    }

    /// Inverse of [`cv_index_to_all_index`](Self::cv_index_to_all_index):
    /// the partition-local continuous index of a canonical position.
    pub fn all_index_to_cv_index(&self, all_index: usize) -> Result<usize> {
        let located = self.locate(all_index)?;
        match located.slot {
            Slot::Continuous(off) => Ok(located.cv_before + off),
            Slot::Int(pos) if self.relaxes_int(pos) => {
                let native = self.totals.count(located.role, Domain::Continuous);
                let before = self.masks.int_bits_set_in(located.int_pos..pos);
                Ok(located.cv_before + native + before)
            }
            Slot::Real(pos) if self.relaxes_real(pos) => {
                let seg = located.segments(self);
                let native = self.totals.count(located.role, Domain::Continuous);
                let before = self.masks.real_bits_set_in(located.real_pos..pos);
                Ok(located.cv_before + native + seg.relaxed_int + before)
            }
            _ => Err(self.not_in_domain(all_index, Domain::Continuous)),
        }
    }

    /// The partition-local discrete-int index of a canonical position.
    pub fn all_index_to_div_index(&self, all_index: usize) -> Result<usize> {
        let located = self.locate(all_index)?;
        match located.slot {
            Slot::Int(pos) if !self.relaxes_int(pos) => {
                let before = (located.int_pos..pos)
                    .filter(|i| !self.relaxes_int(*i))
                    .count();
                Ok(located.div_before + before)
            }
            _ => Err(self.not_in_domain(all_index, Domain::DiscreteInt)),
        }
    }

    /// The partition-local discrete-string index of a canonical position.
    pub fn all_index_to_dsv_index(&self, all_index: usize) -> Result<usize> {
        let located = self.locate(all_index)?;
        match located.slot {
            Slot::String(off) => Ok(located.dsv_before + off),
            _ => Err(self.not_in_domain(all_index, Domain::DiscreteString)),
        }
    }

    /// The partition-local discrete-real index of a canonical position.
    pub fn all_index_to_drv_index(&self, all_index: usize) -> Result<usize> {
        let located = self.locate(all_index)?;
        match located.slot {
            Slot::Real(pos) if !self.relaxes_real(pos) => {
                let before = (located.real_pos..pos)
                    .filter(|i| !self.relaxes_real(*i))
                    .count();
                Ok(located.drv_before + before)
            }
            _ => Err(self.not_in_domain(all_index, Domain::DiscreteReal)),
        }
    }

    /// One bit per canonical position: set iff the position's role belongs
    /// to the partition. Lets consumers rebuild canonical-order arrays from
    /// view-ordered fragments.
    pub fn membership_mask(&self) -> Vec<bool> {
        let mut mask = Vec::with_capacity(self.totals.total());
        for role in Role::ALL {
            let member = self.roles.contains(role);
            mask.extend(std::iter::repeat(member).take(self.totals.role_total(role)));
        }
        mask
    }

    fn relaxes_int(&self, pos: usize) -> bool {
        self.mode == DomainMode::Relaxed && self.masks.int_bit(pos)
    }

    fn relaxes_real(&self, pos: usize) -> bool {
        self.mode == DomainMode::Relaxed && self.masks.real_bit(pos)
    }

    /// Find the role and within-role slot of a canonical position, along
    /// with the partition-local per-domain counts accumulated over the
    /// preceding included roles.
    fn locate(&self, all_index: usize) -> Result<Located> {
        let mut cv_before = 0;
        let mut div_before = 0;
        let mut dsv_before = 0;
        let mut drv_before = 0;
        let mut int_pos = 0;
        let mut real_pos = 0;

        for role in Role::ALL {
            let base = self.totals.role_offset(role);
            let role_total = self.totals.role_total(role);
            let seg = role_segments(role, self.mode, self.totals, self.masks, int_pos, real_pos);

            if all_index < base + role_total {
                if !self.roles.contains(role) {
                    return Err(VarViewError::IndexOutOfRange(format!(
                        "canonical index {} belongs to the {} role, outside this partition",
                        all_index,
                        role.as_str()
                    )));
                }
                let mut off = all_index - base;
                let native = self.totals.count(role, Domain::Continuous);
                let ints = self.totals.count(role, Domain::DiscreteInt);
                let strings = self.totals.count(role, Domain::DiscreteString);
                let slot = if off < native {
                    Slot::Continuous(off)
                } else {
                    off -= native;
                    if off < ints {
                        Slot::Int(int_pos + off)
                    } else {
                        off -= ints;
                        if off < strings {
                            Slot::String(off)
                        } else {
                            Slot::Real(real_pos + off - strings)
                        }
                    }
                };
                return Ok(Located {
                    role,
                    slot,
                    cv_before,
                    div_before,
                    dsv_before,
                    drv_before,
                    int_pos,
                    real_pos,
                });
            }

            if self.roles.contains(role) {
                cv_before += seg.cv;
                div_before += seg.div;
                dsv_before += seg.dsv;
                drv_before += seg.drv;
            }
            int_pos += seg.raw_int;
            real_pos += seg.raw_real;
        }

        Err(VarViewError::IndexOutOfRange(format!(
            "canonical index {} >= total {}",
            all_index,
            self.totals.total()
        )))
    }

    fn out_of_range(&self, domain: Domain, local: usize) -> VarViewError {
        VarViewError::IndexOutOfRange(format!(
            "{} index {} outside the addressed partition ({} mode)",
            domain.as_str(),
            local,
            self.mode.as_str()
        ))
    }

    fn not_in_domain(&self, all_index: usize, domain: Domain) -> VarViewError {
        VarViewError::IndexOutOfRange(format!(
            "canonical index {} is not a {} member of this partition ({} mode)",
            all_index,
            domain.as_str(),
            self.mode.as_str()
        ))
    }
}

/// Within-role position of a canonical index. Int/Real carry the absolute
/// mask position of the instance.
enum Slot {
    Continuous(usize),
    Int(usize),
    String(usize),
    Real(usize),
}

struct Located {
    role: Role,
    slot: Slot,
    cv_before: usize,
    div_before: usize,
    dsv_before: usize,
    drv_before: usize,
    int_pos: usize,
    real_pos: usize,
}

impl Located {
    fn segments(&self, tr: &IndexTranslator<'_>) -> crate::variables::view::RoleSegments {
        role_segments(
            self.role,
            tr.mode,
            tr.totals,
            tr.masks,
            self.int_pos,
            self.real_pos,
        )
    }
}

/// Absolute position of the `n`-th index in `range` satisfying `pred`.
fn nth_matching<F: Fn(usize) -> bool>(n: usize, range: std::ops::Range<usize>, pred: F) -> Option<usize> {
    range.filter(|i| pred(*i)).nth(n)
}
