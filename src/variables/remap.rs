//! Linear-constraint coefficient remapping across view changes
//!
//! Linear-constraint owners key their coefficient matrices to the active
//! ordering of the view that was current when the constraints were
//! specified. When the view changes, the columns must be rekeyed. Only two
//! transitions are supported: contraction (all-roles active down to a
//! proper subset) and inflation (proper subset up to all roles). A
//! contraction refuses to drop any column holding a non-zero coefficient;
//! silently losing constraint information is the failure mode this engine
//! exists to prevent.

use crate::error::{Result, VarViewError};
use crate::variables::taxonomy::{ComponentTotals, Role};
use crate::variables::view::{RoleSelector, View};
use ndarray::Array2;

/// Build a coefficient matrix from a flat row-major list.
///
/// The constraint specification arrives as one flat sequence of
/// coefficients; its length must be an exact multiple of the
/// active-variable count, one row per constraint.
///
/// # Returns
///
/// The `(num_constraints, active_count)` matrix, or a `ConfigurationError`
/// when the length does not divide evenly.
pub fn coefficients_from_flat(flat: &[f64], active_count: usize) -> Result<Array2<f64>> {
    if active_count == 0 {
        if flat.is_empty() {
            return Ok(Array2::zeros((0, 0)));
        }
        return Err(VarViewError::ConfigurationError(format!(
            "{} linear-constraint coefficients supplied with no active variables",
            flat.len()
        )));
    }
    if flat.len() % active_count != 0 {
        return Err(VarViewError::ConfigurationError(format!(
            "{} linear-constraint coefficients are not evenly divisible by {} active variables",
            flat.len(),
            active_count
        )));
    }
    let rows = flat.len() / active_count;
    Array2::from_shape_vec((rows, active_count), flat.to_vec())
        .map_err(|e| VarViewError::ConfigurationError(e.to_string()))
}

/// Rekey a coefficient matrix from an old view's active ordering to a new
/// view's active ordering.
///
/// Columns follow canonical cross-domain order restricted to the active
/// partition. Contraction (old active = all roles, new active = a proper
/// subset) drops the columns leaving the ordering, signalling
/// `DataLossError` if any of them carries a non-zero coefficient. Inflation
/// (proper subset to all roles) zero-fills the newly exposed columns. Any
/// other transition signals `UnsupportedViewTransition`.
pub fn remap_coefficients(
    old_view: &View,
    new_view: &View,
    coeffs: &Array2<f64>,
    totals: &ComponentTotals,
) -> Result<Array2<f64>> {
    let old_all = old_view.active().roles == RoleSelector::All;
    let new_all = new_view.active().roles == RoleSelector::All;

    match (old_all, new_all) {
        (true, false) => contract(new_view, coeffs, totals),
        (false, true) => inflate(old_view, coeffs, totals),
        _ => Err(VarViewError::UnsupportedViewTransition(format!(
            "coefficient remap supports only all <-> subset transitions, got {} -> {}",
            old_view.active().roles.as_str(),
            new_view.active().roles.as_str()
        ))),
    }
}

fn contract(
    new_view: &View,
    coeffs: &Array2<f64>,
    totals: &ComponentTotals,
) -> Result<Array2<f64>> {
    let n = totals.total();
    check_columns(coeffs, n)?;
    let keep = membership(new_view, totals);
    let kept: Vec<usize> = (0..n).filter(|i| keep[*i]).collect();

    // Refuse to discard information: every dropped column must be zero.
    for col in (0..n).filter(|i| !keep[*i]) {
        if coeffs.column(col).iter().any(|c| *c != 0.0) {
            return Err(VarViewError::DataLossError(format!(
                "view contraction to {} would discard non-zero coefficients in column {} ({} role)",
                new_view.active().roles.as_str(),
                col,
                role_of(totals, col).as_str()
            )));
        }
    }

    let mut out = Array2::zeros((coeffs.nrows(), kept.len()));
    for (j, col) in kept.into_iter().enumerate() {
        out.column_mut(j).assign(&coeffs.column(col));
    }
    Ok(out)
}

fn inflate(
    old_view: &View,
    coeffs: &Array2<f64>,
    totals: &ComponentTotals,
) -> Result<Array2<f64>> {
    let n = totals.total();
    let keep = membership(old_view, totals);
    let kept: Vec<usize> = (0..n).filter(|i| keep[*i]).collect();
    check_columns(coeffs, kept.len())?;

    let mut out = Array2::zeros((coeffs.nrows(), n));
    for (j, col) in kept.into_iter().enumerate() {
        out.column_mut(col).assign(&coeffs.column(j));
    }
    Ok(out)
}

fn check_columns(coeffs: &Array2<f64>, expected: usize) -> Result<()> {
    if coeffs.ncols() != expected {
        return Err(VarViewError::ConfigurationError(format!(
            "coefficient matrix has {} columns, expected {}",
            coeffs.ncols(),
            expected
        )));
    }
    Ok(())
}

fn membership(view: &View, totals: &ComponentTotals) -> Vec<bool> {
    let roles = view.active_roles();
    let mut mask = Vec::with_capacity(totals.total());
    for role in Role::ALL {
        mask.extend(std::iter::repeat(roles.contains(role)).take(totals.role_total(role)));
    }
    mask
}

fn role_of(totals: &ComponentTotals, canonical: usize) -> Role {
    for role in Role::ALL.iter().rev() {
        if canonical >= totals.role_offset(*role) && totals.role_total(*role) > 0 {
            return *role;
        }
    }
    Role::Design
}
