//! Coefficient remapping tests across view changes

use approx::assert_relative_eq;
use ndarray::array;
use varview_rs::variables::remap::{coefficients_from_flat, remap_coefficients};
use varview_rs::variables::view::ViewPartition;
use varview_rs::{DomainMode, ParameterType, RoleSelector, VariableConfig, VarViewError, View};

fn totals() -> varview_rs::ComponentTotals {
    let mut config = VariableConfig::new();
    config.set_count(ParameterType::ContinuousDesign, 2);
    config.set_count(ParameterType::DiscreteDesignRange, 1);
    config.set_count(ParameterType::NormalUncertain, 1);
    config.set_count(ParameterType::ContinuousState, 1);
    config.component_totals()
}

fn subset_view(selector: RoleSelector) -> View {
    View::new(ViewPartition::new(selector, DomainMode::Mixed), None).unwrap()
}

#[test]
fn contraction_succeeds_when_dropped_columns_are_zero() {
    let coeffs = array![[1.0, -2.0, 0.5, 0.0, 0.0], [0.0, 3.0, 1.0, 0.0, 0.0]];
    let out = remap_coefficients(
        &View::all(DomainMode::Mixed),
        &subset_view(RoleSelector::Design),
        &coeffs,
        &totals(),
    )
    .unwrap();

    assert_eq!(out.dim(), (2, 3));
    assert_relative_eq!(out[[0, 1]], -2.0);
    assert_relative_eq!(out[[1, 2]], 1.0);
}

#[test]
fn contraction_fails_on_any_nonzero_dropped_entry() {
    let coeffs = array![[1.0, -2.0, 0.5, 0.0, 0.0], [0.0, 3.0, 1.0, 0.0, 1e-12]];
    let err = remap_coefficients(
        &View::all(DomainMode::Mixed),
        &subset_view(RoleSelector::Design),
        &coeffs,
        &totals(),
    )
    .unwrap_err();
    assert!(matches!(err, VarViewError::DataLossError(_)));
    assert!(err.to_string().contains("state"));
}

#[test]
fn inflation_zero_fills_new_columns() {
    let coeffs = array![[4.0]];
    let out = remap_coefficients(
        &subset_view(RoleSelector::Uncertain),
        &View::all(DomainMode::Mixed),
        &coeffs,
        &totals(),
    )
    .unwrap();

    assert_eq!(out.dim(), (1, 5));
    // The uncertain column is canonical position 3.
    assert_relative_eq!(out[[0, 3]], 4.0);
    for col in [0, 1, 2, 4] {
        assert_relative_eq!(out[[0, col]], 0.0);
    }
}

#[test]
fn contraction_then_inflation_round_trips() {
    let coeffs = array![[1.0, 2.0, 3.0, 0.0, 0.0]];
    let totals = totals();
    let all = View::all(DomainMode::Mixed);
    let design = subset_view(RoleSelector::Design);

    let contracted = remap_coefficients(&all, &design, &coeffs, &totals).unwrap();
    let inflated = remap_coefficients(&design, &all, &contracted, &totals).unwrap();
    assert_eq!(inflated, coeffs);
}

#[test]
fn partial_to_partial_transitions_are_unsupported() {
    let coeffs = array![[1.0, 2.0, 3.0]];
    let err = remap_coefficients(
        &subset_view(RoleSelector::Design),
        &subset_view(RoleSelector::State),
        &coeffs,
        &totals(),
    )
    .unwrap_err();
    assert!(matches!(err, VarViewError::UnsupportedViewTransition(_)));
}

#[test]
fn flat_coefficient_lists_must_divide_evenly() {
    let matrix = coefficients_from_flat(&[1.0, 0.0, 0.0, 0.0, 2.0, 0.0], 3).unwrap();
    assert_eq!(matrix.dim(), (2, 3));
    assert_relative_eq!(matrix[[1, 1]], 2.0);

    let err = coefficients_from_flat(&[1.0, 2.0, 3.0, 4.0], 3).unwrap_err();
    assert!(matches!(err, VarViewError::ConfigurationError(_)));
    assert!(err.to_string().contains("not evenly divisible"));
}
