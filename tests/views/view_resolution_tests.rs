//! View resolution tests against the public API
//!
//! These follow the concrete layouts of the engine's contract: slices are
//! checked position by position rather than through derived helpers.

use varview_rs::variables::relaxation::RelaxationMasks;
use varview_rs::variables::view::{resolve_partition, ViewPartition};
use varview_rs::{Domain, DomainMode, ParameterType, RoleSelector, SharedLayout, VariableConfig, View};

/// The reference scenario: design = 2 continuous + 1 discrete int,
/// aleatory = 1 continuous, epistemic = 0, state = 1 continuous.
fn scenario_config() -> VariableConfig {
    let mut config = VariableConfig::new();
    config.set_count(ParameterType::ContinuousDesign, 2);
    config.set_count(ParameterType::DiscreteDesignRange, 1);
    config.set_count(ParameterType::NormalUncertain, 1);
    config.set_count(ParameterType::ContinuousState, 1);
    config
}

#[test]
fn relaxed_design_view_absorbs_the_discrete_int() {
    let view = View::new(
        ViewPartition::new(RoleSelector::Design, DomainMode::Relaxed),
        None,
    )
    .unwrap();
    let handle = SharedLayout::new(scenario_config(), view).unwrap();

    // cv grand total 5, div grand total 0.
    assert_eq!(handle.acv(), 5);
    assert_eq!(handle.adiv(), 0);

    let cv = handle.active_slice(Domain::Continuous);
    assert_eq!((cv.start, cv.count), (0, 3));
    let div = handle.active_slice(Domain::DiscreteInt);
    assert_eq!((div.start, div.count), (0, 0));
}

#[test]
fn mixed_uncertain_view_ignores_design_and_state() {
    let view = View::new(
        ViewPartition::new(RoleSelector::Uncertain, DomainMode::Mixed),
        None,
    )
    .unwrap();
    let handle = SharedLayout::new(scenario_config(), view).unwrap();

    let cv = handle.active_slice(Domain::Continuous);
    assert_eq!((cv.start, cv.count), (2, 1));
    assert_eq!(handle.active_slice(Domain::DiscreteInt).count, 0);
}

#[test]
fn active_and_inactive_sum_to_grand_totals() {
    let view = View::new(
        ViewPartition::new(RoleSelector::Uncertain, DomainMode::Mixed),
        Some(ViewPartition::new(RoleSelector::Design, DomainMode::Mixed)),
    )
    .unwrap();
    let handle = SharedLayout::new(scenario_config(), view).unwrap();

    let totals = handle.component_totals();
    for domain in Domain::ALL {
        let active = handle.active_slice(domain).count;
        let inactive = handle.inactive_slice(domain).count;
        let state = totals.count(varview_rs::Role::State, domain);
        assert_eq!(active + inactive + state, totals.domain_total(domain));
    }
}

#[test]
fn all_view_under_relaxed_mode_reproduces_grand_totals() {
    let config = scenario_config();
    let totals = config.component_totals();
    let masks = RelaxationMasks::resolve(&config, &totals, DomainMode::Relaxed);

    let all = resolve_partition(RoleSelector::All, DomainMode::Relaxed, &totals, &masks);
    let mixed = resolve_partition(
        RoleSelector::All,
        DomainMode::Mixed,
        &totals,
        &RelaxationMasks::none(),
    );

    // Conservation: relaxation moves instances between arrays, it never
    // creates or destroys them.
    assert_eq!(
        all.cv.count + all.div.count + all.dsv.count + all.drv.count,
        totals.total()
    );
    assert_eq!(all.cv.count + all.div.count, mixed.cv.count + mixed.div.count);
    assert_eq!(all.cv.count, 5);
    assert_eq!(all.div.count, 0);
}

#[test]
fn invalid_views_are_rejected_with_diagnostics() {
    let design = ViewPartition::new(RoleSelector::Design, DomainMode::Mixed);
    let all = ViewPartition::new(RoleSelector::All, DomainMode::Mixed);

    let err = View::new(all, Some(design)).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));

    let err = View::new(design, Some(all)).unwrap_err();
    assert!(err.to_string().contains("all roles"));

    let overlap = View::new(
        ViewPartition::new(RoleSelector::Uncertain, DomainMode::Mixed),
        Some(ViewPartition::new(RoleSelector::Epistemic, DomainMode::Mixed)),
    )
    .unwrap_err();
    assert!(overlap.to_string().contains("overlap"));

    let mismatch = View::new(
        design,
        Some(ViewPartition::new(RoleSelector::State, DomainMode::Relaxed)),
    )
    .unwrap_err();
    assert!(mismatch.to_string().contains("domain modes conflict"));
}

#[test]
fn empty_roles_resolve_to_empty_slices() {
    // A problem with no epistemic variables: the epistemic selector is
    // valid and selects nothing.
    let config = scenario_config();
    let totals = config.component_totals();
    let slices = resolve_partition(
        RoleSelector::Epistemic,
        DomainMode::Mixed,
        &totals,
        &RelaxationMasks::none(),
    );
    for domain in Domain::ALL {
        assert_eq!(slices.get(domain).count, 0);
    }
    // Offsets still point past design and aleatory.
    assert_eq!(slices.cv.start, 3);
}
