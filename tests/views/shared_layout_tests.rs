//! Shared handle lifecycle tests: view switching, cloning, persistence

use varview_rs::variables::view::ViewPartition;
use varview_rs::{
    Domain, DomainMode, ParameterType, RoleSelector, SharedLayout, VariableConfig, View,
};

fn config_with_labels() -> VariableConfig {
    let mut config = VariableConfig::new();
    config.set_count(ParameterType::ContinuousDesign, 2);
    config
        .set_labels(
            ParameterType::ContinuousDesign,
            vec!["thickness".to_string(), "radius".to_string()],
        )
        .unwrap();
    config.set_count(ParameterType::DiscreteDesignRange, 1);
    config.set_count(ParameterType::NormalUncertain, 1);
    config.set_count(ParameterType::ContinuousState, 1);
    config
}

fn design_view(mode: DomainMode) -> View {
    View::new(
        ViewPartition::new(RoleSelector::Design, mode),
        Some(ViewPartition::new(RoleSelector::Uncertain, mode)),
    )
    .unwrap()
}

#[test]
fn view_switching_updates_every_alias() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Mixed)).unwrap();
    let alias = handle.clone();

    assert_eq!(alias.active_slice(Domain::Continuous).count, 2);
    handle
        .set_view(View::new(
            ViewPartition::new(RoleSelector::State, DomainMode::Mixed),
            None,
        )
        .unwrap())
        .unwrap();
    assert_eq!(alias.active_slice(Domain::Continuous).count, 1);
    assert_eq!(alias.active_slice(Domain::Continuous).start, 3);
}

#[test]
fn copy_gives_an_independent_layout() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Mixed)).unwrap();
    let copied = handle.copy_with_view(View::all(DomainMode::Mixed)).unwrap();

    assert_eq!(copied.active_slice(Domain::Continuous).count, 4);
    assert_eq!(handle.active_slice(Domain::Continuous).count, 2);

    // Mode changes require a reshape even on a copy.
    assert!(copied.copy_with_view(View::all(DomainMode::Relaxed)).is_err());
}

#[test]
fn user_labels_survive_persistence() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Relaxed)).unwrap();
    let json = handle.to_json().unwrap();
    let restored = SharedLayout::from_json(&json).unwrap();

    // Relaxed: cv = thickness, radius, relaxed range int, normal, state.
    let labels = restored.labels(Domain::Continuous, 0, restored.acv()).unwrap();
    assert_eq!(labels, vec!["thickness", "radius", "ddriv_1", "nuv_1", "csv_1"]);

    // Types and ids are recomputed, not persisted.
    let types = restored.types(Domain::Continuous, 0, restored.acv()).unwrap();
    assert_eq!(types[2], ParameterType::DiscreteDesignRange);
    let ids = restored.ids(Domain::Continuous, 0, restored.acv()).unwrap();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn save_and_load_round_trip_on_disk() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Mixed)).unwrap();
    let path = std::env::temp_dir().join("varview_shared_layout_test.json");
    handle.save_json(&path).unwrap();
    let restored = SharedLayout::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.view(), handle.view());
    assert_eq!(restored.component_totals(), handle.component_totals());
    assert_eq!(
        restored.labels(Domain::DiscreteInt, 0, 1).unwrap(),
        vec!["ddriv_1"]
    );
}

#[test]
fn corrupted_persisted_state_is_rejected() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Mixed)).unwrap();
    let json = handle.to_json().unwrap();

    // Truncating a label array breaks the persisted/recomputed agreement.
    let broken = json.replacen("\"thickness\",", "", 1);
    assert!(SharedLayout::from_json(&broken).is_err());
}

#[test]
fn active_and_inactive_component_totals() {
    let handle = SharedLayout::new(config_with_labels(), design_view(DomainMode::Mixed)).unwrap();

    assert_eq!(handle.component_totals().total(), 5);
    assert_eq!(handle.active_components_totals().total(), 3);
    assert_eq!(handle.inactive_components_totals().total(), 1);

    handle.set_view(View::all(DomainMode::Mixed)).unwrap();
    assert_eq!(handle.active_components_totals().total(), 5);
    assert_eq!(handle.inactive_components_totals().total(), 0);
}
