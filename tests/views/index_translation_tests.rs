//! Index translation tests through the shared handle

use varview_rs::variables::view::ViewPartition;
use varview_rs::{
    Domain, DomainMode, ParameterType, Partition, RoleSelector, SharedLayout, VariableConfig, View,
};

/// Canonical order (0-based):
///   0,1 design cv; 2,3 design set-int; 4 design set-string;
///   5 aleatory normal; 6 aleatory poisson; 7 aleatory point-real;
///   8 state cv; 9 state set-real (categorical).
fn rich_handle(mode: DomainMode) -> SharedLayout {
    let mut config = VariableConfig::new();
    config.set_count(ParameterType::ContinuousDesign, 2);
    config.set_count(ParameterType::DiscreteDesignSetInt, 2);
    config.set_count(ParameterType::DiscreteDesignSetString, 1);
    config.set_count(ParameterType::NormalUncertain, 1);
    config.set_count(ParameterType::PoissonUncertain, 1);
    config.set_count(ParameterType::HistogramPointRealUncertain, 1);
    config.set_count(ParameterType::ContinuousState, 1);
    config.set_count(ParameterType::DiscreteStateSetReal, 1);
    config
        .set_categorical(ParameterType::DiscreteDesignSetInt, vec![true, false])
        .unwrap();
    config
        .set_categorical(ParameterType::DiscreteStateSetReal, vec![true])
        .unwrap();

    let view = View::new(
        ViewPartition::new(RoleSelector::Design, mode),
        Some(ViewPartition::new(RoleSelector::Uncertain, mode)),
    )
    .unwrap();
    SharedLayout::new(config, view).unwrap()
}

#[test]
fn active_translation_follows_canonical_order() {
    let handle = rich_handle(DomainMode::Relaxed);

    // Design cv: two natives, then the relaxed set-int (canonical 3).
    assert_eq!(handle.cv_index_to_all_index(Partition::Active, 0).unwrap(), 0);
    assert_eq!(handle.cv_index_to_all_index(Partition::Active, 1).unwrap(), 1);
    assert_eq!(handle.cv_index_to_all_index(Partition::Active, 2).unwrap(), 3);
    // The categorical instance stays discrete.
    assert_eq!(handle.div_index_to_all_index(Partition::Active, 0).unwrap(), 2);
    assert_eq!(handle.dsv_index_to_all_index(Partition::Active, 0).unwrap(), 4);
}

#[test]
fn inactive_and_all_partitions_translate() {
    let handle = rich_handle(DomainMode::Relaxed);

    // Inactive uncertain cv: normal, relaxed poisson, relaxed point-real.
    let inactive: Vec<usize> = (0..3)
        .map(|i| handle.cv_index_to_all_index(Partition::Inactive, i).unwrap())
        .collect();
    assert_eq!(inactive, vec![5, 6, 7]);

    // All partition cv spans every role.
    let all: Vec<usize> = (0..7)
        .map(|i| handle.cv_index_to_all_index(Partition::All, i).unwrap())
        .collect();
    assert_eq!(all, vec![0, 1, 3, 5, 6, 7, 8]);
}

#[test]
fn complement_covers_what_active_does_not() {
    let handle = rich_handle(DomainMode::Relaxed);
    let total = handle.component_totals().total();

    let active_mask = handle.membership_mask(Partition::Active);
    let complement_mask = handle.membership_mask(Partition::Complement);
    let inactive_mask = handle.membership_mask(Partition::Inactive);
    let all_mask = handle.membership_mask(Partition::All);

    assert_eq!(active_mask.len(), total);
    for i in 0..total {
        assert!(active_mask[i] ^ complement_mask[i]);
        assert!(!(active_mask[i] && inactive_mask[i]));
        assert!(all_mask[i]);
    }
}

#[test]
fn round_trip_through_the_handle() {
    for mode in [DomainMode::Mixed, DomainMode::Relaxed] {
        let handle = rich_handle(mode);
        let total = handle.component_totals().total();
        for partition in [
            Partition::Active,
            Partition::Inactive,
            Partition::Complement,
            Partition::All,
        ] {
            for local in 0..total {
                if let Ok(all) = handle.cv_index_to_all_index(partition, local) {
                    assert_eq!(handle.all_index_to_cv_index(partition, all).unwrap(), local);
                }
                if let Ok(all) = handle.div_index_to_all_index(partition, local) {
                    assert_eq!(handle.all_index_to_div_index(partition, all).unwrap(), local);
                }
                if let Ok(all) = handle.dsv_index_to_all_index(partition, local) {
                    assert_eq!(handle.all_index_to_dsv_index(partition, all).unwrap(), local);
                }
                if let Ok(all) = handle.drv_index_to_all_index(partition, local) {
                    assert_eq!(handle.all_index_to_drv_index(partition, all).unwrap(), local);
                }
            }
        }
    }
}

#[test]
fn out_of_range_indices_report_errors() {
    let handle = rich_handle(DomainMode::Mixed);

    let err = handle
        .cv_index_to_all_index(Partition::Active, 99)
        .unwrap_err();
    assert!(err.to_string().contains("Index out of range"));

    // Canonical position 5 is aleatory, outside the active design partition.
    let err = handle
        .all_index_to_cv_index(Partition::Active, 5)
        .unwrap_err();
    assert!(err.to_string().contains("aleatory"));

    // Past the end of the canonical range entirely.
    assert!(handle
        .all_index_to_cv_index(Partition::All, 10)
        .is_err());
}

#[test]
fn ids_are_translated_canonical_positions_plus_one() {
    let handle = rich_handle(DomainMode::Relaxed);
    let cv = handle.active_slice(Domain::Continuous);
    let ids = handle.ids(Domain::Continuous, cv.start, cv.count).unwrap();
    for (local, id) in ids.iter().enumerate() {
        let all = handle.cv_index_to_all_index(Partition::Active, local).unwrap();
        assert_eq!(*id, all + 1);
    }
}
