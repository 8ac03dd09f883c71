//! # Variable View System
//!
//! This module family implements the variable taxonomy, view resolution, and
//! index translation underneath a design-optimization / uncertainty-
//! quantification parameter model. A problem is described by instance counts
//! over a fixed catalogue of parameter types; consumers never see all
//! parameters at once but request a view (active and optional inactive role
//! subsets, each under a domain mode), and the engine computes where that
//! view's parameters sit in the four canonical domain arrays.
//!
//! ## Core Components
//!
//! - [`taxonomy`]: the fixed type catalogue and component totals
//! - [`config`]: raw per-type counts, labels, and categorical flags
//! - [`relaxation`]: bit masks marking discrete instances reclassified into
//!   the continuous domain
//! - [`view`]: view specification and per-domain slice resolution
//! - [`index`]: bidirectional partition-local / canonical index translation
//! - [`materialize`]: the four parallel label/type/id arrays
//! - [`remap`]: linear-constraint coefficient rekeying across view changes
//! - [`layout`] / [`shared`]: the per-problem facade and its
//!   reference-counted handle
//!
//! ## Example Usage
//!
//! ```rust
//! use varview_rs::variables::config::VariableConfig;
//! use varview_rs::variables::shared::SharedLayout;
//! use varview_rs::variables::taxonomy::{Domain, ParameterType};
//! use varview_rs::variables::view::{DomainMode, RoleSelector, View, ViewPartition};
//!
//! // Two continuous design variables, one relaxable discrete design
//! // variable, one normal uncertain variable.
//! let mut config = VariableConfig::new();
//! config.set_count(ParameterType::ContinuousDesign, 2);
//! config.set_count(ParameterType::DiscreteDesignRange, 1);
//! config.set_count(ParameterType::NormalUncertain, 1);
//!
//! let view = View::new(
//!     ViewPartition::new(RoleSelector::Design, DomainMode::Relaxed),
//!     Some(ViewPartition::new(RoleSelector::Uncertain, DomainMode::Relaxed)),
//! )
//! .unwrap();
//! let handle = SharedLayout::new(config, view).unwrap();
//!
//! // The relaxed discrete variable joins the continuous slice.
//! assert_eq!(handle.active_slice(Domain::Continuous).count, 3);
//! assert_eq!(handle.active_slice(Domain::DiscreteInt).count, 0);
//! ```

pub mod config;
pub mod index;
pub mod layout;
pub mod materialize;
pub mod relaxation;
pub mod remap;
pub mod shared;
pub mod taxonomy;
pub mod view;


// Re-export key types
pub use config::VariableConfig;
pub use index::IndexTranslator;
pub use layout::{Layout, Partition};
pub use materialize::{materialize, DomainArrays, MaterializedArrays};
pub use relaxation::RelaxationMasks;
pub use remap::{coefficients_from_flat, remap_coefficients};
pub use shared::SharedLayout;
pub use taxonomy::{ComponentTotals, Domain, ParameterType, Role};
pub use view::{
    resolve_partition, resolve_view, DomainMode, RoleSelector, RoleSet, Slice, SliceSet, View,
    ViewPartition,
};
