//! # varview-rs
//!
//! `varview-rs` implements the variable taxonomy, view-resolution, and
//! index-translation engine underneath a design-optimization and
//! uncertainty-quantification parameter model.
//!
//! The library provides:
//! - A fixed catalogue of fine-grained parameter types, each classified by
//!   role (design / aleatory / epistemic / state) and domain (continuous /
//!   discrete int / discrete string / discrete real)
//! - View resolution: the contiguous (offset, count) slice each active or
//!   inactive role subset selects in the four canonical domain arrays,
//!   under mixed or relaxed domain modes
//! - Bidirectional translation between partition-local indices and
//!   canonical cross-domain positions
//! - Materialized parallel label/type/id arrays and linear-constraint
//!   coefficient remapping across view changes
//!
//! ## Basic Usage
//!
//! ```
//! use varview_rs::variables::config::VariableConfig;
//! use varview_rs::variables::shared::SharedLayout;
//! use varview_rs::variables::taxonomy::{Domain, ParameterType};
//! use varview_rs::variables::view::{DomainMode, View};
//!
//! let mut config = VariableConfig::new();
//! config.set_count(ParameterType::ContinuousDesign, 2);
//! config.set_count(ParameterType::NormalUncertain, 1);
//!
//! let handle = SharedLayout::new(config, View::all(DomainMode::Mixed)).unwrap();
//! assert_eq!(handle.active_slice(Domain::Continuous).count, 3);
//! ```

// Public modules
pub mod error;

// Variable view system
pub mod variables;

// Re-exports for convenience
pub use error::{Result, VarViewError};
pub use variables::config::VariableConfig;
pub use variables::layout::{Layout, Partition};
pub use variables::shared::SharedLayout;
pub use variables::taxonomy::{ComponentTotals, Domain, ParameterType, Role};
pub use variables::view::{DomainMode, RoleSelector, View, ViewPartition};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
