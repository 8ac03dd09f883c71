//! Variable taxonomy: the fixed catalogue of parameter types
//!
//! Every parameter type in the catalogue maps to exactly one role (why the
//! parameter exists) and one domain (which value array holds its data). The
//! mapping is compile-time and never varies per problem; everything else in
//! the engine is derived from instance counts aggregated over this table.

use serde::{Deserialize, Serialize};

/// Coarse classification of why a parameter exists.
///
/// Roles are ordered: canonical variable order is role-major, with design
/// variables first and state variables last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Design variables, controlled by the optimizer.
    Design,

    /// Aleatory (irreducible) uncertain variables.
    Aleatory,

    /// Epistemic (reducible) uncertain variables.
    Epistemic,

    /// State variables, held fixed by most algorithms.
    State,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 4] = [Role::Design, Role::Aleatory, Role::Epistemic, Role::State];

    /// Position of this role in the canonical order.
    pub fn index(&self) -> usize {
        match self {
            Role::Design => 0,
            Role::Aleatory => 1,
            Role::Epistemic => 2,
            Role::State => 3,
        }
    }

    /// Short name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Design => "design",
            Role::Aleatory => "aleatory",
            Role::Epistemic => "epistemic",
            Role::State => "state",
        }
    }
}

/// Which of the four value arrays a parameter's data lives in.
///
/// Within a role, canonical order is continuous, discrete integer, discrete
/// string, discrete real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    Continuous,
    DiscreteInt,
    DiscreteString,
    DiscreteReal,
}

impl Domain {
    /// All domains in canonical within-role order.
    pub const ALL: [Domain; 4] = [
        Domain::Continuous,
        Domain::DiscreteInt,
        Domain::DiscreteString,
        Domain::DiscreteReal,
    ];

    /// Position of this domain in the canonical within-role order.
    pub fn index(&self) -> usize {
        match self {
            Domain::Continuous => 0,
            Domain::DiscreteInt => 1,
            Domain::DiscreteString => 2,
            Domain::DiscreteReal => 3,
        }
    }

    /// Short name used in diagnostics and generated labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Continuous => "cv",
            Domain::DiscreteInt => "div",
            Domain::DiscreteString => "dsv",
            Domain::DiscreteReal => "drv",
        }
    }
}

/// Fine-grained parameter type.
///
/// The catalogue is immutable: each variant carries a fixed (role, domain)
/// classification. `ParameterType::ALL` lists the variants in canonical
/// order (role-major, domain-minor within role, declaration order within
/// domain), which fixes the ordering of every derived array in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    // Design
    ContinuousDesign,
    DiscreteDesignRange,
    DiscreteDesignSetInt,
    DiscreteDesignSetString,
    DiscreteDesignSetReal,

    // Aleatory uncertain, continuous
    NormalUncertain,
    LognormalUncertain,
    UniformUncertain,
    LoguniformUncertain,
    TriangularUncertain,
    ExponentialUncertain,
    BetaUncertain,
    GammaUncertain,
    GumbelUncertain,
    FrechetUncertain,
    WeibullUncertain,
    HistogramBinUncertain,

    // Aleatory uncertain, discrete
    PoissonUncertain,
    BinomialUncertain,
    NegativeBinomialUncertain,
    GeometricUncertain,
    HypergeometricUncertain,
    HistogramPointIntUncertain,
    HistogramPointStringUncertain,
    HistogramPointRealUncertain,

    // Epistemic uncertain
    ContinuousIntervalUncertain,
    DiscreteIntervalUncertain,
    DiscreteUncertainSetInt,
    DiscreteUncertainSetString,
    DiscreteUncertainSetReal,

    // State
    ContinuousState,
    DiscreteStateRange,
    DiscreteStateSetInt,
    DiscreteStateSetString,
    DiscreteStateSetReal,
}

impl ParameterType {
    /// All parameter types in canonical order.
    pub const ALL: [ParameterType; 35] = [
        ParameterType::ContinuousDesign,
        ParameterType::DiscreteDesignRange,
        ParameterType::DiscreteDesignSetInt,
        ParameterType::DiscreteDesignSetString,
        ParameterType::DiscreteDesignSetReal,
        ParameterType::NormalUncertain,
        ParameterType::LognormalUncertain,
        ParameterType::UniformUncertain,
        ParameterType::LoguniformUncertain,
        ParameterType::TriangularUncertain,
        ParameterType::ExponentialUncertain,
        ParameterType::BetaUncertain,
        ParameterType::GammaUncertain,
        ParameterType::GumbelUncertain,
        ParameterType::FrechetUncertain,
        ParameterType::WeibullUncertain,
        ParameterType::HistogramBinUncertain,
        ParameterType::PoissonUncertain,
        ParameterType::BinomialUncertain,
        ParameterType::NegativeBinomialUncertain,
        ParameterType::GeometricUncertain,
        ParameterType::HypergeometricUncertain,
        ParameterType::HistogramPointIntUncertain,
        ParameterType::HistogramPointStringUncertain,
        ParameterType::HistogramPointRealUncertain,
        ParameterType::ContinuousIntervalUncertain,
        ParameterType::DiscreteIntervalUncertain,
        ParameterType::DiscreteUncertainSetInt,
        ParameterType::DiscreteUncertainSetString,
        ParameterType::DiscreteUncertainSetReal,
        ParameterType::ContinuousState,
        ParameterType::DiscreteStateRange,
        ParameterType::DiscreteStateSetInt,
        ParameterType::DiscreteStateSetString,
        ParameterType::DiscreteStateSetReal,
    ];

    /// The role this type belongs to.
    pub fn role(&self) -> Role {
        use ParameterType::*;
        match self {
            ContinuousDesign | DiscreteDesignRange | DiscreteDesignSetInt
            | DiscreteDesignSetString | DiscreteDesignSetReal => Role::Design,

            NormalUncertain | LognormalUncertain | UniformUncertain | LoguniformUncertain
            | TriangularUncertain | ExponentialUncertain | BetaUncertain | GammaUncertain
            | GumbelUncertain | FrechetUncertain | WeibullUncertain | HistogramBinUncertain
            | PoissonUncertain | BinomialUncertain | NegativeBinomialUncertain
            | GeometricUncertain | HypergeometricUncertain | HistogramPointIntUncertain
            | HistogramPointStringUncertain | HistogramPointRealUncertain => Role::Aleatory,

            ContinuousIntervalUncertain | DiscreteIntervalUncertain | DiscreteUncertainSetInt
            | DiscreteUncertainSetString | DiscreteUncertainSetReal => Role::Epistemic,

            ContinuousState | DiscreteStateRange | DiscreteStateSetInt
            | DiscreteStateSetString | DiscreteStateSetReal => Role::State,
        }
    }

    /// The domain this type belongs to.
    pub fn domain(&self) -> Domain {
        use ParameterType::*;
        match self {
            ContinuousDesign | NormalUncertain | LognormalUncertain | UniformUncertain
            | LoguniformUncertain | TriangularUncertain | ExponentialUncertain
            | BetaUncertain | GammaUncertain | GumbelUncertain | FrechetUncertain
            | WeibullUncertain | HistogramBinUncertain | ContinuousIntervalUncertain
            | ContinuousState => Domain::Continuous,

            DiscreteDesignRange | DiscreteDesignSetInt | PoissonUncertain | BinomialUncertain
            | NegativeBinomialUncertain | GeometricUncertain | HypergeometricUncertain
            | HistogramPointIntUncertain | DiscreteIntervalUncertain | DiscreteUncertainSetInt
            | DiscreteStateRange | DiscreteStateSetInt => Domain::DiscreteInt,

            DiscreteDesignSetString | HistogramPointStringUncertain | DiscreteUncertainSetString
            | DiscreteStateSetString => Domain::DiscreteString,

            DiscreteDesignSetReal | HistogramPointRealUncertain | DiscreteUncertainSetReal
            | DiscreteStateSetReal => Domain::DiscreteReal,
        }
    }

    /// Prefix for generated default labels, e.g. `"nuv"` gives `nuv_1`.
    pub fn label_prefix(&self) -> &'static str {
        use ParameterType::*;
        match self {
            ContinuousDesign => "cdv",
            DiscreteDesignRange => "ddriv",
            DiscreteDesignSetInt => "ddsiv",
            DiscreteDesignSetString => "ddssv",
            DiscreteDesignSetReal => "ddsrv",
            NormalUncertain => "nuv",
            LognormalUncertain => "lnuv",
            UniformUncertain => "uuv",
            LoguniformUncertain => "luuv",
            TriangularUncertain => "tuv",
            ExponentialUncertain => "euv",
            BetaUncertain => "buv",
            GammaUncertain => "gauv",
            GumbelUncertain => "guuv",
            FrechetUncertain => "fuv",
            WeibullUncertain => "wuv",
            HistogramBinUncertain => "hbuv",
            PoissonUncertain => "puv",
            BinomialUncertain => "biuv",
            NegativeBinomialUncertain => "nbuv",
            GeometricUncertain => "geuv",
            HypergeometricUncertain => "hguv",
            HistogramPointIntUncertain => "hpiv",
            HistogramPointStringUncertain => "hpsv",
            HistogramPointRealUncertain => "hprv",
            ContinuousIntervalUncertain => "ciuv",
            DiscreteIntervalUncertain => "diuv",
            DiscreteUncertainSetInt => "dusiv",
            DiscreteUncertainSetString => "dussv",
            DiscreteUncertainSetReal => "dusrv",
            ContinuousState => "csv",
            DiscreteStateRange => "dsriv",
            DiscreteStateSetInt => "dssiv",
            DiscreteStateSetString => "dsssv",
            DiscreteStateSetReal => "dssrv",
        }
    }

    /// Whether relaxation ignores the per-instance categorical flag.
    ///
    /// Discrete interval uncertain parameters are always eligible for
    /// relaxation, even when the user marks them categorical. Other discrete
    /// types honor the flag. Downstream consumers depend on interval
    /// parameters always being relaxable, so the asymmetry is intentional.
    pub fn relax_ignores_categorical(&self) -> bool {
        matches!(self, ParameterType::DiscreteIntervalUncertain)
    }
}

/// Per-(role, domain) instance counts aggregated from raw per-type counts.
///
/// The 16 cells are computed once at setup time and are immutable
/// thereafter; the four per-domain grand totals equal the lengths of the
/// corresponding canonical arrays before relaxation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTotals {
    counts: [[usize; 4]; 4],
}

impl ComponentTotals {
    /// Create totals with every cell zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a configuration's raw per-type counts into the grid.
    pub fn from_counts(config: &crate::variables::config::VariableConfig) -> Self {
        config.component_totals()
    }

    pub(crate) fn add(&mut self, role: Role, domain: Domain, n: usize) {
        self.counts[role.index()][domain.index()] += n;
    }

    /// Instance count in one (role, domain) cell.
    pub fn count(&self, role: Role, domain: Domain) -> usize {
        self.counts[role.index()][domain.index()]
    }

    /// Total instances in one role, across all four domains.
    pub fn role_total(&self, role: Role) -> usize {
        self.counts[role.index()].iter().sum()
    }

    /// Total instances in one domain, across all four roles (the
    /// pre-relaxation length of that domain's canonical array).
    pub fn domain_total(&self, domain: Domain) -> usize {
        Role::ALL.iter().map(|r| self.count(*r, domain)).sum()
    }

    /// Total instances across the whole problem.
    pub fn total(&self) -> usize {
        Role::ALL.iter().map(|r| self.role_total(*r)).sum()
    }

    /// Canonical cross-domain offset of a role: the number of instances in
    /// all preceding roles.
    pub fn role_offset(&self, role: Role) -> usize {
        Role::ALL
            .iter()
            .take(role.index())
            .map(|r| self.role_total(*r))
            .sum()
    }

    /// A copy of the totals with every cell of a non-kept role zeroed.
    ///
    /// Serves the active/inactive component-total accessors: the result
    /// reports only the instances a partition selects.
    pub fn restricted<F: Fn(Role) -> bool>(&self, keep: F) -> ComponentTotals {
        let mut out = ComponentTotals::new();
        for role in Role::ALL {
            if keep(role) {
                for domain in Domain::ALL {
                    out.add(role, domain, self.count(role, domain));
                }
            }
        }
        out
    }
}
