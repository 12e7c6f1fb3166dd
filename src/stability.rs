//! Population Stability Index.
//!
//! PSI sums `(r − c)·ln(r / c)` over buckets or categories, where `r` and `c`
//! are the reference and current shares. A share of zero on either side makes
//! the term undefined; [`ZeroSharePolicy`] decides what such a term
//! contributes. Categorical tables are compared over the union of their keys,
//! so a category that vanished and a category that newly appeared are treated
//! the same way.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    column::{ColumnStatistics, VariableType},
    error::{DriftError, Result},
    quantile::BUCKET_COUNT,
    report::{DatasetStatistics, StabilityReport},
};

pub const DEFAULT_SMOOTHING_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ZeroSharePolicy {
    /// A term with a zero share on either side contributes nothing.
    Skip,
    /// A zero share is replaced by `epsilon` before the term is evaluated.
    Smooth { epsilon: f64 },
}

impl Default for ZeroSharePolicy {
    fn default() -> Self {
        ZeroSharePolicy::Smooth {
            epsilon: DEFAULT_SMOOTHING_EPSILON,
        }
    }
}

impl ZeroSharePolicy {
    pub fn term(&self, reference_share: f64, current_share: f64) -> f64 {
        let (r, c) = match *self {
            ZeroSharePolicy::Skip => {
                if reference_share == 0.0 || current_share == 0.0 {
                    return 0.0;
                }
                (reference_share, current_share)
            }
            ZeroSharePolicy::Smooth { epsilon } => {
                let floor = |share: f64| if share == 0.0 { epsilon } else { share };
                (floor(reference_share), floor(current_share))
            }
        };
        (r - c) * (r / c).ln()
    }
}

/// Conventional reading of a PSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftBand {
    /// Below 0.1.
    Stable,
    /// From 0.1 up to 0.25.
    Moderate,
    /// 0.25 and above.
    Significant,
}

impl DriftBand {
    pub fn from_index(psi: f64) -> Self {
        if psi < 0.1 {
            DriftBand::Stable
        } else if psi < 0.25 {
            DriftBand::Moderate
        } else {
            DriftBand::Significant
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DriftBand::Stable => "stable",
            DriftBand::Moderate => "moderate",
            DriftBand::Significant => "significant",
        }
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityIndexCalculator {
    policy: ZeroSharePolicy,
}

impl StabilityIndexCalculator {
    pub fn new(policy: ZeroSharePolicy) -> Self {
        Self { policy }
    }

    /// PSI over the four quartile buckets. Totals are the observed
    /// (non-missing) value counts of each dataset.
    pub fn continuous(
        &self,
        reference: &[usize; BUCKET_COUNT],
        reference_total: usize,
        current: &[usize; BUCKET_COUNT],
        current_total: usize,
    ) -> f64 {
        reference
            .iter()
            .zip(current.iter())
            .map(|(&r, &c)| {
                self.policy
                    .term(share(r, reference_total), share(c, current_total))
            })
            .sum()
    }

    /// PSI over the union of keys of two frequency tables, each share relative
    /// to its own table's total.
    pub fn categorical(
        &self,
        reference: &BTreeMap<String, usize>,
        current: &BTreeMap<String, usize>,
    ) -> f64 {
        let reference_total: usize = reference.values().sum();
        let current_total: usize = current.values().sum();
        let keys = reference
            .keys()
            .chain(current.keys())
            .collect::<BTreeSet<_>>();
        keys.into_iter()
            .map(|key| {
                let r = reference.get(key).copied().unwrap_or(0);
                let c = current.get(key).copied().unwrap_or(0);
                self.policy
                    .term(share(r, reference_total), share(c, current_total))
            })
            .sum()
    }

    /// PSI for one column, or `None` when the reference column is not scored.
    pub fn column_index(
        &self,
        reference: &ColumnStatistics,
        current: &ColumnStatistics,
    ) -> Result<Option<f64>> {
        if !reference.is_scored() {
            return Ok(None);
        }
        let empty = BTreeMap::new();
        let psi = match reference.variable_type {
            VariableType::Continuous => {
                let none = [0; BUCKET_COUNT];
                self.continuous(
                    reference.quantile_data_distribution.as_ref().unwrap_or(&none),
                    reference.observed_count(),
                    current.quantile_data_distribution.as_ref().unwrap_or(&none),
                    current.observed_count(),
                )
            }
            VariableType::Discrete | VariableType::Categorical => self.categorical(
                reference.unique_item_count_and_values.as_ref().unwrap_or(&empty),
                current.unique_item_count_and_values.as_ref().unwrap_or(&empty),
            ),
        };
        if !psi.is_finite() {
            return Err(DriftError::NonFiniteIndex {
                column: reference.name.clone(),
            });
        }
        Ok(Some(psi))
    }

    /// PSI for every scored reference column, matched by name.
    pub fn compute(
        &self,
        reference: &DatasetStatistics,
        current: &DatasetStatistics,
    ) -> Result<StabilityReport> {
        let mut report = StabilityReport::default();
        for (name, reference_column) in reference.iter() {
            let current_column =
                current
                    .get(name)
                    .ok_or_else(|| DriftError::MissingColumn {
                        column: name.to_string(),
                    })?;
            if let Some(psi) = self.column_index(reference_column, current_column)? {
                debug!("PSI for column '{name}': {psi:.6}");
                report.insert(name.to_string(), psi);
            }
        }
        Ok(report)
    }
}
