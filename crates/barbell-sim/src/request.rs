//! Simulation request model.

use std::fmt;
use std::str::FromStr;

use barbell_data::MarketScope;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Largest accepted simulation horizon in years.
pub const MAX_HORIZON_YEARS: u32 = 30;

/// Rebalancing cadence requested for a simulation.
///
/// Recorded in the result and used to derive the conceptual rebalance-date
/// mask; the return computation applies constant weights every period
/// regardless (see [`crate::engine`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceFrequency {
    /// Rebalance at each month boundary.
    Monthly,
    /// Rebalance at each quarter boundary.
    Quarterly,
    /// Rebalance at each year boundary.
    Yearly,
}

impl RebalanceFrequency {
    /// Canonical wire name of the frequency.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for RebalanceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RebalanceFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            other => Err(format!("unknown rebalance frequency: {other}")),
        }
    }
}

/// One requested holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    /// Asset identifier, in any naming convention the store resolver accepts.
    pub symbol: String,
    /// Requested weight. Positive; weights need not sum to 1 on input.
    pub weight: f64,
    /// Opaque grouping tag, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// Weight rescaled so surviving entries sum to 1. Set during
    /// composition resolution, absent on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_weight: Option<f64>,
}

impl CompositionEntry {
    /// Create an entry without a grouping tag.
    pub fn new(symbol: impl Into<String>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
            block: None,
            normalized_weight: None,
        }
    }

    /// Create an entry carrying a grouping tag.
    pub fn with_block(symbol: impl Into<String>, weight: f64, block: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
            block: Some(block.into()),
            normalized_weight: None,
        }
    }
}

/// The immutable input driving one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Requested holdings.
    pub compositions: Vec<CompositionEntry>,
    /// Lookback horizon in whole years.
    pub horizon_years: u32,
    /// Requested rebalancing cadence.
    pub rebalance: RebalanceFrequency,
    /// Starting portfolio value.
    pub initial_capital: f64,
    /// Store partition the assets are loaded from.
    pub scope: MarketScope,
}

impl SimulationRequest {
    /// Check the request invariants: a non-empty composition, a horizon in
    /// `1..=MAX_HORIZON_YEARS`, positive finite capital, positive finite
    /// weights.
    pub fn validate(&self) -> Result<()> {
        if self.compositions.is_empty() {
            return Err(SimError::EmptyComposition);
        }
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(SimError::InvalidHorizon {
                years: self.horizon_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(SimError::InvalidCapital {
                value: self.initial_capital,
            });
        }
        for entry in &self.compositions {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(SimError::InvalidWeight {
                    symbol: entry.symbol.clone(),
                    weight: entry.weight,
                });
            }
        }
        Ok(())
    }
}
