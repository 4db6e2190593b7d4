use serde::{Deserialize, Serialize};

/// Numeric field used to rank the holdings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldingSortKey {
    /// Position value (price × shares), largest first
    Value,
    /// Percent change, best performer first
    Change,
    /// Portfolio weight, heaviest first
    Allocation,
}

impl std::fmt::Display for HoldingSortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldingSortKey::Value => write!(f, "Value"),
            HoldingSortKey::Change => write!(f, "Performance"),
            HoldingSortKey::Allocation => write!(f, "Allocation"),
        }
    }
}

/// A single position in the portfolio.
///
/// Everything here is display-ready: the frontend formats, the core
/// computes. `allocation` is this holding's share of the total portfolio
/// value in percent; across a portfolio the allocations sum to ~100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub ticker: String,

    /// Human-readable company name (e.g., "Apple Inc.")
    pub name: String,

    /// Number of shares held
    pub shares: f64,

    /// Current price per share
    pub price: f64,

    /// Percent change over the last session (signed)
    pub change: f64,

    /// Position value: price × shares
    pub value: f64,

    /// Portfolio weight in percent (0–100)
    pub allocation: f64,

    /// Recent prices for sparkline rendering, oldest first
    #[serde(default)]
    pub sparkline: Vec<f64>,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            name: name.into(),
            shares,
            price,
            change: 0.0,
            value: shares * price,
            allocation: 0.0,
            sparkline: Vec::new(),
        }
    }

    /// Builder-style setter for the percent change.
    pub fn with_change(mut self, change: f64) -> Self {
        self.change = change;
        self
    }

    /// Builder-style setter for the sparkline history.
    pub fn with_sparkline(mut self, sparkline: Vec<f64>) -> Self {
        self.sparkline = sparkline;
        self
    }
}
