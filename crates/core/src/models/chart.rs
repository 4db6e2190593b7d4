use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single data point for chart rendering.
///
/// The core generates these — the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// The date for this data point
    pub date: NaiveDate,

    /// Portfolio value at this date, in the display currency
    pub value: f64,
}

/// Reporting window for the performance chart.
///
/// Each period maps to a fixed span of calendar days ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Last trading day
    OneDay,
    /// Trailing week
    OneWeek,
    /// Trailing month
    OneMonth,
    /// Trailing quarter
    ThreeMonths,
    /// Trailing year
    OneYear,
    /// Full history (two years of synthetic data)
    All,
}

impl Period {
    /// All periods in display order (the dashboard's selector row).
    pub const ALL: [Period; 6] = [
        Period::OneDay,
        Period::OneWeek,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::OneYear,
        Period::All,
    ];

    /// Number of calendar days this period spans.
    /// A period's series has `day_count() + 1` points (span inclusive).
    #[must_use]
    pub fn day_count(&self) -> u32 {
        match self {
            Period::OneDay => 1,
            Period::OneWeek => 7,
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::OneYear => 365,
            Period::All => 730,
        }
    }

    /// Short label as shown on the period selector buttons.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneDay => "1D",
            Period::OneWeek => "1W",
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::OneYear => "1Y",
            Period::All => "ALL",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Headline figures for one reporting window, derived from its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodOverview {
    /// The window these figures cover
    pub period: Period,

    /// Portfolio value at the end of the window
    pub total_value: f64,

    /// Absolute change over the window (end − start)
    pub change: f64,

    /// Percent change over the window
    pub change_pct: f64,
}

impl std::str::FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1D" => Ok(Period::OneDay),
            "1W" => Ok(Period::OneWeek),
            "1M" => Ok(Period::OneMonth),
            "3M" => Ok(Period::ThreeMonths),
            "1Y" => Ok(Period::OneYear),
            "ALL" => Ok(Period::All),
            other => Err(CoreError::ValidationError(format!(
                "Unknown chart period '{other}' (expected one of 1D, 1W, 1M, 3M, 1Y, ALL)"
            ))),
        }
    }
}
