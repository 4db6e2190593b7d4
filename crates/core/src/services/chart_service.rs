use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;

use crate::models::chart::{ChartDataPoint, Period, PeriodOverview};

/// Generates and caches chart-ready series, one per reporting window.
///
/// Each series is synthesized once at construction: values interpolate
/// linearly from the window's start value to its end value, perturbed by
/// bounded pseudo-random noise, over consecutive calendar days ending
/// today. After construction the series are immutable — selecting a
/// period is a cache lookup, never a regeneration.
///
/// The random source is injected (`with_rng`), so series are
/// reproducible under test with a seeded generator.
pub struct ChartService {
    series: HashMap<Period, Vec<ChartDataPoint>>,
}

impl ChartService {
    /// Build all period series ending today using an ambient generator.
    pub fn new() -> Self {
        let today = chrono::Utc::now().date_naive();
        Self::with_rng(today, &mut rand::thread_rng())
    }

    /// Build all period series ending `today`, drawing noise from `rng`.
    pub fn with_rng<R: Rng>(today: NaiveDate, rng: &mut R) -> Self {
        let mut series = HashMap::new();
        for period in Period::ALL {
            let (start, end) = Self::preset_range(period);
            series.insert(
                period,
                Self::generate_series(period.day_count(), start, end, today, rng),
            );
        }
        Self { series }
    }

    /// The cached series for a period.
    #[must_use]
    pub fn series(&self, period: Period) -> &[ChartDataPoint] {
        self.series
            .get(&period)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Headline figures for a period: end value plus change over the window.
    #[must_use]
    pub fn overview(&self, period: Period) -> PeriodOverview {
        let points = self.series(period);
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f.value, l.value),
            _ => (0.0, 0.0),
        };
        let change = last - first;
        let change_pct = if first != 0.0 {
            (change / first) * 100.0
        } else {
            0.0
        };
        PeriodOverview {
            period,
            total_value: last,
            change,
            change_pct,
        }
    }

    /// Synthesize a series of `days + 1` points on consecutive calendar
    /// days ending `today`.
    ///
    /// Point `i` (counting from the span's start) takes the value
    /// `start + (end - start) × i/days`, plus a noise term drawn from
    /// `rng` and bounded by ±5% of the start→end range, rounded to
    /// cents. `days == 0` yields exactly one point at the end value.
    #[must_use]
    pub fn generate_series<R: Rng>(
        days: u32,
        start: f64,
        end: f64,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<ChartDataPoint> {
        let range = end - start;
        let mut points = Vec::with_capacity(days as usize + 1);

        let mut date = today
            .checked_sub_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(today);

        for step in 0..=days {
            let progress = if days == 0 {
                1.0
            } else {
                f64::from(step) / f64::from(days)
            };
            let noise = (rng.gen::<f64>() - 0.5) * (range * 0.1);
            let value = start + range * progress + noise;
            points.push(ChartDataPoint {
                date,
                value: (value * 100.0).round() / 100.0,
            });

            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        points
    }

    /// Baseline (start, end) values for each window's synthetic series.
    fn preset_range(period: Period) -> (f64, f64) {
        match period {
            Period::OneDay => (246_800.0, 247_500.0),
            Period::OneWeek => (245_000.0, 247_500.0),
            Period::OneMonth => (242_000.0, 247_500.0),
            Period::ThreeMonths => (235_000.0, 247_500.0),
            Period::OneYear => (210_000.0, 247_500.0),
            Period::All => (180_000.0, 247_500.0),
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
