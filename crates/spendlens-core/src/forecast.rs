//! Spending forecast
//!
//! Ordinary least-squares line through the time series, with each point's
//! position (0-based) as x and its amount as y, extrapolated past the end.
//!
//! Predictions are unconstrained: a falling trend can go negative.

use serde::{Deserialize, Serialize};

use crate::models::{ForecastPoint, TimeSeriesPoint};

/// Fitted `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit a line to the series; `None` with fewer than two points
    pub fn fit(series: &[TimeSeriesPoint]) -> Option<Self> {
        if series.len() < 2 {
            return None;
        }

        let n = series.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, point) in series.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += point.amount;
            sum_xy += x * point.amount;
            sum_xx += x * x;
        }

        // Dense 0..n x values keep this nonzero for n >= 2
        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return None;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Some(Self { slope, intercept })
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Predicted amounts for the `horizon` positions after the series
///
/// Empty when the series has fewer than two points.
pub fn predict(series: &[TimeSeriesPoint], horizon: usize) -> Vec<f64> {
    forecast(series, horizon)
        .into_iter()
        .map(|p| p.amount)
        .collect()
}

/// Like [`predict`], keeping each prediction's offset past the series end
pub fn forecast(series: &[TimeSeriesPoint], horizon: usize) -> Vec<ForecastPoint> {
    let Some(trend) = LinearTrend::fit(series) else {
        return Vec::new();
    };

    let n = series.len();
    (1..=horizon)
        .map(|i| ForecastPoint {
            index: i,
            amount: trend.value_at((n + i - 1) as f64),
        })
        .collect()
}
