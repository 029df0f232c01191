//! Descriptive statistics over the cleaned numeric columns.
//!
//! Mean and standard deviation come from `statrs`. Skewness and excess
//! kurtosis use the bias-corrected estimators of common dataframe
//! libraries (adjusted Fisher-Pearson G1 and the unbiased G2).

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::preprocess::{CleanedTable, Column};

/// Sums of powered deviations below this are treated as exact zeros.
const FP_NOISE: f64 = 1e-14;

/// Absolute skewness or excess kurtosis above which the shape is called out.
const SHAPE_THRESHOLD: f64 = 2.0;

/// The four moment-based statistics of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub stddev: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
}

impl Moments {
    pub fn from_values(values: &[f64]) -> Self {
        Moments {
            mean: values.iter().mean(),
            stddev: values.iter().std_dev(),
            skewness: skewness(values),
            excess_kurtosis: excess_kurtosis(values),
        }
    }
}

/// Computes [`Moments`] for one column of the cleaned table.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn statistical_analysis(table: &CleanedTable, column: Column) -> Moments {
    Moments::from_values(&table.column(column))
}

fn zero_out_noise(v: f64) -> f64 {
    if v.abs() < FP_NOISE { 0.0 } else { v }
}

/// Sums of squared, cubed and fourth-power deviations from the mean.
fn deviation_sums(values: &[f64]) -> (f64, f64, f64) {
    let mean = values.iter().mean();
    values.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), x| {
        let d = x - mean;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    })
}

/// Sample skewness. NaN for fewer than three values or zero variance.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let (m2, m3, _) = deviation_sums(values);
    let (m2, m3) = (zero_out_noise(m2), zero_out_noise(m3));
    if m2 == 0.0 {
        return f64::NAN;
    }
    (n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5))
}

/// Sample excess kurtosis. NaN for fewer than four values or zero variance.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let (m2, _, m4) = deviation_sums(values);
    let (m2, m4) = (zero_out_noise(m2), zero_out_noise(m4));
    if m2 == 0.0 {
        return f64::NAN;
    }
    let adj = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    let numerator = n * (n + 1.0) * (n - 1.0) * m4;
    let denominator = (n - 2.0) * (n - 3.0) * m2.powi(2);
    numerator / denominator - adj
}

/// Count, location and spread of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Builds a [`Summary`]; quantiles interpolate linearly between ranks.
pub fn describe(values: &[f64]) -> Summary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Summary {
        count: sorted.len(),
        mean: values.iter().mean(),
        std: values.iter().std_dev(),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolation quantile of an ascending slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Sample covariance of two equally long columns.
pub fn covariance(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter().covariance(ys.iter())
}

/// Pearson correlation coefficient. NaN when either column is constant.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let denom = xs.iter().std_dev() * ys.iter().std_dev();
    if denom == 0.0 {
        return f64::NAN;
    }
    covariance(xs, ys) / denom
}

/// Direction of asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Skew {
    Right,
    Left,
    Symmetric,
    Undetermined,
}

/// Tail weight relative to a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tails {
    Leptokurtic,
    Platykurtic,
    Mesokurtic,
    Undetermined,
}

impl std::fmt::Display for Skew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Skew::Right => "right skewed",
            Skew::Left => "left skewed",
            Skew::Symmetric => "not skewed",
            Skew::Undetermined => "of undetermined skewness",
        })
    }
}

impl std::fmt::Display for Tails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Tails::Leptokurtic => "leptokurtic",
            Tails::Platykurtic => "platykurtic",
            Tails::Mesokurtic => "mesokurtic",
            Tails::Undetermined => "of undetermined kurtosis",
        })
    }
}

/// Qualitative reading of the skewness and excess kurtosis.
///
/// Both moments are read against a ±2 band, the usual rule of thumb for
/// "approximately normal", not against zero. A skewness of 1.7 is therefore
/// "not skewed" and an excess kurtosis of -1.5 is "mesokurtic". Only values
/// strictly beyond ±2 earn a direction. NaN moments read as undetermined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub skew: Skew,
    pub tails: Tails,
}

impl Shape {
    pub fn from_moments(moments: &Moments) -> Self {
        let skew = match moments.skewness {
            s if s.is_nan() => Skew::Undetermined,
            s if s > SHAPE_THRESHOLD => Skew::Right,
            s if s < -SHAPE_THRESHOLD => Skew::Left,
            _ => Skew::Symmetric,
        };
        let tails = match moments.excess_kurtosis {
            k if k.is_nan() => Tails::Undetermined,
            k if k > SHAPE_THRESHOLD => Tails::Leptokurtic,
            k if k < -SHAPE_THRESHOLD => Tails::Platykurtic,
            _ => Tails::Mesokurtic,
        };
        Shape { skew, tails }
    }

    pub fn sentence(&self) -> String {
        format!("The data was {} and {}.", self.skew, self.tails)
    }
}
