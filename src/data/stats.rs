// ============================================================
// Layer 4 — Column Statistics
// ============================================================
// Small, allocation-light statistics over f64 slices. Used by
// the cleaner (median / mode), the describe report, and the
// prediction input bounds.
//
// Conventions follow the usual dataframe defaults:
//   - std is the sample standard deviation (n - 1)
//   - quantiles use linear interpolation between order statistics
//   - the mode of a tie is the smallest value

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. None for fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Quantile `q` in [0, 1] with linear interpolation
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos  = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo   = pos.floor() as usize;
    let hi   = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Most frequent string; ties go to the lexicographically smallest
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    // BTreeMap iterates in key order, so the first maximum wins ties
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v)
}

/// Pearson correlation. None when lengths differ, fewer than two
/// values, or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx.sqrt() * syy.sqrt()))
}

// ─── Column Summary ───────────────────────────────────────────────────────────
/// The eight-number description of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name:  String,
    pub count: usize,
    pub mean:  f64,
    /// NaN when count < 2
    pub std:   f64,
    pub min:   f64,
    pub q25:   f64,
    pub q50:   f64,
    pub q75:   f64,
    pub max:   f64,
}

impl ColumnSummary {
    /// None for an empty column
    pub fn compute(name: impl Into<String>, values: &[f64]) -> Option<Self> {
        Some(Self {
            name:  name.into(),
            count: values.len(),
            mean:  mean(values)?,
            std:   std_dev(values).unwrap_or(f64::NAN),
            min:   min(values)?,
            q25:   quantile(values, 0.25)?,
            q50:   quantile(values, 0.5)?,
            q75:   quantile(values, 0.75)?,
            max:   max(values)?,
        })
    }
}

// ─── Feature Bounds ───────────────────────────────────────────────────────────
/// Observed range of a feature, used to default and check prediction inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureBounds {
    pub min:  f64,
    pub max:  f64,
    pub mean: f64,
}

impl FeatureBounds {
    pub fn compute(values: &[f64]) -> Option<Self> {
        Some(Self { min: min(values)?, max: max(values)?, mean: mean(values)? })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// ─── Histogram ────────────────────────────────────────────────────────────────
/// Equal-width bins over [min, max]; the last bin is closed on the right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// bins + 1 edges
    pub edges:  Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let lo = min(values)?;
        let hi = max(values)?;
        let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Self { edges, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantiles_interpolate() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&v, 0.25), Some(2.0));
        assert_eq!(quantile(&v, 0.75), Some(4.0));
        assert_eq!(quantile(&[0.0, 10.0], 0.25), Some(2.5));
    }

    #[test]
    fn test_mode_breaks_ties_lexicographically() {
        assert_eq!(mode(["b", "a", "b", "a"]), Some("a"));
        assert_eq!(mode(["x", "y", "y"]), Some("y"));
        assert_eq!(mode(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_sample_std() {
        let s = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((s - 2.138089935299395).abs() < 1e-12);
        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn test_pearson_perfect_and_degenerate() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[1.0, 1.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let h = Histogram::compute(&values, 20).unwrap();
        assert_eq!(h.edges.len(), 21);
        assert_eq!(h.counts.iter().sum::<usize>(), 101);
        // max lands in the last bin
        assert_eq!(h.counts[19], 6);
    }

    #[test]
    fn test_bounds() {
        let b = FeatureBounds::compute(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(b, FeatureBounds { min: 10.0, max: 30.0, mean: 20.0 });
        assert!(b.contains(10.0));
        assert!(!b.contains(30.5));
    }
}
