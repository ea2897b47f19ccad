//! Piecewise-constant histogram primitives over bin boundaries.
//!
//! A histogram with `N` bins is described by `N + 1` boundaries. Mass is
//! attributed to bins through representative points (bin midpoints), so
//! rebinning is a matter of locating each point in the new boundaries.

use std::cmp::Ordering;

/// Midpoint of every consecutive pair of boundaries.
///
/// Returns an empty vector for fewer than two boundaries.
pub fn midpoints(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// `bins + 1` evenly spaced boundaries from `min` to `max`.
///
/// The first boundary is exactly `min` and the last exactly `max`.
/// Returns an empty vector when `bins == 0`.
pub fn even_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    if bins == 0 {
        return Vec::new();
    }
    let step = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| min + step * i as f64).collect();
    edges.push(max);
    edges
}

/// Index of the bin containing `value` for bins of width `step` starting at
/// `min`.
///
/// Values below `min` land in bin 0 and values at or beyond the top land in
/// the last bin. A zero or non-finite step (all boundaries coincide) puts
/// everything in bin 0.
pub fn bin_index(value: f64, min: f64, step: f64, bins: usize) -> usize {
    if bins == 0 || !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let raw = ((value - min) / step).floor();
    if raw.is_nan() || raw < 0.0 {
        0
    } else {
        (raw as usize).min(bins - 1)
    }
}

/// Sort `(position, mass)` points by position and sum masses at identical
/// positions.
pub fn coalesce(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut out: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
    for (position, mass) in sorted {
        match out.last_mut() {
            Some(last) if last.0 == position => last.1 += mass,
            _ => out.push((position, mass)),
        }
    }
    out
}

/// Mass per bin after dropping each point into `bins` even bins spanning
/// `[min, max]`.
pub fn rebin(points: &[(f64, f64)], min: f64, max: f64, bins: usize) -> Vec<f64> {
    let mut masses = vec![0.0; bins];
    if bins == 0 {
        return masses;
    }
    let step = (max - min) / bins as f64;
    for &(position, mass) in points {
        masses[bin_index(position, min, step, bins)] += mass;
    }
    masses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_of_empty_is_empty() {
        assert!(midpoints(&[]).is_empty());
        assert!(midpoints(&[5.0]).is_empty());
    }

    #[test]
    fn midpoints_of_uneven_edges() {
        assert_eq!(midpoints(&[100.0, 400.0, 600.0, 650.0]), vec![250.0, 500.0, 625.0]);
    }

    #[test]
    fn even_edges_hits_both_ends() {
        let edges = even_edges(90.0, 500.0, 4);
        assert_eq!(edges, vec![90.0, 192.5, 295.0, 397.5, 500.0]);
        assert!(even_edges(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn bin_index_clamps() {
        assert_eq!(bin_index(89.0, 90.0, 102.5, 4), 0);
        assert_eq!(bin_index(170.0, 90.0, 102.5, 4), 0);
        assert_eq!(bin_index(250.0, 90.0, 102.5, 4), 1);
        assert_eq!(bin_index(500.0, 90.0, 102.5, 4), 3);
        assert_eq!(bin_index(900.0, 90.0, 102.5, 4), 3);
    }

    #[test]
    fn bin_index_degenerate_step() {
        assert_eq!(bin_index(0.0, 0.0, 0.0, 20), 0);
        assert_eq!(bin_index(1.0, 0.0, f64::NAN, 20), 0);
    }

    #[test]
    fn coalesce_sums_duplicates() {
        let points = [(250.0, 0.75), (170.0, 4.0), (250.0, 0.25)];
        assert_eq!(coalesce(&points), vec![(170.0, 4.0), (250.0, 1.0)]);
    }

    #[test]
    fn rebin_keeps_mass() {
        let points = [(150.0, 0.25), (170.0, 4.0), (250.0, 0.75), (450.0, 0.5)];
        let masses = rebin(&points, 90.0, 500.0, 4);
        assert_eq!(masses, vec![4.25, 0.75, 0.0, 0.5]);
    }
}
