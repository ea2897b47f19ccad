//! Property-based tests for fm-math histogram functions.
//!
//! Uses proptest to verify rebinning invariants across many random inputs.

use fm_math::{approx_eq, bin_index, coalesce, even_edges, midpoints, rebin};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn sorted_edges() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..5000.0f64, 2..24).prop_map(|mut v| {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    })
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..5000.0f64, 0.0..100.0f64), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every midpoint lies inside its bin.
    #[test]
    fn midpoints_inside_bins(edges in sorted_edges()) {
        let mids = midpoints(&edges);
        prop_assert_eq!(mids.len(), edges.len() - 1);
        for (i, m) in mids.iter().enumerate() {
            prop_assert!(edges[i] <= *m && *m <= edges[i + 1]);
        }
    }

    /// Even edges start and end exactly at the requested bounds.
    #[test]
    fn even_edges_bounds(min in -100.0..100.0f64, span in 0.0..1000.0f64, bins in 1usize..40) {
        let max = min + span;
        let edges = even_edges(min, max, bins);
        prop_assert_eq!(edges.len(), bins + 1);
        prop_assert_eq!(edges[0], min);
        prop_assert_eq!(edges[bins], max);
        prop_assert!(edges.windows(2).all(|w| w[0] <= w[1]));
    }

    /// bin_index never leaves the valid range.
    #[test]
    fn bin_index_in_range(
        value in -1e4..1e4f64,
        min in -100.0..100.0f64,
        step in 0.0..500.0f64,
        bins in 1usize..40
    ) {
        prop_assert!(bin_index(value, min, step, bins) < bins);
    }

    /// Coalescing preserves total mass and yields strictly increasing positions.
    #[test]
    fn coalesce_preserves_mass(pts in points()) {
        let total: f64 = pts.iter().map(|p| p.1).sum();
        let merged = coalesce(&pts);
        let merged_total: f64 = merged.iter().map(|p| p.1).sum();
        prop_assert!(approx_eq(total, merged_total, TOL));
        prop_assert!(merged.windows(2).all(|w| w[0].0 < w[1].0));
    }

    /// Rebinning preserves total mass.
    #[test]
    fn rebin_preserves_mass(pts in points(), bins in 1usize..30) {
        let total: f64 = pts.iter().map(|p| p.1).sum();
        let masses = rebin(&pts, 0.0, 5000.0, bins);
        prop_assert_eq!(masses.len(), bins);
        let rebinned: f64 = masses.iter().sum();
        prop_assert!(approx_eq(total, rebinned, TOL), "{} != {}", total, rebinned);
    }
}
