//! Spatial bucketing over a regular grid.

use std::collections::HashMap;

use fm_common::Fire;
use fm_config::GridConfig;

/// Group fires by grid cell.
///
/// Fires outside the boundary each get a bucket of their own. Buckets are
/// returned in order of their first fire's appearance and keep input order
/// inside.
pub fn bucket_fires<'a>(grid: &GridConfig, fires: &'a [Fire]) -> Vec<Vec<&'a Fire>> {
    let mut buckets: Vec<Vec<&Fire>> = Vec::new();
    let mut by_cell: HashMap<(i64, i64), usize> = HashMap::new();

    for fire in fires {
        match grid.cell(fire.latitude, fire.longitude) {
            Some(cell) => match by_cell.get(&cell) {
                Some(&idx) => buckets[idx].push(fire),
                None => {
                    by_cell.insert(cell, buckets.len());
                    buckets.push(vec![fire]);
                }
            },
            None => buckets.push(vec![fire]),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fm_config::LatLng;

    fn grid() -> GridConfig {
        GridConfig::new(
            0.5,
            LatLng { lat: 30.0, lng: -120.0 },
            LatLng { lat: 40.0, lng: -110.0 },
        )
    }

    fn fire(id: &str, lat: f64, lng: f64) -> Fire {
        let t = NaiveDate::from_ymd_opt(2015, 8, 4)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        Fire::new(id, t, t, 1.0, lat, lng)
    }

    fn ids(buckets: &[Vec<&Fire>]) -> Vec<Vec<String>> {
        buckets
            .iter()
            .map(|b| b.iter().map(|f| f.id.0.clone()).collect())
            .collect()
    }

    #[test]
    fn test_first_appearance_order() {
        let fires = vec![
            fire("a", 36.1, -111.4),
            fire("out", 32.1, -100.1),
            fire("b", 36.4, -111.3),
            fire("c", 32.2, -111.2),
        ];
        let buckets = bucket_fires(&grid(), &fires);
        assert_eq!(
            ids(&buckets),
            vec![vec!["a", "b"], vec!["out"], vec!["c"]]
        );
    }

    #[test]
    fn test_outside_fires_never_share() {
        let fires = vec![fire("1", 32.1, -100.1), fire("2", 32.1, -100.1)];
        assert_eq!(bucket_fires(&grid(), &fires).len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(bucket_fires(&grid(), &[]).is_empty());
    }
}
