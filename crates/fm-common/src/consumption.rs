//! Fuel consumption totals.
//!
//! Consumption is reported either flat (`phase -> amount`) or as a nested
//! category tree whose leaves are amounts. Merging sums leaves key by key.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A consumption tree keyed by phase or category name.
pub type ConsumptionTree = BTreeMap<String, Consumption>;

/// One node of a consumption tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Consumption {
    Amount(f64),
    Categories(ConsumptionTree),
}

impl Consumption {
    /// Sum of every leaf below this node.
    pub fn total(&self) -> f64 {
        match self {
            Consumption::Amount(v) => *v,
            Consumption::Categories(tree) => tree.values().map(Consumption::total).sum(),
        }
    }

    fn sum(&self, other: &Consumption, key: &str) -> Result<Consumption> {
        match (self, other) {
            (Consumption::Amount(a), Consumption::Amount(b)) => Ok(Consumption::Amount(a + b)),
            (Consumption::Categories(a), Consumption::Categories(b)) => {
                Ok(Consumption::Categories(sum_trees(a, b)?))
            }
            _ => Err(Error::ConsumptionShapeMismatch {
                key: key.to_string(),
            }),
        }
    }

    fn scaled(&self, factor: f64) -> Consumption {
        match self {
            Consumption::Amount(v) => Consumption::Amount(v * factor),
            Consumption::Categories(tree) => Consumption::Categories(scale_tree(tree, factor)),
        }
    }
}

/// Leaf-wise sum of two trees.
///
/// Keys present on one side only are carried over unchanged. A key that is
/// an amount on one side and a category on the other is an error.
pub fn sum_trees(a: &ConsumptionTree, b: &ConsumptionTree) -> Result<ConsumptionTree> {
    let mut out = a.clone();
    for (key, value) in b {
        let merged = match a.get(key) {
            Some(existing) => existing.sum(value, key)?,
            None => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    Ok(out)
}

/// Sum two optional trees; `None` acts as the empty tree.
pub fn sum_optional(
    a: Option<&ConsumptionTree>,
    b: Option<&ConsumptionTree>,
) -> Result<Option<ConsumptionTree>> {
    match (a, b) {
        (Some(a), Some(b)) => sum_trees(a, b).map(Some),
        (Some(t), None) | (None, Some(t)) => Ok(Some(t.clone())),
        (None, None) => Ok(None),
    }
}

/// Multiply every leaf by `factor`.
pub fn scale_tree(tree: &ConsumptionTree, factor: f64) -> ConsumptionTree {
    tree.iter()
        .map(|(k, v)| (k.clone(), v.scaled(factor)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(pairs: &[(&str, f64)]) -> ConsumptionTree {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Consumption::Amount(*v)))
            .collect()
    }

    #[test]
    fn test_sum_flat() {
        let a = flat(&[("flaming", 1311.0), ("total", 4027.0)]);
        let b = flat(&[("flaming", 200.0), ("total", 400.0)]);
        let sum = sum_trees(&a, &b).unwrap();
        assert_eq!(sum["flaming"], Consumption::Amount(1511.0));
        assert_eq!(sum["total"], Consumption::Amount(4427.0));
    }

    #[test]
    fn test_sum_carries_one_sided_keys() {
        let a = flat(&[("flaming", 1.0)]);
        let b = flat(&[("residual", 2.0)]);
        let sum = sum_trees(&a, &b).unwrap();
        assert_eq!(sum.len(), 2);
        assert_eq!(sum["residual"], Consumption::Amount(2.0));
    }

    #[test]
    fn test_sum_nested() {
        let mut a = ConsumptionTree::new();
        a.insert(
            "summary".into(),
            Consumption::Categories(flat(&[("total", 10.0)])),
        );
        let b = a.clone();
        let sum = sum_trees(&a, &b).unwrap();
        assert_eq!(sum["summary"].total(), 20.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = flat(&[("summary", 1.0)]);
        let mut b = ConsumptionTree::new();
        b.insert(
            "summary".into(),
            Consumption::Categories(flat(&[("total", 1.0)])),
        );
        let err = sum_trees(&a, &b).unwrap_err();
        assert!(matches!(err, Error::ConsumptionShapeMismatch { ref key } if key == "summary"));
    }

    #[test]
    fn test_sum_optional() {
        let a = flat(&[("total", 1.0)]);
        assert_eq!(sum_optional(None, None).unwrap(), None);
        assert_eq!(sum_optional(Some(&a), None).unwrap(), Some(a.clone()));
        let both = sum_optional(Some(&a), Some(&a)).unwrap().unwrap();
        assert_eq!(both["total"], Consumption::Amount(2.0));
    }

    #[test]
    fn test_scale_tree() {
        let a = flat(&[("total", 10.0)]);
        let scaled = scale_tree(&a, 0.5);
        assert_eq!(scaled["total"], Consumption::Amount(5.0));
    }

    #[test]
    fn test_untagged_deserialize() {
        let tree: ConsumptionTree =
            serde_json::from_str(r#"{"summary": {"flaming": 1311, "total": 4027.5}}"#).unwrap();
        assert_eq!(tree["summary"].total(), 5338.5);
    }
}
