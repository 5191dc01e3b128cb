use serde::Deserialize;

use super::{ModelError, Regressor};

/// One node of a flattened regression tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Rows with `x[feature] <= threshold` continue at `left`, the rest at `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point strictly forward, so every walk ends at a leaf.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} of {}",
                            i, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", i));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has a non-finite value", i));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Averages a set of regression trees, like a random forest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestRegressor {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestRegressor {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ModelError> {
        let model = Self { n_features, trees };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::InvalidArtifact(
                "forest declares zero features".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| ModelError::InvalidArtifact(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

impl Regressor for ForestRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        total / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> TreeNode {
        TreeNode::Leaf { value }
    }

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    fn stump(feature: usize, threshold: f64, below: f64, above: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![split(feature, threshold, 1, 2), leaf(below), leaf(above)],
        }
    }

    #[test]
    fn threshold_is_inclusive_on_the_left() {
        let forest = ForestRegressor::new(2, vec![stump(1, 5.0, 100.0, 200.0)]).unwrap();
        assert_eq!(forest.predict(&[0.0, 5.0]).unwrap(), 100.0);
        assert_eq!(forest.predict(&[0.0, 5.1]).unwrap(), 200.0);
    }

    #[test]
    fn prediction_is_mean_of_trees() {
        let forest = ForestRegressor::new(
            1,
            vec![
                stump(0, 1.0, 300.0, 600.0),
                stump(0, 2.0, 480.0, 900.0),
                DecisionTree {
                    nodes: vec![leaf(540.0)],
                },
            ],
        )
        .unwrap();
        // 600, 480 and 540
        assert_eq!(forest.predict(&[1.5]).unwrap(), 540.0);
    }

    #[test]
    fn backward_children_are_rejected() {
        let cyclic = DecisionTree {
            nodes: vec![split(0, 1.0, 1, 2), split(0, 1.0, 0, 2), leaf(1.0)],
        };
        assert!(matches!(
            ForestRegressor::new(1, vec![cyclic]),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn dangling_children_and_bad_features_are_rejected() {
        let dangling = DecisionTree {
            nodes: vec![split(0, 1.0, 1, 7), leaf(1.0)],
        };
        assert!(ForestRegressor::new(1, vec![dangling]).is_err());
        assert!(ForestRegressor::new(1, vec![stump(3, 1.0, 0.0, 1.0)]).is_err());
        assert!(ForestRegressor::new(1, vec![]).is_err());
    }

    #[test]
    fn nodes_deserialize_from_flat_json() {
        let tree: DecisionTree = serde_json::from_str(
            r#"{"nodes":[{"feature":0,"threshold":2.5,"left":1,"right":2},{"value":1.0},{"value":2.0}]}"#,
        )
        .unwrap();
        assert_eq!(tree, stump(0, 2.5, 1.0, 2.0));
    }
}
