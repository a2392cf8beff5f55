//! Model-based heading classifier.
//!
//! A pretrained decision forest labels each line directly as `Title`, `H1`,
//! `H2`, `H3`, or `Other` from a six-value feature vector.  The forest is
//! fitted offline; this module only deserializes and evaluates it.
//!
//! # Artifact formats
//!
//! Forest (`heading_classifier.json`): split nodes send a sample left when
//! `features[feature] <= threshold`; leaves hold one value per class (counts
//! or fractions).  Children always sit after their parent in `nodes`.
//!
//! ```json
//! {
//!   "n_classes": 5,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 15.5, "left": 1, "right": 2 },
//!         { "value": [0, 0, 0, 9, 0] },
//!         { "value": [1, 6, 0, 0, 2] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Label decoder (`label_encoder.json`): class names in index order.
//!
//! ```json
//! { "classes": ["H1", "H2", "H3", "Other", "Title"] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{Classification, HeadingClassifier};
use crate::config::TitleConfig;
use crate::title::PageOneSizes;
use crate::types::{Label, TextLine};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 6;

/// `[font_size, is_bold, is_caps, y_position, text_length, page_number]`.
pub type Features = [f32; FEATURE_COUNT];

/// Column names matching the [`Features`] layout.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "font_size",
    "is_bold",
    "is_caps",
    "y_pos",
    "text_length",
    "page",
];

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("incompatible model: {0}")]
    Incompatible(String),

    #[error("label decoder: {0}")]
    UnknownLabel(#[from] crate::types::InvalidLabel),
}

/// Feature vector for one line.
pub fn features(line: &TextLine) -> Features {
    [
        line.avg_font_size.points(),
        if line.is_bold() { 1.0 } else { 0.0 },
        if line.is_uppercase() { 1.0 } else { 0.0 },
        line.y_position,
        line.text.chars().count() as f32,
        line.page_number as f32,
    ]
}

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn leaf(&self, features: &Features) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }

    fn validate(&self, tree_index: usize, n_classes: usize) -> Result<(), ModelLoadError> {
        if self.nodes.is_empty() {
            return Err(ModelLoadError::Incompatible(format!(
                "tree {tree_index} has no nodes"
            )));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelLoadError::Incompatible(format!(
                            "tree {tree_index} node {index} splits on feature {feature}, \
                             but only {FEATURE_COUNT} features exist"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelLoadError::Incompatible(format!(
                            "tree {tree_index} node {index} has a non-finite threshold"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(ModelLoadError::Incompatible(format!(
                                "tree {tree_index} node {index} points to invalid child {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelLoadError::Incompatible(format!(
                            "tree {tree_index} leaf {index} has {} values, expected {n_classes}",
                            value.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A decision forest.  Prediction averages each tree's normalised leaf
/// distribution and returns the class with the highest mean; ties go to the
/// lowest class index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_classes: usize,
    pub trees: Vec<Tree>,
}

impl ForestModel {
    pub fn from_json(input: &str) -> Result<Self, ModelLoadError> {
        let model: ForestModel = serde_json::from_str(input)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.n_classes == 0 {
            return Err(ModelLoadError::Incompatible("n_classes is zero".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelLoadError::Incompatible("forest has no trees".to_string()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_classes)?;
        }
        Ok(())
    }

    /// Mean class distribution over all trees.
    pub fn predict_proba(&self, features: &Features) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let sum: f64 = leaf.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, value) in totals.iter_mut().zip(leaf) {
                *total += value / sum;
            }
        }
        let count = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= count);
        totals
    }

    /// Index of the most probable class.
    pub fn predict(&self, features: &Features) -> usize {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (index, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = index;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Label decoder
// ---------------------------------------------------------------------------

/// Maps class indices back to label names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDecoder {
    pub classes: Vec<String>,
}

impl LabelDecoder {
    pub fn from_json(input: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn labels(&self) -> Result<Vec<Label>, ModelLoadError> {
        self.classes
            .iter()
            .map(|name| name.parse::<Label>().map_err(ModelLoadError::from))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// A validated forest paired with its decoded labels.
#[derive(Debug, Clone)]
pub struct ModelClassifier {
    forest: ForestModel,
    labels: Vec<Label>,
}

impl ModelClassifier {
    pub fn new(forest: ForestModel, decoder: LabelDecoder) -> Result<Self, ModelLoadError> {
        forest.validate()?;
        let labels = decoder.labels()?;
        if labels.len() != forest.n_classes {
            return Err(ModelLoadError::Incompatible(format!(
                "forest predicts {} classes but the label decoder lists {}",
                forest.n_classes,
                labels.len()
            )));
        }
        Ok(ModelClassifier { forest, labels })
    }

    /// Label for a precomputed feature vector.
    pub fn predict(&self, features: &Features) -> Label {
        self.labels[self.forest.predict(features)]
    }
}

impl HeadingClassifier for ModelClassifier {
    fn name(&self) -> &'static str {
        "model"
    }

    fn classify(&self, line: &TextLine, _prev_y: f32) -> Classification {
        match self.predict(&features(line)) {
            Label::Other => Classification::Ignored,
            label => Classification::Labeled(label),
        }
    }

    fn fallback_title(
        &self,
        _page_one: &PageOneSizes,
        _has_headings: bool,
        config: &TitleConfig,
    ) -> String {
        config.untitled.clone()
    }
}
