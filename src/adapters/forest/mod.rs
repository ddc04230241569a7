//! Forest adapter: Implementation of `Classifier` over an exported tree ensemble.
//!
//! The artifact is a random forest trained offline and exported as JSON
//! (`model.json`), one set of node arrays per tree in the scikit-learn
//! `tree_` layout:
//!
//! - `children_left[i] == -1` marks node `i` as a leaf
//! - at a split, go left when `x[feature[i]] <= threshold[i]`
//! - `value[i]` is the per-class sample weight reaching node `i`
//!
//! # Voting
//!
//! - `soft`: probabilities are the mean of per-tree normalized leaf
//!   distributions (matches `RandomForestClassifier.predict_proba`)
//! - `hard`: majority vote of per-tree argmax; no probability interface
//!
//! # Integrity
//!
//! If `manifest.json` sits next to the model, the SHA-256 of the model file
//! must match its manifest entry. Deployments can require the manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

/// Default artifact file name inside a model directory.
pub const MODEL_FILE: &str = "model.json";

/// Digest manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";

const FORMAT_VERSION: u32 = 1;
const MANIFEST_VERSION: u32 = 1;
const N_CLASSES: usize = 2;
const LEAF: i64 = -1;

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voting {
    Soft,
    Hard,
}

/// One tree as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// Forest parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub voting: Voting,
    pub trees: Vec<ExportedTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelManifest {
    version: u32,
    files: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Normalized class distribution
        distribution: [f64; N_CLASSES],
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Compile and check one exported tree.
    fn compile(index: usize, exported: &ExportedTree) -> Result<Self, ClassifierError> {
        let n = exported.children_left.len();
        let malformed = |msg: String| ClassifierError::Load(format!("tree {index}: {msg}"));

        if n == 0 {
            return Err(malformed("no nodes".into()));
        }
        if exported.children_right.len() != n
            || exported.feature.len() != n
            || exported.threshold.len() != n
            || exported.value.len() != n
        {
            return Err(malformed("node array lengths differ".into()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = exported.children_left[i];
            let right = exported.children_right[i];

            if left == LEAF {
                if right != LEAF {
                    return Err(malformed(format!("node {i} has only a right child")));
                }
                let row = &exported.value[i];
                if row.len() != N_CLASSES {
                    return Err(malformed(format!(
                        "node {i} has {} class weights, expected {N_CLASSES}",
                        row.len()
                    )));
                }
                if row.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(malformed(format!("node {i} has invalid class weights")));
                }
                let total: f64 = row.iter().sum();
                if total <= 0.0 {
                    return Err(malformed(format!("node {i} has zero total weight")));
                }
                nodes.push(Node::Leaf {
                    distribution: [row[0] / total, row[1] / total],
                });
                continue;
            }

            // Children must point forward so traversal always terminates.
            let child = |c: i64| -> Result<usize, ClassifierError> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| malformed(format!("node {i} has invalid child {c}")))
            };
            let feature = usize::try_from(exported.feature[i])
                .ok()
                .filter(|&f| f < FEATURE_COUNT)
                .ok_or_else(|| {
                    malformed(format!(
                        "node {i} splits on invalid feature {}",
                        exported.feature[i]
                    ))
                })?;
            let threshold = exported.threshold[i];
            if !threshold.is_finite() {
                return Err(malformed(format!("node {i} has a non-finite threshold")));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_distribution(&self, x: &[f64]) -> [f64; N_CLASSES] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { distribution } => return *distribution,
            }
        }
    }
}

/// Argmax over two classes; ties go to class 0.
fn argmax(d: [f64; N_CLASSES]) -> u8 {
    if d[1] > d[0] {
        1
    } else {
        0
    }
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Metadata shown on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub source: PathBuf,
    pub trees: usize,
    pub voting: Voting,
    pub verified: bool,
}

impl ModelInfo {
    #[must_use]
    pub fn supports_proba(&self) -> bool {
        self.voting == Voting::Soft
    }
}

/// Tree-ensemble classifier loaded from an exported artifact.
///
/// Immutable after load; safe to share across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    trees: Vec<Tree>,
    voting: Voting,
    source: PathBuf,
    verified: bool,
}

impl ForestClassifier {
    /// Load the model from a file or a directory containing `model.json`.
    ///
    /// # Errors
    /// Returns `ClassifierError::Load` if the artifact cannot be read, fails
    /// its manifest digest, or does not describe a valid 13-feature forest.
    pub fn load(path: &Path, require_manifest: bool) -> Result<Self, ClassifierError> {
        let model_path = if path.is_dir() {
            path.join(MODEL_FILE)
        } else {
            path.to_path_buf()
        };

        let bytes = std::fs::read(&model_path).map_err(|e| {
            ClassifierError::Load(format!("Failed to read {}: {e}", model_path.display()))
        })?;

        let verified = Self::verify_manifest(&model_path, &bytes, require_manifest)?;

        let exported: ExportedForest = serde_json::from_slice(&bytes)
            .map_err(|e| ClassifierError::Load(format!("Invalid model format: {e}")))?;

        let mut classifier = Self::from_exported(&exported)?;
        classifier.source = model_path;
        classifier.verified = verified;

        tracing::info!(
            "Loaded model from {:?} (trees={}, voting={:?}, verified={})",
            classifier.source,
            classifier.trees.len(),
            classifier.voting,
            classifier.verified
        );

        Ok(classifier)
    }

    /// Build a classifier from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ClassifierError::Load` if the parameters fail sanity checks.
    pub fn from_exported(exported: &ExportedForest) -> Result<Self, ClassifierError> {
        if exported.format_version != FORMAT_VERSION {
            return Err(ClassifierError::Load(format!(
                "Unsupported model format version: {}",
                exported.format_version
            )));
        }
        if exported.feature_names.len() != FEATURE_COUNT
            || exported
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(a, b)| a != b)
        {
            return Err(ClassifierError::Load(format!(
                "Model feature names {:?} do not match expected {:?}",
                exported.feature_names, FEATURE_NAMES
            )));
        }
        if exported.trees.is_empty() {
            return Err(ClassifierError::Load("Model contains no trees".into()));
        }

        let trees = exported
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| Tree::compile(i, t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            voting: exported.voting,
            source: PathBuf::new(),
            verified: false,
        })
    }

    /// Check the model bytes against `manifest.json`, if present.
    ///
    /// Returns whether a manifest was found and matched.
    fn verify_manifest(
        model_path: &Path,
        model_bytes: &[u8],
        require_manifest: bool,
    ) -> Result<bool, ClassifierError> {
        let base_dir = model_path.parent().unwrap_or(Path::new("."));
        let manifest_path = base_dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            if require_manifest {
                return Err(ClassifierError::Load(format!(
                    "Model manifest required but not found at {}",
                    manifest_path.display()
                )));
            }
            tracing::warn!(
                "No {MANIFEST_FILE} next to model; loading without digest check"
            );
            return Ok(false);
        }

        let content = std::fs::read(&manifest_path)
            .map_err(|e| ClassifierError::Load(format!("Failed to read manifest: {e}")))?;
        let manifest: ModelManifest = serde_json::from_slice(&content)
            .map_err(|e| ClassifierError::Load(format!("Invalid manifest.json format: {e}")))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ClassifierError::Load(format!(
                "Unsupported manifest version: {}",
                manifest.version
            )));
        }

        let file_name = model_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(MODEL_FILE);
        let expected = manifest.files.get(file_name).ok_or_else(|| {
            ClassifierError::Load(format!("manifest.json does not list {file_name}"))
        })?;

        let actual = sha256_hex_bytes(model_bytes);
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(ClassifierError::Load(format!(
                "Digest mismatch for {file_name}"
            )));
        }

        Ok(true)
    }

    #[must_use]
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            source: self.source.clone(),
            trees: self.trees.len(),
            voting: self.voting,
            verified: self.verified,
        }
    }

    fn mean_distribution(&self, x: &[f64]) -> [f64; N_CLASSES] {
        let mut sum = [0.0; N_CLASSES];
        for tree in &self.trees {
            let d = tree.leaf_distribution(x);
            sum[0] += d[0];
            sum[1] += d[1];
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }

    fn majority_vote(&self, x: &[f64]) -> u8 {
        let positive = self
            .trees
            .iter()
            .filter(|t| argmax(t.leaf_distribution(x)) == 1)
            .count();
        let negative = self.trees.len() - positive;
        if positive > negative {
            1
        } else {
            0
        }
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError> {
        let x = features.as_slice();
        Ok(match self.voting {
            Voting::Soft => argmax(self.mean_distribution(x)),
            Voting::Hard => self.majority_vote(x),
        })
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Option<[f64; 2]>, ClassifierError> {
        match self.voting {
            Voting::Soft => Ok(Some(self.mean_distribution(features.as_slice()))),
            Voting::Hard => Ok(None),
        }
    }
}
