//! SMOTE oversampling of the minority class.
//!
//! Synthetic rows are interpolated between a minority row and one of its
//! nearest minority neighbours:
//! ```text
//! x_new = x_i + u * (x_nn - x_i),   u ~ U[0, 1)
//! ```

use crate::dataset::{Frame, Value};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::schema;
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Minority-class resampler.
///
/// Oversamples the smallest class until it matches the largest one. Only the
/// minority class grows; other classes are left as they are. Every feature
/// column must be numeric, so this runs after all encoding stages.
///
/// Fitting learns nothing; the fitted resampler carries the configuration.
///
/// # Example
/// ```ignore
/// use habitrisk::preprocessing::{Resampler, Transformer};
///
/// let balanced = Resampler::new().with_seed(7).fit_transform(&encoded_train)?;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Resampler {
    target: String,
    k_neighbors: usize,
    seed: u64,
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new()
    }
}

/// One class of the target column, in order of first appearance.
struct ClassRows {
    label: Value,
    rows: Vec<usize>,
}

impl Resampler {
    /// Resample on `Obesity` with 5 neighbours and seed 42.
    pub fn new() -> Self {
        Self {
            target: schema::TARGET.to_string(),
            k_neighbors: 5,
            seed: 42,
        }
    }

    /// Set the target column.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the number of nearest neighbours to interpolate towards.
    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Target column.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Random seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Serializable parameters for a Resampler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResamplerParams {
    pub target: String,
    pub k_neighbors: usize,
    pub seed: u64,
}

/// A resampler ready to balance training tables.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedResampler {
    // single entry: the target column
    columns: Vec<String>,
    k_neighbors: usize,
    seed: u64,
}

impl FittedResampler {
    fn target(&self) -> &str {
        &self.columns[0]
    }
}

fn check_k(k_neighbors: usize) -> Result<(), PreprocessingError> {
    if k_neighbors == 0 {
        return Err(PreprocessingError::InvalidParameter(
            "k_neighbors must be at least 1".to_string(),
        ));
    }
    Ok(())
}

impl Transformer for Resampler {
    type Params = ResamplerParams;
    type Fitted = FittedResampler;

    /// # Errors
    /// - [`PreprocessingError::InvalidParameter`] if `k_neighbors` is 0
    fn fit(&self, _data: &Frame) -> Result<Self::Fitted, PreprocessingError> {
        check_k(self.k_neighbors)?;
        Ok(FittedResampler {
            columns: vec![self.target.clone()],
            k_neighbors: self.k_neighbors,
            seed: self.seed,
        })
    }
}

impl FittedTransformer for FittedResampler {
    type Params = ResamplerParams;

    /// Return a table where the minority class has as many rows as the majority class.
    ///
    /// Original rows come first, synthetic rows after them. The target column
    /// is moved after the feature columns. A table without the target column is
    /// returned unchanged.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidParameter`] if a feature cell is not a
    ///   finite number, or the minority class has a single row
    /// - [`PreprocessingError::MissingValues`] if a target cell is missing
    fn transform(&self, data: &Frame) -> Result<Frame, PreprocessingError> {
        let name = self.target();
        let Some(target) = data.column(name) else {
            warn!(target = %name, "target column absent, resampling skipped");
            return Ok(data.clone());
        };

        let classes = group_by_class(name, target)?;
        let Some(majority) = classes.iter().map(|c| c.rows.len()).max() else {
            return Ok(data.clone());
        };
        // first class with the smallest count
        let minority = classes
            .iter()
            .fold(None::<&ClassRows>, |best, c| match best {
                Some(b) if b.rows.len() <= c.rows.len() => Some(b),
                _ => Some(c),
            });
        let Some(minority) = minority else {
            return Ok(data.clone());
        };
        let n_min = minority.rows.len();
        if n_min == majority {
            info!(classes = classes.len(), "classes already balanced, resampling skipped");
            return Ok(data.clone());
        }
        if n_min < 2 {
            return Err(PreprocessingError::InvalidParameter(format!(
                "Minority class '{}' has a single row; at least 2 are needed to interpolate",
                minority.label
            )));
        }

        let features = data.without_columns(&self.columns);
        if features.n_cols() == 0 {
            return Err(PreprocessingError::InvalidParameter(
                "Resampling needs at least one feature column".to_string(),
            ));
        }
        check_numeric(&features)?;
        let matrix = features.to_matrix()?;
        let minority_rows = matrix.select(ndarray::Axis(0), &minority.rows);

        let k = self.k_neighbors.min(n_min - 1);
        let neighbours = nearest_neighbours(&minority_rows, k);

        let n_new = majority - n_min;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut synthetic: Vec<Vec<Value>> = vec![Vec::with_capacity(n_new); features.n_cols()];
        for _ in 0..n_new {
            let i = rng.gen_range(0..n_min);
            let nn = neighbours[i][rng.gen_range(0..k)];
            let gap: f64 = rng.gen();
            let base = minority_rows.row(i);
            let toward = minority_rows.row(nn);
            for (col, cells) in synthetic.iter_mut().enumerate() {
                cells.push(Value::Number(base[col] + gap * (toward[col] - base[col])));
            }
        }

        info!(
            minority = %minority.label,
            before = n_min,
            after = majority,
            seed = self.seed,
            "oversampled minority class"
        );

        let mut out = features;
        out.extend_rows(synthetic)?;
        let mut labels = target.to_vec();
        labels.extend(vec![minority.label.clone(); n_new]);
        out.push_column(name.to_string(), labels)?;
        Ok(out)
    }

    fn extract_params(&self) -> Self::Params {
        ResamplerParams {
            target: self.target().to_string(),
            k_neighbors: self.k_neighbors,
            seed: self.seed,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        check_k(params.k_neighbors)?;
        Ok(Self {
            columns: vec![params.target],
            k_neighbors: params.k_neighbors,
            seed: params.seed,
        })
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn group_by_class(name: &str, target: &[Value]) -> Result<Vec<ClassRows>, PreprocessingError> {
    let mut classes: Vec<ClassRows> = Vec::new();
    for (row, value) in target.iter().enumerate() {
        if value.is_missing() {
            return Err(PreprocessingError::MissingValues(format!(
                "Target column '{}' is missing at row {}",
                name, row
            )));
        }
        match classes.iter_mut().find(|c| &c.label == value) {
            Some(class) => class.rows.push(row),
            None => classes.push(ClassRows {
                label: value.clone(),
                rows: vec![row],
            }),
        }
    }
    Ok(classes)
}

fn check_numeric(features: &Frame) -> Result<(), PreprocessingError> {
    for (name, values) in features.iter_columns() {
        for (row, value) in values.iter().enumerate() {
            let ok = matches!(value, Value::Number(x) if x.is_finite());
            if !ok {
                return Err(PreprocessingError::InvalidParameter(format!(
                    "Resampling needs finite numeric features; column '{}' row {} holds '{}'",
                    name, row, value
                )));
            }
        }
    }
    Ok(())
}

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Indices of the `k` nearest other rows for every row. Ties go to the lower index.
fn nearest_neighbours(rows: &Array2<f64>, k: usize) -> Vec<Vec<usize>> {
    let n = rows.nrows();
    (0..n)
        .map(|i| {
            let mut others: Vec<(f64, usize)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (euclidean(rows.row(i), rows.row(j)), j))
                .collect();
            others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            others.into_iter().take(k).map(|(_, j)| j).collect()
        })
        .collect()
}
