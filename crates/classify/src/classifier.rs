//! Ordinal classification by ascending thresholds.

use crate::error::ClassifyError;

/// Boundaries of the reference precipitation scheme, in inches.
const PRECIPITATION_INCHES: [f64; 8] = [
    f64::NEG_INFINITY,
    0.75,
    1.5,
    2.2,
    2.3,
    2.4,
    2.5,
    f64::INFINITY,
];

const PRECIPITATION_LABELS: [&str; 7] = [
    "0-.75", ".75-1.5", "1.5-2.2", "2.2-2.3", "2.3-2.4", "2.4-2.5", ">2.5",
];

/// Maps continuous values onto classes `1..=n_classes()`.
///
/// With interior thresholds `t₁ < t₂ < … < tₘ` there are `m + 1` classes and
/// a value `v` falls in class `1 + |{ tᵢ : tᵢ <= v }|`. Bins are closed on the
/// left: a value exactly on `tᵢ` belongs to the class above it.
///
/// ```text
///   class 1   │ class 2 │ … │ class m+1
/// ────────────t₁────────t₂─…─tₘ────────────▶ v
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    thresholds: Vec<f64>,
    labels: Vec<String>,
}

impl Classifier {
    /// Builds a classifier from ascending boundaries.
    ///
    /// A leading `-∞` and a trailing `+∞` are accepted as open-ended
    /// sentinels and stripped. Labels default to range strings derived from
    /// the thresholds; see [`Classifier::with_labels`].
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::NonFiniteThreshold`] for NaN or a misplaced infinity.
    /// - [`ClassifyError::NotAscending`] unless strictly ascending.
    /// - [`ClassifyError::NoInteriorThresholds`] if nothing remains after
    ///   stripping sentinels.
    /// - [`ClassifyError::TooManyClasses`] beyond 255 classes.
    pub fn new(thresholds: Vec<f64>) -> Result<Self, ClassifyError> {
        let mut start = 0;
        let mut end = thresholds.len();
        if thresholds.first() == Some(&f64::NEG_INFINITY) {
            start = 1;
        }
        if end > start && thresholds[end - 1] == f64::INFINITY {
            end -= 1;
        }

        for (index, &value) in thresholds.iter().enumerate().take(end).skip(start) {
            if !value.is_finite() {
                return Err(ClassifyError::NonFiniteThreshold { index, value });
            }
        }
        for index in (start + 1)..end {
            let (previous, value) = (thresholds[index - 1], thresholds[index]);
            if previous >= value {
                return Err(ClassifyError::NotAscending {
                    index,
                    previous,
                    value,
                });
            }
        }

        let interior = thresholds[start..end].to_vec();
        if interior.is_empty() {
            return Err(ClassifyError::NoInteriorThresholds);
        }
        let n_classes = interior.len() + 1;
        if n_classes > u8::MAX as usize {
            return Err(ClassifyError::TooManyClasses { n_classes });
        }

        let labels = default_labels(&interior);
        Ok(Self {
            thresholds: interior,
            labels,
        })
    }

    /// The seven-class weekly precipitation scheme in inches:
    /// `0-.75`, `.75-1.5`, `1.5-2.2`, `2.2-2.3`, `2.3-2.4`, `2.4-2.5`, `>2.5`.
    pub fn precipitation_inches() -> Self {
        Self {
            thresholds: PRECIPITATION_INCHES[1..7].to_vec(),
            labels: PRECIPITATION_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the class labels.
    ///
    /// # Errors
    ///
    /// [`ClassifyError::LabelCountMismatch`] unless exactly one label per class.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, ClassifyError> {
        if labels.len() != self.n_classes() {
            return Err(ClassifyError::LabelCountMismatch {
                expected: self.n_classes(),
                got: labels.len(),
            });
        }
        self.labels = labels;
        Ok(self)
    }

    /// Returns the class of `value`, in `1..=n_classes()`.
    ///
    /// `+∞` maps to the top class and `-∞` to class 1.
    ///
    /// # Errors
    ///
    /// [`ClassifyError::NonFiniteValue`] if `value` is NaN.
    pub fn classify(&self, value: f64) -> Result<u8, ClassifyError> {
        if value.is_nan() {
            return Err(ClassifyError::NonFiniteValue);
        }
        let below = self.thresholds.partition_point(|&t| t <= value);
        // n_classes <= 255 is checked at construction.
        Ok(1 + below as u8)
    }

    /// Classifies every value, failing on the first NaN.
    pub fn classify_all(&self, values: &[f64]) -> Result<Vec<u8>, ClassifyError> {
        values.iter().map(|&v| self.classify(v)).collect()
    }

    /// Interior boundaries, ascending.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// One label per class, class 1 first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of classes, one more than the interior thresholds.
    pub fn n_classes(&self) -> usize {
        self.thresholds.len() + 1
    }
}

fn default_labels(thresholds: &[f64]) -> Vec<String> {
    let mut labels = Vec::with_capacity(thresholds.len() + 1);
    labels.push(format!("<{}", short(thresholds[0])));
    for pair in thresholds.windows(2) {
        labels.push(format!("{}-{}", short(pair[0]), short(pair[1])));
    }
    labels.push(format!(">{}", short(thresholds[thresholds.len() - 1])));
    labels
}

/// `0.75` -> `.75`
fn short(v: f64) -> String {
    let s = v.to_string();
    match s.strip_prefix("0.") {
        Some(rest) => format!(".{rest}"),
        None => s,
    }
}
