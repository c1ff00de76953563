//! Classifier outputs.

/// One scored-label answer of an external classifier for one instance.
///
/// `distribution` holds the classifier's weighted alternatives; weights are
/// non-negative but need not sum to one.
///
/// # Example
///
/// ```
/// use depforge_core::Prediction;
///
/// let p = Prediction::new("obj", 0.7)
///     .with_distribution([("obj", 0.7), ("nsubj", 0.3)]);
/// assert_eq!(p.label, "obj");
/// assert_eq!(p.distribution.len(), 2);
/// assert!(Prediction::new("__", 0.9).is_null("__"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prediction {
    /// The predicted label.
    pub label: String,
    /// Confidence of the predicted label.
    pub confidence: f64,
    /// Weighted alternatives.
    pub distribution: Vec<(String, f64)>,
}

impl Prediction {
    /// Creates a prediction with an empty distribution.
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            distribution: Vec::new(),
        }
    }

    /// Replaces the distribution.
    pub fn with_distribution<I, L>(mut self, distribution: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        self.distribution = distribution
            .into_iter()
            .map(|(label, weight)| (label.into(), weight))
            .collect();
        self
    }

    /// Returns true if the predicted label is the "no answer" marker.
    #[inline]
    pub fn is_null(&self, null_label: &str) -> bool {
        self.label == null_label
    }
}
