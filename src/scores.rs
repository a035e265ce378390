//! Score normalization and arg-max resolution

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolved prediction for one classification call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted digit 0-9, or -1 when no content was found on the canvas
    pub digit: i32,
    /// Probability of the predicted digit (0-1)
    pub confidence: f32,
    /// Full probability distribution over the 10 digit classes
    /// (empty when no content was found)
    pub distribution: Vec<f32>,
}

impl Prediction {
    /// Sentinel prediction for an empty canvas
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            digit: -1,
            confidence: 0.0,
            distribution: Vec::new(),
        }
    }
}

/// Numerically stabilized softmax: p_i = exp(x_i - max) / sum exp(x_j - max)
#[must_use]
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Whether the scores already form a probability distribution
///
/// Models compiled with a softmax output node produce normalized scores; raw
/// logit outputs do not. Both constructions must resolve identically.
#[must_use]
fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|&s| (0.0..=1.0).contains(&s)) && (sum - 1.0).abs() < 1e-3
}

/// Resolve raw or pre-normalized model output into a prediction
///
/// Applies softmax unless the scores are already normalized, then selects the
/// arg-max class; ties break toward the lowest index.
#[must_use]
pub fn resolve(scores: &[f32]) -> Prediction {
    let distribution = if is_distribution(scores) {
        scores.to_vec()
    } else {
        softmax(scores)
    };

    let mut digit = 0usize;
    let mut confidence = distribution[0];
    for (i, &p) in distribution.iter().enumerate().skip(1) {
        if p > confidence {
            digit = i;
            confidence = p;
        }
    }

    debug!("Resolved digit {} with probability {:.4}", digit, confidence);

    Prediction {
        digit: digit as i32,
        confidence,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let logits = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 3.0, 0.9, 1.0];
        let probs = softmax(&logits);
        assert_eq!(probs.len(), 10);

        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_softmax_is_stable_for_large_logits() {
        let logits = [1000.0, 999.0, 998.0];
        let probs = softmax(&logits);
        assert!(probs.iter().all(|p| p.is_finite()));
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }

    #[test]
    fn test_resolve_raw_logits() {
        let logits = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 3.0, 0.9, 1.0];
        let prediction = resolve(&logits);

        assert_eq!(prediction.digit, 7);
        assert_eq!(prediction.distribution.len(), 10);
        let expected = softmax(&logits);
        assert_eq!(prediction.confidence, expected[7]);
        // digit always matches the argmax of the returned distribution
        let argmax = prediction
            .distribution
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(prediction.digit, argmax as i32);
    }

    #[test]
    fn test_resolve_pre_normalized_output() {
        // A softmax-in-graph model returns a distribution; resolve must not
        // re-normalize it
        let probs = [0.01, 0.02, 0.8, 0.03, 0.04, 0.02, 0.02, 0.02, 0.02, 0.02];
        let prediction = resolve(&probs);

        assert_eq!(prediction.digit, 2);
        assert_eq!(prediction.confidence, 0.8);
        assert_eq!(prediction.distribution, probs.to_vec());
    }

    #[test]
    fn test_ties_break_to_lowest_index() {
        let probs = [0.2, 0.2, 0.1, 0.1, 0.1, 0.1, 0.05, 0.05, 0.05, 0.05];
        let prediction = resolve(&probs);
        assert_eq!(prediction.digit, 0);
    }

    #[test]
    fn test_no_content_sentinel() {
        let prediction = Prediction::no_content();
        assert_eq!(prediction.digit, -1);
        assert_eq!(prediction.confidence, 0.0);
        assert!(prediction.distribution.is_empty());
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = resolve(&[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.digit, 1);
        assert_eq!(deserialized.distribution.len(), 10);
    }
}
