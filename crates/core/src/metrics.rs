//! Held-out evaluation: accuracy and a per-class precision/recall/F1 report.

use serde::Serialize;
use std::fmt;

/// Fraction of predictions equal to the truth. Empty input scores 0.
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / truth.len() as f64
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<(String, ClassMetrics)>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn averaged(classes: &[(String, ClassMetrics)], weights: &[f64], support: usize) -> ClassMetrics {
    let norm: f64 = weights.iter().sum();
    let mean = |field: fn(&ClassMetrics) -> f64| {
        if norm == 0.0 {
            return 0.0;
        }
        classes
            .iter()
            .zip(weights)
            .map(|((_, m), w)| field(m) * w)
            .sum::<f64>()
            / norm
    };
    ClassMetrics {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        support,
    }
}

impl ClassificationReport {
    /// Builds the report for every class name in `class_names`. Undefined ratios count as 0.
    ///
    /// The macro average covers only the classes seen in `truth` or `predicted`.
    pub fn new(class_names: &[String], truth: &[usize], predicted: &[usize]) -> Self {
        let n = class_names.len();
        let mut true_pos = vec![0usize; n];
        let mut pred_count = vec![0usize; n];
        let mut support = vec![0usize; n];

        for (&t, &p) in truth.iter().zip(predicted) {
            if t < n {
                support[t] += 1;
            }
            if p < n {
                pred_count[p] += 1;
            }
            if t == p && t < n {
                true_pos[t] += 1;
            }
        }

        let classes: Vec<(String, ClassMetrics)> = class_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let precision = ratio(true_pos[i], pred_count[i]);
                let recall = ratio(true_pos[i], support[i]);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                (
                    name.clone(),
                    ClassMetrics {
                        precision,
                        recall,
                        f1,
                        support: support[i],
                    },
                )
            })
            .collect();

        let total: usize = support.iter().sum();
        // Classes absent from both truth and predictions take no part in the macro average.
        let present: Vec<f64> = support
            .iter()
            .zip(&pred_count)
            .map(|(&s, &p)| if s + p > 0 { 1.0 } else { 0.0 })
            .collect();
        let macro_avg = averaged(&classes, &present, total);
        let weights: Vec<f64> = support.iter().map(|&s| s as f64).collect();
        let weighted_avg = averaged(&classes, &weights, total);

        Self {
            classes,
            accuracy: accuracy(truth, predicted),
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(name, _)| name.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        let row = |f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )
        };
        for (name, m) in &self.classes {
            row(f, name, m)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>9}  {:>9.2}  {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, "weighted avg", &self.weighted_avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0, 1, 1, 2], &[0, 1, 0, 2]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_per_class_metrics() {
        let report = ClassificationReport::new(&names(), &[0, 0, 1, 1], &[0, 1, 1, 1]);

        let (_, a) = &report.classes[0];
        assert_eq!(a.precision, 1.0);
        assert_eq!(a.recall, 0.5);
        assert!((a.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(a.support, 2);

        let (_, b) = &report.classes[1];
        assert!((b.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(b.recall, 1.0);
    }

    #[test]
    fn test_absent_class_scores_zero() {
        let report = ClassificationReport::new(&names(), &[0, 1], &[0, 1]);
        let (_, c) = &report.classes[2];
        assert_eq!(c.precision, 0.0);
        assert_eq!(c.recall, 0.0);
        assert_eq!(c.f1, 0.0);
        assert_eq!(c.support, 0);
    }

    #[test]
    fn test_averages() {
        let report = ClassificationReport::new(&names(), &[0, 0, 1, 1], &[0, 1, 1, 1]);
        assert!((report.weighted_avg.recall - 0.75).abs() < 1e-12);
        assert!((report.macro_avg.recall - 0.75).abs() < 1e-12);
        assert_eq!(report.weighted_avg.support, 4);
    }

    #[test]
    fn test_macro_average_skips_unseen_classes() {
        // Class c never occurs; class b is predicted but never true.
        let report = ClassificationReport::new(&names(), &[0, 0], &[0, 1]);
        // a: precision 1, recall 0.5; b: all zero. c is left out.
        assert!((report.macro_avg.precision - 0.5).abs() < 1e-12);
        assert!((report.macro_avg.recall - 0.25).abs() < 1e-12);
        assert_eq!(report.classes.len(), 3);
    }

    #[test]
    fn test_display_lists_every_class() {
        let report = ClassificationReport::new(&names(), &[0, 1, 2], &[0, 1, 2]);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("weighted avg"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("c ")));
    }
}
