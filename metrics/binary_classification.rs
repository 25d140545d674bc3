use super::StreamingMetric;
use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// This streaming metric accumulates a 2x2 confusion matrix at a fixed classification threshold and produces the summary statistics derived from it.
pub struct BinaryClassificationMetrics {
	/// The confusion matrix is indexed by (predicted, actual), where 0 is the negative class and 1 is the positive class.
	confusion_matrix: Array2<u64>,
	threshold: f32,
}

pub struct BinaryClassificationMetricsInput<'a> {
	/// The probabilities have one row per example and two columns, where column 1 is the probability of the positive class.
	pub probabilities: ArrayView2<'a, f32>,
	/// The labels are 1-based, where 1 is the negative class and 2 is the positive class.
	pub labels: ArrayView1<'a, usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryClassificationMetricsOutput {
	pub threshold: f32,
	pub true_positives: u64,
	pub false_positives: u64,
	pub true_negatives: u64,
	pub false_negatives: u64,
	pub accuracy: f32,
	/// Precision and recall report 0 when their denominator is 0, so they always stay within [0, 1].
	pub precision: f32,
	pub recall: f32,
	pub f1_score: f32,
}

impl BinaryClassificationMetrics {
	pub fn new(threshold: f32) -> Self {
		Self {
			confusion_matrix: Array2::zeros((2, 2)),
			threshold,
		}
	}
}

impl<'a> StreamingMetric<'a> for BinaryClassificationMetrics {
	type Input = BinaryClassificationMetricsInput<'a>;
	type Output = BinaryClassificationMetricsOutput;

	fn update(&mut self, input: Self::Input) {
		for (probabilities, label) in izip!(input.probabilities.genrows(), input.labels.iter()) {
			let predicted = if probabilities[1] > self.threshold {
				1
			} else {
				0
			};
			let actual = if *label == 2 { 1 } else { 0 };
			self.confusion_matrix[(predicted, actual)] += 1;
		}
	}

	fn merge(&mut self, other: Self) {
		self.confusion_matrix += &other.confusion_matrix;
	}

	fn finalize(self) -> Self::Output {
		let true_positives = self.confusion_matrix[(1, 1)];
		let false_positives = self.confusion_matrix[(1, 0)];
		let true_negatives = self.confusion_matrix[(0, 0)];
		let false_negatives = self.confusion_matrix[(0, 1)];
		let n_examples = self.confusion_matrix.sum();
		let accuracy = (true_positives + true_negatives).to_f32().unwrap()
			/ n_examples.to_f32().unwrap();
		let precision = if true_positives + false_positives > 0 {
			true_positives.to_f32().unwrap()
				/ (true_positives + false_positives).to_f32().unwrap()
		} else {
			0.0
		};
		let recall = if true_positives + false_negatives > 0 {
			true_positives.to_f32().unwrap()
				/ (true_positives + false_negatives).to_f32().unwrap()
		} else {
			0.0
		};
		let f1_score = if precision + recall > 0.0 {
			2.0 * (precision * recall) / (precision + recall)
		} else {
			0.0
		};
		BinaryClassificationMetricsOutput {
			threshold: self.threshold,
			true_positives,
			false_positives,
			true_negatives,
			false_negatives,
			accuracy,
			precision,
			recall,
			f1_score,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_binary_classification_metrics() {
		let probabilities = arr2(&[[0.1, 0.9], [0.8, 0.2], [0.4, 0.6], [0.7, 0.3]]);
		let labels = arr1(&[2, 1, 1, 2]);
		let mut metrics = BinaryClassificationMetrics::new(0.5);
		metrics.update(BinaryClassificationMetricsInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		});
		let output = metrics.finalize();
		assert_eq!(output.true_positives, 1);
		assert_eq!(output.false_positives, 1);
		assert_eq!(output.true_negatives, 1);
		assert_eq!(output.false_negatives, 1);
		assert_eq!(output.accuracy, 0.5);
		assert_eq!(output.precision, 0.5);
		assert_eq!(output.recall, 0.5);
		assert_eq!(output.f1_score, 0.5);
	}

	#[test]
	fn test_all_negative_predictions_report_zero_precision() {
		let probabilities = arr2(&[[0.9, 0.1], [0.8, 0.2]]);
		let labels = arr1(&[2, 1]);
		let mut metrics = BinaryClassificationMetrics::new(0.5);
		metrics.update(BinaryClassificationMetricsInput {
			probabilities: probabilities.view(),
			labels: labels.view(),
		});
		let output = metrics.finalize();
		assert_eq!(output.true_positives, 0);
		assert_eq!(output.precision, 0.0);
		assert_eq!(output.recall, 0.0);
	}
}
