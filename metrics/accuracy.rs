use super::{Mean, StreamingMetric};

/// Accuracy is the proportion of examples whose predicted label matches their actual label.
#[derive(Clone, Debug, Default)]
pub struct Accuracy(Mean);

impl StreamingMetric<'_> for Accuracy {
	/// The input is `(predicted_label, actual_label)`.
	type Input = (usize, usize);
	type Output = Option<f32>;

	fn update(&mut self, input: Self::Input) {
		let (predicted_label, actual_label) = input;
		self.0.update(if predicted_label == actual_label {
			1.0
		} else {
			0.0
		});
	}

	fn merge(&mut self, other: Self) {
		self.0.merge(other.0);
	}

	fn finalize(self) -> Self::Output {
		self.0.finalize()
	}
}

#[test]
fn test_accuracy() {
	let mut accuracy = Accuracy::default();
	accuracy.update((1, 1));
	accuracy.update((2, 2));
	accuracy.update((1, 2));
	accuracy.update((2, 2));
	assert_eq!(accuracy.finalize(), Some(0.75));
}
