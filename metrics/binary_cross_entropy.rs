use super::{Mean, StreamingMetric};

/// This streaming metric computes the binary cross entropy loss between predicted probabilities and 1-based labels.
#[derive(Clone, Debug, Default)]
pub struct BinaryCrossEntropy(Mean);

pub struct BinaryCrossEntropyInput {
	/// The predicted probability of the positive class.
	pub probability: f32,
	/// The actual label, where 1 is the negative class and 2 is the positive class.
	pub label: usize,
}

// Probabilities are clamped away from 0 and 1 so the log loss stays finite.
const EPSILON: f32 = 1e-7;

impl StreamingMetric<'_> for BinaryCrossEntropy {
	type Input = BinaryCrossEntropyInput;
	type Output = Option<f32>;

	fn update(&mut self, input: Self::Input) {
		let probability = input.probability.max(EPSILON).min(1.0 - EPSILON);
		let binary_cross_entropy = match input.label {
			2 => -probability.ln(),
			1 => -(1.0 - probability).ln(),
			_ => unreachable!(),
		};
		self.0.update(binary_cross_entropy);
	}

	fn merge(&mut self, other: Self) {
		self.0.merge(other.0);
	}

	fn finalize(self) -> Self::Output {
		self.0.finalize()
	}
}

#[test]
fn test_binary_cross_entropy() {
	let mut metric = BinaryCrossEntropy::default();
	metric.update(BinaryCrossEntropyInput {
		probability: 0.5,
		label: 2,
	});
	metric.update(BinaryCrossEntropyInput {
		probability: 0.5,
		label: 1,
	});
	// -ln(0.5) for both examples
	let loss = metric.finalize().unwrap();
	assert!((loss - 0.6931472).abs() < 1e-6);
}
