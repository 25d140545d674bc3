use super::{Gamma, Kernel, TrainOptions};
use amanita_dataframe::EnumColumn;
use amanita_metrics::{MeanVariance, StreamingMetric};
use itertools::izip;
use ndarray::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::ops::Neg;

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryClassifier {
	/// the training examples whose Lagrange multipliers ended up nonzero
	pub support_vectors: Array2<f32>,
	/// the signed coefficient `alpha * y` for each support vector
	pub coefficients: Array1<f32>,
	pub bias: f32,
	pub kernel: Kernel,
	/// the resolved kernel coefficient
	pub gamma: f32,
	/// the class names of the target column
	pub classes: Vec<String>,
}

impl BinaryClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: &EnumColumn,
		options: &TrainOptions,
		update_progress: &mut dyn FnMut(),
	) -> BinaryClassifier {
		let n_examples = features.nrows();
		let n_features = features.ncols();
		let classes: Vec<String> = labels.options.to_vec();
		// Map the 1-based enum codes to -1/+1.
		let labels: Array1<f32> = labels
			.data
			.iter()
			.map(|label| match label.unwrap().get() {
				1 => -1.0,
				2 => 1.0,
				_ => unreachable!(),
			})
			.collect();
		let gamma = compute_gamma(features, options.gamma);
		let kernel = |a: ArrayView1<f32>, b: ArrayView1<f32>| match options.kernel {
			Kernel::Rbf => {
				let squared_distance = izip!(a.iter(), b.iter())
					.map(|(a, b)| (a - b) * (a - b))
					.sum::<f32>();
				(-gamma * squared_distance).exp()
			}
			Kernel::Linear => a.dot(&b),
		};
		let mut rng = Xoshiro256Plus::seed_from_u64(options.seed);
		let mut alphas = Array1::<f32>::zeros(n_examples);
		let mut bias = 0.0f32;
		let decision = |alphas: &Array1<f32>, bias: f32, x: ArrayView1<f32>| {
			izip!(alphas.iter(), labels.iter(), features.genrows())
				.filter(|(alpha, _, _)| **alpha > 0.0)
				.map(|(alpha, label, row)| alpha * label * kernel(row, x))
				.sum::<f32>() + bias
		};
		for _ in 0..options.max_iterations {
			update_progress();
			let mut n_alphas_changed = 0;
			for i in 0..n_examples {
				let error_i = decision(&alphas, bias, features.row(i)) - labels[i];
				let violates_kkt = (labels[i] * error_i < -options.tolerance
					&& alphas[i] < options.c)
					|| (labels[i] * error_i > options.tolerance && alphas[i] > 0.0);
				if !violates_kkt {
					continue;
				}
				// Choose a partner multiplier other than i.
				let j = (i + rng.gen_range(1, n_examples)) % n_examples;
				let error_j = decision(&alphas, bias, features.row(j)) - labels[j];
				let (alpha_i_old, alpha_j_old) = (alphas[i], alphas[j]);
				let (low, high) = if (labels[i] - labels[j]).abs() > f32::EPSILON {
					(
						(alpha_j_old - alpha_i_old).max(0.0),
						(options.c + alpha_j_old - alpha_i_old).min(options.c),
					)
				} else {
					(
						(alpha_i_old + alpha_j_old - options.c).max(0.0),
						(alpha_i_old + alpha_j_old).min(options.c),
					)
				};
				if (high - low).abs() < f32::EPSILON {
					continue;
				}
				let k_ii = kernel(features.row(i), features.row(i));
				let k_jj = kernel(features.row(j), features.row(j));
				let k_ij = kernel(features.row(i), features.row(j));
				let eta = 2.0 * k_ij - k_ii - k_jj;
				if eta >= 0.0 {
					continue;
				}
				let alpha_j = (alpha_j_old - labels[j] * (error_i - error_j) / eta)
					.max(low)
					.min(high);
				if (alpha_j - alpha_j_old).abs() < 1e-5 {
					continue;
				}
				let alpha_i = alpha_i_old + labels[i] * labels[j] * (alpha_j_old - alpha_j);
				alphas[i] = alpha_i;
				alphas[j] = alpha_j;
				let bias_i = bias
					- error_i - labels[i] * (alpha_i - alpha_i_old) * k_ii
					- labels[j] * (alpha_j - alpha_j_old) * k_ij;
				let bias_j = bias
					- error_j - labels[i] * (alpha_i - alpha_i_old) * k_ij
					- labels[j] * (alpha_j - alpha_j_old) * k_jj;
				bias = if alpha_i > 0.0 && alpha_i < options.c {
					bias_i
				} else if alpha_j > 0.0 && alpha_j < options.c {
					bias_j
				} else {
					(bias_i + bias_j) / 2.0
				};
				n_alphas_changed += 1;
			}
			if n_alphas_changed == 0 {
				break;
			}
		}
		// Keep only the support vectors.
		let support_indexes: Vec<usize> = alphas
			.iter()
			.enumerate()
			.filter(|(_, alpha)| **alpha > 0.0)
			.map(|(index, _)| index)
			.collect();
		let mut support_vectors = Array2::<f32>::zeros((support_indexes.len(), n_features));
		let mut coefficients = Array1::<f32>::zeros(support_indexes.len());
		for (position, index) in support_indexes.iter().enumerate() {
			support_vectors.row_mut(position).assign(&features.row(*index));
			coefficients[position] = alphas[*index] * labels[*index];
		}
		BinaryClassifier {
			support_vectors,
			coefficients,
			bias,
			kernel: options.kernel,
			gamma,
			classes,
		}
	}

	/// Compute the decision value `sum(coefficient * K(support_vector, x)) + bias` for one example.
	pub fn decision(&self, features: ArrayView1<f32>) -> f32 {
		izip!(self.coefficients.iter(), self.support_vectors.genrows())
			.map(|(coefficient, support_vector)| {
				let k = match self.kernel {
					Kernel::Rbf => {
						let squared_distance = izip!(support_vector.iter(), features.iter())
							.map(|(a, b)| (a - b) * (a - b))
							.sum::<f32>();
						(-self.gamma * squared_distance).exp()
					}
					Kernel::Linear => support_vector.dot(&features),
				};
				coefficient * k
			})
			.sum::<f32>() + self.bias
	}

	/// Write predicted probabilities into `probabilities` for the input `features`. The positive class probability is the sigmoid of the decision value, which preserves the decision value's ordering and agrees with its sign at the 0.5 threshold.
	pub fn predict(&self, features: ArrayView2<f32>, mut probabilities: ArrayViewMut2<f32>) {
		for (features, mut probabilities) in
			izip!(features.genrows(), probabilities.genrows_mut())
		{
			let decision = self.decision(features);
			let probability_pos = 1.0 / (decision.neg().exp() + 1.0);
			probabilities[1] = probability_pos;
			probabilities[0] = 1.0 - probability_pos;
		}
	}
}

fn compute_gamma(features: ArrayView2<f32>, gamma: Gamma) -> f32 {
	let n_features = features.ncols();
	match gamma {
		Gamma::Scale => {
			let mut metric = MeanVariance::default();
			for value in features.iter() {
				metric.update(*value);
			}
			let variance = metric
				.finalize()
				.map(|output| output.variance)
				.unwrap_or(0.0);
			if variance > 0.0 {
				1.0 / (n_features as f32 * variance)
			} else {
				1.0 / n_features as f32
			}
		}
		Gamma::Auto => 1.0 / n_features as f32,
	}
}
