/*!
This crate is an implementation of support vector machines for binary classification. [`BinaryClassifier`](struct.BinaryClassifier.html) is trained with a simplified version of the sequential minimal optimization algorithm. The partner index chosen in each optimization step is drawn from a seeded rng, so training is deterministic for a given input.
*/

mod binary_classifier;

pub use binary_classifier::BinaryClassifier;

/// These are the options passed to `BinaryClassifier::train`.
#[derive(Debug)]
pub struct TrainOptions {
	/// This is the regularization parameter, which is the upper bound for each Lagrange multiplier.
	pub c: f32,
	/// This is the kernel function used to compare examples.
	pub kernel: Kernel,
	/// This controls how the kernel coefficient is computed from the training data.
	pub gamma: Gamma,
	/// This is the tolerance used when checking the KKT conditions.
	pub tolerance: f32,
	/// This is the maximum number of passes over the training data.
	pub max_iterations: usize,
	/// This seeds the rng that chooses the partner multiplier in each optimization step.
	pub seed: u64,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			c: 1.0,
			kernel: Kernel::Rbf,
			gamma: Gamma::Scale,
			tolerance: 1e-3,
			max_iterations: 100,
			seed: 0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kernel {
	/// `K(x, y) = exp(-gamma * ||x - y||^2)`
	Rbf,
	/// `K(x, y) = x . y`
	Linear,
}

/// The kernel coefficient is either computed from the variance of the training data or from the feature count alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gamma {
	/// `1 / (n_features * variance)`, where the variance is taken over every value in the feature matrix.
	Scale,
	/// `1 / n_features`
	Auto,
}
