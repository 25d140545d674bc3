//! https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm

use super::StreamingMetric;
use num_traits::cast::ToPrimitive;

/// combine two separate means and variances into a single mean and variance
/// useful in parallel algorithms
pub fn merge_mean_m2(
	n_a: u64,
	mean_a: f64,
	m2_a: f64,
	n_b: u64,
	mean_b: f64,
	m2_b: f64,
) -> (f64, f64) {
	let n_a = n_a.to_f64().unwrap();
	let n_b = n_b.to_f64().unwrap();
	(
		(((n_a * mean_a) + (n_b * mean_b)) / (n_a + n_b)),
		m2_a + m2_b + (mean_b - mean_a) * (mean_b - mean_a) * (n_a * n_b / (n_a + n_b)),
	)
}

pub fn m2_to_variance(m2: f64, n: u64) -> f32 {
	(m2 / n.to_f64().unwrap()) as f32
}

/// This streaming metric computes the mean and population variance of its inputs with Welford's algorithm.
#[derive(Clone, Debug, Default)]
pub struct MeanVariance {
	n: u64,
	mean: f64,
	m2: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct MeanVarianceOutput {
	pub mean: f32,
	pub variance: f32,
}

impl StreamingMetric<'_> for MeanVariance {
	type Input = f32;
	type Output = Option<MeanVarianceOutput>;

	fn update(&mut self, input: Self::Input) {
		let input = input.to_f64().unwrap();
		self.n += 1;
		let delta = input - self.mean;
		self.mean += delta / self.n.to_f64().unwrap();
		let delta_2 = input - self.mean;
		self.m2 += delta * delta_2;
	}

	fn merge(&mut self, other: Self) {
		if other.n == 0 {
			return;
		}
		if self.n == 0 {
			*self = other;
			return;
		}
		let (mean, m2) = merge_mean_m2(self.n, self.mean, self.m2, other.n, other.mean, other.m2);
		self.n += other.n;
		self.mean = mean;
		self.m2 = m2;
	}

	fn finalize(self) -> Self::Output {
		if self.n == 0 {
			None
		} else {
			Some(MeanVarianceOutput {
				mean: self.mean.to_f32().unwrap(),
				variance: m2_to_variance(self.m2, self.n),
			})
		}
	}
}

#[test]
fn test_mean_variance() {
	let mut metric = MeanVariance::default();
	for value in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
		metric.update(*value);
	}
	let output = metric.finalize().unwrap();
	assert!((output.mean - 5.0).abs() < 1e-6);
	assert!((output.variance - 4.0).abs() < 1e-6);
}

#[test]
fn test_mean_variance_merge() {
	let mut left = MeanVariance::default();
	for value in &[2.0, 4.0, 4.0, 4.0] {
		left.update(*value);
	}
	let mut right = MeanVariance::default();
	for value in &[5.0, 5.0, 7.0, 9.0] {
		right.update(*value);
	}
	left.merge(right);
	let output = left.finalize().unwrap();
	assert!((output.mean - 5.0).abs() < 1e-6);
	assert!((output.variance - 4.0).abs() < 1e-6);
}
