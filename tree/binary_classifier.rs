use super::{train::train_tree, TrainOptions, Tree};
use amanita_dataframe::EnumColumn;
use itertools::izip;
use ndarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;

#[derive(Debug, PartialEq)]
pub struct BinaryClassifier {
	pub trees: Vec<Tree>,
	/// the class names of the target column
	pub classes: Vec<String>,
}

impl BinaryClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: &EnumColumn,
		options: &TrainOptions,
		update_progress: &mut (dyn FnMut() + Send),
	) -> BinaryClassifier {
		let n_examples = features.nrows();
		let n_features = features.ncols();
		let classes: Vec<String> = labels.options.to_vec();
		let labels: Vec<usize> = labels
			.data
			.iter()
			.map(|label| label.unwrap().get())
			.collect();
		let n_features_per_split = ((n_features as f32).sqrt() as usize).max(1);
		let update_progress = std::sync::Mutex::new(update_progress);
		let trees: Vec<Tree> = (0..options.n_trees)
			.into_par_iter()
			.map(|tree_index| {
				let mut rng =
					Xoshiro256Plus::seed_from_u64(options.seed + tree_index as u64);
				let example_indexes: Vec<usize> = if options.bootstrap {
					(0..n_examples)
						.map(|_| rng.gen_range(0, n_examples))
						.collect()
				} else {
					(0..n_examples).collect()
				};
				let tree = train_tree(
					features,
					&labels,
					&example_indexes,
					n_features_per_split,
					options.max_depth,
					&mut rng,
				);
				(*update_progress.lock().unwrap())();
				tree
			})
			.collect();
		BinaryClassifier { trees, classes }
	}

	/// Write predicted probabilities into `probabilities` for the input `features`. The positive class probability is the mean of the leaf values across all trees; column 0 is its complement.
	pub fn predict(&self, features: ArrayView2<f32>, mut probabilities: ArrayViewMut2<f32>) {
		for (features, mut probabilities) in
			izip!(features.genrows(), probabilities.genrows_mut())
		{
			let features = features.as_slice().unwrap();
			let probability_pos = self
				.trees
				.iter()
				.map(|tree| tree.predict(features))
				.sum::<f32>() / self.trees.len() as f32;
			probabilities[1] = probability_pos;
			probabilities[0] = 1.0 - probability_pos;
		}
	}
}
