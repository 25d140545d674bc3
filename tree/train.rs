use super::{BranchNode, BranchSplit, LeafNode, Node, Tree};
use ndarray::prelude::*;
use rand_xoshiro::Xoshiro256Plus;

/// Train a single CART tree on the examples selected by `example_indexes`, considering a fresh random subset of `n_features_per_split` features at each node.
pub fn train_tree(
	features: ArrayView2<f32>,
	labels: &[usize],
	example_indexes: &[usize],
	n_features_per_split: usize,
	max_depth: usize,
	rng: &mut Xoshiro256Plus,
) -> Tree {
	let mut nodes = Vec::new();
	build_node(
		features,
		labels,
		example_indexes,
		n_features_per_split,
		max_depth,
		0,
		rng,
		&mut nodes,
	);
	Tree { nodes }
}

/// Recursively build the node for `example_indexes`, returning its index in the arena.
#[allow(clippy::too_many_arguments)]
fn build_node(
	features: ArrayView2<f32>,
	labels: &[usize],
	example_indexes: &[usize],
	n_features_per_split: usize,
	max_depth: usize,
	depth: usize,
	rng: &mut Xoshiro256Plus,
	nodes: &mut Vec<Node>,
) -> usize {
	let value = positive_fraction(labels, example_indexes);
	let is_pure = value == 0.0 || value == 1.0;
	if depth >= max_depth || example_indexes.len() < 2 || is_pure {
		let node_index = nodes.len();
		nodes.push(Node::Leaf(LeafNode { value }));
		return node_index;
	}
	let candidate_features = choose_features(rng, features.ncols(), n_features_per_split);
	let split = match find_best_split(features, labels, example_indexes, &candidate_features) {
		Some(split) => split,
		None => {
			let node_index = nodes.len();
			nodes.push(Node::Leaf(LeafNode { value }));
			return node_index;
		}
	};
	let (left_indexes, right_indexes) =
		partition(features, example_indexes, split.0, split.1);
	// Reserve a slot in the arena for this branch before building its children.
	let node_index = nodes.len();
	nodes.push(Node::Leaf(LeafNode { value }));
	let left_child_index = build_node(
		features,
		labels,
		&left_indexes,
		n_features_per_split,
		max_depth,
		depth + 1,
		rng,
		nodes,
	);
	let right_child_index = build_node(
		features,
		labels,
		&right_indexes,
		n_features_per_split,
		max_depth,
		depth + 1,
		rng,
		nodes,
	);
	nodes[node_index] = Node::Branch(BranchNode {
		left_child_index,
		right_child_index,
		split: BranchSplit::Continuous {
			feature_index: split.0,
			split_value: split.1,
		},
	});
	node_index
}

/// Find the `(feature_index, split_value)` pair that maximizes the Gini gain, trying the midpoints between consecutive distinct values of each candidate feature. Returns `None` if no split improves on the parent's impurity.
fn find_best_split(
	features: ArrayView2<f32>,
	labels: &[usize],
	example_indexes: &[usize],
	candidate_features: &[usize],
) -> Option<(usize, f32)> {
	let parent_gini = gini_impurity(labels, example_indexes);
	let mut best: Option<(usize, f32)> = None;
	let mut best_gain = 0.0;
	for feature_index in candidate_features.iter() {
		let mut values: Vec<f32> = example_indexes
			.iter()
			.map(|example_index| features[(*example_index, *feature_index)])
			.collect();
		values.sort_by(|a, b| a.partial_cmp(b).unwrap());
		values.dedup();
		if values.len() < 2 {
			continue;
		}
		for window in values.windows(2) {
			let split_value = (window[0] + window[1]) / 2.0;
			let (left_indexes, right_indexes) =
				partition(features, example_indexes, *feature_index, split_value);
			if left_indexes.is_empty() || right_indexes.is_empty() {
				continue;
			}
			let weighted_gini = (left_indexes.len() as f32
				* gini_impurity(labels, &left_indexes)
				+ right_indexes.len() as f32 * gini_impurity(labels, &right_indexes))
				/ example_indexes.len() as f32;
			let gain = parent_gini - weighted_gini;
			if gain > best_gain {
				best_gain = gain;
				best = Some((*feature_index, split_value));
			}
		}
	}
	best
}

fn partition(
	features: ArrayView2<f32>,
	example_indexes: &[usize],
	feature_index: usize,
	split_value: f32,
) -> (Vec<usize>, Vec<usize>) {
	let mut left = Vec::new();
	let mut right = Vec::new();
	for example_index in example_indexes.iter() {
		if features[(*example_index, feature_index)] <= split_value {
			left.push(*example_index);
		} else {
			right.push(*example_index);
		}
	}
	(left, right)
}

/// The Gini impurity of a subset of binary labels, where the labels are 1-based and 2 is the positive class.
fn gini_impurity(labels: &[usize], example_indexes: &[usize]) -> f32 {
	if example_indexes.is_empty() {
		return 0.0;
	}
	let p = positive_fraction(labels, example_indexes);
	1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn positive_fraction(labels: &[usize], example_indexes: &[usize]) -> f32 {
	let n_positive = example_indexes
		.iter()
		.filter(|example_index| labels[**example_index] == 2)
		.count();
	n_positive as f32 / example_indexes.len() as f32
}

/// Choose `count` distinct feature indexes with a partial Fisher-Yates shuffle.
fn choose_features(rng: &mut Xoshiro256Plus, n_features: usize, count: usize) -> Vec<usize> {
	use rand::Rng;
	let count = count.min(n_features);
	let mut pool: Vec<usize> = (0..n_features).collect();
	for i in 0..count {
		let j = rng.gen_range(i, n_features);
		pool.swap(i, j);
	}
	pool.truncate(count);
	pool
}

#[cfg(test)]
mod test {
	use super::*;
	use rand::SeedableRng;

	#[test]
	fn test_train_tree_separates_two_clusters() {
		let features = arr2(&[[1.0], [2.0], [8.0], [9.0]]);
		let labels = vec![1, 1, 2, 2];
		let mut rng = Xoshiro256Plus::seed_from_u64(0);
		let tree = train_tree(features.view(), &labels, &[0, 1, 2, 3], 1, 5, &mut rng);
		assert!(tree.predict(&[1.5]) < 0.5);
		assert!(tree.predict(&[8.5]) > 0.5);
	}

	#[test]
	fn test_pure_node_is_a_single_leaf() {
		let features = arr2(&[[1.0], [2.0], [3.0]]);
		let labels = vec![1, 1, 1];
		let mut rng = Xoshiro256Plus::seed_from_u64(0);
		let tree = train_tree(features.view(), &labels, &[0, 1, 2], 1, 5, &mut rng);
		assert_eq!(tree.nodes.len(), 1);
		assert_eq!(tree.predict(&[100.0]), 0.0);
	}

	#[test]
	fn test_max_depth_zero_is_a_majority_leaf() {
		let features = arr2(&[[1.0], [2.0], [8.0], [9.0]]);
		let labels = vec![1, 2, 2, 2];
		let mut rng = Xoshiro256Plus::seed_from_u64(0);
		let tree = train_tree(features.view(), &labels, &[0, 1, 2, 3], 1, 0, &mut rng);
		assert_eq!(tree.nodes.len(), 1);
		assert_eq!(tree.predict(&[1.0]), 0.75);
	}

	#[test]
	fn test_gini() {
		assert!((gini_impurity(&[1, 1, 2, 2], &[0, 1, 2, 3]) - 0.5).abs() < 1e-6);
		assert!(gini_impurity(&[1, 1], &[0, 1]).abs() < 1e-6);
	}
}
