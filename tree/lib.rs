/*!
This crate implements machine learning models for binary classification using ensembles of decision trees. [`BinaryClassifier`](struct.BinaryClassifier.html) is a random forest of CART trees trained by minimizing Gini impurity. Each tree's rng is seeded from the forest seed and the tree's index, so training is deterministic no matter how the trees are scheduled across threads.
*/

mod binary_classifier;
mod train;

pub use binary_classifier::BinaryClassifier;

/// These are the options passed to `BinaryClassifier::train`.
#[derive(Debug)]
pub struct TrainOptions {
	/// This is the number of trees to train.
	pub n_trees: usize,
	/// The depth of a single tree will never exceed this value.
	pub max_depth: usize,
	/// If true, each tree is trained on a bootstrap sample of the training data, drawn with replacement. If false, each tree is trained on the full training data.
	pub bootstrap: bool,
	/// Each tree's rng is seeded with this value plus the tree's index.
	pub seed: u64,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			n_trees: 100,
			max_depth: 10,
			bootstrap: true,
			seed: 0,
		}
	}
}

/// Trees are stored as a `Vec` of `Node`s. Each branch in the tree has two indexes into the `Vec`, one for each of its children.
#[derive(Debug, PartialEq)]
pub struct Tree {
	pub nodes: Vec<Node>,
}

impl Tree {
	/// Make a prediction for a given example. The returned value is the fraction of positive training examples in the leaf the example lands in.
	pub fn predict(&self, features: &[f32]) -> f32 {
		// Start at the root node and traverse the tree until we get to a leaf.
		let mut node_index = 0;
		loop {
			match &self.nodes[node_index] {
				Node::Branch(BranchNode {
					left_child_index,
					right_child_index,
					split:
						BranchSplit::Continuous {
							feature_index,
							split_value,
						},
				}) => {
					node_index = if features[*feature_index] <= *split_value {
						*left_child_index
					} else {
						*right_child_index
					};
				}
				Node::Leaf(LeafNode { value }) => return *value,
			}
		}
	}
}

/// A node is either a branch or a leaf.
#[derive(Debug, PartialEq)]
pub enum Node {
	Branch(BranchNode),
	Leaf(LeafNode),
}

/// A `BranchNode` is a branch in a tree.
#[derive(Debug, PartialEq)]
pub struct BranchNode {
	/// This is the index in the tree's node vector for this node's left child.
	pub left_child_index: usize,
	/// This is the index in the tree's node vector for this node's right child.
	pub right_child_index: usize,
	/// When making predictions, an example will be sent either to the right or left child. The `split` contains the information necessary to determine which way it will go.
	pub split: BranchSplit,
}

/// A `BranchSplit` compares the value of a single feature with a `split_value`, and if the value is <= `split_value`, the example is sent left, and if it is > `split_value`, it is sent right. Label-encoded features are treated as ordered numbers, so continuous splits cover every feature this workspace trains on.
#[derive(Debug, PartialEq)]
pub enum BranchSplit {
	Continuous {
		/// This is the index of the feature to get the value for.
		feature_index: usize,
		/// This is the threshold value of the split.
		split_value: f32,
	},
}

/// The leaves in a tree hold the values to output for examples that get sent to them.
#[derive(Debug, PartialEq)]
pub struct LeafNode {
	/// This is the fraction of positive training examples that were sent to this leaf.
	pub value: f32,
}
