use super::{
	early_stopping::{train_early_stopping_split, EarlyStoppingMonitor},
	TrainOptions,
};
use amanita_dataframe::EnumColumn;
use amanita_metrics::{BinaryCrossEntropy, BinaryCrossEntropyInput, StreamingMetric};
use itertools::izip;
use ndarray::prelude::*;
use std::ops::Neg;

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryClassifier {
	pub weights: Array1<f32>,
	pub bias: f32,
	/// the early stopping loss value for each epoch, empty when early stopping is disabled
	pub losses: Vec<f32>,
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
		let n_features = features.ncols();
		let classes: Vec<String> = labels.options.to_vec();
		let labels: Array1<usize> = labels
			.data
			.iter()
			.map(|label| label.unwrap().get())
			.collect();
		let early_stopping_fraction = options
			.early_stopping_options
			.as_ref()
			.map(|early_stopping_options| early_stopping_options.early_stopping_fraction)
			.unwrap_or(0.0);
		let (features_train, labels_train, features_early_stopping, labels_early_stopping) =
			train_early_stopping_split(features, labels.view(), early_stopping_fraction);
		let mut model = BinaryClassifier {
			bias: 0.0,
			weights: Array1::<f32>::zeros(n_features),
			losses: vec![],
			classes,
		};
		let mut early_stopping_monitor =
			options
				.early_stopping_options
				.as_ref()
				.map(|early_stopping_options| {
					EarlyStoppingMonitor::new(
						early_stopping_options.min_decrease_in_loss_for_significant_change,
						early_stopping_options.n_epochs_without_improvement_to_stop,
					)
				});
		for _ in 0..options.max_epochs {
			update_progress();
			izip!(
				features_train.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
				labels_train.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
			)
			.for_each(|(features, labels)| {
				model.train_batch(features, labels, options);
			});
			if let Some(early_stopping_monitor) = early_stopping_monitor.as_mut() {
				let early_stopping_metric_value = model.compute_early_stopping_metric_value(
					features_early_stopping,
					labels_early_stopping,
					options,
				);
				model.losses.push(early_stopping_metric_value);
				let should_stop = early_stopping_monitor.update(early_stopping_metric_value);
				if should_stop {
					break;
				}
			}
		}
		model
	}

	fn train_batch(&mut self, features: ArrayView2<f32>, labels: ArrayView1<usize>, options: &TrainOptions) {
		let learning_rate = options.learning_rate;
		let logits = features.dot(&self.weights) + self.bias;
		let mut predictions = logits.mapv_into(|logit| 1.0 / (logit.neg().exp() + 1.0));
		izip!(predictions.view_mut(), labels).for_each(|(prediction, label)| {
			let label = match label {
				1 => 0.0,
				2 => 1.0,
				_ => unreachable!(),
			};
			*prediction -= label
		});
		let py = predictions.insert_axis(Axis(1));
		let weight_gradients = (&features * &py).mean_axis(Axis(0)).unwrap();
		let bias_gradient = py.mean_axis(Axis(0)).unwrap()[0];
		izip!(self.weights.view_mut(), weight_gradients.view()).for_each(
			|(weight, weight_gradient)| {
				*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
			},
		);
		self.bias += -learning_rate * bias_gradient;
	}

	fn compute_early_stopping_metric_value(
		&self,
		features: ArrayView2<f32>,
		labels: ArrayView1<usize>,
		options: &TrainOptions,
	) -> f32 {
		izip!(
			features.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
			labels.axis_chunks_iter(Axis(0), options.n_examples_per_batch),
		)
		.fold(
			{
				let predictions =
					unsafe { <Array2<f32>>::uninitialized((options.n_examples_per_batch, 2)) };
				let metric = BinaryCrossEntropy::default();
				(predictions, metric)
			},
			|mut state, (features, labels)| {
				let (predictions, metric) = &mut state;
				let slice = s![0..features.nrows(), ..];
				let mut predictions = predictions.slice_mut(slice);
				self.predict(features, predictions.view_mut());
				for (prediction, label) in predictions.column(1).iter().zip(labels.iter()) {
					metric.update(BinaryCrossEntropyInput {
						probability: *prediction,
						label: *label,
					});
				}
				state
			},
		)
		.1
		.finalize()
		.unwrap()
	}

	/// Write predicted probabilities into `probabilities` for the input `features`. The probabilities have one row per example; column 1 is the probability of the positive class and column 0 is its complement.
	pub fn predict(&self, features: ArrayView2<f32>, mut probabilities: ArrayViewMut2<f32>) {
		let mut probabilities_pos = probabilities.column_mut(1);
		probabilities_pos.fill(self.bias);
		ndarray::linalg::general_mat_vec_mul(
			1.0,
			&features,
			&self.weights,
			1.0,
			&mut probabilities_pos,
		);
		let (mut probabilities_neg, mut probabilities_pos) = probabilities.split_at(Axis(1), 1);
		for probability_pos in probabilities_pos.iter_mut() {
			*probability_pos = 1.0 / (probability_pos.neg().exp() + 1.0);
		}
		for (neg, pos) in izip!(probabilities_neg.view_mut(), probabilities_pos.view()) {
			*neg = 1.0 - *pos;
		}
	}
}
