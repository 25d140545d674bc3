use super::{error::FitError, split::DatasetSplit, train::TrainedModel};
use amanita_metrics::{
	auc_roc, compute_precision_recall_curve, compute_roc_curve, Accuracy,
	BinaryClassificationMetrics, BinaryClassificationMetricsInput,
	BinaryClassificationMetricsOutput, PrecisionRecallCurvePoint, ROCCurvePoint,
	StreamingMetric,
};
use ndarray::prelude::*;

/**
The metrics the dashboard reports for one trained model.

Accuracy is computed on the training split. That reproduces the reported behavior of the page this dashboard reimplements, so the number shown is a training score, not a hold-out generalization estimate. Precision, recall, the confusion matrix, and both curves are computed on the held-out test split.
*/
#[derive(Debug)]
pub struct Evaluation {
	/// the fraction of training examples predicted correctly, rounded to two decimals
	pub accuracy: f32,
	/// precision on the test split at threshold 0.5, rounded to two decimals
	pub precision: f32,
	/// recall on the test split at threshold 0.5, rounded to two decimals
	pub recall: f32,
	/// the full confusion matrix summary on the test split at threshold 0.5
	pub test_metrics: BinaryClassificationMetricsOutput,
	pub roc_curve: Vec<ROCCurvePoint>,
	pub auc_roc: f32,
	pub precision_recall_curve: Vec<PrecisionRecallCurvePoint>,
	pub n_examples_train: usize,
	pub n_examples_test: usize,
}

/// Score the model on both splits and compute every metric the page might render.
pub fn evaluate(model: &TrainedModel, split: &DatasetSplit) -> Result<Evaluation, FitError> {
	let features_train = split
		.features_train
		.to_rows_f32()
		.ok_or(FitError::MissingFeatureValues)?;
	let features_test = split
		.features_test
		.to_rows_f32()
		.ok_or(FitError::MissingFeatureValues)?;
	let labels_train: Array1<usize> = split
		.labels_train
		.data
		.iter()
		.map(|label| label.unwrap().get())
		.collect();
	let labels_test: Array1<usize> = split
		.labels_test
		.data
		.iter()
		.map(|label| label.unwrap().get())
		.collect();
	let mut probabilities_train =
		Array2::<f32>::zeros((features_train.nrows(), 2));
	model.predict(features_train.view(), probabilities_train.view_mut());
	let mut probabilities_test = Array2::<f32>::zeros((features_test.nrows(), 2));
	model.predict(features_test.view(), probabilities_test.view_mut());
	let mut accuracy = Accuracy::default();
	for (probabilities, label) in probabilities_train
		.genrows()
		.into_iter()
		.zip(labels_train.iter())
	{
		let predicted = if probabilities[1] > 0.5 { 2 } else { 1 };
		accuracy.update((predicted, *label));
	}
	let mut test_metrics = BinaryClassificationMetrics::new(0.5);
	test_metrics.update(BinaryClassificationMetricsInput {
		probabilities: probabilities_test.view(),
		labels: labels_test.view(),
	});
	let test_metrics = test_metrics.finalize();
	let probabilities_pos: Vec<f32> = probabilities_test.column(1).to_vec();
	let labels_test: Vec<usize> = labels_test.to_vec();
	let roc_curve = compute_roc_curve(&probabilities_pos, &labels_test);
	let auc_roc = auc_roc(&probabilities_pos, &labels_test);
	let precision_recall_curve =
		compute_precision_recall_curve(&probabilities_pos, &labels_test);
	Ok(Evaluation {
		accuracy: round_to_two_decimals(accuracy.finalize().unwrap_or(0.0)),
		precision: round_to_two_decimals(test_metrics.precision),
		recall: round_to_two_decimals(test_metrics.recall),
		test_metrics,
		roc_curve,
		auc_roc,
		precision_recall_curve,
		n_examples_train: split.n_examples_train(),
		n_examples_test: split.n_examples_test(),
	})
}

fn round_to_two_decimals(value: f32) -> f32 {
	(value * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
	use super::super::config::{
		Gamma, Kernel, LogisticRegressionConfig, ModelConfig, RandomForestConfig, SvmConfig,
	};
	use super::super::split::split_dataset;
	use super::super::train::train;
	use super::*;
	use amanita_dataframe::{DataFrame, FromCsvOptions};

	fn test_split() -> DatasetSplit {
		let mut csv = "type,odor,habitat,gill-size\n".to_owned();
		for i in 0..20 {
			match i % 4 {
				0 => csv.push_str("p,f,u,n\n"),
				1 => csv.push_str("e,n,g,b\n"),
				2 => csv.push_str("p,p,u,n\n"),
				_ => csv.push_str("e,a,m,b\n"),
			}
		}
		let dataframe = DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
			FromCsvOptions::default(),
			|_| {},
		)
		.unwrap();
		split_dataset(dataframe).unwrap()
	}

	fn all_configs() -> Vec<ModelConfig> {
		vec![
			ModelConfig::Svm(SvmConfig {
				c: 1.0,
				kernel: Kernel::Rbf,
				gamma: Gamma::Scale,
			}),
			ModelConfig::Svm(SvmConfig {
				c: 10.0,
				kernel: Kernel::Linear,
				gamma: Gamma::Auto,
			}),
			ModelConfig::LogisticRegression(LogisticRegressionConfig {
				c: 1.0,
				max_iter: 100,
			}),
			ModelConfig::RandomForest(RandomForestConfig {
				n_estimators: 100,
				max_depth: 5,
				bootstrap: true,
			}),
		]
	}

	#[test]
	fn test_metrics_stay_within_bounds_for_every_family() {
		let split = test_split();
		for config in all_configs() {
			let model = train(&config, &split, &mut || {}).unwrap();
			let evaluation = evaluate(&model, &split).unwrap();
			for value in &[
				evaluation.accuracy,
				evaluation.precision,
				evaluation.recall,
			] {
				assert!(
					*value >= 0.0 && *value <= 1.0,
					"{:?} produced {} out of [0, 1]",
					config,
					value,
				);
			}
			assert_eq!(evaluation.n_examples_train, split.n_examples_train());
			assert_eq!(evaluation.n_examples_test, split.n_examples_test());
		}
	}

	#[test]
	fn test_svm_evaluation_is_reproducible() {
		// C = 1.0, rbf kernel, gamma scale: the seeded split and seeded solver make the whole pipeline deterministic
		let config = ModelConfig::Svm(SvmConfig {
			c: 1.0,
			kernel: Kernel::Rbf,
			gamma: Gamma::Scale,
		});
		let run = || {
			let split = test_split();
			let model = train(&config, &split, &mut || {}).unwrap();
			evaluate(&model, &split).unwrap()
		};
		let evaluation_a = run();
		let evaluation_b = run();
		assert_eq!(evaluation_a.accuracy, evaluation_b.accuracy);
		assert_eq!(evaluation_a.precision, evaluation_b.precision);
		assert_eq!(evaluation_a.recall, evaluation_b.recall);
		assert_eq!(evaluation_a.auc_roc, evaluation_b.auc_roc);
		assert_eq!(evaluation_a.roc_curve, evaluation_b.roc_curve);
	}

	#[test]
	fn test_missing_feature_cell_is_a_fit_error() {
		// empty odor cells load as missing enum codes, which must surface as a recoverable error rather than a panic
		let mut csv = "type,odor,habitat,gill-size\n".to_owned();
		for i in 0..20 {
			match i % 4 {
				0 => csv.push_str("p,f,u,n\n"),
				1 => csv.push_str("e,,g,b\n"),
				2 => csv.push_str("p,p,u,n\n"),
				_ => csv.push_str("e,,m,b\n"),
			}
		}
		let dataframe = DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
			FromCsvOptions::default(),
			|_| {},
		)
		.unwrap();
		let split = split_dataset(dataframe).unwrap();
		let config = ModelConfig::Svm(SvmConfig {
			c: 1.0,
			kernel: Kernel::Rbf,
			gamma: Gamma::Scale,
		});
		let error = train(&config, &split, &mut || {})
			.and_then(|model| evaluate(&model, &split))
			.unwrap_err();
		assert!(matches!(error, FitError::MissingFeatureValues));
	}

	#[test]
	fn test_curves_cover_the_test_split() {
		let split = test_split();
		let config = ModelConfig::RandomForest(RandomForestConfig {
			n_estimators: 100,
			max_depth: 5,
			bootstrap: true,
		});
		let model = train(&config, &split, &mut || {}).unwrap();
		let evaluation = evaluate(&model, &split).unwrap();
		// both curves lead with their dummy-threshold point
		assert_eq!(evaluation.roc_curve[0].false_positive_rate, 0.0);
		assert_eq!(evaluation.roc_curve[0].true_positive_rate, 0.0);
		assert_eq!(evaluation.precision_recall_curve[0].recall, 0.0);
		assert_eq!(evaluation.precision_recall_curve[0].precision, 1.0);
		let last = evaluation.roc_curve.last().unwrap();
		assert!((last.true_positive_rate - 1.0).abs() < 1e-6);
		assert!((last.false_positive_rate - 1.0).abs() < 1e-6);
		// the confusion matrix counts every test example exactly once
		let total = evaluation.test_metrics.true_positives
			+ evaluation.test_metrics.false_positives
			+ evaluation.test_metrics.true_negatives
			+ evaluation.test_metrics.false_negatives;
		assert_eq!(total as usize, split.n_examples_test());
	}
}
