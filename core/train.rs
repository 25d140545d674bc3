use super::{
	config::{Gamma, Kernel, ModelConfig},
	error::FitError,
	split::DatasetSplit,
};
use ndarray::prelude::*;

/// A fitted model, tagged with the family it was trained as. It lives only for the interaction that trained it: score, plot, discard.
#[derive(Debug)]
pub enum TrainedModel {
	Svm(amanita_svm::BinaryClassifier),
	LogisticRegression(amanita_linear::BinaryClassifier),
	RandomForest(amanita_tree::BinaryClassifier),
}

/// Validate the config, then fit the model family it names on the training split.
pub fn train(
	config: &ModelConfig,
	split: &DatasetSplit,
	update_progress: &mut (dyn FnMut() + Send),
) -> Result<TrainedModel, FitError> {
	config.validate()?;
	let n_classes_present = split
		.labels_train
		.data
		.iter()
		.map(|label| label.unwrap().get())
		.collect::<std::collections::BTreeSet<usize>>()
		.len();
	if n_classes_present < 2 {
		return Err(FitError::DegenerateTrainingData(n_classes_present));
	}
	let features = split
		.features_train
		.to_rows_f32()
		.ok_or(FitError::MissingFeatureValues)?;
	let model = match config {
		ModelConfig::Svm(config) => {
			let options = amanita_svm::TrainOptions {
				c: config.c,
				kernel: match config.kernel {
					Kernel::Rbf => amanita_svm::Kernel::Rbf,
					Kernel::Linear => amanita_svm::Kernel::Linear,
				},
				gamma: match config.gamma {
					Gamma::Scale => amanita_svm::Gamma::Scale,
					Gamma::Auto => amanita_svm::Gamma::Auto,
				},
				..Default::default()
			};
			TrainedModel::Svm(amanita_svm::BinaryClassifier::train(
				features.view(),
				&split.labels_train,
				&options,
				update_progress,
			))
		}
		ModelConfig::LogisticRegression(config) => {
			let options = amanita_linear::TrainOptions {
				l2_regularization: 1.0 / config.c,
				max_epochs: config.max_iter as usize,
				..Default::default()
			};
			TrainedModel::LogisticRegression(amanita_linear::BinaryClassifier::train(
				features.view(),
				&split.labels_train,
				&options,
				update_progress,
			))
		}
		ModelConfig::RandomForest(config) => {
			let options = amanita_tree::TrainOptions {
				n_trees: config.n_estimators as usize,
				max_depth: config.max_depth as usize,
				bootstrap: config.bootstrap,
				..Default::default()
			};
			TrainedModel::RandomForest(amanita_tree::BinaryClassifier::train(
				features.view(),
				&split.labels_train,
				&options,
				update_progress,
			))
		}
	};
	Ok(model)
}

impl TrainedModel {
	/// Write predicted probabilities into `probabilities` for the input `features`. Column 1 is the positive class probability and column 0 is its complement.
	pub fn predict(&self, features: ArrayView2<f32>, probabilities: ArrayViewMut2<f32>) {
		match self {
			TrainedModel::Svm(model) => model.predict(features, probabilities),
			TrainedModel::LogisticRegression(model) => model.predict(features, probabilities),
			TrainedModel::RandomForest(model) => model.predict(features, probabilities),
		}
	}

	/// The class names of the target column, in code order.
	pub fn classes(&self) -> &[String] {
		match self {
			TrainedModel::Svm(model) => &model.classes,
			TrainedModel::LogisticRegression(model) => &model.classes,
			TrainedModel::RandomForest(model) => &model.classes,
		}
	}
}

#[cfg(test)]
mod test {
	use super::super::config::{
		LogisticRegressionConfig, RandomForestConfig, SvmConfig,
	};
	use super::super::split::split_dataset;
	use super::*;
	use amanita_dataframe::{DataFrame, FromCsvOptions};

	fn test_split() -> DatasetSplit {
		let mut csv = "type,odor,habitat,gill-size\n".to_owned();
		// alternate two edible and two poisonous row shapes with slight variation
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

	#[test]
	fn test_rejects_invalid_config_before_training() {
		let split = test_split();
		let config = ModelConfig::Svm(SvmConfig {
			c: 0.0,
			..Default::default()
		});
		assert!(matches!(
			train(&config, &split, &mut || {}),
			Err(FitError::HyperparameterOutOfRange { .. })
		));
	}

	#[test]
	fn test_rejects_single_class_training_data() {
		let mut split = test_split();
		for label in split.labels_train.data.iter_mut() {
			*label = std::num::NonZeroUsize::new(1);
		}
		let config = ModelConfig::Svm(SvmConfig {
			c: 1.0,
			..Default::default()
		});
		assert!(matches!(
			train(&config, &split, &mut || {}),
			Err(FitError::DegenerateTrainingData(1))
		));
	}

	#[test]
	fn test_each_family_trains_its_own_model() {
		let split = test_split();
		let svm = train(
			&ModelConfig::Svm(SvmConfig {
				c: 1.0,
				..Default::default()
			}),
			&split,
			&mut || {},
		)
		.unwrap();
		assert!(matches!(svm, TrainedModel::Svm(_)));
		let logistic_regression = train(
			&ModelConfig::LogisticRegression(LogisticRegressionConfig {
				c: 1.0,
				max_iter: 100,
			}),
			&split,
			&mut || {},
		)
		.unwrap();
		assert!(matches!(
			logistic_regression,
			TrainedModel::LogisticRegression(_)
		));
		let random_forest = train(
			&ModelConfig::RandomForest(RandomForestConfig {
				n_estimators: 100,
				max_depth: 5,
				bootstrap: true,
			}),
			&split,
			&mut || {},
		)
		.unwrap();
		assert!(matches!(random_forest, TrainedModel::RandomForest(_)));
		assert_eq!(svm.classes(), &["e".to_owned(), "p".to_owned()]);
	}

	#[test]
	fn test_random_forest_predicts_one_row_per_test_example() {
		let split = test_split();
		let config = ModelConfig::RandomForest(RandomForestConfig {
			n_estimators: 100,
			max_depth: 5,
			bootstrap: true,
		});
		let model = train(&config, &split, &mut || {}).unwrap();
		let features_test = split.features_test.to_rows_f32().unwrap();
		let mut probabilities =
			ndarray::Array2::zeros((split.n_examples_test(), 2));
		model.predict(features_test.view(), probabilities.view_mut());
		assert_eq!(probabilities.nrows(), split.n_examples_test());
		for probability in probabilities.column(1).iter() {
			assert!(*probability >= 0.0 && *probability <= 1.0);
		}
	}
}
