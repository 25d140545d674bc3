use super::error::FitError;

/**
A `ModelConfig` is the validated, strongly typed form of the sidebar's classifier choice: one variant per model family, each carrying only that family's hyperparameters. Everything downstream dispatches on this enum with exhaustive matches, so a config can never train a different family than the one it names.
*/
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "model")]
pub enum ModelConfig {
	#[serde(rename = "svm")]
	Svm(SvmConfig),
	#[serde(rename = "logistic_regression")]
	LogisticRegression(LogisticRegressionConfig),
	#[serde(rename = "random_forest")]
	RandomForest(RandomForestConfig),
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SvmConfig {
	/// the regularization parameter, in [0.01, 10]
	pub c: f32,
	pub kernel: Kernel,
	pub gamma: Gamma,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Kernel {
	#[serde(rename = "rbf")]
	Rbf,
	#[serde(rename = "linear")]
	Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Gamma {
	#[serde(rename = "scale")]
	Scale,
	#[serde(rename = "auto")]
	Auto,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LogisticRegressionConfig {
	/// the regularization parameter, in [0.01, 10]
	pub c: f32,
	/// the maximum number of training iterations, in [100, 500]
	pub max_iter: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct RandomForestConfig {
	/// the number of trees, in [100, 5000]
	pub n_estimators: u64,
	/// the maximum depth of each tree, in [1, 20]
	pub max_depth: u64,
	/// whether each tree trains on a bootstrap sample
	pub bootstrap: bool,
}

impl Default for SvmConfig {
	fn default() -> Self {
		Self {
			c: 0.01,
			kernel: Kernel::Rbf,
			gamma: Gamma::Scale,
		}
	}
}

impl Default for LogisticRegressionConfig {
	fn default() -> Self {
		Self {
			c: 0.01,
			max_iter: 100,
		}
	}
}

impl Default for RandomForestConfig {
	fn default() -> Self {
		Self {
			n_estimators: 100,
			max_depth: 1,
			bootstrap: true,
		}
	}
}

impl ModelConfig {
	/// The heading the results section uses for this model family.
	pub fn display_name(&self) -> &'static str {
		match self {
			ModelConfig::Svm(_) => "Support Vector Machine (SVM)",
			ModelConfig::LogisticRegression(_) => "Logistic Regression",
			ModelConfig::RandomForest(_) => "Random Forest",
		}
	}

	/// Reject any hyperparameter outside the bounds the form exposes. Values are rejected rather than clamped, so a programmatically constructed config never silently trains a different model than the one requested.
	pub fn validate(&self) -> Result<(), FitError> {
		// The bounds are compared at f32 precision because that is the precision the form values carry. Widening the value to f64 first would push 0.01f32 just below the f64 literal 0.01 and reject the default C.
		fn check(
			name: &'static str,
			value: f32,
			min: f64,
			max: f64,
		) -> Result<(), FitError> {
			if value < min as f32 || value > max as f32 {
				Err(FitError::HyperparameterOutOfRange {
					name,
					min,
					max,
					value: value.into(),
				})
			} else {
				Ok(())
			}
		}
		match self {
			ModelConfig::Svm(config) => check("C", config.c, 0.01, 10.0),
			ModelConfig::LogisticRegression(config) => {
				check("C", config.c, 0.01, 10.0)?;
				check("max_iter", config.max_iter as f32, 100.0, 500.0)
			}
			ModelConfig::RandomForest(config) => {
				check("n_estimators", config.n_estimators as f32, 100.0, 5000.0)?;
				check("max_depth", config.max_depth as f32, 1.0, 20.0)
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_validate_accepts_defaults() {
		assert!(ModelConfig::Svm(SvmConfig::default()).validate().is_ok());
		assert!(
			ModelConfig::LogisticRegression(LogisticRegressionConfig::default())
				.validate()
				.is_ok()
		);
		assert!(ModelConfig::RandomForest(RandomForestConfig::default())
			.validate()
			.is_ok());
	}

	#[test]
	fn test_validate_accepts_bound_values() {
		let config = ModelConfig::Svm(SvmConfig {
			c: 0.01,
			..Default::default()
		});
		assert!(config.validate().is_ok());
		let config = ModelConfig::Svm(SvmConfig {
			c: 10.0,
			..Default::default()
		});
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_validate_rejects_out_of_range() {
		let config = ModelConfig::Svm(SvmConfig {
			c: 100.0,
			..Default::default()
		});
		let error = config.validate().unwrap_err();
		assert_eq!(
			error.to_string(),
			"C must be between 0.01 and 10, got 100",
		);
		let config = ModelConfig::LogisticRegression(LogisticRegressionConfig {
			c: 1.0,
			max_iter: 99,
		});
		assert!(config.validate().is_err());
		let config = ModelConfig::RandomForest(RandomForestConfig {
			n_estimators: 50,
			..Default::default()
		});
		assert!(config.validate().is_err());
		let config = ModelConfig::RandomForest(RandomForestConfig {
			max_depth: 21,
			..Default::default()
		});
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_deserialize_tagged() {
		let config: ModelConfig =
			serde_json::from_str(r#"{"model":"svm","c":1.0,"kernel":"rbf","gamma":"scale"}"#)
				.unwrap();
		assert_eq!(
			config,
			ModelConfig::Svm(SvmConfig {
				c: 1.0,
				kernel: Kernel::Rbf,
				gamma: Gamma::Scale,
			})
		);
	}
}
