use std::path::PathBuf;
use thiserror::Error;

/// Loading the dataset can only fail at startup, and a `LoadError` is fatal: the process reports it and exits before binding the listener.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("failed to read the dataset at {path}: {source}")]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("failed to parse the dataset at {path}: {message}")]
	Parse { path: PathBuf, message: String },
	#[error("the dataset has no column named {0:?}")]
	TargetColumnMissing(String),
	#[error("the target column {0:?} is not categorical")]
	TargetColumnNotEnum(String),
	#[error("the dataset has no rows")]
	EmptyDataset,
}

/// A `FitError` is recoverable: it is rendered inline on the page and the user may adjust the hyperparameters and retry.
#[derive(Debug, Error)]
pub enum FitError {
	#[error("{name} must be between {min} and {max}, got {value}")]
	HyperparameterOutOfRange {
		name: &'static str,
		min: f64,
		max: f64,
		value: f64,
	},
	#[error("training data must contain both classes, found {0}")]
	DegenerateTrainingData(usize),
	#[error("the dataset contains missing values in its feature columns")]
	MissingFeatureValues,
}

/// A `RenderError` means one plot could not be computed from the fitted model. It is reported inline next to the other plots rather than aborting the page.
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("failed to render the {plot} plot: {message}")]
	Plot {
		plot: &'static str,
		message: String,
	},
}
