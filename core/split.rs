use super::error::LoadError;
use amanita_dataframe::{Column, DataFrame, EnumColumn};
use num_traits::ToPrimitive;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// This is the name of the label column in the mushrooms dataset.
pub const TARGET_COLUMN_NAME: &str = "type";

/// The same seed produces the same row permutation for every column, which keeps the rows of the shuffled dataframe aligned.
pub const SHUFFLE_SEED: u64 = 0;

/// This is the fraction of rows held out for evaluation.
pub const TEST_FRACTION: f32 = 0.3;

/// The dataset partitioned into train and test subsets, each with the label column separated from the feature columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
	pub features_train: DataFrame,
	pub labels_train: EnumColumn,
	pub features_test: DataFrame,
	pub labels_test: EnumColumn,
}

impl DatasetSplit {
	pub fn n_examples_train(&self) -> usize {
		self.features_train.nrows()
	}

	pub fn n_examples_test(&self) -> usize {
		self.features_test.nrows()
	}
}

/// Separate the label column from the feature columns, shuffle the rows with a fixed seed, and split at `floor((1 - TEST_FRACTION) * nrows)`: the first part trains, the remainder evaluates.
pub fn split_dataset(mut dataframe: DataFrame) -> Result<DatasetSplit, LoadError> {
	if dataframe.nrows() == 0 {
		return Err(LoadError::EmptyDataset);
	}
	shuffle(&mut dataframe);
	let target_column_index = dataframe
		.columns
		.iter()
		.position(|column| column.name() == TARGET_COLUMN_NAME)
		.ok_or_else(|| LoadError::TargetColumnMissing(TARGET_COLUMN_NAME.to_owned()))?;
	let labels = match dataframe.columns.remove(target_column_index) {
		Column::Enum(column) => column,
		_ => return Err(LoadError::TargetColumnNotEnum(TARGET_COLUMN_NAME.to_owned())),
	};
	let n_examples_train = ((1.0 - TEST_FRACTION)
		* dataframe.nrows().to_f32().unwrap())
	.to_usize()
	.unwrap();
	let (features_train, features_test) = dataframe.split_at_row(n_examples_train);
	let (labels_train, labels_test) =
		match Column::Enum(labels).split_at_row(n_examples_train) {
			(Column::Enum(labels_train), Column::Enum(labels_test)) => {
				(labels_train, labels_test)
			}
			_ => unreachable!(),
		};
	Ok(DatasetSplit {
		features_train,
		labels_train,
		features_test,
		labels_test,
	})
}

fn shuffle(dataframe: &mut DataFrame) {
	dataframe.columns.iter_mut().for_each(|column| {
		let mut rng = Xoshiro256Plus::seed_from_u64(SHUFFLE_SEED);
		match column {
			Column::Unknown(_) => {}
			Column::Number(column) => column.data.shuffle(&mut rng),
			Column::Enum(column) => column.data.shuffle(&mut rng),
		}
	});
}
