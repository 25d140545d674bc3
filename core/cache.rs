use super::{
	error::LoadError,
	split::{split_dataset, DatasetSplit},
};
use amanita_dataframe::{DataFrame, FromCsvOptions};
use std::path::Path;

/**
The `DatasetCache` holds everything derived from the dataset file: the encoded dataframe, its deterministic train/test split, and a content key identifying the file the cache was built from. It is constructed once at startup, owned by the server context, and immutable for the lifetime of the process, so repeated page interactions never re-read or re-encode the dataset.
*/
#[derive(Debug)]
pub struct DatasetCache {
	/// the first 16 hex characters of the sha256 of the file contents
	pub key: String,
	pub dataframe: DataFrame,
	pub split: DatasetSplit,
}

impl DatasetCache {
	pub fn load(path: &Path) -> Result<Self, LoadError> {
		let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
			path: path.to_owned(),
			source,
		})?;
		let key = amanita_util::serve::hash(&contents);
		let dataframe = DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(contents.as_bytes())),
			FromCsvOptions::default(),
			|_| {},
		)
		.map_err(|error| LoadError::Parse {
			path: path.to_owned(),
			message: error.to_string(),
		})?;
		if dataframe.nrows() == 0 {
			return Err(LoadError::EmptyDataset);
		}
		let split = split_dataset(dataframe.clone())?;
		Ok(Self {
			key,
			dataframe,
			split,
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn write_fixture(contents: &str) -> std::path::PathBuf {
		let mut path = std::env::temp_dir();
		path.push(format!(
			"amanita_cache_test_{}.csv",
			amanita_util::serve::hash(contents),
		));
		std::fs::write(&path, contents).unwrap();
		path
	}

	#[test]
	fn test_load_is_idempotent() {
		let path = write_fixture("type,odor\np,f\ne,n\ne,a\np,p\n");
		let cache_a = DatasetCache::load(&path).unwrap();
		let cache_b = DatasetCache::load(&path).unwrap();
		assert_eq!(cache_a.key, cache_b.key);
		assert_eq!(cache_a.dataframe, cache_b.dataframe);
		assert_eq!(cache_a.split, cache_b.split);
		std::fs::remove_file(&path).ok();
	}

	#[test]
	fn test_load_missing_file() {
		let error = DatasetCache::load(Path::new("does/not/exist.csv")).unwrap_err();
		assert!(matches!(error, LoadError::Read { .. }));
	}

	#[test]
	fn test_load_empty_dataset() {
		let path = write_fixture("type,odor\n");
		let error = DatasetCache::load(&path).unwrap_err();
		assert!(matches!(error, LoadError::EmptyDataset));
		std::fs::remove_file(&path).ok();
	}
}
