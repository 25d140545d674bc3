/*!
This crate provides a basic implementation of dataframes, which are two dimensional arrays of data where each column can have a different data type, like a spreadsheet. It implements only the features needed to load, encode, and split the datasets this workspace trains on.
*/

use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use std::num::NonZeroUsize;

pub mod load;

pub use self::load::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	Unknown(UnknownColumn),
	Number(NumberColumn),
	Enum(EnumColumn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumn {
	pub name: String,
	pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f32>,
}

/// The values in `data` are 1-based indexes into `options`. `None` means the value was missing or not one of the options.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<Option<NonZeroUsize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
	Unknown,
	Number,
	Enum { options: Vec<String> },
}

impl DataFrame {
	pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
		let columns = column_names
			.into_iter()
			.zip(column_types.into_iter())
			.map(|(column_name, column_type)| match column_type {
				ColumnType::Unknown => Column::Unknown(UnknownColumn::new(column_name)),
				ColumnType::Number => Column::Number(NumberColumn::new(column_name)),
				ColumnType::Enum { options } => Column::Enum(EnumColumn::new(column_name, options)),
			})
			.collect();
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	/// Split this dataframe into two at `index`, so that the first dataframe has rows `0..index` and the second has rows `index..nrows`.
	pub fn split_at_row(mut self, index: usize) -> (Self, Self) {
		let mut columns_a = Vec::with_capacity(self.columns.len());
		let mut columns_b = Vec::with_capacity(self.columns.len());
		for column in self.columns.drain(..) {
			let (column_a, column_b) = column.split_at_row(index);
			columns_a.push(column_a);
			columns_b.push(column_b);
		}
		(Self { columns: columns_a }, Self { columns: columns_b })
	}

	/// Convert the columns to a row-major feature matrix, with enum codes as their numeric values. Returns `None` if any column is not a number or enum column, or if an enum cell is missing.
	pub fn to_rows_f32(&self) -> Option<Array2<f32>> {
		let mut rows = unsafe { Array::uninitialized((self.nrows(), self.ncols())) };
		for (mut ndarray_column, dataframe_column) in izip!(rows.gencolumns_mut(), self.columns.iter())
		{
			match dataframe_column {
				Column::Number(column) => {
					for (a, b) in izip!(ndarray_column.iter_mut(), column.data.as_slice()) {
						*a = *b;
					}
				}
				Column::Enum(column) => {
					for (a, b) in izip!(ndarray_column.iter_mut(), column.data.as_slice()) {
						// a cell holding an invalid-value marker has no code
						match b {
							Some(b) => *a = b.get().to_f32().unwrap(),
							None => return None,
						}
					}
				}
				_ => return None,
			}
		}
		Some(rows)
	}
}

impl Column {
	pub fn len(&self) -> usize {
		match self {
			Self::Unknown(s) => s.len,
			Self::Number(s) => s.data.len(),
			Self::Enum(s) => s.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Unknown(s) => s.name.as_str(),
			Self::Number(s) => s.name.as_str(),
			Self::Enum(s) => s.name.as_str(),
		}
	}

	pub fn as_number(&self) -> Option<&NumberColumn> {
		match self {
			Self::Number(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_enum(&self) -> Option<&EnumColumn> {
		match self {
			Self::Enum(s) => Some(s),
			_ => None,
		}
	}

	pub fn split_at_row(self, index: usize) -> (Self, Self) {
		match self {
			Self::Unknown(mut column) => {
				let len_b = column.len.saturating_sub(index);
				column.len = column.len.min(index);
				let column_b = UnknownColumn {
					name: column.name.clone(),
					len: len_b,
				};
				(Self::Unknown(column), Self::Unknown(column_b))
			}
			Self::Number(mut column) => {
				let data_b = column.data.split_off(index);
				let column_b = NumberColumn {
					name: column.name.clone(),
					data: data_b,
				};
				(Self::Number(column), Self::Number(column_b))
			}
			Self::Enum(mut column) => {
				let data_b = column.data.split_off(index);
				let column_b = EnumColumn {
					name: column.name.clone(),
					options: column.options.clone(),
					data: data_b,
				};
				(Self::Enum(column), Self::Enum(column_b))
			}
		}
	}
}

impl UnknownColumn {
	pub fn new(name: String) -> Self {
		Self { name, len: 0 }
	}
}

impl NumberColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}
}

impl EnumColumn {
	pub fn new(name: String, options: Vec<String>) -> Self {
		Self {
			name,
			options,
			data: Vec::new(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn test_dataframe() -> DataFrame {
		let csv = "color,count\nblue,1\ngreen,2\nblue,3\n";
		DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
			FromCsvOptions {
				infer_options: InferOptions {
					enum_max_unique_values: 2,
				},
				..Default::default()
			},
			|_| {},
		)
		.unwrap()
	}

	#[test]
	fn test_split_at_row() {
		let dataframe = test_dataframe();
		assert_eq!(dataframe.nrows(), 3);
		let (dataframe_a, dataframe_b) = dataframe.split_at_row(2);
		assert_eq!(dataframe_a.nrows(), 2);
		assert_eq!(dataframe_b.nrows(), 1);
		assert_eq!(dataframe_a.ncols(), dataframe_b.ncols());
		let color_a = dataframe_a.columns[0].as_enum().unwrap();
		let color_b = dataframe_b.columns[0].as_enum().unwrap();
		assert_eq!(color_a.options, color_b.options);
		assert_eq!(
			color_a.data,
			vec![NonZeroUsize::new(1), NonZeroUsize::new(2)]
		);
		assert_eq!(color_b.data, vec![NonZeroUsize::new(1)]);
	}

	#[test]
	fn test_to_rows_f32() {
		let dataframe = test_dataframe();
		let rows = dataframe.to_rows_f32().unwrap();
		assert_eq!(rows.dim(), (3, 2));
		assert_eq!(rows.row(0).to_vec(), vec![1.0, 1.0]);
		assert_eq!(rows.row(1).to_vec(), vec![2.0, 2.0]);
		assert_eq!(rows.row(2).to_vec(), vec![1.0, 3.0]);
	}

	#[test]
	fn test_to_rows_f32_returns_none_for_missing_cell() {
		// an empty field is an invalid-value marker, so its enum cell has no code
		let csv = "color,count\nblue,1\n,2\nblue,3\n";
		let dataframe = DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
			FromCsvOptions {
				infer_options: InferOptions {
					enum_max_unique_values: 2,
				},
				..Default::default()
			},
			|_| {},
		)
		.unwrap();
		assert!(dataframe.columns[0].as_enum().unwrap().data[1].is_none());
		assert!(dataframe.to_rows_f32().is_none());
	}
}
