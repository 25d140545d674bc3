/*!
This crate ties the dataset and model crates together. It loads and caches the encoded dataset, computes the deterministic train/test split, maps a validated [`ModelConfig`](config/enum.ModelConfig.html) to the model crate it names, and evaluates a trained model into the metrics the dashboard reports.
*/

pub mod cache;
pub mod config;
pub mod error;
pub mod split;
pub mod test;
pub mod train;

pub use self::cache::DatasetCache;
pub use self::config::ModelConfig;
pub use self::error::{FitError, LoadError, RenderError};
pub use self::test::Evaluation;
pub use self::train::TrainedModel;
