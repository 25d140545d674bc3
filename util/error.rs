pub use anyhow::{Context, Error, Result};
