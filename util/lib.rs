pub use anyhow::anyhow as err;

pub mod error;
pub mod finite;
pub mod serve;
