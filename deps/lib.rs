/*!
This crate re-exports the dependencies that are shared by the server side of the workspace, so that crates like `amanita_util` can depend on a single path.
*/

pub use backtrace;
pub use futures;
pub use hex;
pub use http;
pub use hyper;
pub use sha2;
pub use tokio;
