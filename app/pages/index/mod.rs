mod get;
mod page;
mod post;
mod props;

pub use self::get::get;
pub use self::post::post;
