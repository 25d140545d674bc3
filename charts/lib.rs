/*!
This crate renders line charts as standalone svg strings, so the server can embed them directly in a page without any client side code. It implements only what the metric plots in this workspace need: one or more series, fixed or computed axis bounds, grid lines, and solid or dashed line styles.
*/

pub mod common;
pub mod line_chart;

pub use self::line_chart::{LineChart, LineChartPoint, LineChartSeries, LineStyle, PointStyle};

pub mod colors {
	pub const BLUE: &str = "#0A84FF";
	pub const GREEN: &str = "#30D158";
	pub const GRAY: &str = "#8E8E93";
}
