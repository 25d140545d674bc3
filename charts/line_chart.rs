use super::common::{
	compute_bounds, compute_grid_line_interval, format_grid_line_label, ChartBox, Point,
};
use amanita_util::error::Result;
use itertools::Itertools;
use std::fmt::Write;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 400.0;
const TOP_PADDING: f64 = 40.0;
const RIGHT_PADDING: f64 = 20.0;
const BOTTOM_PADDING: f64 = 60.0;
const LEFT_PADDING: f64 = 60.0;
const FONT_SIZE: f64 = 12.0;
const LABEL_PADDING: f64 = 8.0;
const MIN_GRID_LINES: usize = 4;
const GRID_LINE_COLOR: &str = "#E5E5EA";

#[derive(Clone, Debug)]
pub struct LineChart {
	pub series: Vec<LineChartSeries>,
	pub title: Option<String>,
	pub x_axis_title: Option<String>,
	pub y_axis_title: Option<String>,
	pub x_min: Option<f64>,
	pub x_max: Option<f64>,
	pub y_min: Option<f64>,
	pub y_max: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct LineChartSeries {
	pub color: String,
	pub data: Vec<LineChartPoint>,
	pub line_style: Option<LineStyle>,
	pub point_style: Option<PointStyle>,
	pub title: Option<String>,
}

#[derive(Clone, Copy, Debug)]
pub struct LineChartPoint {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineStyle {
	Solid,
	Dashed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointStyle {
	Circle,
	Hidden,
}

impl LineChart {
	/// Render this chart to a complete `<svg>` element. Fails if any series point or axis bound is not finite, or if a bound cannot be computed because every series is empty.
	pub fn render(&self) -> Result<String> {
		let points: Vec<Point> = self
			.series
			.iter()
			.flat_map(|series| series.data.iter())
			.map(|point| Point {
				x: point.x,
				y: point.y,
			})
			.collect();
		let bounds = compute_bounds(
			&points,
			self.x_min,
			self.x_max,
			self.y_min,
			self.y_max,
		)?;
		let chart_box = ChartBox {
			h: HEIGHT - TOP_PADDING - BOTTOM_PADDING,
			w: WIDTH - LEFT_PADDING - RIGHT_PADDING,
			x: LEFT_PADDING,
			y: TOP_PADDING,
		};
		let mut svg = String::new();
		writeln!(
			svg,
			r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg" font-family="sans-serif" font-size="{}">"#,
			WIDTH, HEIGHT, FONT_SIZE,
		)
		.unwrap();
		if let Some(title) = &self.title {
			writeln!(
				svg,
				r#"<text x="{}" y="{}" text-anchor="middle" font-weight="bold">{}</text>"#,
				WIDTH / 2.0,
				TOP_PADDING / 2.0 + FONT_SIZE / 2.0,
				title,
			)
			.unwrap();
		}
		self.render_grid_lines(&mut svg, chart_box, bounds);
		self.render_axis_titles(&mut svg, chart_box);
		for series in self.series.iter() {
			render_series(&mut svg, chart_box, bounds, series);
		}
		self.render_legend(&mut svg);
		writeln!(svg, "</svg>").unwrap();
		Ok(svg)
	}

	fn render_grid_lines(
		&self,
		svg: &mut String,
		chart_box: ChartBox,
		bounds: super::common::Bounds,
	) {
		let x_interval =
			compute_grid_line_interval(bounds.x_max - bounds.x_min, MIN_GRID_LINES).interval();
		let y_interval =
			compute_grid_line_interval(bounds.y_max - bounds.y_min, MIN_GRID_LINES).interval();
		let mut x = bounds.x_min;
		while x <= bounds.x_max + 1e-9 {
			let pixels = chart_box.point_to_pixels(bounds, Point { x, y: bounds.y_min });
			writeln!(
				svg,
				r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x1:.1}" y2="{y2:.1}" stroke="{stroke}"/>"#,
				x1 = pixels.x,
				y1 = chart_box.y,
				y2 = chart_box.y + chart_box.h,
				stroke = GRID_LINE_COLOR,
			)
			.unwrap();
			writeln!(
				svg,
				r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{label}</text>"#,
				x = pixels.x,
				y = chart_box.y + chart_box.h + LABEL_PADDING + FONT_SIZE,
				label = format_grid_line_label(x),
			)
			.unwrap();
			x += x_interval;
		}
		let mut y = bounds.y_min;
		while y <= bounds.y_max + 1e-9 {
			let pixels = chart_box.point_to_pixels(bounds, Point { x: bounds.x_min, y });
			writeln!(
				svg,
				r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y1:.1}" stroke="{stroke}"/>"#,
				x1 = chart_box.x,
				y1 = pixels.y,
				x2 = chart_box.x + chart_box.w,
				stroke = GRID_LINE_COLOR,
			)
			.unwrap();
			writeln!(
				svg,
				r#"<text x="{x:.1}" y="{y:.1}" text-anchor="end">{label}</text>"#,
				x = chart_box.x - LABEL_PADDING,
				y = pixels.y + FONT_SIZE / 2.0,
				label = format_grid_line_label(y),
			)
			.unwrap();
			y += y_interval;
		}
	}

	fn render_axis_titles(&self, svg: &mut String, chart_box: ChartBox) {
		if let Some(x_axis_title) = &self.x_axis_title {
			writeln!(
				svg,
				r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle">{title}</text>"#,
				x = chart_box.x + chart_box.w / 2.0,
				y = HEIGHT - LABEL_PADDING,
				title = x_axis_title,
			)
			.unwrap();
		}
		if let Some(y_axis_title) = &self.y_axis_title {
			writeln!(
				svg,
				r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" transform="rotate(-90 {x:.1} {y:.1})">{title}</text>"#,
				x = FONT_SIZE,
				y = chart_box.y + chart_box.h / 2.0,
				title = y_axis_title,
			)
			.unwrap();
		}
	}

	fn render_legend(&self, svg: &mut String) {
		let titled: Vec<&LineChartSeries> = self
			.series
			.iter()
			.filter(|series| series.title.is_some())
			.collect();
		for (index, series) in titled.iter().enumerate() {
			let x = LEFT_PADDING + index as f64 * 120.0;
			let y = FONT_SIZE;
			writeln!(
				svg,
				r#"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"{dash}/>"#,
				x1 = x,
				x2 = x + 20.0,
				y = y - FONT_SIZE / 3.0,
				color = series.color,
				dash = dash_attribute(series.line_style),
			)
			.unwrap();
			writeln!(
				svg,
				r#"<text x="{x:.1}" y="{y:.1}">{title}</text>"#,
				x = x + 26.0,
				y = y,
				title = series.title.as_deref().unwrap(),
			)
			.unwrap();
		}
	}
}

fn render_series(
	svg: &mut String,
	chart_box: ChartBox,
	bounds: super::common::Bounds,
	series: &LineChartSeries,
) {
	let pixels: Vec<Point> = series
		.data
		.iter()
		.map(|point| {
			chart_box.point_to_pixels(
				bounds,
				Point {
					x: point.x,
					y: point.y,
				},
			)
		})
		.collect();
	let path = pixels
		.iter()
		.map(|point| format!("{:.1},{:.1}", point.x, point.y))
		.join(" ");
	writeln!(
		svg,
		r#"<polyline points="{points}" fill="none" stroke="{color}" stroke-width="2"{dash}/>"#,
		points = path,
		color = series.color,
		dash = dash_attribute(series.line_style),
	)
	.unwrap();
	if let Some(PointStyle::Circle) = series.point_style {
		for point in pixels.iter() {
			writeln!(
				svg,
				r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#,
				x = point.x,
				y = point.y,
				color = series.color,
			)
			.unwrap();
		}
	}
}

fn dash_attribute(line_style: Option<LineStyle>) -> &'static str {
	match line_style {
		Some(LineStyle::Dashed) => r#" stroke-dasharray="6 4""#,
		_ => "",
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn test_chart() -> LineChart {
		LineChart {
			series: vec![LineChartSeries {
				color: crate::colors::BLUE.to_owned(),
				data: vec![
					LineChartPoint { x: 0.0, y: 0.0 },
					LineChartPoint { x: 0.5, y: 0.75 },
					LineChartPoint { x: 1.0, y: 1.0 },
				],
				line_style: Some(LineStyle::Solid),
				point_style: Some(PointStyle::Circle),
				title: Some("ROC".to_owned()),
			}],
			title: Some("Receiver Operating Characteristic Curve".to_owned()),
			x_axis_title: Some("False Positive Rate".to_owned()),
			y_axis_title: Some("True Positive Rate".to_owned()),
			x_min: Some(0.0),
			x_max: Some(1.0),
			y_min: Some(0.0),
			y_max: Some(1.0),
		}
	}

	#[test]
	fn test_render_contains_series_and_titles() {
		let svg = test_chart().render().unwrap();
		assert!(svg.starts_with("<svg"));
		assert!(svg.trim_end().ends_with("</svg>"));
		assert!(svg.contains("polyline"));
		assert!(svg.contains("False Positive Rate"));
		assert!(svg.contains("Receiver Operating Characteristic Curve"));
	}

	#[test]
	fn test_render_dashed_series() {
		let mut chart = test_chart();
		chart.series[0].line_style = Some(LineStyle::Dashed);
		chart.series[0].point_style = Some(PointStyle::Hidden);
		let svg = chart.render().unwrap();
		assert!(svg.contains("stroke-dasharray"));
		assert!(!svg.contains("<circle"));
	}

	#[test]
	fn test_render_fails_without_points_or_bounds() {
		let chart = LineChart {
			series: vec![],
			title: None,
			x_axis_title: None,
			y_axis_title: None,
			x_min: None,
			x_max: None,
			y_min: None,
			y_max: None,
		};
		assert!(chart.render().is_err());
	}
}
