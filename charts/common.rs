use amanita_util::finite::{Finite, ToFinite};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// The region of the svg that data points are drawn in, in pixels.
#[derive(Clone, Copy, Debug)]
pub struct ChartBox {
	pub h: f64,
	pub w: f64,
	pub x: f64,
	pub y: f64,
}

impl ChartBox {
	/// Map a data point to pixel coordinates. The svg y axis points down, so the y coordinate is flipped.
	pub fn point_to_pixels(&self, bounds: Bounds, point: Point) -> Point {
		let x = self.x + (point.x - bounds.x_min) / (bounds.x_max - bounds.x_min) * self.w;
		let y = self.y + self.h
			- (point.y - bounds.y_min) / (bounds.y_max - bounds.y_min) * self.h;
		Point { x, y }
	}
}

#[derive(Clone, Copy, Debug)]
pub struct Bounds {
	pub x_min: f64,
	pub x_max: f64,
	pub y_min: f64,
	pub y_max: f64,
}

/// Compute the axis bounds that contain every point in `points`, unless a bound is fixed by the caller. Fails if a point or a fixed bound is not finite, or if a bound must be computed and there are no points.
pub fn compute_bounds(
	points: &[Point],
	x_min: Option<f64>,
	x_max: Option<f64>,
	y_min: Option<f64>,
	y_max: Option<f64>,
) -> Result<Bounds, amanita_util::error::Error> {
	use amanita_util::err;
	let mut x: Option<(Finite<f64>, Finite<f64>)> = None;
	let mut y: Option<(Finite<f64>, Finite<f64>)> = None;
	for point in points.iter() {
		let point_x = point.x.to_finite().map_err(|_| err!("chart point is not finite"))?;
		let point_y = point.y.to_finite().map_err(|_| err!("chart point is not finite"))?;
		x = Some(match x {
			Some((min, max)) => (min.min(point_x), max.max(point_x)),
			None => (point_x, point_x),
		});
		y = Some(match y {
			Some((min, max)) => (min.min(point_y), max.max(point_y)),
			None => (point_y, point_y),
		});
	}
	let resolve = |fixed: Option<f64>, computed: Option<Finite<f64>>| match fixed {
		Some(fixed) => fixed
			.to_finite()
			.map(|value| value.get())
			.map_err(|_| err!("chart bound is not finite")),
		None => computed
			.map(|value| value.get())
			.ok_or_else(|| err!("cannot compute chart bounds without any points")),
	};
	let bounds = Bounds {
		x_min: resolve(x_min, x.map(|(min, _)| min))?,
		x_max: resolve(x_max, x.map(|(_, max)| max))?,
		y_min: resolve(y_min, y.map(|(min, _)| min))?,
		y_max: resolve(y_max, y.map(|(_, max)| max))?,
	};
	if bounds.x_max <= bounds.x_min || bounds.y_max <= bounds.y_min {
		return Err(err!("chart bounds are degenerate"));
	}
	Ok(bounds)
}

/// The interval between grid lines is `k * 10 ** p`, where k is 1, 2, or 5.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLineInterval {
	pub k: usize,
	pub p: i32,
}

impl GridLineInterval {
	pub fn interval(&self) -> f64 {
		self.k as f64 * 10f64.powi(self.p)
	}
}

/// Choose the largest interval of the form `k * 10 ** p` that produces at least `min_grid_lines` grid lines across `range`.
pub fn compute_grid_line_interval(range: f64, min_grid_lines: usize) -> GridLineInterval {
	let mut p = range.log10().ceil() as i32;
	loop {
		for k in &[5, 2, 1] {
			let candidate = GridLineInterval { k: *k, p };
			if (range / candidate.interval()).floor() as usize >= min_grid_lines {
				return candidate;
			}
		}
		p -= 1;
	}
}

/// Format an axis label with up to two fractional digits, trimming trailing zeros.
pub fn format_grid_line_label(value: f64) -> String {
	let formatted = format!("{:.2}", value);
	let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
	if formatted.is_empty() {
		"0".to_owned()
	} else {
		formatted.to_owned()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_compute_bounds_from_points() {
		let points = vec![
			Point { x: 0.0, y: 0.25 },
			Point { x: 0.5, y: 1.0 },
			Point { x: 1.0, y: 0.5 },
		];
		let bounds = compute_bounds(&points, None, None, None, None).unwrap();
		assert_eq!(bounds.x_min, 0.0);
		assert_eq!(bounds.x_max, 1.0);
		assert_eq!(bounds.y_min, 0.25);
		assert_eq!(bounds.y_max, 1.0);
	}

	#[test]
	fn test_compute_bounds_rejects_non_finite() {
		let points = vec![Point {
			x: std::f64::NAN,
			y: 0.0,
		}];
		assert!(compute_bounds(&points, None, None, Some(0.0), Some(1.0)).is_err());
	}

	#[test]
	fn test_compute_bounds_rejects_empty() {
		let points: Vec<Point> = Vec::new();
		assert!(compute_bounds(&points, None, None, None, None).is_err());
	}

	#[test]
	fn test_grid_line_interval() {
		let interval = compute_grid_line_interval(1.0, 4);
		assert_eq!(interval, GridLineInterval { k: 2, p: -1 });
		assert!((interval.interval() - 0.2).abs() < 1e-9);
	}

	#[test]
	fn test_format_grid_line_label() {
		assert_eq!(format_grid_line_label(0.0), "0");
		assert_eq!(format_grid_line_label(0.2), "0.2");
		assert_eq!(format_grid_line_label(0.25), "0.25");
		assert_eq!(format_grid_line_label(1.0), "1");
	}
}
