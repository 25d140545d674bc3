use amanita_charts::{colors, LineChart, LineChartPoint, LineChartSeries, LineStyle, PointStyle};
use amanita_core::{error::RenderError, test::Evaluation, ModelConfig};

/// Everything the page needs to render one request.
pub struct Props {
	pub selected: ModelConfig,
	pub metrics: MetricSelection,
	pub show_raw_data: bool,
	/// a recoverable training error rendered inline in the results area
	pub error: Option<String>,
	pub results: Option<Results>,
}

/// The three metric checkboxes in the sidebar. Each is independent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricSelection {
	pub confusion_matrix: bool,
	pub roc_curve: bool,
	pub precision_recall_curve: bool,
}

pub struct Results {
	pub model_name: &'static str,
	pub accuracy: f32,
	pub precision: f32,
	pub recall: f32,
	pub plots: Vec<Plot>,
}

pub enum Plot {
	ConfusionMatrix(ConfusionMatrixProps),
	/// a complete svg document rendered by the charts crate
	Chart(String),
	/// a plot that could not be rendered, reported inline
	Failed(String),
}

pub struct ConfusionMatrixProps {
	pub positive_class: String,
	pub negative_class: String,
	pub true_positives: u64,
	pub false_positives: u64,
	pub true_negatives: u64,
	pub false_negatives: u64,
}

pub fn build_results(
	config: &ModelConfig,
	evaluation: &Evaluation,
	metrics: MetricSelection,
	positive_class: &str,
	negative_class: &str,
) -> Results {
	Results {
		model_name: config.display_name(),
		accuracy: evaluation.accuracy,
		precision: evaluation.precision,
		recall: evaluation.recall,
		plots: build_plots(evaluation, metrics, positive_class, negative_class),
	}
}

/// The selected plots always render in the same order no matter how the form fields arrive: confusion matrix, then ROC curve, then precision-recall curve.
pub fn build_plots(
	evaluation: &Evaluation,
	metrics: MetricSelection,
	positive_class: &str,
	negative_class: &str,
) -> Vec<Plot> {
	let mut plots = Vec::new();
	if metrics.confusion_matrix {
		plots.push(Plot::ConfusionMatrix(ConfusionMatrixProps {
			positive_class: positive_class.to_owned(),
			negative_class: negative_class.to_owned(),
			true_positives: evaluation.test_metrics.true_positives,
			false_positives: evaluation.test_metrics.false_positives,
			true_negatives: evaluation.test_metrics.true_negatives,
			false_negatives: evaluation.test_metrics.false_negatives,
		}));
	}
	if metrics.roc_curve {
		plots.push(match roc_chart(evaluation) {
			Ok(svg) => Plot::Chart(svg),
			Err(error) => Plot::Failed(error.to_string()),
		});
	}
	if metrics.precision_recall_curve {
		plots.push(match precision_recall_chart(evaluation) {
			Ok(svg) => Plot::Chart(svg),
			Err(error) => Plot::Failed(error.to_string()),
		});
	}
	plots
}

fn roc_chart(evaluation: &Evaluation) -> Result<String, RenderError> {
	let roc_series = LineChartSeries {
		color: colors::BLUE.to_owned(),
		data: evaluation
			.roc_curve
			.iter()
			.map(|point| LineChartPoint {
				x: point.false_positive_rate.into(),
				y: point.true_positive_rate.into(),
			})
			.collect(),
		line_style: Some(LineStyle::Solid),
		point_style: Some(PointStyle::Circle),
		title: Some(format!("ROC (AUC = {:.3})", evaluation.auc_roc)),
	};
	let reference_series = LineChartSeries {
		color: colors::GRAY.to_owned(),
		data: vec![
			LineChartPoint { x: 0.0, y: 0.0 },
			LineChartPoint { x: 1.0, y: 1.0 },
		],
		line_style: Some(LineStyle::Dashed),
		point_style: Some(PointStyle::Hidden),
		title: Some("Reference".to_owned()),
	};
	LineChart {
		series: vec![roc_series, reference_series],
		title: Some("ROC Curve".to_owned()),
		x_axis_title: Some("False Positive Rate".to_owned()),
		y_axis_title: Some("True Positive Rate".to_owned()),
		x_min: Some(0.0),
		x_max: Some(1.0),
		y_min: Some(0.0),
		y_max: Some(1.0),
	}
	.render()
	.map_err(|error| RenderError::Plot {
		plot: "ROC curve",
		message: error.to_string(),
	})
}

fn precision_recall_chart(evaluation: &Evaluation) -> Result<String, RenderError> {
	let series = LineChartSeries {
		color: colors::GREEN.to_owned(),
		data: evaluation
			.precision_recall_curve
			.iter()
			.map(|point| LineChartPoint {
				x: point.recall.into(),
				y: point.precision.into(),
			})
			.collect(),
		line_style: Some(LineStyle::Solid),
		point_style: Some(PointStyle::Circle),
		title: Some("Precision / Recall".to_owned()),
	};
	LineChart {
		series: vec![series],
		title: Some("Precision-Recall Curve".to_owned()),
		x_axis_title: Some("Recall".to_owned()),
		y_axis_title: Some("Precision".to_owned()),
		x_min: Some(0.0),
		x_max: Some(1.0),
		y_min: Some(0.0),
		y_max: Some(1.0),
	}
	.render()
	.map_err(|error| RenderError::Plot {
		plot: "precision-recall curve",
		message: error.to_string(),
	})
}

#[cfg(test)]
mod test {
	use super::*;
	use amanita_metrics::{
		BinaryClassificationMetricsOutput, PrecisionRecallCurvePoint, ROCCurvePoint,
	};

	fn test_evaluation() -> Evaluation {
		Evaluation {
			accuracy: 0.9,
			precision: 0.88,
			recall: 0.92,
			test_metrics: BinaryClassificationMetricsOutput {
				threshold: 0.5,
				true_positives: 11,
				false_positives: 2,
				true_negatives: 14,
				false_negatives: 3,
				accuracy: 0.83,
				precision: 0.85,
				recall: 0.79,
				f1_score: 0.81,
			},
			roc_curve: vec![
				ROCCurvePoint {
					threshold: 1.0,
					true_positive_rate: 0.0,
					false_positive_rate: 0.0,
				},
				ROCCurvePoint {
					threshold: 0.7,
					true_positive_rate: 0.6,
					false_positive_rate: 0.1,
				},
				ROCCurvePoint {
					threshold: 0.2,
					true_positive_rate: 1.0,
					false_positive_rate: 1.0,
				},
			],
			auc_roc: 0.87,
			precision_recall_curve: vec![
				PrecisionRecallCurvePoint {
					threshold: 0.7,
					precision: 0.9,
					recall: 0.6,
				},
				PrecisionRecallCurvePoint {
					threshold: 1.0,
					precision: 1.0,
					recall: 0.0,
				},
			],
			n_examples_train: 30,
			n_examples_test: 30,
		}
	}

	#[test]
	fn test_no_metrics_selected_builds_no_plots() {
		let plots = build_plots(&test_evaluation(), MetricSelection::default(), "p", "e");
		assert!(plots.is_empty());
	}

	#[test]
	fn test_all_metrics_selected_build_three_plots_in_order() {
		let metrics = MetricSelection {
			confusion_matrix: true,
			roc_curve: true,
			precision_recall_curve: true,
		};
		let plots = build_plots(&test_evaluation(), metrics, "p", "e");
		assert_eq!(plots.len(), 3);
		match &plots[0] {
			Plot::ConfusionMatrix(matrix) => {
				assert_eq!(matrix.positive_class, "p");
				assert_eq!(matrix.true_positives, 11);
			}
			_ => panic!("expected the confusion matrix first"),
		}
		match &plots[1] {
			Plot::Chart(svg) => assert!(svg.contains("ROC Curve")),
			_ => panic!("expected the roc curve second"),
		}
		match &plots[2] {
			Plot::Chart(svg) => assert!(svg.contains("Precision-Recall Curve")),
			_ => panic!("expected the precision-recall curve third"),
		}
	}

	#[test]
	fn test_plot_that_fails_to_render_reports_inline() {
		let mut evaluation = test_evaluation();
		evaluation.roc_curve[1].false_positive_rate = f32::NAN;
		let metrics = MetricSelection {
			confusion_matrix: true,
			roc_curve: true,
			precision_recall_curve: true,
		};
		let plots = build_plots(&evaluation, metrics, "p", "e");
		assert_eq!(plots.len(), 3);
		assert!(matches!(&plots[0], Plot::ConfusionMatrix(_)));
		match &plots[1] {
			Plot::Failed(message) => assert!(message.contains("ROC curve")),
			_ => panic!("expected the roc curve slot to report the failure"),
		}
		match &plots[2] {
			Plot::Chart(svg) => assert!(svg.contains("Precision-Recall Curve")),
			_ => panic!("expected the precision-recall curve to render"),
		}
	}

	#[test]
	fn test_one_metric_selected_builds_one_plot() {
		let metrics = MetricSelection {
			confusion_matrix: false,
			roc_curve: true,
			precision_recall_curve: false,
		};
		let plots = build_plots(&test_evaluation(), metrics, "p", "e");
		assert_eq!(plots.len(), 1);
		assert!(matches!(&plots[0], Plot::Chart(_)));
	}
}
