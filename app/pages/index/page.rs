use super::props::{ConfusionMatrixProps, Plot, Props};
use crate::layouts::app_layout::app_layout;
use amanita_core::config::{Gamma, Kernel, ModelConfig};
use amanita_dataframe::{Column, DataFrame};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Binary Classification Web App";
pub const TAGLINE: &str = "Are mushrooms edible? 🍄";

pub fn render(props: &Props, dataframe: &DataFrame) -> String {
	app_layout(PAGE_TITLE, &render_sidebar(props), &render_content(props, dataframe))
}

pub fn classifier_id(config: &ModelConfig) -> &'static str {
	match config {
		ModelConfig::Svm(_) => "svm",
		ModelConfig::LogisticRegression(_) => "logistic_regression",
		ModelConfig::RandomForest(_) => "random_forest",
	}
}

fn render_sidebar(props: &Props) -> String {
	let mut html = String::new();
	writeln!(html, "<h1>{}</h1>", PAGE_TITLE).unwrap();
	writeln!(html, "<p>{}</p>", TAGLINE).unwrap();
	let selected_id = classifier_id(&props.selected);
	let raw_data_toggle = if props.show_raw_data {
		format!(
			r#"<p><a href="/?classifier={}">Hide raw data</a></p>"#,
			selected_id,
		)
	} else {
		format!(
			r#"<p><a href="/?classifier={}&raw_data=true">Show raw data</a></p>"#,
			selected_id,
		)
	};
	html.push_str(&raw_data_toggle);
	writeln!(html, "<h2>Classifier</h2>").unwrap();
	writeln!(html, r#"<ul class="classifier-list">"#).unwrap();
	for (id, name) in &[
		("svm", "Support Vector Machine (SVM)"),
		("logistic_regression", "Logistic Regression"),
		("random_forest", "Random Forest"),
	] {
		let class = if *id == selected_id { " class=\"selected\"" } else { "" };
		let raw_data = if props.show_raw_data { "&raw_data=true" } else { "" };
		writeln!(
			html,
			r#"<li><a href="/?classifier={}{}"{}>{}</a></li>"#,
			id, raw_data, class, name,
		)
		.unwrap();
	}
	writeln!(html, "</ul>").unwrap();
	writeln!(html, r#"<form method="post" action="/">"#).unwrap();
	writeln!(html, r#"<input type="hidden" name="action" value="classify">"#).unwrap();
	writeln!(html, r#"<input type="hidden" name="model" value="{}">"#, selected_id).unwrap();
	if props.show_raw_data {
		writeln!(html, r#"<input type="hidden" name="raw_data" value="true">"#).unwrap();
	}
	writeln!(html, "<h2>Model Hyperparameters</h2>").unwrap();
	html.push_str(&render_hyperparameter_fields(&props.selected));
	writeln!(html, "<h2>Metrics</h2>").unwrap();
	for (name, label, checked) in &[
		("confusion_matrix", "Confusion Matrix", props.metrics.confusion_matrix),
		("roc_curve", "ROC Curve", props.metrics.roc_curve),
		(
			"precision_recall_curve",
			"Precision-Recall Curve",
			props.metrics.precision_recall_curve,
		),
	] {
		let checked = if *checked { " checked" } else { "" };
		writeln!(
			html,
			r#"<div class="field"><label><input type="checkbox" name="{}" value="true"{}> {}</label></div>"#,
			name, checked, label,
		)
		.unwrap();
	}
	writeln!(html, r#"<button class="classify-button" type="submit">Classify</button>"#).unwrap();
	writeln!(html, "</form>").unwrap();
	html
}

fn render_hyperparameter_fields(config: &ModelConfig) -> String {
	let mut html = String::new();
	match config {
		ModelConfig::Svm(config) => {
			html.push_str(&number_field(
				"c",
				"C (Regularization parameter)",
				&format!("{}", config.c),
				"0.01",
				"10",
				"0.01",
			));
			html.push_str(&select_field(
				"kernel",
				"Kernel",
				&[("rbf", "rbf"), ("linear", "linear")],
				match config.kernel {
					Kernel::Rbf => "rbf",
					Kernel::Linear => "linear",
				},
			));
			html.push_str(&select_field(
				"gamma",
				"Gamma (Kernel coefficient)",
				&[("scale", "scale"), ("auto", "auto")],
				match config.gamma {
					Gamma::Scale => "scale",
					Gamma::Auto => "auto",
				},
			));
		}
		ModelConfig::LogisticRegression(config) => {
			html.push_str(&number_field(
				"c",
				"C (Regularization parameter)",
				&format!("{}", config.c),
				"0.01",
				"10",
				"0.01",
			));
			html.push_str(&number_field(
				"max_iter",
				"Maximum number of iterations",
				&format!("{}", config.max_iter),
				"100",
				"500",
				"1",
			));
		}
		ModelConfig::RandomForest(config) => {
			html.push_str(&number_field(
				"n_estimators",
				"The number of trees in the forest",
				&format!("{}", config.n_estimators),
				"100",
				"5000",
				"10",
			));
			html.push_str(&number_field(
				"max_depth",
				"The maximum depth of the tree",
				&format!("{}", config.max_depth),
				"1",
				"20",
				"1",
			));
			html.push_str(&select_field(
				"bootstrap",
				"Bootstrap samples when building trees",
				&[("true", "True"), ("false", "False")],
				if config.bootstrap { "true" } else { "false" },
			));
		}
	}
	html
}

fn number_field(name: &str, label: &str, value: &str, min: &str, max: &str, step: &str) -> String {
	format!(
		r#"<div class="field"><label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" value="{value}" min="{min}" max="{max}" step="{step}"></div>
"#,
		name = name,
		label = label,
		value = value,
		min = min,
		max = max,
		step = step,
	)
}

fn select_field(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> String {
	let mut html = format!(
		r#"<div class="field"><label for="{name}">{label}</label><select id="{name}" name="{name}">"#,
		name = name,
		label = label,
	);
	for (value, label) in options {
		let selected = if *value == selected { " selected" } else { "" };
		write!(html, r#"<option value="{}"{}>{}</option>"#, value, selected, label).unwrap();
	}
	html.push_str("</select></div>\n");
	html
}

fn render_content(props: &Props, dataframe: &DataFrame) -> String {
	let mut html = String::new();
	writeln!(html, "<h1>{}</h1>", PAGE_TITLE).unwrap();
	writeln!(html, "<p>{}</p>", TAGLINE).unwrap();
	if let Some(error) = &props.error {
		writeln!(html, r#"<div class="fit-error">{}</div>"#, escape(error)).unwrap();
	}
	if let Some(results) = &props.results {
		writeln!(html, "<h2>{} Results</h2>", results.model_name).unwrap();
		writeln!(
			html,
			r#"<p class="metric-summary">Accuracy: {:.2}</p>"#,
			results.accuracy,
		)
		.unwrap();
		writeln!(
			html,
			r#"<p class="metric-summary">Precision: {:.2}</p>"#,
			results.precision,
		)
		.unwrap();
		writeln!(
			html,
			r#"<p class="metric-summary">Recall: {:.2}</p>"#,
			results.recall,
		)
		.unwrap();
		for plot in &results.plots {
			match plot {
				Plot::ConfusionMatrix(matrix) => html.push_str(&render_confusion_matrix(matrix)),
				Plot::Chart(svg) => html.push_str(svg),
				Plot::Failed(message) => {
					writeln!(html, r#"<div class="plot-error">{}</div>"#, escape(message)).unwrap()
				}
			}
		}
	}
	if props.show_raw_data {
		writeln!(html, "<h2>Mushrooms dataset (Binary Classification)</h2>").unwrap();
		html.push_str(&render_raw_data_table(dataframe));
	}
	html
}

fn render_confusion_matrix(matrix: &ConfusionMatrixProps) -> String {
	let total = matrix.true_positives
		+ matrix.false_positives
		+ matrix.true_negatives
		+ matrix.false_negatives;
	let percent = |count: u64| {
		if total == 0 {
			0.0
		} else {
			count as f64 / total as f64 * 100.0
		}
	};
	let cell = |area: &str, correct: bool, count: u64| {
		let class = if correct {
			"confusion-matrix-cell-correct"
		} else {
			"confusion-matrix-cell-incorrect"
		};
		format!(
			r#"<div class="confusion-matrix-cell {}" style="grid-area: {};"><div class="confusion-matrix-cell-count">{}</div><div class="confusion-matrix-cell-percent">{:.1}%</div></div>
"#,
			class,
			area,
			count,
			percent(count),
		)
	};
	let label = |area: &str, text: String| {
		format!(
			r#"<div class="confusion-matrix-label" style="grid-area: {};">{}</div>
"#,
			area, text,
		)
	};
	let mut html = String::new();
	writeln!(html, "<h3>Confusion Matrix</h3>").unwrap();
	writeln!(html, r#"<div class="confusion-matrix">"#).unwrap();
	html.push_str(&label(
		"actual-true",
		format!("Actual: {}", escape(&matrix.positive_class)),
	));
	html.push_str(&label(
		"actual-false",
		format!("Actual: {}", escape(&matrix.negative_class)),
	));
	html.push_str(&label(
		"pred-true",
		format!("Predicted: {}", escape(&matrix.positive_class)),
	));
	html.push_str(&label(
		"pred-false",
		format!("Predicted: {}", escape(&matrix.negative_class)),
	));
	html.push_str(&cell("tp", true, matrix.true_positives));
	html.push_str(&cell("fp", false, matrix.false_positives));
	html.push_str(&cell("fn", false, matrix.false_negatives));
	html.push_str(&cell("tn", true, matrix.true_negatives));
	writeln!(html, "</div>").unwrap();
	html
}

/// One row per record of the full dataset, showing the encoded codes. The codes are displayed 0-based to match the encoding the user of the original dataset expects.
pub fn render_raw_data_table(dataframe: &DataFrame) -> String {
	let mut html = String::new();
	writeln!(html, r#"<div class="raw-data-scroll"><table class="raw-data-table">"#).unwrap();
	writeln!(html, "<thead><tr>").unwrap();
	for column in &dataframe.columns {
		write!(html, "<th>{}</th>", escape(column.name())).unwrap();
	}
	writeln!(html, "</tr></thead>").unwrap();
	writeln!(html, "<tbody>").unwrap();
	for row_index in 0..dataframe.nrows() {
		write!(html, "<tr>").unwrap();
		for column in &dataframe.columns {
			match column {
				Column::Enum(column) => match column.data[row_index] {
					Some(code) => write!(html, "<td>{}</td>", code.get() - 1).unwrap(),
					None => write!(html, "<td></td>").unwrap(),
				},
				Column::Number(column) => {
					write!(html, "<td>{}</td>", column.data[row_index]).unwrap()
				}
				Column::Unknown(_) => write!(html, "<td></td>").unwrap(),
			}
		}
		writeln!(html, "</tr>").unwrap();
	}
	writeln!(html, "</tbody></table></div>").unwrap();
	html
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod test {
	use super::super::props::MetricSelection;
	use super::*;
	use amanita_core::config::{ModelConfig, SvmConfig};
	use amanita_core::split::TARGET_COLUMN_NAME;
	use amanita_dataframe::FromCsvOptions;

	fn test_dataframe() -> DataFrame {
		let csv = "\
type,odor,habitat
p,f,u
e,n,g
p,p,u
e,a,m
";
		DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
			FromCsvOptions::default(),
			|_| {},
		)
		.unwrap()
	}

	#[test]
	fn test_raw_data_table_has_one_row_per_record() {
		let dataframe = test_dataframe();
		let table = render_raw_data_table(&dataframe);
		let n_body_rows = table.matches("<tr>").count() - 1;
		assert_eq!(n_body_rows, dataframe.nrows());
		for column in &dataframe.columns {
			assert!(table.contains(&format!("<th>{}</th>", column.name())));
		}
		// codes are shown 0-based, so the smallest code in every column is 0
		assert!(table.contains("<td>0</td>"));
	}

	#[test]
	fn test_page_shows_sidebar_and_tagline() {
		let props = Props {
			selected: ModelConfig::Svm(SvmConfig::default()),
			metrics: MetricSelection::default(),
			show_raw_data: false,
			error: None,
			results: None,
		};
		let html = render(&props, &test_dataframe());
		assert!(html.contains(PAGE_TITLE));
		assert!(html.contains(TAGLINE));
		assert!(html.contains("Model Hyperparameters"));
		assert!(html.contains(r#"<input type="hidden" name="model" value="svm">"#));
		assert!(!html.contains("Mushrooms dataset"));
	}

	#[test]
	fn test_failed_plot_renders_inline_next_to_other_plots() {
		use super::super::props::Results;
		let props = Props {
			selected: ModelConfig::Svm(SvmConfig::default()),
			metrics: MetricSelection {
				confusion_matrix: false,
				roc_curve: true,
				precision_recall_curve: true,
			},
			show_raw_data: false,
			error: None,
			results: Some(Results {
				model_name: "Support Vector Machine (SVM)",
				accuracy: 0.9,
				precision: 0.88,
				recall: 0.92,
				plots: vec![
					Plot::Failed(
						"failed to render the ROC curve plot: chart point is not finite"
							.to_owned(),
					),
					Plot::Chart("<svg>pr</svg>".to_owned()),
				],
			}),
		};
		let html = render(&props, &test_dataframe());
		assert!(html.contains(
			r#"<div class="plot-error">failed to render the ROC curve plot: chart point is not finite</div>"#
		));
		assert!(html.contains("<svg>pr</svg>"));
	}

	#[test]
	fn test_page_shows_raw_data_when_toggled() {
		let props = Props {
			selected: ModelConfig::Svm(SvmConfig::default()),
			metrics: MetricSelection::default(),
			show_raw_data: true,
			error: None,
			results: None,
		};
		let html = render(&props, &test_dataframe());
		assert!(html.contains("Mushrooms dataset (Binary Classification)"));
		assert!(html.contains(TARGET_COLUMN_NAME));
	}
}
