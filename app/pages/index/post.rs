use super::page;
use super::props::{build_results, MetricSelection, Props};
use crate::{common::error::Error, Context};
use amanita_core::{
	config::{
		Gamma, Kernel, LogisticRegressionConfig, ModelConfig, RandomForestConfig, SvmConfig,
	},
	test::evaluate,
	train::train,
};
use amanita_util::error::Result;
use hyper::{body::to_bytes, Body, Request, Response, StatusCode};

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "action")]
enum Action {
	#[serde(rename = "classify")]
	Classify(ClassifyAction),
}

/// The classify form submits every hyperparameter as a string. Which fields are present depends on the selected model family; the checkboxes are present only when checked.
#[derive(serde::Deserialize, Debug)]
struct ClassifyAction {
	model: String,
	c: Option<String>,
	kernel: Option<String>,
	gamma: Option<String>,
	max_iter: Option<String>,
	n_estimators: Option<String>,
	max_depth: Option<String>,
	bootstrap: Option<String>,
	confusion_matrix: Option<String>,
	roc_curve: Option<String>,
	precision_recall_curve: Option<String>,
	raw_data: Option<String>,
}

pub async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = to_bytes(request.body_mut())
		.await
		.map_err(|_| Error::BadRequest)?;
	let action: Action = serde_urlencoded::from_bytes(&data).map_err(|_| Error::BadRequest)?;
	let Action::Classify(action) = action;
	let config = build_config(&action)?;
	let metrics = MetricSelection {
		confusion_matrix: action.confusion_matrix.is_some(),
		roc_curve: action.roc_curve.is_some(),
		precision_recall_curve: action.precision_recall_curve.is_some(),
	};
	let split = &context.cache.split;
	let (error, results) = match train(&config, split, &mut || {})
		.and_then(|model| evaluate(&model, split))
	{
		Ok(evaluation) => {
			let positive_class = split.labels_train.options[1].as_str();
			let negative_class = split.labels_train.options[0].as_str();
			let results = build_results(
				&config,
				&evaluation,
				metrics,
				positive_class,
				negative_class,
			);
			(None, Some(results))
		}
		Err(error) => (Some(error.to_string()), None),
	};
	let props = Props {
		selected: config,
		metrics,
		show_raw_data: action.raw_data.is_some(),
		error,
		results,
	};
	let html = page::render(&props, &context.cache.dataframe);
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(hyper::header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))
		.unwrap())
}

fn build_config(action: &ClassifyAction) -> Result<ModelConfig, Error> {
	let config = match action.model.as_str() {
		"svm" => ModelConfig::Svm(SvmConfig {
			c: parse_number(&action.c)?,
			kernel: match required(&action.kernel)? {
				"rbf" => Kernel::Rbf,
				"linear" => Kernel::Linear,
				_ => return Err(Error::BadRequest),
			},
			gamma: match required(&action.gamma)? {
				"scale" => Gamma::Scale,
				"auto" => Gamma::Auto,
				_ => return Err(Error::BadRequest),
			},
		}),
		"logistic_regression" => ModelConfig::LogisticRegression(LogisticRegressionConfig {
			c: parse_number(&action.c)?,
			max_iter: parse_number(&action.max_iter)?,
		}),
		"random_forest" => ModelConfig::RandomForest(RandomForestConfig {
			n_estimators: parse_number(&action.n_estimators)?,
			max_depth: parse_number(&action.max_depth)?,
			bootstrap: match required(&action.bootstrap)? {
				"true" => true,
				"false" => false,
				_ => return Err(Error::BadRequest),
			},
		}),
		_ => return Err(Error::BadRequest),
	};
	Ok(config)
}

fn required(field: &Option<String>) -> Result<&str, Error> {
	field.as_deref().ok_or(Error::BadRequest)
}

fn parse_number<T: std::str::FromStr>(field: &Option<String>) -> Result<T, Error> {
	required(field)?.parse().map_err(|_| Error::BadRequest)
}

#[cfg(test)]
mod test {
	use super::*;

	fn classify_action(model: &str) -> ClassifyAction {
		ClassifyAction {
			model: model.to_owned(),
			c: Some("0.01".to_owned()),
			kernel: Some("rbf".to_owned()),
			gamma: Some("scale".to_owned()),
			max_iter: Some("100".to_owned()),
			n_estimators: Some("100".to_owned()),
			max_depth: Some("1".to_owned()),
			bootstrap: Some("true".to_owned()),
			confusion_matrix: None,
			roc_curve: None,
			precision_recall_curve: None,
			raw_data: None,
		}
	}

	#[test]
	fn test_build_config_for_each_family() {
		assert_eq!(
			build_config(&classify_action("svm")).unwrap(),
			ModelConfig::Svm(SvmConfig::default()),
		);
		assert_eq!(
			build_config(&classify_action("logistic_regression")).unwrap(),
			ModelConfig::LogisticRegression(LogisticRegressionConfig::default()),
		);
		assert_eq!(
			build_config(&classify_action("random_forest")).unwrap(),
			ModelConfig::RandomForest(RandomForestConfig::default()),
		);
	}

	#[test]
	fn test_build_config_rejects_unknown_model_and_bad_numbers() {
		assert!(build_config(&classify_action("nearest_neighbors")).is_err());
		let mut action = classify_action("svm");
		action.c = Some("not a number".to_owned());
		assert!(build_config(&action).is_err());
		let mut action = classify_action("logistic_regression");
		action.max_iter = None;
		assert!(build_config(&action).is_err());
	}

	#[test]
	fn test_action_parses_from_form_body() {
		let body = "action=classify&model=svm&c=0.01&kernel=rbf&gamma=scale&roc_curve=true";
		let Action::Classify(action) = serde_urlencoded::from_str(body).unwrap();
		assert_eq!(action.model, "svm");
		assert!(action.roc_curve.is_some());
		assert!(action.confusion_matrix.is_none());
		assert!(serde_urlencoded::from_str::<Action>("action=unknown").is_err());
	}
}
