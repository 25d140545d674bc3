use super::page;
use super::props::{MetricSelection, Props};
use crate::{common::error::Error, Context};
use amanita_core::config::ModelConfig;
use amanita_util::error::Result;
use hyper::{Body, Request, Response, StatusCode};
use std::collections::BTreeMap;

pub async fn get(
	context: &Context,
	_request: Request<Body>,
	search_params: Option<BTreeMap<String, String>>,
) -> Result<Response<Body>> {
	let search_params = search_params.unwrap_or_default();
	let selected = match search_params.get("classifier").map(|value| value.as_str()) {
		None | Some("svm") => ModelConfig::Svm(Default::default()),
		Some("logistic_regression") => ModelConfig::LogisticRegression(Default::default()),
		Some("random_forest") => ModelConfig::RandomForest(Default::default()),
		Some(_) => return Err(Error::BadRequest.into()),
	};
	let show_raw_data = search_params
		.get("raw_data")
		.map(|value| value == "true")
		.unwrap_or(false);
	let props = Props {
		selected,
		metrics: MetricSelection::default(),
		show_raw_data,
		error: None,
		results: None,
	};
	let html = page::render(&props, &context.cache.dataframe);
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(hyper::header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))
		.unwrap())
}
