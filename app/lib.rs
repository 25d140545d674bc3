/*!
This crate is the web dashboard. It serves a single page: `GET /` renders the sidebar and the current classifier's hyperparameter form, and `POST /` trains the chosen model on the cached dataset and renders its metrics. Everything is computed server side, so the page is plain html with inline svg and no client side code.
*/

use crate::common::error::Error;
use amanita_util::error::Result;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::{collections::BTreeMap, sync::Arc};

pub mod common;
mod layouts;
mod pages;

pub struct Options {
	pub data: std::path::PathBuf,
	pub host: std::net::IpAddr,
	pub port: u16,
}

pub struct Context {
	pub cache: amanita_core::DatasetCache,
	pub options: Options,
}

async fn handle(context: Arc<Context>, request: Request<Body>) -> Response<Body> {
	let method = request.method().clone();
	let uri = request.uri().clone();
	let path_and_query = uri.path_and_query().unwrap();
	let path = path_and_query.path().to_owned();
	let query = path_and_query.query();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let search_params: Option<BTreeMap<String, String>> = query.map(|query| {
		url::form_urlencoded::parse(query.as_bytes())
			.into_owned()
			.collect()
	});
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &[""]) => self::pages::index::get(&context, request, search_params).await,
		(&Method::POST, &[""]) => self::pages::index::post(&context, request).await,
		_ => Err(Error::NotFound.into()),
	};
	let response = match result {
		Ok(response) => response,
		Err(error) => {
			if let Some(error) = error.downcast_ref::<Error>() {
				match error {
					Error::BadRequest => Response::builder()
						.status(StatusCode::BAD_REQUEST)
						.body(Body::from("bad request"))
						.unwrap(),
					Error::NotFound => Response::builder()
						.status(StatusCode::NOT_FOUND)
						.body(Body::from("not found"))
						.unwrap(),
				}
			} else {
				eprintln!("{}", error);
				Response::builder()
					.status(StatusCode::INTERNAL_SERVER_ERROR)
					.body(Body::from("internal server error"))
					.unwrap()
			}
		}
	};
	eprintln!("{} {} {}", method, path, response.status());
	response
}

pub fn run(options: Options) -> Result<()> {
	tokio::runtime::Builder::new()
		.threaded_scheduler()
		.enable_all()
		.build()
		.unwrap()
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> Result<()> {
	// A LoadError here is fatal. The process must report it and exit before binding the listener.
	let cache = amanita_core::DatasetCache::load(&options.data)?;
	eprintln!(
		"loaded dataset {} with {} rows",
		cache.key,
		cache.dataframe.nrows(),
	);
	let host = options.host;
	let port = options.port;
	let context = Context { cache, options };
	amanita_util::serve::serve(host, port, context, handle).await?;
	Ok(())
}
