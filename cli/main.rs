//! This module contains the main entrypoint to the amanita cli.

use backtrace::Backtrace;
use clap::{Args, Parser};
use colored::Colorize;
use once_cell::sync::Lazy;
use std::{path::PathBuf, sync::Mutex};
use amanita_core::config::{
	Gamma, Kernel, LogisticRegressionConfig, ModelConfig, RandomForestConfig, SvmConfig,
};
use amanita_util::{err, error::Result};

#[derive(Parser)]
#[clap(
	about = "Train and explore mushroom classifiers.",
	disable_help_subcommand = true,
)]
enum Options {
	#[clap(name = "train")]
	Train(TrainOptions),
	#[clap(name = "app")]
	App(AppOptions),
}

#[derive(Args, Debug)]
#[clap(about = "train a model")]
#[clap(long_about = "train one model on the dataset and print its metrics as json")]
struct TrainOptions {
	#[clap(long, help = "the path to the dataset .csv file")]
	data: PathBuf,
	#[clap(
		long,
		help = "the model family to train",
		value_parser = ["svm", "logistic_regression", "random_forest"],
	)]
	model: String,
	#[clap(long, help = "the regularization parameter for svm and logistic regression")]
	c: Option<f32>,
	#[clap(long, help = "the svm kernel", value_parser = ["rbf", "linear"])]
	kernel: Option<String>,
	#[clap(long, help = "the svm kernel coefficient", value_parser = ["scale", "auto"])]
	gamma: Option<String>,
	#[clap(long, help = "the maximum number of logistic regression iterations")]
	max_iter: Option<u64>,
	#[clap(long, help = "the number of trees in the forest")]
	n_estimators: Option<u64>,
	#[clap(long, help = "the maximum depth of each tree")]
	max_depth: Option<u64>,
	#[clap(long, help = "whether to bootstrap sample the training data for each tree")]
	bootstrap: Option<bool>,
}

#[derive(Args)]
#[clap(about = "run the app")]
#[clap(long_about = "run the classification dashboard web app")]
struct AppOptions {
	#[clap(long, help = "the path to the dataset .csv file")]
	data: PathBuf,
	#[clap(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::Train(options) => cli_train(options),
		Options::App(options) => cli_app(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_train(options: TrainOptions) -> Result<()> {
	// Install a panic hook that stores the panic message, and wrap training with `catch_unwind`, so a panic inside a model crate is reported like any other error instead of killing the process with the default hook's output.
	static PANIC_MESSAGE_AND_BACKTRACE: Lazy<Mutex<Option<(String, Backtrace)>>> =
		Lazy::new(|| Mutex::new(None));
	let hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(|panic_info| {
		let value = (panic_info.to_string(), Backtrace::new());
		PANIC_MESSAGE_AND_BACKTRACE.lock().unwrap().replace(value);
	}));
	let result = std::panic::catch_unwind(|| {
		let cache = amanita_core::DatasetCache::load(&options.data)?;
		let config = build_config(&options)?;
		let model = amanita_core::train::train(&config, &cache.split, &mut || {})?;
		let evaluation = amanita_core::test::evaluate(&model, &cache.split)?;
		Ok((config, evaluation))
	});
	std::panic::set_hook(hook);
	let (config, evaluation) = match result {
		Ok(result) => result,
		Err(_) => {
			let panic_info = PANIC_MESSAGE_AND_BACKTRACE.lock().unwrap();
			let (message, backtrace) = panic_info.as_ref().unwrap();
			Err(err!("{}\n{:?}", message, backtrace))
		}
	}?;
	let summary = serde_json::json!({
		"model": config.display_name(),
		"accuracy": evaluation.accuracy,
		"precision": evaluation.precision,
		"recall": evaluation.recall,
		"auc_roc": evaluation.auc_roc,
		"n_examples_train": evaluation.n_examples_train,
		"n_examples_test": evaluation.n_examples_test,
	});
	println!("{}", serde_json::to_string_pretty(&summary).unwrap());
	Ok(())
}

fn cli_app(options: AppOptions) -> Result<()> {
	amanita_app::run(amanita_app::Options {
		data: options.data,
		host: options.host,
		port: options.port,
	})
}

/// Build a `ModelConfig` for the chosen family, starting from that family's defaults and overriding whichever hyperparameter flags were passed.
fn build_config(options: &TrainOptions) -> Result<ModelConfig> {
	let config = match options.model.as_str() {
		"svm" => {
			let mut config = SvmConfig::default();
			if let Some(c) = options.c {
				config.c = c;
			}
			if let Some(kernel) = &options.kernel {
				config.kernel = match kernel.as_str() {
					"rbf" => Kernel::Rbf,
					"linear" => Kernel::Linear,
					_ => return Err(err!("unknown kernel {:?}", kernel)),
				};
			}
			if let Some(gamma) = &options.gamma {
				config.gamma = match gamma.as_str() {
					"scale" => Gamma::Scale,
					"auto" => Gamma::Auto,
					_ => return Err(err!("unknown gamma {:?}", gamma)),
				};
			}
			ModelConfig::Svm(config)
		}
		"logistic_regression" => {
			let mut config = LogisticRegressionConfig::default();
			if let Some(c) = options.c {
				config.c = c;
			}
			if let Some(max_iter) = options.max_iter {
				config.max_iter = max_iter;
			}
			ModelConfig::LogisticRegression(config)
		}
		"random_forest" => {
			let mut config = RandomForestConfig::default();
			if let Some(n_estimators) = options.n_estimators {
				config.n_estimators = n_estimators;
			}
			if let Some(max_depth) = options.max_depth {
				config.max_depth = max_depth;
			}
			if let Some(bootstrap) = options.bootstrap {
				config.bootstrap = bootstrap;
			}
			ModelConfig::RandomForest(config)
		}
		model => return Err(err!("unknown model {:?}", model)),
	};
	Ok(config)
}
