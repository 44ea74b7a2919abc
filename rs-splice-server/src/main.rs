use std::io;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_splice_core::io::load_corpus;
use rs_splice_core::render::render;
use rs_splice_core::{Generator, GraphIndex, Preference, WalkOptions};

/// Server configuration
#[derive(Parser, Debug)]
#[command(name = "rs-splice-server")]
#[command(version = "0.1.0")]
#[command(about = "Serves spliced text generated from two corpora")]
struct Config {
	/// First corpus
	corpus_a: PathBuf,

	/// Second corpus
	corpus_b: PathBuf,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Worker threads (defaults to the number of CPUs)
	#[arg(long)]
	workers: Option<usize>,

	/// Largest sentence count a single request may ask for
	#[arg(long, default_value_t = 100)]
	max_sentences: usize,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	sentences: Option<usize>,
	seed: Option<u64>,
	alternate: Option<bool>,
}

/// Request limits shared by every worker.
#[derive(Clone, Copy, Debug)]
struct Limits {
	max_sentences: usize,
}

impl GenerateParams {
	/// Walk options for this request.
	///
	/// # Errors
	/// Rejects a sentence count above `limits.max_sentences`.
	fn options(&self, limits: &Limits) -> Result<WalkOptions, String> {
		let sentences = self.sentences.unwrap_or(1);
		if sentences > limits.max_sentences {
			return Err(format!(
				"sentences must be at most {}, got {}",
				limits.max_sentences, sentences
			));
		}

		let preference = if self.alternate.unwrap_or(false) {
			Preference::Alternate
		} else {
			Preference::PreferCross
		};
		Ok(WalkOptions::new(sentences).with_preference(preference))
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the shared index once and returns the rendered text.
/// The index is never mutated after startup, so requests walk it without locking.
/// The walk itself runs on the blocking thread pool.
#[get("/v1/generate")]
async fn get_generated(
	index: web::Data<GraphIndex>,
	limits: web::Data<Limits>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let options = match query.options(&limits) {
		Ok(options) => options,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let seed = query.seed.unwrap_or_else(|| rand::rng().random());

	let walk = web::block(move || {
		let mut rng = StdRng::seed_from_u64(seed);
		Generator::new(index.get_ref(), options).walk(&mut rng)
	})
	.await;

	match walk {
		Ok(Ok(walk)) => HttpResponse::Ok().body(render(&walk.tokens)),
		Ok(Err(e)) => {
			warn!("generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
		Err(_) => HttpResponse::InternalServerError().body("Generation task failed"),
	}
}

#[get("/v1/stats")]
async fn get_stats(index: web::Data<GraphIndex>) -> impl Responder {
	HttpResponse::Ok().json(index.stats())
}

/// Main entry point for the server.
///
/// Builds the index from both corpora, then serves it read-only from every
/// worker.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let config = Config::parse();

	let corpora = [load_corpus(&config.corpus_a, None), load_corpus(&config.corpus_b, None)]
		.into_iter()
		.collect::<Result<Vec<_>, _>>()
		.map_err(io::Error::other)?;
	let index = GraphIndex::build(&corpora).map_err(io::Error::other)?;
	let shared_index = web::Data::new(index);
	let limits = web::Data::new(Limits { max_sentences: config.max_sentences });

	let workers = config.workers.unwrap_or_else(num_cpus::get);
	info!("listening on {}:{} with {} workers", config.host, config.port, workers);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_index.clone())
			.app_data(limits.clone())
			.service(get_generated)
			.service(get_stats)
	})
		.workers(workers)
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
