extern crate anyhow;
extern crate env_logger;
extern crate log;
extern crate raylight;

use anyhow::{bail, Context, Result};
use std::path::Path;

use raylight::{demo, description};
use raylight::options::RenderOptions;

static DEFAULT_OUTPUT: &'static str = "raylight.bmp";

fn usage(program: &str) -> String {
	format!("usage: {} <scene.json | --demo NAME> [output.bmp]\ndemos: {}", program, demo::NAMES.join(", "))
}

fn main() -> Result<()> {
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Info)
		.parse_default_env()
		.init();

	let args = std::env::args().collect::<Vec<String>>();
	let program = args.get(0).map(String::as_str).unwrap_or("render");

	let (setup, rest) = match args.get(1).map(String::as_str) {
		Some("--demo") => {
			let name = args.get(2).with_context(|| usage(program))?;
			let (scene, camera) = demo::by_name(name)
				.with_context(|| format!("cannot build demo '{}'", name))?;
			(description::Setup { scene, camera, options: RenderOptions::default() }, &args[3..])
		}
		Some("-h") | Some("--help") | None => bail!(usage(program)),
		Some(path) => {
			let setup = description::load(path)
				.with_context(|| format!("cannot load scene {}", path))?;
			(setup, &args[2..])
		}
	};

	let output = Path::new(rest.first().map(String::as_str).unwrap_or(DEFAULT_OUTPUT));

	let frame = raylight::render(&setup.scene, &setup.camera, &setup.options);
	frame.save_bmp(output)
		.with_context(|| format!("cannot write {}", output.display()))?;

	Ok(())
}
