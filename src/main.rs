use anyhow::Context;
use brew_packager::config::Config;
use brew_packager::{generate, logging};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::warn;

mod cli;

fn main() {
    let matches = cli::build_cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let loaded = Config::load_lenient(config_path.map(PathBuf::as_path))
        .context("failed to load configuration")?;
    let config = loaded.config.with_verbose(matches.get_flag("verbose"));
    logging::init(&config.logging)?;
    if let Some(err) = loaded.ignored {
        warn!("ignoring logging configuration: {}", err);
    }

    let request = cli::request_from(matches)?;
    let options = cli::options_from(matches);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate(&request, options, &mut out)
        .with_context(|| format!("failed to generate {}", request.output_path.display()))?;

    Ok(())
}
