use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use brew_packager::{PackageRequest, RenderOptions};

pub fn build_cli() -> Command {
    Command::new("brew_packager")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a Homebrew formula from a template")
        .long_about(
            "Fills ${version}, ${short_version} and ${checksum} in TEMPLATE_FILE and writes \
             the result to OUTPUT_FILE. Meant to run in a CI release job.",
        )
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE_FILE")
                .help("Template to fill in")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT_FILE")
                .help("Where to write the generated formula (overwritten)")
                .required(true)
                .index(2)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("release-version")
                .value_name("RELEASE_VERSION")
                .help("Release version of the package, e.g. v1.2.3")
                .required(true)
                .index(3)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("checksum")
                .value_name("CHECKSUM")
                .help("SHA256 checksum of the release artifact")
                .required(true)
                .index(4)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Render and print the formula but don't write OUTPUT_FILE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail if the template has placeholders with no value")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Logging configuration file (TOML)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn request_from(matches: &ArgMatches) -> Result<PackageRequest> {
    Ok(PackageRequest::new(
        required::<PathBuf>(matches, "template")?,
        required::<PathBuf>(matches, "output")?,
        required::<String>(matches, "release-version")?,
        required::<String>(matches, "checksum")?,
    ))
}

pub fn options_from(matches: &ArgMatches) -> RenderOptions {
    RenderOptions {
        dry_run: matches.get_flag("dry-run"),
        strict: matches.get_flag("strict"),
    }
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .with_context(|| format!("missing required argument '{}'", id))
}
