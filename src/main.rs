//! seotag - render SEO head fragments from page and site documents.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use seotag::cli::{self, Cli, Commands};
use seotag::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Render {
            input,
            paginator,
            options,
            output,
        } => cli::render::run_render(input, paginator.as_deref(), options, output.as_deref()),
        Commands::JsonLd { input } => cli::render::run_json_ld(input),
        Commands::Inspect { input, paginator } => {
            cli::render::run_inspect(input, paginator.as_deref())
        }
    }
}
