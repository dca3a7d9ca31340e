//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// SEO, Open Graph and JSON-LD tags for static site pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the SEO head fragment
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Pagination context file (page, total_pages, ...)
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        paginator: Option<PathBuf>,

        /// Inline tag options, e.g. "title=false"
        #[arg(long, default_value = "")]
        options: String,

        /// Write the fragment to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the JSON-LD structured data
    #[command(name = "json-ld", visible_alias = "j")]
    JsonLd {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print every resolved metadata field as JSON
    #[command(visible_alias = "i")]
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Pagination context file (page, total_pages, ...)
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        paginator: Option<PathBuf>,
    },
}

/// Page and site documents shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Page front matter (.toml or .json)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub page: PathBuf,

    /// Site configuration (.toml or .json)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub site: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["seotag", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_render_command() {
        let cli = Cli::parse_from([
            "seotag",
            "render",
            "--page",
            "page.toml",
            "--site",
            "site.toml",
            "--options",
            "title=false",
        ]);
        match cli.command {
            Commands::Render {
                input,
                options,
                paginator,
                output,
            } => {
                assert_eq!(input.page, PathBuf::from("page.toml"));
                assert_eq!(input.site, PathBuf::from("site.toml"));
                assert_eq!(options, "title=false");
                assert!(paginator.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "seotag", "json-ld", "-p", "a.json", "-s", "b.json", "--color", "never", "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(cli.command, Commands::JsonLd { .. }));
    }

    #[test]
    fn test_missing_site_is_an_error() {
        assert!(Cli::try_parse_from(["seotag", "inspect", "--page", "a.json"]).is_err());
    }
}
