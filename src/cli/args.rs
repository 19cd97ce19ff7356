//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Release and asset tooling: svg-wrap png assets, publish python packages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file name or path (searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = "shipkit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Wait for Enter before exiting (for double-click launches)
    #[arg(long, global = true)]
    pub interactive: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Wrap png assets in svg containers (embedded raster, not vectorized)
    #[command(visible_alias = "w")]
    Wrap {
        #[command(flatten)]
        args: WrapArgs,
    },

    /// Bump the patch version, build, upload and refresh the local install
    #[command(visible_alias = "p")]
    Publish {
        #[command(flatten)]
        args: PublishArgs,
    },
}

/// Wrap command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WrapArgs {
    /// Directory holding the source png files (overrides `[assets] dir`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Longest side allowed for icon assets before downscaling
    #[arg(long)]
    pub max_icon_size: Option<u32>,

    /// Report undecodable images and continue with the remaining assets
    #[arg(short, long)]
    pub keep_going: bool,
}

/// Publish command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PublishArgs {
    /// Project root holding the manifest (default: config dir, else cwd)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Show the version bump and the commands without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_wrap(&self) -> bool {
        matches!(self.command, Commands::Wrap { .. })
    }
    pub const fn is_publish(&self) -> bool {
        matches!(self.command, Commands::Publish { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrap_overrides() {
        let cli = Cli::parse_from(["shipkit", "wrap", "--dir", "assets", "--max-icon-size", "256"]);
        assert!(cli.is_wrap());
        let Commands::Wrap { args } = cli.command else {
            unreachable!()
        };
        assert_eq!(args.dir, Some(PathBuf::from("assets")));
        assert_eq!(args.max_icon_size, Some(256));
        assert!(!args.keep_going);
    }

    #[test]
    fn test_parse_publish_global_flags() {
        let cli = Cli::parse_from(["shipkit", "publish", "--dry-run", "--interactive", "-v"]);
        assert!(cli.is_publish());
        assert!(cli.interactive);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("shipkit.toml"));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["shipkit", "p", "-n"]);
        let Commands::Publish { args } = cli.command else {
            unreachable!()
        };
        assert!(args.dry_run);
    }
}
