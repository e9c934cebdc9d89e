//! tileproxy CLI - Command-line interface
//!
//! Renders Web Mercator tiles from a state-plane WMS, inspects tile plans,
//! and writes the default configuration file.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::plan::PlanArgs;
use commands::tile::TileArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "tileproxy")]
#[command(version = tileproxy::VERSION)]
#[command(about = "Serve Web Mercator tiles from a state-plane WMS", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.tileproxy/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one 256x256 PNG tile and save it to a file
    Tile {
        /// Tile column
        x: u32,
        /// Tile row (0 at the north edge)
        y: u32,
        /// Zoom level
        zoom: u8,

        /// Upstream layer name (defaults to upstream.default_layer)
        #[arg(long)]
        layer: Option<String>,

        /// Output file path
        #[arg(long, short, default_value = "tile.png")]
        output: PathBuf,
    },

    /// Show the footprint, source cells and crop window for a tile
    Plan {
        /// Tile column
        x: u32,
        /// Tile row (0 at the north edge)
        y: u32,
        /// Zoom level
        zoom: u8,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Tile {
            x,
            y,
            zoom,
            layer,
            output,
        } => commands::tile::run(
            cli.config,
            cli.debug,
            TileArgs {
                x,
                y,
                zoom,
                layer,
                output,
            },
        ),
        Commands::Plan { x, y, zoom } => {
            commands::plan::run(cli.config, cli.debug, PlanArgs { x, y, zoom })
        }
        Commands::Init { force } => commands::init::run(cli.config, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_tile_with_globals() {
        let cli = Cli::try_parse_from([
            "tileproxy",
            "tile",
            "1205",
            "1539",
            "12",
            "--layer",
            "aerial2016",
            "--config",
            "/tmp/custom.ini",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.ini")));
        match cli.command {
            Commands::Tile {
                x,
                y,
                zoom,
                layer,
                output,
            } => {
                assert_eq!((x, y, zoom), (1205, 1539, 12));
                assert_eq!(layer.as_deref(), Some("aerial2016"));
                assert_eq!(output, PathBuf::from("tile.png"));
            }
            _ => panic!("expected tile command"),
        }
    }

    #[test]
    fn test_rejects_zoom_overflow() {
        assert!(Cli::try_parse_from(["tileproxy", "plan", "0", "0", "300"]).is_err());
    }
}
