use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skio_cli::output::OutputFormat;

mod commands;

use commands::route::{handle_route_command, DuplicateEdges, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(
    name = "skio",
    author,
    version,
    about = "Find the fastest Ski-O route visiting every control in order"
)]
struct Cli {
    /// Track map: `trackId srcId dstId <ignored> forwardWeight reverseWeight` per line.
    map_file: PathBuf,
    /// Course: `start <id>`, `finish <id>` and `controls <n> <id...>` lines.
    course_file: PathBuf,
    /// Output format for the course report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// How to treat two tracks that connect the same ordered pair of junctions.
    #[arg(long, value_enum, default_value_t = DuplicateEdges::FirstWins)]
    duplicate_edges: DuplicateEdges,
    /// Abort on malformed track weights instead of skipping the line.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    handle_route_command(&RouteCommandArgs {
        map_file: cli.map_file,
        course_file: cli.course_file,
        format: cli.format,
        duplicate_edges: cli.duplicate_edges,
        strict: cli.strict,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exactly_two_positionals_are_required() {
        assert!(Cli::try_parse_from(["skio", "map.txt"]).is_err());
        assert!(Cli::try_parse_from(["skio", "map.txt", "course.txt", "extra.txt"]).is_err());

        let cli = Cli::try_parse_from(["skio", "map.txt", "course.txt"]).expect("two args parse");
        assert_eq!(cli.map_file, PathBuf::from("map.txt"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.duplicate_edges, DuplicateEdges::FirstWins);
        assert!(!cli.strict);
    }

    #[test]
    fn policy_flags_parse() {
        let cli = Cli::try_parse_from([
            "skio",
            "map.txt",
            "course.txt",
            "--format",
            "json",
            "--duplicate-edges",
            "keep-minimum",
            "--strict",
        ])
        .expect("flags parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.duplicate_edges, DuplicateEdges::KeepMinimum);
        assert!(cli.strict);
    }
}
