//! Route command handler for planning a course through its waypoints.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{info, warn};

use skio_cli::output::{self, OutputFormat};
use skio_lib::{
    load_course, load_map, plan_course_from, CourseSummary, DuplicateEdgePolicy,
    GraphBuildOptions, ParseMode,
};

/// Duplicate-edge handling accepted by `--duplicate-edges`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicateEdges {
    /// Keep the weight of the first track registered for an ordered pair.
    #[default]
    FirstWins,
    /// Keep the smallest weight among tracks sharing an ordered pair.
    KeepMinimum,
    /// Fail when two tracks share an ordered pair.
    Reject,
}

impl From<DuplicateEdges> for DuplicateEdgePolicy {
    fn from(value: DuplicateEdges) -> Self {
        match value {
            DuplicateEdges::FirstWins => DuplicateEdgePolicy::FirstWins,
            DuplicateEdges::KeepMinimum => DuplicateEdgePolicy::KeepMinimum,
            DuplicateEdges::Reject => DuplicateEdgePolicy::Reject,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Track map file.
    pub map_file: PathBuf,
    /// Course file.
    pub course_file: PathBuf,
    pub format: OutputFormat,
    pub duplicate_edges: DuplicateEdges,
    /// Treat malformed numeric fields in the map as fatal.
    pub strict: bool,
}

impl RouteCommandArgs {
    fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    fn build_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            duplicate_edges: self.duplicate_edges.into(),
        }
    }
}

/// Handle the route command.
///
/// Loads both inputs before building anything, routes the course and renders
/// the summary. Nothing is written to stdout unless the whole course routes.
pub fn handle_route_command(args: &RouteCommandArgs) -> Result<()> {
    let map = load_map(&args.map_file, args.parse_mode())
        .with_context(|| format!("failed to load map from {}", args.map_file.display()))?;
    let course = load_course(&args.course_file).with_context(|| {
        format!(
            "failed to load course from {}",
            args.course_file.display()
        )
    })?;
    info!(
        tracks = map.registry.len(),
        skipped_lines = map.skipped.len(),
        course_warnings = course.warnings.len(),
        "inputs loaded"
    );
    if !map.skipped.is_empty() || !course.warnings.is_empty() {
        warn!(
            skipped_lines = map.skipped.len(),
            course_warnings = course.warnings.len(),
            "ignored malformed input lines"
        );
    }

    let plan = plan_course_from(&map.registry, &course.course, &args.build_options())?;
    let summary = CourseSummary::from_plan(&plan);
    output::render(&summary, args.format).context("failed to write course report")?;

    Ok(())
}
