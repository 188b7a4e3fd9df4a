//! Ski-O course routing library entry points.
//!
//! This crate parses track maps and course files, builds the directed
//! weighted graph over junctions and control points, and routes a course
//! through its mandatory waypoints in order. Higher-level consumers (the CLI)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod course;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod track;

pub use course::{load_course, parse_course, Course, CourseParse, CourseWarning, NodeId};
pub use error::{Error, Result};
pub use graph::{
    build_graph, build_graph_with, DuplicateEdge, DuplicateEdgePolicy, Edge, Graph,
    GraphBuildOptions, NodeIndex,
};
pub use output::{CourseRenderMode, CourseSummary, LegSummary};
pub use path::{find_shortest_path, ShortestPath};
pub use routing::{plan_course, plan_course_from, CourseLeg, CoursePlan};
pub use track::{
    load_map, parse_map, MapParse, ParseMode, SkipReason, SkippedLine, Track, TrackRegistry,
};
