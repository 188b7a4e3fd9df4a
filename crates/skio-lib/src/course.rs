use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Prefix used when a control node is rendered as text.
pub const CONTROL_PREFIX: &str = "C_";

/// Node identifier in the routing graph.
///
/// Junctions and controls live in separate namespaces: a junction called
/// `C_T1` never collides with the control placed on track `T1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// Physical endpoint of one or more tracks.
    Junction(String),
    /// Midpoint of the track with the given id.
    Control(String),
}

impl NodeId {
    pub fn junction(id: impl Into<String>) -> Self {
        NodeId::Junction(id.into())
    }

    pub fn control(track_id: impl Into<String>) -> Self {
        NodeId::Control(track_id.into())
    }

    /// Junction identifier, or `None` for control nodes.
    pub fn as_junction(&self) -> Option<&str> {
        match self {
            NodeId::Junction(id) => Some(id),
            NodeId::Control(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Junction(id) => f.write_str(id),
            NodeId::Control(track) => write!(f, "{CONTROL_PREFIX}{track}"),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered set of mandatory waypoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    pub start: Option<String>,
    /// Track identifiers whose midpoints must be visited, in order.
    pub controls: Vec<String>,
    pub finish: Option<String>,
}

impl Course {
    pub fn new(
        start: impl Into<String>,
        controls: impl IntoIterator<Item = impl Into<String>>,
        finish: impl Into<String>,
    ) -> Self {
        Self {
            start: Some(start.into()),
            controls: controls.into_iter().map(Into::into).collect(),
            finish: Some(finish.into()),
        }
    }

    /// Waypoint sequence `[start, controls..., finish]`, omitting missing entries.
    pub fn waypoints(&self) -> Vec<NodeId> {
        let mut waypoints = Vec::with_capacity(self.controls.len() + 2);
        if let Some(start) = &self.start {
            waypoints.push(NodeId::junction(start.as_str()));
        }
        waypoints.extend(self.controls.iter().map(|id| NodeId::control(id.as_str())));
        if let Some(finish) = &self.finish {
            waypoints.push(NodeId::junction(finish.as_str()));
        }
        waypoints
    }
}

/// Course line that was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseWarning {
    pub line: usize,
    pub message: String,
}

/// Result of parsing a course: the course plus every line that was dropped.
#[derive(Debug, Clone, Default)]
pub struct CourseParse {
    pub course: Course,
    pub warnings: Vec<CourseWarning>,
}

impl CourseParse {
    fn warn(&mut self, line: usize, message: String) {
        warn!(line, %message, "ignoring course line");
        self.warnings.push(CourseWarning { line, message });
    }
}

/// Parse course text made of `start <id>`, `finish <id>` and
/// `controls <n> <id_1> ... <id_n>` entries.
///
/// Malformed entries are dropped and reported rather than failing the parse.
pub fn parse_course(input: &str) -> CourseParse {
    let mut parsed = CourseParse::default();

    for (offset, raw) in input.lines().enumerate() {
        let line = offset + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            ["start", id] => {
                if parsed.course.start.replace(id.to_string()).is_some() {
                    parsed.warn(line, "start repeated; using the later entry".to_string());
                }
            }
            ["finish", id] => {
                if parsed.course.finish.replace(id.to_string()).is_some() {
                    parsed.warn(line, "finish repeated; using the later entry".to_string());
                }
            }
            ["controls", count, ids @ ..] => {
                let Ok(count) = count.parse::<usize>() else {
                    parsed.warn(line, format!("control count '{count}' is not a number"));
                    continue;
                };
                if ids.len() < count {
                    parsed.warn(
                        line,
                        format!("expected {count} controls, found {}", ids.len()),
                    );
                }
                parsed.course.controls = ids.iter().take(count).map(|id| id.to_string()).collect();
                debug!(
                    controls = parsed.course.controls.len(),
                    "parsed course controls"
                );
            }
            [keyword @ ("start" | "finish" | "controls"), ..] => {
                parsed.warn(line, format!("malformed '{keyword}' entry"));
            }
            [keyword, ..] => {
                parsed.warn(line, format!("unrecognised course entry '{keyword}'"));
            }
        }
    }

    parsed
}

/// Read and parse a course file from disk.
pub fn load_course(path: &Path) -> Result<CourseParse> {
    let contents = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_course(&contents))
}
