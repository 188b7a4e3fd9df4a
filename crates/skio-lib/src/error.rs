use std::path::PathBuf;

use thiserror::Error;

use crate::course::NodeId;

/// Convenient result alias for the Ski-O library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised in strict parsing mode when a track record carries a bad weight.
    #[error("invalid track record on line {line}: {reason}")]
    InvalidTrack { line: usize, reason: String },

    /// Raised when the course yields fewer than the two mandatory waypoints.
    #[error("course needs a start and a finish; found {found} waypoint(s)")]
    IncompleteCourse { found: usize },

    /// Raised when a start or finish junction does not exist in the track network.
    #[error("unknown junction: {name}{}", format_suggestions(.suggestions))]
    UnknownJunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised under the reject policy when two tracks produce the same ordered edge.
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },

    /// Raised when two consecutive waypoints have no connecting path.
    #[error("No path exists between {origin} and {target}")]
    Unreachable { origin: NodeId, target: NodeId },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
