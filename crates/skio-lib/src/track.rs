use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Number of whitespace-separated fields in a well-formed track record.
const TRACK_FIELD_COUNT: usize = 6;

/// One segment of the network, traversable in both directions at different costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub source: String,
    pub destination: String,
    /// Cost of travelling `source -> destination`.
    pub forward_weight: f64,
    /// Cost of travelling `destination -> source`.
    pub reverse_weight: f64,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        forward_weight: f64,
        reverse_weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            destination: destination.into(),
            forward_weight,
            reverse_weight,
        }
    }
}

/// Immutable collection of tracks, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    index: HashMap<String, usize>,
}

impl TrackRegistry {
    /// Register a track, replacing any earlier track with the same id.
    ///
    /// A replacement keeps the registration slot of the record it replaces.
    fn insert(&mut self, track: Track) -> Option<Track> {
        if let Some(&slot) = self.index.get(&track.id) {
            return Some(std::mem::replace(&mut self.tracks[slot], track));
        }
        self.index.insert(track.id.clone(), self.tracks.len());
        self.tracks.push(track);
        None
    }

    /// Lookup a track by identifier.
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.index.get(id).map(|&slot| &self.tracks[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FromIterator<Track> for TrackRegistry {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut registry = TrackRegistry::default();
        for track in iter {
            registry.insert(track);
        }
        registry
    }
}

/// How malformed numeric fields in the map are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip the offending record and report it.
    #[default]
    Lenient,
    /// Abort the whole parse with [`Error::InvalidTrack`].
    Strict,
}

/// Why a map line did not produce a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The line did not have exactly six fields.
    FieldCount { found: usize },
    /// A weight field was not a finite, non-negative number.
    InvalidWeight { field: &'static str, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount { found } => {
                write!(f, "expected {TRACK_FIELD_COUNT} fields, found {found}")
            }
            SkipReason::InvalidWeight { field, value } => {
                write!(f, "{field} '{value}' is not a non-negative number")
            }
        }
    }
}

/// Map line that was not turned into a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine {
    /// One-based line number within the map file.
    pub line: usize,
    pub reason: SkipReason,
}

/// Result of parsing a map: the registry plus every line that was skipped.
#[derive(Debug, Clone, Default)]
pub struct MapParse {
    pub registry: TrackRegistry,
    pub skipped: Vec<SkippedLine>,
}

/// Parse map text into a [`TrackRegistry`].
///
/// Records are `trackId srcId dstId <ignored> forwardWeight reverseWeight`.
/// Blank lines are ignored and lines with any other field count are skipped.
pub fn parse_map(input: &str, mode: ParseMode) -> Result<MapParse> {
    let mut parsed = MapParse::default();

    for (offset, raw) in input.lines().enumerate() {
        let line = offset + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if fields.len() != TRACK_FIELD_COUNT {
            warn!(
                line,
                found = fields.len(),
                "skipping map line with unexpected field count"
            );
            parsed.skipped.push(SkippedLine {
                line,
                reason: SkipReason::FieldCount {
                    found: fields.len(),
                },
            });
            continue;
        }

        let weights = (
            parse_weight("forward weight", fields[4]),
            parse_weight("reverse weight", fields[5]),
        );
        let (forward_weight, reverse_weight) = match weights {
            (Ok(forward), Ok(reverse)) => (forward, reverse),
            (Err(reason), _) | (_, Err(reason)) => {
                if mode == ParseMode::Strict {
                    return Err(Error::InvalidTrack {
                        line,
                        reason: reason.to_string(),
                    });
                }
                warn!(line, %reason, "skipping malformed track record");
                parsed.skipped.push(SkippedLine { line, reason });
                continue;
            }
        };

        let track = Track::new(
            fields[0],
            fields[1],
            fields[2],
            forward_weight,
            reverse_weight,
        );
        if let Some(previous) = parsed.registry.insert(track) {
            warn!(line, track = %previous.id, "track id repeated; later record replaces earlier");
        }
    }

    info!(
        tracks = parsed.registry.len(),
        skipped = parsed.skipped.len(),
        "parsed track map"
    );
    Ok(parsed)
}

/// Read and parse a map file from disk.
pub fn load_map(path: &Path, mode: ParseMode) -> Result<MapParse> {
    let contents = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&contents, mode)
}

fn parse_weight(field: &'static str, value: &str) -> std::result::Result<f64, SkipReason> {
    match value.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
        _ => Err(SkipReason::InvalidWeight {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourth_field_is_ignored() {
        let parsed = parse_map("T1 J1 J2 whatever 10 6\n", ParseMode::Lenient).unwrap();
        let track = parsed.registry.get("T1").expect("track registered");
        assert_eq!(track.source, "J1");
        assert_eq!(track.destination, "J2");
        assert_eq!(track.forward_weight, 10.0);
        assert_eq!(track.reverse_weight, 6.0);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn repeated_id_keeps_first_slot() {
        let registry: TrackRegistry = [
            Track::new("T1", "J1", "J2", 1.0, 1.0),
            Track::new("T2", "J2", "J3", 2.0, 2.0),
            Track::new("T1", "J4", "J5", 3.0, 3.0),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = registry.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);
        assert_eq!(registry.get("T1").unwrap().source, "J4");
    }

    #[test]
    fn negative_and_nan_weights_are_rejected() {
        assert!(parse_weight("forward weight", "-1").is_err());
        assert!(parse_weight("forward weight", "NaN").is_err());
        assert!(parse_weight("forward weight", "inf").is_err());
        assert_eq!(parse_weight("forward weight", "0").unwrap(), 0.0);
    }
}
