//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use skio_lib::{Course, Track, TrackRegistry};

/// Path to fixtures directory used by tests (maps, courses).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Two-track network used by the end-to-end scenarios.
#[allow(dead_code)]
pub fn two_track_registry() -> TrackRegistry {
    [
        Track::new("T1", "J1", "J2", 10.0, 6.0),
        Track::new("T2", "J2", "J3", 4.0, 4.0),
    ]
    .into_iter()
    .collect()
}

/// Course `J1 -> C_T1 -> J3` over [`two_track_registry`].
#[allow(dead_code)]
pub fn two_track_course() -> Course {
    Course::new("J1", ["T1"], "J3")
}
