//! # Formats
//!
//! Byte-level encodings. File I/O is the app layer's job.

pub mod snapshot;

pub use snapshot::{
    snapshot_from_bytes, snapshot_to_bytes, BeliefSnapshot, SnapshotEntry, SnapshotHeader,
    MAX_SNAPSHOT_SIZE,
};
