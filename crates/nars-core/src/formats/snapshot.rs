//! # Belief Snapshot Format
//!
//! Binary encoding of an engine's beliefs and desires.
//!
//! Format: Header (5 bytes) + postcard-serialized `BeliefSnapshot`.
//! - 4 bytes: Magic ("NARS")
//! - 1 byte: Version
//!
//! Only statements (with their intervals), punctuation, values and
//! occurrence times survive a snapshot. Evidential bases, links and budgets are rebuilt on restore.
//! File I/O lives in the app layer.
//!
//! ## Limits
//!
//! The payload size is checked before any decoding, and the header is
//! validated before the payload is touched.

use crate::primitives::{FORMAT_VERSION, MAGIC_BYTES};
use crate::sentence::SentenceKind;
use crate::NarsError;
use serde::{Deserialize, Serialize};

/// Largest snapshot accepted for decoding.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024 * 1024; // 64 MB

const HEADER_SIZE: usize = 5;

// =============================================================================
// SNAPSHOT DATA
// =============================================================================

/// One stored belief or desire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Canonical Narsese of the statement.
    pub statement: String,
    pub kind: SentenceKind,
    pub occurrence_time: Option<u64>,
    /// The statement's [`interval_layout`](crate::term::Term::interval_layout), which its Narsese text
    /// does not carry. Empty means the parsed defaults.
    #[serde(default)]
    pub intervals: Vec<u32>,
}

/// Everything an engine believes and desires at one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefSnapshot {
    pub cycle: u64,
    pub beliefs: Vec<SnapshotEntry>,
    pub desires: Vec<SnapshotEntry>,
}

impl BeliefSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.beliefs.len() + self.desires.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty() && self.desires.is_empty()
    }
}

// =============================================================================
// FILE HEADER
// =============================================================================

/// The header precedes every encoded snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), NarsError> {
        if &self.magic != MAGIC_BYTES {
            return Err(NarsError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(NarsError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NarsError> {
        if bytes.len() < HEADER_SIZE {
            return Err(NarsError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encode a snapshot (header + payload).
pub fn snapshot_to_bytes(snapshot: &BeliefSnapshot) -> Result<Vec<u8>, NarsError> {
    let payload = postcard::to_stdvec(snapshot)
        .map_err(|e| NarsError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&SnapshotHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Decode a snapshot.
///
/// Size and header are validated before the payload is decoded.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<BeliefSnapshot, NarsError> {
    if bytes.len() < HEADER_SIZE {
        return Err(NarsError::DeserializationError(format!(
            "Data too short: minimum {} bytes required",
            HEADER_SIZE
        )));
    }
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(NarsError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    SnapshotHeader::from_bytes(bytes)?.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
        NarsError::DeserializationError(format!("Failed to decode snapshot: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truth::EvidentialValue;

    fn sample() -> BeliefSnapshot {
        BeliefSnapshot {
            cycle: 12,
            beliefs: vec![SnapshotEntry {
                statement: "(bird --> animal)".to_string(),
                kind: SentenceKind::Judgment(EvidentialValue::new(0.8, 0.7)),
                occurrence_time: None,
                intervals: vec![0],
            }],
            desires: vec![SnapshotEntry {
                statement: "(door --> open)".to_string(),
                kind: SentenceKind::Goal(EvidentialValue::default()),
                occurrence_time: Some(11),
                intervals: vec![0],
            }],
        }
    }

    #[test]
    fn encoded_snapshot_decodes_identically() {
        let snapshot = sample();
        let bytes = snapshot_to_bytes(&snapshot).expect("encode");
        assert_eq!(&bytes[0..4], MAGIC_BYTES);
        assert_eq!(snapshot_from_bytes(&bytes).expect("decode"), snapshot);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = snapshot_to_bytes(&sample()).expect("encode");
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(matches!(
            snapshot_from_bytes(&bytes),
            Err(NarsError::DeserializationError(_))
        ));
    }

    #[test]
    fn wrong_version_and_short_input_rejected() {
        let mut bytes = snapshot_to_bytes(&sample()).expect("encode");
        bytes[4] = FORMAT_VERSION + 1;
        assert!(snapshot_from_bytes(&bytes).is_err());
        assert!(snapshot_from_bytes(b"NAR").is_err());
    }

    #[test]
    fn truncated_payload_rejected() {
        let bytes = snapshot_to_bytes(&sample()).expect("encode");
        assert!(snapshot_from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
