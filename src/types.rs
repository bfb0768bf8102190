//! Data types for playlist transfer and export.
//!
//! This module contains the core data structures used throughout the crate:
//! playlist entries as read from the source catalog, per-item match results,
//! the destination playlist handle, and the terminal report/outcome types.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_str;

/// Sentinel used when a source entry carries no title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Sentinel used when a source entry carries no uploading-channel name.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Sentinel used when a source entry carries no item identifier.
pub const UNKNOWN_VIDEO_ID: &str = "Unknown Video ID";

/// One media item as read from the source catalog.
///
/// The source catalog has no dedicated artist field; the uploading channel's
/// display name is used as the closest available approximation. Entries with
/// missing fields are filled with "Unknown …" sentinels rather than dropped,
/// so the record count always matches the source playlist.
///
/// # Examples
///
/// ```rust
/// use soundferry::PlaylistEntry;
///
/// let entry = PlaylistEntry {
///     title: "Karma Police (Official Video)".to_string(),
///     artist: "Radiohead - Topic".to_string(),
///     album: None,
///     source_id: "dQw4w9WgXcQ".to_string(),
///     duration: None,
/// };
///
/// let cleaned = entry.normalized();
/// assert_eq!(cleaned.title, "Karma Police");
/// assert_eq!(cleaned.artist, "Radiohead");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// The item title as listed by the source catalog
    pub title: String,
    /// The artist proxy (uploading channel's display name)
    pub artist: String,
    /// The album name, if the source exposes one
    pub album: Option<String>,
    /// The source catalog's item identifier (video id)
    pub source_id: String,
    /// The item duration, if the source exposes one
    pub duration: Option<String>,
}

impl PlaylistEntry {
    /// Return a copy with title, artist, and album passed through the
    /// metadata normalizer.
    ///
    /// Normalization is idempotent: normalizing an already-normalized entry
    /// yields an equal entry. The identifier and duration pass through
    /// untouched.
    pub fn normalized(&self) -> PlaylistEntry {
        PlaylistEntry {
            title: normalize_str(&self.title),
            artist: normalize_str(&self.artist),
            album: self.album.as_deref().map(normalize_str),
            source_id: self.source_id.clone(),
            duration: self.duration.clone(),
        }
    }
}

/// One page of source playlist entries plus the continuation cursor.
///
/// `next_page_token` is the opaque cursor returned by the listing endpoint;
/// `None` means this was the final page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Entries on this page, in the source catalog's native order
    pub entries: Vec<PlaylistEntry>,
    /// Cursor for the next page, absent on the last page
    pub next_page_token: Option<String>,
}

/// The result of matching one source entry against the destination catalog.
///
/// Produced with the same cardinality and order as the source entries.
/// `track_uri` is `None` when the destination search returned no candidate —
/// a normal outcome that is counted and reported, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    /// The source catalog's item identifier this match belongs to
    pub source_id: String,
    /// The destination catalog's opaque track identifier, if one was found
    pub track_uri: Option<String>,
}

/// Identifier and shareable URL of a freshly created destination playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHandle {
    /// Destination playlist identifier
    pub id: String,
    /// Shareable playlist URL
    pub url: String,
}

/// Terminal artifact of a completed transfer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReport {
    /// Number of source items that resolved to a destination track
    pub matched_count: usize,
    /// Total number of source items read
    pub total_count: usize,
    /// Shareable URL of the created playlist, if one was created
    pub playlist_url: Option<String>,
}

/// Outcome of one orchestrated transfer run.
///
/// The two soft outcomes terminate the pipeline before the committer runs:
/// with the check-then-create policy, neither leaves a playlist behind on
/// the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The pipeline ran to completion; at least one track was committed.
    Completed(TransferReport),
    /// The source playlist contained zero items. No playlist was created
    /// and no commit call was issued.
    EmptySource,
    /// No source item resolved to a destination track. No playlist was
    /// created and no commit call was issued.
    NoMatches {
        /// Total number of source items that were read and looked up
        total_count: usize,
    },
}

/// Outcome of a tabular export run.
///
/// Mirrors the orchestrator's contract: zero input records is a soft,
/// reportable outcome rather than an error, and no file is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written.
    Written {
        /// Path of the written file
        path: std::path::PathBuf,
        /// Number of data rows written (excluding the header)
        rows: usize,
    },
    /// There were zero records to export; nothing was written.
    EmptySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_copy_preserves_identity_fields() {
        let entry = PlaylistEntry {
            title: "Song [Remastered]".to_string(),
            artist: "Artist - Topic".to_string(),
            album: Some("Album (Official)".to_string()),
            source_id: "abc123".to_string(),
            duration: Some("3:41".to_string()),
        };

        let cleaned = entry.normalized();
        assert_eq!(cleaned.title, "Song");
        assert_eq!(cleaned.artist, "Artist");
        assert_eq!(cleaned.album.as_deref(), Some("Album"));
        assert_eq!(cleaned.source_id, "abc123");
        assert_eq!(cleaned.duration.as_deref(), Some("3:41"));
    }

    #[test]
    fn test_normalized_is_idempotent_on_entries() {
        let entry = PlaylistEntry {
            title: "Song feat. Other (Official Music Video)".to_string(),
            artist: "Channel HD".to_string(),
            album: None,
            source_id: "id".to_string(),
            duration: None,
        };

        let once = entry.normalized();
        let twice = once.normalized();
        assert_eq!(once, twice);
    }
}
