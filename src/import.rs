//! Tabular importer: the reverse of the exporter.
//!
//! Reads a previously exported (or hand-assembled) comma-delimited file and
//! feeds its rows through the same match-and-commit path as a live transfer.
//! Only the Title and Artist columns drive matching; the rest of the
//! exporter's columns are carried along when present.

use crate::commit::add_tracks_in_batches;
use crate::destination::DestinationCatalog;
use crate::normalize::normalize_str;
use crate::transfer::match_all;
use crate::types::{PlaylistEntry, TransferOutcome, TransferReport, UNKNOWN_VIDEO_ID};
use crate::Result;

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Artist")]
    artist: String,
    #[serde(rename = "Album", default)]
    album: Option<String>,
    #[serde(rename = "Video ID", default)]
    video_id: Option<String>,
    #[serde(rename = "Duration", default)]
    duration: Option<String>,
}

/// Read playlist entries from a comma-delimited file.
///
/// Expects the exporter's header row; the Album, Video ID, and Duration
/// columns are optional so a hand-made two-column file imports too. Title and
/// artist pass through the normalizer on the way in, so a file holding raw
/// source titles still matches cleanly.
///
/// # Errors
///
/// Returns [`TransferError::Io`](crate::TransferError::Io) when the file
/// cannot be opened and [`TransferError::Csv`](crate::TransferError::Csv) on
/// malformed rows.
pub fn read_playlist_csv(path: &Path) -> Result<Vec<PlaylistEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        entries.push(PlaylistEntry {
            title: normalize_str(&row.title),
            artist: normalize_str(&row.artist),
            album: row.album,
            source_id: row
                .video_id
                .unwrap_or_else(|| UNKNOWN_VIDEO_ID.to_string()),
            duration: row.duration,
        });
    }

    log::debug!("Read {} rows from {}", entries.len(), path.display());
    Ok(entries)
}

/// Import a comma-delimited file into a new destination playlist.
///
/// Reads and normalizes the rows, looks up the best destination match per
/// row in file order, creates a private destination playlist, and commits
/// the matched URIs in chunks. Shares the transfer orchestrator's soft
/// outcomes and check-then-create policy: a file with no rows yields
/// [`TransferOutcome::EmptySource`] and a file where nothing matches yields
/// [`TransferOutcome::NoMatches`], both without creating a playlist.
///
/// # Arguments
///
/// * `destination` - Destination catalog client
/// * `path` - Comma-delimited file produced by the exporter (or compatible)
/// * `playlist_name` - Name for the created destination playlist
pub async fn import_playlist_csv<D>(
    destination: &D,
    path: &Path,
    playlist_name: &str,
) -> Result<TransferOutcome>
where
    D: DestinationCatalog + ?Sized,
{
    log::info!("Starting import from {}", path.display());

    let entries = read_playlist_csv(path)?;
    if entries.is_empty() {
        log::info!("File {} has no rows", path.display());
        return Ok(TransferOutcome::EmptySource);
    }

    let total_count = entries.len();
    let matches = match_all(destination, &entries).await?;
    let track_uris: Vec<String> = matches
        .iter()
        .filter_map(|m| m.track_uri.clone())
        .collect();

    if track_uris.is_empty() {
        log::warn!("No destination matches among {total_count} file rows");
        return Ok(TransferOutcome::NoMatches { total_count });
    }

    let matched_count = track_uris.len();
    let playlist = destination.create_playlist(playlist_name).await?;
    let committed = add_tracks_in_batches(destination, &playlist.id, &track_uris).await?;

    log::info!(
        "Import complete: {committed} of {total_count} file rows added to {}",
        playlist.url
    );

    Ok(TransferOutcome::Completed(TransferReport {
        matched_count,
        total_count,
        playlist_url: Some(playlist.url),
    }))
}
