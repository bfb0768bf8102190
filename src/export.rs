//! Tabular exporter: the alternative sink for a source playlist.

use crate::types::{ExportOutcome, PlaylistEntry};
use crate::Result;

use std::path::Path;

/// Fixed header row of the exported file.
pub const CSV_HEADER: [&str; 5] = ["Title", "Artist", "Album", "Video ID", "Duration"];

/// Export playlist entries to a UTF-8, comma-delimited file.
///
/// Writes the fixed header row, then one row per entry in input order with
/// title/artist/album passed through the normalizer. Empty input is a soft
/// outcome: [`ExportOutcome::EmptySource`] is returned and no file is
/// created, mirroring the transfer orchestrator's empty-source contract.
///
/// # Arguments
///
/// * `entries` - Playlist entries to export (raw or already normalized)
/// * `path` - Destination file path, overwritten if it exists
pub fn export_playlist_csv(entries: &[PlaylistEntry], path: &Path) -> Result<ExportOutcome> {
    if entries.is_empty() {
        log::warn!("No playlist items to export");
        return Ok(ExportOutcome::EmptySource);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        let entry = entry.normalized();
        writer.write_record([
            entry.title.as_str(),
            entry.artist.as_str(),
            entry.album.as_deref().unwrap_or(""),
            entry.source_id.as_str(),
            entry.duration.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    log::info!("Exported {} playlist items to {}", entries.len(), path.display());
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: entries.len(),
    })
}
