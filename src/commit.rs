//! Batch committer for destination playlist writes.

use crate::destination::DestinationCatalog;
use crate::{Result, TransferError};

/// Maximum number of track URIs the destination accepts per add-items call.
pub const MAX_TRACKS_PER_ADD: usize = 100;

/// Add tracks to a destination playlist in order-preserving chunks.
///
/// Partitions `track_uris` into chunks of at most [`MAX_TRACKS_PER_ADD`] and
/// issues one add-items call per chunk, sequentially. Returns the number of
/// tracks committed (equal to `track_uris.len()` on success).
///
/// # Errors
///
/// A failing chunk call converts into
/// [`TransferError::CommitPartialFailure`] carrying the exact cumulative
/// count of tracks from fully-succeeded chunks. Already-committed chunks are
/// not rolled back, so the playlist may end up partially populated; the
/// destination does not guarantee idempotency either, so re-running a failed
/// transfer may duplicate already-committed tracks.
pub async fn add_tracks_in_batches<D>(
    destination: &D,
    playlist_id: &str,
    track_uris: &[String],
) -> Result<usize>
where
    D: DestinationCatalog + ?Sized,
{
    let mut committed = 0usize;

    for chunk in track_uris.chunks(MAX_TRACKS_PER_ADD) {
        if let Err(e) = destination.add_items(playlist_id, chunk).await {
            return Err(TransferError::CommitPartialFailure {
                committed,
                reason: e.to_string(),
            });
        }
        committed += chunk.len();
        log::info!(
            "Added {} tracks to playlist {playlist_id} ({committed}/{} total)",
            chunk.len(),
            track_uris.len()
        );
    }

    Ok(committed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_partitioning_covers_all_without_duplication() {
        let uris: Vec<String> = (0..250).map(|i| format!("uri{i}")).collect();
        let chunks: Vec<&[String]> = uris.chunks(MAX_TRACKS_PER_ADD).collect();

        assert_eq!(chunks.len(), 3); // ceil(250 / 100)
        assert!(chunks.iter().all(|c| c.len() <= MAX_TRACKS_PER_ADD));
        let rejoined: Vec<String> = chunks.concat();
        assert_eq!(rejoined, uris);
    }
}
