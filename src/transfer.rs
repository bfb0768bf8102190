//! Transfer orchestrator.
//!
//! Composes the source reader, normalizer, matcher, and committer into one
//! linear pipeline:
//!
//! `READ_SOURCE → NORMALIZE → MATCH_ALL → CREATE_DEST_PLAYLIST → COMMIT → REPORT`
//!
//! with two soft terminal states, [`TransferOutcome::EmptySource`] and
//! [`TransferOutcome::NoMatches`], reached before the committer runs. The
//! destination playlist is created only after at least one match exists
//! (check-then-create), so a run that matches nothing never leaves an empty
//! playlist behind.

use crate::commit::add_tracks_in_batches;
use crate::destination::DestinationCatalog;
use crate::iterator::{AsyncPaginatedIterator, PlaylistItemsIterator};
use crate::source::SourceCatalog;
use crate::types::{PlaylistEntry, TrackMatch, TransferOutcome, TransferReport};
use crate::Result;

/// Run one end-to-end playlist transfer.
///
/// Reads every entry of the source playlist, normalizes its metadata, looks
/// up the best destination match per entry (sequentially, in source order),
/// creates a private destination playlist, and commits the matched URIs in
/// chunks.
///
/// # Arguments
///
/// * `source` - Source catalog client
/// * `destination` - Destination catalog client
/// * `source_playlist_id` - Playlist to read from the source catalog
/// * `playlist_name` - Name for the created destination playlist
///
/// # Errors
///
/// Hard failures from any component propagate unhandled; this function is
/// not the user-facing catch boundary (the caller is). A single failed
/// destination lookup aborts the whole run rather than skipping the item;
/// per-item error isolation is a known limitation.
///
/// # Examples
///
/// ```rust,no_run
/// use soundferry::{transfer_playlist, SpotifyClient, SpotifySession, YouTubeClient, TransferOutcome};
///
/// # tokio_test::block_on(async {
/// let source = YouTubeClient::new(Box::new(http_client::native::NativeClient::new()), "key");
/// let session = SpotifySession::new("token".into(), "user".into());
/// let destination = SpotifyClient::new(Box::new(http_client::native::NativeClient::new()), session);
///
/// match transfer_playlist(&source, &destination, "PLxyz", "My playlist").await? {
///     TransferOutcome::Completed(report) => {
///         println!("{}/{} matched: {:?}", report.matched_count, report.total_count, report.playlist_url);
///     }
///     TransferOutcome::EmptySource => println!("Nothing to transfer"),
///     TransferOutcome::NoMatches { total_count } => println!("0/{total_count} matched"),
/// }
/// # Ok::<(), soundferry::TransferError>(())
/// # });
/// ```
pub async fn transfer_playlist<S, D>(
    source: &S,
    destination: &D,
    source_playlist_id: &str,
    playlist_name: &str,
) -> Result<TransferOutcome>
where
    S: SourceCatalog + ?Sized,
    D: DestinationCatalog + ?Sized,
{
    log::info!("Starting transfer of source playlist {source_playlist_id}");

    let mut items = PlaylistItemsIterator::new(source, source_playlist_id.to_string());
    let entries = items.collect_all().await?;

    if entries.is_empty() {
        log::info!("Source playlist {source_playlist_id} has no items");
        return Ok(TransferOutcome::EmptySource);
    }

    let total_count = entries.len();
    let normalized: Vec<PlaylistEntry> = entries.iter().map(PlaylistEntry::normalized).collect();

    let matches = match_all(destination, &normalized).await?;
    let track_uris: Vec<String> = matches
        .iter()
        .filter_map(|m| m.track_uri.clone())
        .collect();

    if track_uris.is_empty() {
        log::warn!("No destination matches among {total_count} source items");
        return Ok(TransferOutcome::NoMatches { total_count });
    }

    let matched_count = track_uris.len();
    let playlist = destination.create_playlist(playlist_name).await?;
    let committed = add_tracks_in_batches(destination, &playlist.id, &track_uris).await?;

    log::info!(
        "Transfer complete: {committed} of {total_count} source items added to {}",
        playlist.url
    );

    Ok(TransferOutcome::Completed(TransferReport {
        matched_count,
        total_count,
        playlist_url: Some(playlist.url),
    }))
}

/// Look up the best destination match for every entry, in order.
///
/// Produces one [`TrackMatch`] per entry with the same cardinality and order
/// as the input. Lookups run sequentially; the first failed lookup aborts.
pub async fn match_all<D>(destination: &D, entries: &[PlaylistEntry]) -> Result<Vec<TrackMatch>>
where
    D: DestinationCatalog + ?Sized,
{
    let mut matches = Vec::with_capacity(entries.len());
    for entry in entries {
        let track_uri = destination
            .find_best_match(&entry.title, &entry.artist)
            .await?;
        matches.push(TrackMatch {
            source_id: entry.source_id.clone(),
            track_uri,
        });
    }
    Ok(matches)
}
