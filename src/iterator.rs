use crate::source::SourceCatalog;
use crate::types::PlaylistEntry;
use crate::Result;

use async_trait::async_trait;

/// Async iterator trait for paginated catalog data.
///
/// This trait provides a common interface for iterating over paginated data
/// from a remote catalog. Implementations stream items page by page,
/// advancing an internal cursor as needed; the resulting sequence is lazy,
/// finite, and not restartable (re-iteration means re-fetching).
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new pages as
    /// needed. Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or parsing error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    ///
    /// **Warning**: This method will fetch ALL remaining pages, which could
    /// be many requests for large playlists. Use [`take`](Self::take) for
    /// bounded collection.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    ///
    /// # Arguments
    ///
    /// * `n` - Maximum number of items to collect
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn pages_fetched(&self) -> u32;
}

/// Iterator over the entries of a source playlist.
///
/// Drives [`SourceCatalog::playlist_items_page`] with the continuation token
/// returned by each page until the token is absent. Entries are yielded in
/// the source catalog's native listing order.
///
/// # Examples
///
/// ```rust,no_run
/// use soundferry::{AsyncPaginatedIterator, PlaylistItemsIterator, YouTubeClient};
///
/// # tokio_test::block_on(async {
/// let client = YouTubeClient::new(
///     Box::new(http_client::native::NativeClient::new()),
///     "api-key",
/// );
/// let mut items = PlaylistItemsIterator::new(&client, "PLxyz".to_string());
/// while let Some(entry) = items.next().await? {
///     println!("{} - {}", entry.artist, entry.title);
/// }
/// # Ok::<(), soundferry::TransferError>(())
/// # });
/// ```
pub struct PlaylistItemsIterator<'a, C: SourceCatalog + ?Sized> {
    client: &'a C,
    playlist_id: String,
    next_token: Option<String>,
    buffer: Vec<PlaylistEntry>,
    pages_fetched: u32,
    finished: bool,
}

#[async_trait(?Send)]
impl<C: SourceCatalog + ?Sized> AsyncPaginatedIterator<PlaylistEntry>
    for PlaylistItemsIterator<'_, C>
{
    async fn next(&mut self) -> Result<Option<PlaylistEntry>> {
        // A page may legitimately be empty while a continuation token
        // remains, so keep fetching until the buffer fills or pages run out.
        while self.buffer.is_empty() {
            if self.finished {
                return Ok(None);
            }

            log::debug!(
                "Fetching page {} of playlist {} (token: {:?})",
                self.pages_fetched + 1,
                self.playlist_id,
                self.next_token
            );

            let page = self
                .client
                .playlist_items_page(&self.playlist_id, self.next_token.clone())
                .await?;

            self.pages_fetched += 1;
            self.next_token = page.next_page_token;
            if self.next_token.is_none() {
                self.finished = true;
            }

            self.buffer = page.entries;
            self.buffer.reverse(); // Reverse so we can pop from end efficiently
        }

        Ok(self.buffer.pop())
    }

    fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}

impl<'a, C: SourceCatalog + ?Sized> PlaylistItemsIterator<'a, C> {
    /// Create a new playlist items iterator starting from the first page.
    pub fn new(client: &'a C, playlist_id: String) -> Self {
        Self {
            client,
            playlist_id,
            next_token: None,
            buffer: Vec::new(),
            pages_fetched: 0,
            finished: false,
        }
    }
}
