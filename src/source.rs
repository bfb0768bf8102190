//! Source catalog reader.
//!
//! Reads a playlist from the video-hosting platform's listing endpoint, one
//! page at a time, and maps each entry into a [`PlaylistEntry`]. The listing
//! is keyed by an API key (no user session) and paginated with an opaque
//! continuation token.

use crate::types::{PlaylistEntry, SourcePage, UNKNOWN_ARTIST, UNKNOWN_TITLE, UNKNOWN_VIDEO_ID};
use crate::{Result, TransferError};

use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::Deserialize;

/// Fixed page size for playlist listing requests.
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// Trait for source catalog operations that can be mocked for testing.
///
/// Only the single-page fetch crosses the network; iteration over the whole
/// playlist is layered on top by
/// [`PlaylistItemsIterator`](crate::PlaylistItemsIterator).
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait SourceCatalog {
    /// Fetch one page of playlist items.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The source playlist identifier
    /// * `page_token` - Continuation token from the previous page, or `None`
    ///   for the first page
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::SourceUnavailable`] when authentication or
    /// the listing call itself fails. An empty playlist is *not* an error;
    /// it yields a page with zero entries.
    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<SourcePage>;
}

/// Source catalog client for the YouTube Data v3 playlist listing endpoint.
///
/// # Examples
///
/// ```rust,no_run
/// use soundferry::{SourceCatalog, YouTubeClient};
///
/// # tokio_test::block_on(async {
/// let client = YouTubeClient::new(
///     Box::new(http_client::native::NativeClient::new()),
///     "api-key",
/// );
/// let page = client.playlist_items_page("PLxyz", None).await?;
/// println!("{} items on the first page", page.entries.len());
/// # Ok::<(), soundferry::TransferError>(())
/// # });
/// ```
pub struct YouTubeClient {
    client: Box<dyn HttpClient>,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Create a new [`YouTubeClient`] with the default API base URL.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `api_key` - API key for the listing endpoint
    pub fn new(client: Box<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(
            client,
            api_key,
            "https://www.googleapis.com/youtube/v3".to_string(),
        )
    }

    /// Create a new [`YouTubeClient`] with a custom base URL.
    ///
    /// This is useful for pointing the client at a local test server.
    pub fn with_base_url(
        client: Box<dyn HttpClient>,
        api_key: impl Into<String>,
        base_url: String,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url,
        }
    }
}

#[async_trait(?Send)]
impl SourceCatalog for YouTubeClient {
    async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<SourcePage> {
        let mut url = format!(
            "{}/playlistItems?part=snippet&maxResults={MAX_RESULTS_PER_PAGE}&playlistId={}&key={}",
            self.base_url,
            urlencoding::encode(playlist_id),
            urlencoding::encode(&self.api_key),
        );
        if let Some(token) = &page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        let mut request = Request::new(
            Method::Get,
            url.parse::<Url>()
                .map_err(|e| TransferError::Parse(e.to_string()))?,
        );
        request.insert_header("Accept", "application/json");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| TransferError::SourceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.body_string().await.unwrap_or_default();
            return Err(TransferError::SourceUnavailable(format!(
                "playlist listing returned {}: {body}",
                response.status()
            )));
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| TransferError::Http(e.to_string()))?;
        let listing: PlaylistItemsResponse =
            serde_json::from_str(&body).map_err(|e| TransferError::Parse(e.to_string()))?;

        let entries: Vec<PlaylistEntry> = listing
            .items
            .into_iter()
            .filter_map(|item| item.snippet)
            .map(PlaylistEntry::from)
            .collect();

        log::debug!(
            "Fetched {} entries from playlist {playlist_id} (next token: {:?})",
            entries.len(),
            listing.next_page_token
        );

        Ok(SourcePage {
            entries,
            next_page_token: listing.next_page_token,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<ListedItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListedItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    resource_id: Option<ResourceId>,
    video_owner_channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

impl From<Snippet> for PlaylistEntry {
    fn from(snippet: Snippet) -> Self {
        PlaylistEntry {
            title: snippet.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: snippet
                .video_owner_channel_title
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: None,
            source_id: snippet
                .resource_id
                .and_then(|r| r.video_id)
                .unwrap_or_else(|| UNKNOWN_VIDEO_ID.to_string()),
            duration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_mapping_applies_sentinels() {
        let listing: PlaylistItemsResponse = serde_json::from_str(
            r#"{
                "items": [
                    {"snippet": {"title": "Song", "resourceId": {"videoId": "v1"},
                                 "videoOwnerChannelTitle": "Channel"}},
                    {"snippet": {}}
                ],
                "nextPageToken": "tok"
            }"#,
        )
        .unwrap();

        let entries: Vec<PlaylistEntry> = listing
            .items
            .into_iter()
            .filter_map(|item| item.snippet)
            .map(PlaylistEntry::from)
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Song");
        assert_eq!(entries[0].source_id, "v1");
        assert_eq!(entries[0].artist, "Channel");
        assert_eq!(entries[1].title, UNKNOWN_TITLE);
        assert_eq!(entries[1].artist, UNKNOWN_ARTIST);
        assert_eq!(entries[1].source_id, UNKNOWN_VIDEO_ID);
        assert_eq!(listing.next_page_token.as_deref(), Some("tok"));
    }
}
