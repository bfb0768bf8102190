//! Destination catalog client: track matching and playlist management.
//!
//! The matcher issues one structured search per item and keeps only the
//! top-ranked result; a miss is a normal outcome, not an error. Playlist
//! creation and the chunked add-items call live behind the same trait so the
//! whole destination side can be mocked in tests.

use crate::session::SpotifySession;
use crate::types::PlaylistHandle;
use crate::{Result, TransferError};

use async_trait::async_trait;
use http_client::{HttpClient, Request, Response};
use http_types::{Method, Url};
use serde::Deserialize;

/// Trait for destination catalog operations that can be mocked for testing.
///
/// All methods that cross the network are included so the orchestrator and
/// committer can be exercised end to end against a mock.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait DestinationCatalog {
    /// Find the best destination match for a normalized (title, artist) pair.
    ///
    /// Builds a query constraining both the track-title and artist fields and
    /// requests exactly one top-ranked result.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(uri))` - The first result's opaque track identifier
    /// - `Ok(None)` - The search succeeded but returned no candidate; this is
    ///   a normal outcome that the orchestrator counts and reports
    /// - `Err(...)` - The search call itself failed
    ///
    /// There is no retry and no re-query with relaxed terms on a miss.
    async fn find_best_match(&self, title: &str, artist: &str) -> Result<Option<String>>;

    /// Create a new (private) playlist owned by the session user.
    ///
    /// Returns the playlist identifier and its shareable URL.
    async fn create_playlist(&self, name: &str) -> Result<PlaylistHandle>;

    /// Add a chunk of track URIs to a playlist, preserving order.
    ///
    /// Callers must respect the destination's batch-size limit; the
    /// committer in [`crate::commit`] handles the chunking.
    async fn add_items(&self, playlist_id: &str, track_uris: &[String]) -> Result<()>;
}

/// Destination catalog client for the Spotify Web API.
///
/// Holds an immutable [`SpotifySession`] captured by the credential exchange
/// and an HTTP client implementation.
pub struct SpotifyClient {
    client: Box<dyn HttpClient>,
    session: SpotifySession,
}

impl SpotifyClient {
    /// Create a new [`SpotifyClient`] from an authenticated session.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `session` - Session handle from [`crate::auth::exchange_code`]
    pub fn new(client: Box<dyn HttpClient>, session: SpotifySession) -> Self {
        Self { client, session }
    }

    /// The session this client was built with.
    pub fn session(&self) -> &SpotifySession {
        &self.session
    }

    fn request(&self, method: Method, url: &str) -> Result<Request> {
        let mut request = Request::new(
            method,
            url.parse::<Url>()
                .map_err(|e| TransferError::Parse(e.to_string()))?,
        );
        let bearer = format!("Bearer {}", self.session.access_token);
        request.insert_header("Authorization", &bearer);
        request.insert_header("Accept", "application/json");
        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| TransferError::DestinationUnavailable(e.to_string()))?;

        if response.status() == 401 || response.status() == 403 {
            let body = response.body_string().await.unwrap_or_default();
            return Err(TransferError::Auth(format!(
                "destination returned {}: {body}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            let body = response.body_string().await.unwrap_or_default();
            return Err(TransferError::DestinationUnavailable(format!(
                "destination returned {}: {body}",
                response.status()
            )));
        }

        Ok(response)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(&self, response: &mut Response) -> Result<T> {
        let body = response
            .body_string()
            .await
            .map_err(|e| TransferError::Http(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| TransferError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl DestinationCatalog for SpotifyClient {
    async fn find_best_match(&self, title: &str, artist: &str) -> Result<Option<String>> {
        let query = format!("track:{title} artist:{artist}");
        let url = format!(
            "{}/search?q={}&type=track&limit=1",
            self.session.base_url,
            urlencoding::encode(&query),
        );

        log::info!("Searching destination catalog for '{title}' by '{artist}'");
        let request = self.request(Method::Get, &url)?;
        let mut response = self.send(request).await?;
        let results: SearchResponse = self.body_json(&mut response).await?;

        match results
            .tracks
            .and_then(|t| t.items.into_iter().next())
            .map(|t| t.uri)
        {
            Some(uri) => {
                log::debug!("Found track URI: {uri}");
                Ok(Some(uri))
            }
            None => {
                log::warn!("Track not found: '{title}' by '{artist}'");
                Ok(None)
            }
        }
    }

    async fn create_playlist(&self, name: &str) -> Result<PlaylistHandle> {
        let url = format!(
            "{}/users/{}/playlists",
            self.session.base_url,
            urlencoding::encode(&self.session.user_id),
        );

        let mut request = self.request(Method::Post, &url)?;
        request.insert_header("Content-Type", "application/json");
        request.set_body(
            serde_json::json!({ "name": name, "public": false }).to_string(),
        );

        let mut response = self.send(request).await?;
        let created: CreatedPlaylist = self.body_json(&mut response).await?;

        log::info!(
            "Created destination playlist {} ({})",
            created.id,
            created.external_urls.spotify
        );
        Ok(PlaylistHandle {
            id: created.id,
            url: created.external_urls.spotify,
        })
    }

    async fn add_items(&self, playlist_id: &str, track_uris: &[String]) -> Result<()> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.session.base_url,
            urlencoding::encode(playlist_id),
        );

        let mut request = self.request(Method::Post, &url)?;
        request.insert_header("Content-Type", "application/json");
        request.set_body(serde_json::json!({ "uris": track_uris }).to_string());

        self.send(request).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackList>,
}

#[derive(Debug, Deserialize)]
struct TrackList {
    #[serde(default)]
    items: Vec<FoundTrack>,
}

#[derive(Debug, Deserialize)]
struct FoundTrack {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylist {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_first_item() {
        let results: SearchResponse = serde_json::from_str(
            r#"{"tracks": {"items": [{"uri": "spotify:track:abc"}, {"uri": "spotify:track:def"}]}}"#,
        )
        .unwrap();
        let uri = results
            .tracks
            .and_then(|t| t.items.into_iter().next())
            .map(|t| t.uri);
        assert_eq!(uri.as_deref(), Some("spotify:track:abc"));
    }

    #[test]
    fn test_search_response_no_results() {
        let results: SearchResponse =
            serde_json::from_str(r#"{"tracks": {"items": []}}"#).unwrap();
        let uri = results
            .tracks
            .and_then(|t| t.items.into_iter().next())
            .map(|t| t.uri);
        assert!(uri.is_none());
    }
}
