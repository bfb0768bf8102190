//! Credential exchange against the destination's account service.
//!
//! The OAuth dance itself (consent page, browser redirect) is out of scope;
//! this module performs the single opaque exchange that turns an
//! authorization code plus client credentials into a usable
//! [`SpotifySession`], then reads the owner's profile so playlist creation
//! has a user id to scope to.

use crate::session::SpotifySession;
use crate::{Result, TransferError};

use base64::{engine::general_purpose, Engine as _};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::Deserialize;

/// Permissions requested from the destination: create/modify playlists and
/// read the owner's profile.
pub const DESTINATION_SCOPE: &str = "playlist-modify-public user-read-private";

/// Fixed redirect target registered with the destination application.
/// Not user-configurable.
pub const REDIRECT_URI: &str = "https://soundferry.app/callback";

const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Exchange an authorization code for an authenticated session.
///
/// Performs the token call with HTTP Basic client authentication, then
/// fetches the owner profile to capture the user id.
///
/// # Arguments
///
/// * `client` - Any HTTP client implementation
/// * `client_id` / `client_secret` - Destination application credentials
/// * `code` - Authorization code obtained from the consent page
///
/// # Errors
///
/// Returns [`TransferError::Auth`] when the exchange is rejected and
/// [`TransferError::DestinationUnavailable`] on transport failures.
pub async fn exchange_code(
    client: &dyn HttpClient,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<SpotifySession> {
    exchange_code_with_endpoints(
        client,
        client_id,
        client_secret,
        code,
        ACCOUNTS_BASE_URL,
        API_BASE_URL,
    )
    .await
}

/// [`exchange_code`] against custom endpoints, for tests.
pub async fn exchange_code_with_endpoints(
    client: &dyn HttpClient,
    client_id: &str,
    client_secret: &str,
    code: &str,
    accounts_base_url: &str,
    api_base_url: &str,
) -> Result<SpotifySession> {
    let token_url = format!("{accounts_base_url}/api/token");
    let mut request = Request::new(
        Method::Post,
        token_url
            .parse::<Url>()
            .map_err(|e| TransferError::Parse(e.to_string()))?,
    );

    let basic = format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"))
    );
    request.insert_header("Authorization", &basic);
    request.insert_header("Content-Type", "application/x-www-form-urlencoded");

    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", REDIRECT_URI),
    ];
    let form_string: String = form
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    request.set_body(form_string);

    let mut response = client
        .send(request)
        .await
        .map_err(|e| TransferError::DestinationUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        let body = response.body_string().await.unwrap_or_default();
        return Err(TransferError::Auth(format!(
            "token exchange returned {}: {body}",
            response.status()
        )));
    }

    let body = response
        .body_string()
        .await
        .map_err(|e| TransferError::Http(e.to_string()))?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| TransferError::Parse(e.to_string()))?;

    log::debug!("Token exchange succeeded, fetching owner profile");

    // The playlist-create endpoint is scoped to a user id, so resolve the
    // owner profile before handing the session out.
    let me_url = format!("{api_base_url}/me");
    let mut request = Request::new(
        Method::Get,
        me_url
            .parse::<Url>()
            .map_err(|e| TransferError::Parse(e.to_string()))?,
    );
    let bearer = format!("Bearer {}", token.access_token);
    request.insert_header("Authorization", &bearer);
    request.insert_header("Accept", "application/json");

    let mut response = client
        .send(request)
        .await
        .map_err(|e| TransferError::DestinationUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        let body = response.body_string().await.unwrap_or_default();
        return Err(TransferError::Auth(format!(
            "profile read returned {}: {body}",
            response.status()
        )));
    }

    let body = response
        .body_string()
        .await
        .map_err(|e| TransferError::Http(e.to_string()))?;
    let profile: Profile =
        serde_json::from_str(&body).map_err(|e| TransferError::Parse(e.to_string()))?;

    log::info!("Authenticated as destination user {}", profile.id);
    Ok(SpotifySession::with_base_url(
        token.access_token,
        profile.id,
        api_base_url.to_string(),
    ))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
}
