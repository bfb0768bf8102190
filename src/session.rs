use serde::{Deserialize, Serialize};

/// Serializable destination session state.
///
/// This is the opaque session handle produced by the credential exchange:
/// a bearer token plus the owner id that playlist creation is scoped to.
/// Immutable once captured; a new transfer run performs a new exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySession {
    /// Bearer token for authenticated requests
    pub access_token: String,
    /// The authenticated user's id (playlist owner)
    pub user_id: String,
    /// Base URL for the destination API
    pub base_url: String,
}

impl SpotifySession {
    /// Create a new session with the default API base URL.
    pub fn new(access_token: String, user_id: String) -> Self {
        Self::with_base_url(access_token, user_id, "https://api.spotify.com/v1".to_string())
    }

    /// Create a new session against a custom API base URL.
    ///
    /// Useful for pointing the client at a local test server.
    pub fn with_base_url(access_token: String, user_id: String, base_url: String) -> Self {
        Self {
            access_token,
            user_id,
            base_url,
        }
    }

    /// Check if this session appears to be usable.
    ///
    /// This performs basic validation but doesn't guarantee the token is
    /// still accepted by the server.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.user_id.is_empty()
    }

    /// Serialize session to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize session from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
