use thiserror::Error;

/// Error types for playlist transfer operations.
///
/// This enum covers the hard failures that can occur while reading the source
/// catalog, matching against the destination catalog, or committing tracks.
/// Soft outcomes — an empty source playlist or zero successful matches — are
/// not errors; they are reported as [`TransferOutcome`](crate::TransferOutcome)
/// variants so callers can distinguish "nothing to do" from "something broke".
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use soundferry::{SpotifyClient, SpotifySession, TransferError, DestinationCatalog};
///
/// #[tokio::main]
/// async fn main() {
///     let session = SpotifySession::new("token".into(), "user".into());
///     let client = SpotifyClient::new(Box::new(http_client::native::NativeClient::new()), session);
///
///     match client.find_best_match("Karma Police", "Radiohead").await {
///         Ok(Some(uri)) => println!("Matched: {uri}"),
///         Ok(None) => println!("No match found"),
///         Err(TransferError::Auth(msg)) => eprintln!("Authentication failed: {msg}"),
///         Err(TransferError::DestinationUnavailable(msg)) => {
///             eprintln!("Destination catalog unreachable: {msg}");
///         }
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum TransferError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source catalog could not be read.
    ///
    /// Raised when the playlist listing call itself fails — bad API key,
    /// unknown playlist, or a transport failure. Never used for an empty
    /// playlist, which is a soft outcome.
    #[error("Source catalog unavailable: {0}")]
    SourceUnavailable(String),

    /// The destination catalog rejected or failed a request.
    ///
    /// Raised by search, playlist creation, and add-items calls. A search
    /// that succeeds but finds nothing is *not* this error; it returns
    /// `Ok(None)`.
    #[error("Destination catalog unavailable: {0}")]
    DestinationUnavailable(String),

    /// Authentication failures.
    ///
    /// This occurs when the credential exchange is rejected or a session
    /// token has expired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Failed to parse a catalog response.
    ///
    /// This can happen when a service changes its response shape or returns
    /// unexpected data.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A commit chunk failed after earlier chunks succeeded.
    ///
    /// `committed` is the exact cumulative count of tracks from
    /// fully-succeeded chunks. Already-committed chunks are not rolled back,
    /// so the destination playlist may be left partially populated.
    #[error("Commit failed after {committed} tracks were added: {reason}")]
    CommitPartialFailure {
        /// Number of tracks successfully committed before the failing chunk
        committed: usize,
        /// Description of the failing chunk call
        reason: String,
    },

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV errors from the tabular exporter and importer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
