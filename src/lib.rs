pub mod auth;
pub mod commit;
pub mod config;
pub mod destination;
pub mod error;
pub mod export;
pub mod import;
pub mod iterator;
pub mod normalize;
pub mod session;
pub mod source;
pub mod transfer;
pub mod types;

pub use commit::{add_tracks_in_batches, MAX_TRACKS_PER_ADD};
pub use config::TransferConfig;
pub use destination::{DestinationCatalog, SpotifyClient};
pub use error::TransferError;
pub use export::{export_playlist_csv, CSV_HEADER};
pub use import::{import_playlist_csv, read_playlist_csv};
pub use iterator::{AsyncPaginatedIterator, PlaylistItemsIterator};
pub use normalize::{normalize, normalize_str};
pub use session::SpotifySession;
pub use source::{SourceCatalog, YouTubeClient, MAX_RESULTS_PER_PAGE};
pub use transfer::{match_all, transfer_playlist};
pub use types::{
    ExportOutcome, PlaylistEntry, PlaylistHandle, SourcePage, TrackMatch, TransferOutcome,
    TransferReport, UNKNOWN_ARTIST, UNKNOWN_TITLE, UNKNOWN_VIDEO_ID,
};

#[cfg(feature = "mock")]
pub use destination::MockDestinationCatalog;
#[cfg(feature = "mock")]
pub use source::MockSourceCatalog;

pub type Result<T> = std::result::Result<T, TransferError>;
