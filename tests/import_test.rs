//! Import pipeline tests: comma-delimited file in, destination playlist out.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use soundferry::{
    import_playlist_csv, read_playlist_csv, DestinationCatalog, PlaylistHandle, Result,
    TransferOutcome, UNKNOWN_VIDEO_ID,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("soundferry-test-{}-{name}", std::process::id()))
}

/// Destination catalog fake with a title-keyed match table and call recording.
struct FakeDestination {
    matches: HashMap<String, String>,
    created: RefCell<Vec<String>>,
    added: RefCell<Vec<Vec<String>>>,
}

impl FakeDestination {
    fn new(matches: HashMap<String, String>) -> Self {
        Self {
            matches,
            created: RefCell::new(Vec::new()),
            added: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl DestinationCatalog for FakeDestination {
    async fn find_best_match(&self, title: &str, _artist: &str) -> Result<Option<String>> {
        Ok(self.matches.get(title).cloned())
    }

    async fn create_playlist(&self, name: &str) -> Result<PlaylistHandle> {
        self.created.borrow_mut().push(name.to_string());
        Ok(PlaylistHandle {
            id: "pl1".to_string(),
            url: "https://open.spotify.com/playlist/pl1".to_string(),
        })
    }

    async fn add_items(&self, _playlist_id: &str, track_uris: &[String]) -> Result<()> {
        self.added.borrow_mut().push(track_uris.to_vec());
        Ok(())
    }
}

#[test]
fn test_read_cleans_title_and_artist() {
    let path = temp_path("import-read.csv");
    fs::write(
        &path,
        "Title,Artist,Album,Video ID,Duration\n\
         Song One (Official Video),Artist One - Topic,Album,v1,3:41\n\
         Song Two,Artist Two,,v2,\n",
    )
    .unwrap();

    let entries = read_playlist_csv(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Song One");
    assert_eq!(entries[0].artist, "Artist One");
    assert_eq!(entries[0].album.as_deref(), Some("Album"));
    assert_eq!(entries[0].source_id, "v1");
    assert_eq!(entries[0].duration.as_deref(), Some("3:41"));
    assert_eq!(entries[1].album, None);
    assert_eq!(entries[1].duration, None);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_read_accepts_two_column_file() {
    let path = temp_path("import-two-col.csv");
    fs::write(&path, "Title,Artist\nSong,Artist Name\n").unwrap();

    let entries = read_playlist_csv(&path).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Song");
    assert_eq!(entries[0].artist, "Artist Name");
    assert_eq!(entries[0].source_id, UNKNOWN_VIDEO_ID);

    fs::remove_file(&path).unwrap();
}

#[test_log::test(tokio::test)]
async fn test_import_matches_and_commits_in_file_order() {
    let path = temp_path("import-commit.csv");
    fs::write(
        &path,
        "Title,Artist,Album,Video ID,Duration\n\
         Song One (Official Video),Artist One,,v1,\n\
         Obscure B-Side,Artist Two,,v2,\n\
         Song Three,Artist Three,,v3,\n",
    )
    .unwrap();

    // Keyed by the cleaned title, so a hit proves normalization ran on read.
    let destination = FakeDestination::new(HashMap::from([
        ("Song One".to_string(), "spotify:track:1".to_string()),
        ("Song Three".to_string(), "spotify:track:3".to_string()),
    ]));

    let outcome = import_playlist_csv(&destination, &path, "My CSV Playlist")
        .await
        .unwrap();

    match outcome {
        TransferOutcome::Completed(report) => {
            assert_eq!(report.matched_count, 2);
            assert_eq!(report.total_count, 3);
            assert_eq!(
                report.playlist_url.as_deref(),
                Some("https://open.spotify.com/playlist/pl1")
            );
        }
        other => panic!("expected Completed, got {other:?}"),
    }

    assert_eq!(
        *destination.created.borrow(),
        vec!["My CSV Playlist".to_string()]
    );
    let added: Vec<String> = destination.added.borrow().concat();
    assert_eq!(
        added,
        vec!["spotify:track:1".to_string(), "spotify:track:3".to_string()]
    );

    fs::remove_file(&path).unwrap();
}

#[test_log::test(tokio::test)]
async fn test_import_header_only_file_is_empty_source() {
    let path = temp_path("import-empty.csv");
    fs::write(&path, "Title,Artist,Album,Video ID,Duration\n").unwrap();

    let destination = FakeDestination::new(HashMap::new());
    let outcome = import_playlist_csv(&destination, &path, "My CSV Playlist")
        .await
        .unwrap();

    assert_eq!(outcome, TransferOutcome::EmptySource);
    assert!(destination.created.borrow().is_empty());
    assert!(destination.added.borrow().is_empty());

    fs::remove_file(&path).unwrap();
}

#[test_log::test(tokio::test)]
async fn test_import_no_matches_creates_nothing() {
    let path = temp_path("import-no-match.csv");
    fs::write(
        &path,
        "Title,Artist,Album,Video ID,Duration\nUnmatched,Artist,,v1,\n",
    )
    .unwrap();

    let destination = FakeDestination::new(HashMap::new());
    let outcome = import_playlist_csv(&destination, &path, "My CSV Playlist")
        .await
        .unwrap();

    assert_eq!(outcome, TransferOutcome::NoMatches { total_count: 1 });
    assert!(destination.created.borrow().is_empty());

    fs::remove_file(&path).unwrap();
}

#[test_log::test(tokio::test)]
async fn test_import_missing_file_is_an_error() {
    let destination = FakeDestination::new(HashMap::new());
    let err = import_playlist_csv(&destination, &temp_path("import-absent.csv"), "P")
        .await
        .unwrap_err();

    assert!(matches!(err, soundferry::TransferError::Csv(_)));
    assert!(destination.created.borrow().is_empty());
}
