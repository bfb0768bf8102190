#[cfg(feature = "mock")]
mod mock_tests {
    use soundferry::{
        transfer_playlist, MockDestinationCatalog, MockSourceCatalog, PlaylistEntry,
        PlaylistHandle, Result, SourcePage, TransferOutcome,
    };

    fn entry(title: &str, artist: &str, source_id: &str) -> PlaylistEntry {
        PlaylistEntry {
            title: title.to_string(),
            artist: artist.to_string(),
            album: None,
            source_id: source_id.to_string(),
            duration: None,
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_mock_empty_source_short_circuits() -> Result<()> {
        let mut source = MockSourceCatalog::new();
        source
            .expect_playlist_items_page()
            .times(1)
            .returning(|_, _| {
                Ok(SourcePage {
                    entries: vec![],
                    next_page_token: None,
                })
            });

        // Neither playlist creation nor commit may be attempted.
        let mut destination = MockDestinationCatalog::new();
        destination.expect_find_best_match().times(0);
        destination.expect_create_playlist().times(0);
        destination.expect_add_items().times(0);

        let outcome = transfer_playlist(&source, &destination, "PL1", "Imported").await?;
        assert_eq!(outcome, TransferOutcome::EmptySource);

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_mock_matcher_receives_normalized_query() -> Result<()> {
        let mut source = MockSourceCatalog::new();
        source
            .expect_playlist_items_page()
            .withf(|playlist_id, page_token| playlist_id == "PL1" && page_token.is_none())
            .times(1)
            .returning(|_, _| {
                Ok(SourcePage {
                    entries: vec![entry(
                        "Karma Police (Official Music Video)",
                        "Radiohead - Topic",
                        "v1",
                    )],
                    next_page_token: None,
                })
            });

        let mut destination = MockDestinationCatalog::new();
        destination
            .expect_find_best_match()
            .withf(|title, artist| title == "Karma Police" && artist == "Radiohead")
            .times(1)
            .returning(|_, _| Ok(Some("spotify:track:kp".to_string())));
        destination
            .expect_create_playlist()
            .withf(|name| name == "Imported")
            .times(1)
            .returning(|_| {
                Ok(PlaylistHandle {
                    id: "pl1".to_string(),
                    url: "https://open.spotify.com/playlist/pl1".to_string(),
                })
            });
        destination
            .expect_add_items()
            .withf(|playlist_id, uris| {
                playlist_id == "pl1" && uris.len() == 1 && uris[0] == "spotify:track:kp"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = transfer_playlist(&source, &destination, "PL1", "Imported").await?;
        match outcome {
            TransferOutcome::Completed(report) => {
                assert_eq!(report.matched_count, 1);
                assert_eq!(report.total_count, 1);
                assert!(report.playlist_url.is_some());
            }
            other => panic!("expected Completed, got {other:?}"),
        }

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_mock_no_matches_creates_nothing() -> Result<()> {
        let mut source = MockSourceCatalog::new();
        source
            .expect_playlist_items_page()
            .times(1)
            .returning(|_, _| {
                Ok(SourcePage {
                    entries: vec![entry("Song A", "Artist", "v1"), entry("Song B", "Artist", "v2")],
                    next_page_token: None,
                })
            });

        let mut destination = MockDestinationCatalog::new();
        destination
            .expect_find_best_match()
            .times(2)
            .returning(|_, _| Ok(None));
        destination.expect_create_playlist().times(0);
        destination.expect_add_items().times(0);

        let outcome = transfer_playlist(&source, &destination, "PL1", "Imported").await?;
        assert_eq!(outcome, TransferOutcome::NoMatches { total_count: 2 });

        Ok(())
    }
}
