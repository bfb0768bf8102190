use clap::{Parser, Subcommand};
use std::path::PathBuf;

use soundferry::{
    auth, export_playlist_csv, import_playlist_csv, transfer_playlist, AsyncPaginatedIterator,
    ExportOutcome, PlaylistItemsIterator, Result, SpotifyClient, TransferConfig, TransferOutcome,
    YouTubeClient,
};

/// Playlist migration tool: YouTube playlist in, Spotify playlist (or CSV) out
#[derive(Parser)]
#[command(
    name = "soundferry",
    about = "Migrate a YouTube playlist to Spotify, or export it to CSV",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match every playlist item against Spotify and commit the matches to a
    /// new private playlist
    Transfer {
        /// Source playlist identifier
        playlist_id: String,

        /// Name for the created destination playlist
        #[arg(long, default_value = "Imported playlist")]
        name: String,

        /// Authorization code from the destination's consent page
        #[arg(long)]
        code: String,
    },

    /// Export the playlist to a comma-delimited file instead of transferring
    Export {
        /// Source playlist identifier
        playlist_id: String,

        /// Output file path
        #[arg(long, default_value = "exported_playlist.csv")]
        output: PathBuf,
    },

    /// Import a previously exported file: match its rows against Spotify and
    /// commit the matches to a new playlist
    Import {
        /// Path to the comma-delimited file
        csv_path: PathBuf,

        /// Name for the created destination playlist
        #[arg(long, default_value = "My CSV Playlist")]
        name: String,

        /// Authorization code from the destination's consent page
        #[arg(long)]
        code: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Enable debug logging if verbose flag is set
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
        println!("🔍 Verbose mode enabled");
    } else {
        env_logger::init();
    }

    let config = resolve_config();

    // Remember the resolved credentials so the next run can pre-fill them.
    if let Err(e) = config.save() {
        log::warn!("Could not save configuration: {e}");
    }

    // Single catch boundary: every pipeline failure ends as a logged,
    // user-facing message and a nonzero exit, never a panic.
    if let Err(e) = run(args.command, &config).await {
        log::error!("Command failed: {e}");
        eprintln!("❌ {e}");
        if matches!(e, soundferry::TransferError::Auth(_)) {
            eprintln!();
            eprintln!("Credentials come from these environment variables (values from");
            eprintln!("a previous run are reused automatically; only the ones you want");
            eprintln!("to change need to be set):");
            eprintln!("  SOUNDFERRY_YOUTUBE_API_KEY=your_api_key");
            eprintln!("  SOUNDFERRY_SPOTIFY_CLIENT_ID=your_client_id");
            eprintln!("  SOUNDFERRY_SPOTIFY_CLIENT_SECRET=your_client_secret");
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &TransferConfig) -> Result<()> {
    match command {
        Commands::Transfer {
            playlist_id,
            name,
            code,
        } => {
            let source = source_client(config)?;
            let destination = destination_client(config, &code).await?;
            let outcome = transfer_playlist(&source, &destination, &playlist_id, &name).await?;
            print_transfer_outcome(outcome);
        }

        Commands::Export {
            playlist_id,
            output,
        } => {
            let source = source_client(config)?;
            let mut items = PlaylistItemsIterator::new(&source, playlist_id);
            let entries = items.collect_all().await?;

            match export_playlist_csv(&entries, &output)? {
                ExportOutcome::Written { path, rows } => {
                    println!("✅ Exported {rows} items to {}", path.display());
                }
                ExportOutcome::EmptySource => {
                    println!("ℹ️  No items found in the source playlist; no file was written.");
                }
            }
        }

        Commands::Import {
            csv_path,
            name,
            code,
        } => {
            let destination = destination_client(config, &code).await?;
            let outcome = import_playlist_csv(&destination, &csv_path, &name).await?;
            print_transfer_outcome(outcome);
        }
    }

    Ok(())
}

fn source_client(config: &TransferConfig) -> Result<YouTubeClient> {
    if config.source_api_key.is_empty() {
        return Err(soundferry::TransferError::Auth(
            "no source API key configured".to_string(),
        ));
    }
    Ok(YouTubeClient::new(
        Box::new(http_client::native::NativeClient::new()),
        config.source_api_key.clone(),
    ))
}

async fn destination_client(config: &TransferConfig, code: &str) -> Result<SpotifyClient> {
    if config.destination_client_id.is_empty() || config.destination_client_secret.is_empty() {
        return Err(soundferry::TransferError::Auth(
            "destination client id/secret not configured".to_string(),
        ));
    }

    let http = http_client::native::NativeClient::new();
    let session = auth::exchange_code(
        &http,
        &config.destination_client_id,
        &config.destination_client_secret,
        code,
    )
    .await?;
    Ok(SpotifyClient::new(
        Box::new(http_client::native::NativeClient::new()),
        session,
    ))
}

fn print_transfer_outcome(outcome: TransferOutcome) {
    match outcome {
        TransferOutcome::Completed(report) => {
            println!(
                "✅ Transferred {} of {} items",
                report.matched_count, report.total_count
            );
            if let Some(url) = report.playlist_url {
                println!("   Playlist: {url}");
            }
        }
        TransferOutcome::EmptySource => {
            println!("ℹ️  No items found in the source; nothing was created.");
        }
        TransferOutcome::NoMatches { total_count } => {
            println!(
                "ℹ️  None of the {total_count} items matched on the destination; nothing was created."
            );
        }
    }
}

/// Resolve credentials from the environment, falling back to the saved
/// configuration from a previous run. Whether the result is sufficient
/// depends on the command, so completeness is checked per client.
fn resolve_config() -> TransferConfig {
    let mut config = if TransferConfig::exists() {
        TransferConfig::load().unwrap_or_default()
    } else {
        TransferConfig::default()
    };

    if let Ok(key) = std::env::var("SOUNDFERRY_YOUTUBE_API_KEY") {
        config.source_api_key = key;
    }
    if let Ok(id) = std::env::var("SOUNDFERRY_SPOTIFY_CLIENT_ID") {
        config.destination_client_id = id;
    }
    if let Ok(secret) = std::env::var("SOUNDFERRY_SPOTIFY_CLIENT_SECRET") {
        config.destination_client_secret = secret;
    }

    config
}
