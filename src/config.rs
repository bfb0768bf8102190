//! Request-scoped transfer configuration.
//!
//! Credentials travel through the call chain as an explicit
//! [`TransferConfig`] value; nothing in the library reads shared mutable
//! state. The optional on-disk copy exists only so the CLI can pre-fill the
//! next invocation. It is overwritten wholesale on save (last writer wins,
//! no locking) — acceptable for one interactive user at a time.

use crate::{Result, TransferError};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Credentials for one transfer or export request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferConfig {
    /// API key for the source catalog's listing endpoint
    pub source_api_key: String,
    /// Destination application client id
    pub destination_client_id: String,
    /// Destination application client secret
    pub destination_client_secret: String,
}

impl TransferConfig {
    /// Get the saved-config path using XDG directories.
    ///
    /// Returns a path like: `~/.config/soundferry/config.json`
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TransferError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "cannot determine XDG config directory",
            ))
        })?;
        Ok(config_dir.join("soundferry").join("config.json"))
    }

    /// Save this configuration for pre-filling the next run.
    ///
    /// Creates the directory structure if needed and overwrites any
    /// previously saved configuration.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TransferError::Parse(e.to_string()))?;
        fs::write(&path, json)?;

        log::debug!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Load a previously saved configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let json = fs::read_to_string(&path)?;
        let config =
            serde_json::from_str(&json).map_err(|e| TransferError::Parse(e.to_string()))?;

        log::debug!("Configuration loaded from: {}", path.display());
        Ok(config)
    }

    /// Check if a saved configuration exists.
    pub fn exists() -> bool {
        match Self::config_path() {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }

    /// True when every field needed for a full transfer is present.
    pub fn is_complete(&self) -> bool {
        !self.source_api_key.is_empty()
            && !self.destination_client_id.is_empty()
            && !self.destination_client_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        let empty = TransferConfig::default();
        assert!(!empty.is_complete());

        let full = TransferConfig {
            source_api_key: "key".to_string(),
            destination_client_id: "id".to_string(),
            destination_client_secret: "secret".to_string(),
        };
        assert!(full.is_complete());
    }

    #[test]
    fn test_round_trip_json() {
        let config = TransferConfig {
            source_api_key: "key".to_string(),
            destination_client_id: "id".to_string(),
            destination_client_secret: "secret".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: TransferConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.source_api_key, config.source_api_key);
        assert_eq!(restored.destination_client_id, config.destination_client_id);
        assert_eq!(
            restored.destination_client_secret,
            config.destination_client_secret
        );
    }
}
