pub mod entities;
pub mod reader;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use entities::{Profile, ProfileEntity};
use glob::Pattern;
use thiserror::Error;
use tracing::{debug, instrument};

/// Location of the account record relative to the archive root.
pub const PROFILE_PATH: [&str; 2] = ["account", "user.json"];
/// Directory holding one subdirectory per channel.
pub const MESSAGES_DIR: &str = "messages";
/// Every channel directory contains a file with this name.
pub const MESSAGE_FILE_NAME: &str = "messages.json";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("{} is not a valid discord data archive", .0.display())]
    InvalidArchive(PathBuf),

    #[error("Failed to decode {}: {source}", path.display())]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Profile {} has neither a global name nor a username", .0.display())]
    MissingDisplayName(PathBuf),

    #[error("No messages found in {}", .0.display())]
    NoMessages(PathBuf),
}

/// An unpacked data archive that passed the layout check. Nothing except the existence of the
/// profile file and the messages directory is validated here.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    #[instrument]
    pub fn open(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root)
            .with_context(|| format!("Failed to resolve archive path {root:?}"))?;
        let archive = Self { root };

        let profile = archive.profile_path();
        let messages = archive.messages_dir();
        if !profile.exists() || !messages.exists() {
            debug!(?profile, ?messages, "Archive layout check failed");
            return Err(ArchiveError::InvalidArchive(archive.root).into());
        }

        Ok(archive)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_path(&self) -> PathBuf {
        PROFILE_PATH
            .iter()
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn messages_dir(&self) -> PathBuf {
        self.root.join(MESSAGES_DIR)
    }

    pub async fn load_profile(&self) -> Result<Profile> {
        let path = self.profile_path();
        let content = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read profile {path:?}"))?;
        let profile = serde_json::from_slice::<ProfileEntity>(&content)
            .map_err(|source| ArchiveError::MalformedFile {
                path: path.clone(),
                source,
            })?;
        let profile = profile
            .into_profile()
            .ok_or(ArchiveError::MissingDisplayName(path))?;
        Ok(profile)
    }

    /// Lazily walks the messages directory for every [MESSAGE_FILE_NAME], at any depth. The
    /// order of the results is unspecified.
    pub fn message_files(&self) -> Result<impl Iterator<Item = Result<PathBuf>>> {
        let escaped_dir = Pattern::escape(&self.messages_dir().to_string_lossy());
        let pattern = format!("{escaped_dir}/**/{MESSAGE_FILE_NAME}");
        debug!("Searching for messages with {pattern}");

        let paths = glob::glob(&pattern).context("Failed to glob message files")?;
        Ok(paths
            .map(|path| path.context("Failed to walk messages directory"))
            .filter(|path| path.as_ref().map_or(true, |path| path.is_file())))
    }
}
