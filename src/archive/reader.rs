use std::{future, path::PathBuf};

use anyhow::{Context, Result};
use futures::{stream, Stream, StreamExt};
use tracing::{debug, error};

use super::{entities::MessageEntity, ArchiveError};

/// Reads every message file in order and flattens their records into a single stream. A file that
/// can't be read or decoded ends up as an error item, nothing is skipped.
pub fn read_messages(
    files: impl Iterator<Item = Result<PathBuf>>,
) -> impl Stream<Item = Result<MessageEntity>> {
    stream::iter(files)
        .then(|file| async move {
            let path = file?;
            read_message_file(path).await
        })
        .flat_map(|data| match data {
            Ok(data) => stream::iter(data).map(Ok).boxed(),
            Err(e) => {
                error!("Failed to process message file {e:?}");
                stream::once(future::ready(Err(e))).boxed()
            }
        })
}

async fn read_message_file(path: PathBuf) -> Result<Vec<MessageEntity>> {
    debug!("Extracting {path:?}");
    let content = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read message file {path:?}"))?;
    let messages = serde_json::from_slice::<Vec<MessageEntity>>(&content)
        .map_err(|source| ArchiveError::MalformedFile { path, source })?;
    Ok(messages)
}
