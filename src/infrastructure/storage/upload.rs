use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{ScratchFile, ScratchStore};

/// Streams `stream` into a new file at `path`, returning the byte count.
///
/// A failing stream leaves no partial file behind.
pub async fn write_stream(
    path: &Path,
    stream: BoxStream<'_, Result<Bytes, io::Error>>,
) -> Result<u64, io::Error> {
    let file = tokio::fs::File::create(path).await?;
    match copy_into(file, stream).await {
        Ok(total) => Ok(total),
        Err(e) => {
            let _ = tokio::fs::remove_file(path).await;
            Err(e)
        }
    }
}

async fn copy_into(
    mut file: tokio::fs::File,
    mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
) -> Result<u64, io::Error> {
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes += bytes.len() as u64;
        file.write_all(&bytes).await?;
    }
    file.flush().await?;
    Ok(total_bytes)
}

/// An uploaded file kept in a scratch directory for the duration of one request.
///
/// The file is removed when the value is dropped, whichever way the request ends.
#[derive(Debug)]
pub struct TempUpload {
    path: TempPath,
    size_bytes: u64,
}

impl ScratchFile for TempUpload {
    fn path(&self) -> &Path {
        &self.path
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Scratch uploads as prefixed temporary files in one directory.
#[derive(Debug, Clone)]
pub struct TempScratchStore {
    dir: PathBuf,
    prefix: String,
}

impl TempScratchStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl ScratchStore for TempScratchStore {
    async fn receive(
        &self,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<Box<dyn ScratchFile>, io::Error> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let (file, path) = tempfile::Builder::new()
            .prefix(&self.prefix)
            .tempfile_in(&self.dir)?
            .into_parts();
        let size_bytes = copy_into(tokio::fs::File::from_std(file), stream).await?;
        Ok(Box::new(TempUpload { path, size_bytes }))
    }
}
