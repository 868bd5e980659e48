use std::io;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// A request-scoped file, deleted when dropped.
pub trait ScratchFile: Send + Sync {
    fn path(&self) -> &Path;

    fn size_bytes(&self) -> u64;
}

#[async_trait]
pub trait ScratchStore: Send + Sync {
    async fn receive(
        &self,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<Box<dyn ScratchFile>, io::Error>;
}
